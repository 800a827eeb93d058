//! # Entry Point
//!
//! Decodes the inputs named by a [`StegConfig`], runs the selected transform
//! and writes the PNG result. The PNG is fully encoded before any output is
//! produced, and file output is renamed into place only once complete, so a
//! failed run never leaves a partial file behind.

use anyhow::Result;
use image::GrayImage;
use std::io;

use crate::common::config::{Mode, Output, StegConfig};
use crate::processing::{codec, steganography};

/// Decode the inputs for `mode` and produce the resulting image.
pub fn process(mode: &Mode) -> Result<GrayImage> {
    match mode {
        Mode::Extract { mixed } => {
            let mixed = codec::open_image(mixed)?;
            Ok(steganography::extract_image(&mixed))
        }
        Mode::Combine { carrier, secret } => {
            let carrier = codec::open_image(carrier)?;
            let secret = codec::open_image(secret)?;
            steganography::combine_images(&carrier, &secret)
        }
    }
}

/// Run one steg invocation end to end.
pub fn run(config: &StegConfig) -> Result<()> {
    let img = process(&config.mode)?;

    match &config.output {
        Output::Stdout => {
            codec::write_png(&img, io::stdout().lock())?;
            log::info!("Wrote {}x{} PNG to stdout", img.width(), img.height());
        }
        Output::File(path) => {
            codec::save_png(&img, path)?;
            log::info!(
                "Wrote {}x{} PNG to {}",
                img.width(),
                img.height(),
                path.display()
            );
        }
    }

    Ok(())
}
