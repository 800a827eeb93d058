//! # steg Binary Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # Hide hidden.png inside shown.png
//! steg -o mixed.png shown.png hidden.png
//!
//! # Recover it
//! steg -o recovered.png mixed.png
//!
//! # No -o: PNG goes to stdout
//! steg mixed.png > recovered.png
//! ```

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use steg::common::config::{load_config, FileConfig, Mode, Output, StegConfig};
use steg::common::logging::init_logger;

/// Hide a black-and-white image in a grayscale one, or extract it again.
///
/// With two images the second is hidden in the first. With one image the
/// hidden image is extracted from it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file name (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with default settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// <visible image> <hidden image> to mix, or <mixed image> to extract
    #[arg(value_name = "IMAGE")]
    images: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_config: FileConfig = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {:#}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => FileConfig::default(),
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        match file_config.logging.level_filter() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("{:#}", e);
                return ExitCode::FAILURE;
            }
        }
    };
    init_logger(level);

    let mode = match Mode::from_inputs(&args.images) {
        Ok(mode) => mode,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::from(2);
        }
    };

    let config = StegConfig::new(mode, Output::resolve(args.output, &file_config));
    log::debug!("Running with {:?}", config);

    match steg::app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
