//! # Bit-Plane Steganography
//!
//! Hides a black-and-white image in the least significant bit of a grayscale
//! image, and recovers it.
//!
//! ## Algorithm
//!
//! ### Combine
//! For every pixel `(x, y)`:
//! 1. Take the carrier's gray intensity `c` and the secret's gray intensity `s`
//! 2. Clear the LSB of `c`
//! 3. If `s` is non-zero, copy the LSB of `s` into `c`
//!
//! The upper 7 bits of the carrier are untouched, so the result looks like the
//! carrier. A secret pixel of 255 sets the bit, 0 leaves it clear. Note that an
//! even non-zero secret intensity (e.g. 2) also leaves it clear: only true
//! bi-level secrets survive the round trip.
//!
//! ### Extract
//! Every pixel's LSB is stretched to a full-contrast value: 1 becomes 255,
//! 0 stays 0. The result is always a pure black-and-white image.
//!
//! ### Gray conversion
//! Inputs of any color type are reduced to gray per pixel by
//! [`gray_intensity`]: channels are premultiplied by alpha and weighted with
//! the Rec. 601 luma coefficients in 16-bit fixed point. A fully transparent
//! pixel is therefore black, whatever its color channels say.
//!
//! ### Capacity
//! One secret pixel per carrier pixel. Carrier and secret must have the same
//! dimensions.

use anyhow::Result;
use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgba};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Gray intensity of an 8-bit non-premultiplied RGBA pixel.
pub fn gray_intensity(pixel: Rgba<u8>) -> u8 {
    let [r, g, b, a] = pixel.0;
    // Widen to 16 bits and premultiply by alpha
    let channel = |c: u8| u32::from(c) * 0x101 * u32::from(a) / 0xFF;
    let y = (19595 * channel(r) + 38470 * channel(g) + 7471 * channel(b) + (1 << 15)) >> 24;
    y as u8
}

/// Convert any decoded image to 8-bit gray with [`gray_intensity`].
pub fn to_gray(img: &DynamicImage) -> GrayImage {
    let rgba = img.to_rgba8();
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        Luma([gray_intensity(*rgba.get_pixel(x, y))])
    })
}

/// Mix one carrier intensity with one secret intensity.
#[inline]
pub fn mix_pixel(carrier: u8, secret: u8) -> u8 {
    let mut mixed = carrier & 0xFE;
    if secret != 0 {
        mixed |= secret & 1;
    }
    mixed
}

/// Recover one secret intensity from a mixed intensity: 0 or 255.
#[inline]
pub fn demix_pixel(mixed: u8) -> u8 {
    (mixed & 1).wrapping_neg()
}

/// Hide `secret` in the low bit plane of `carrier`.
///
/// # Errors
/// - Carrier and secret dimensions differ
///
/// # Example
/// ```ignore
/// let mixed = combine(&to_gray(&carrier), &to_gray(&secret))?;
/// mixed.save("mixed.png")?;
/// ```
pub fn combine(carrier: &GrayImage, secret: &GrayImage) -> Result<GrayImage> {
    if carrier.dimensions() != secret.dimensions() {
        let (cw, ch) = carrier.dimensions();
        let (sw, sh) = secret.dimensions();
        return Err(anyhow::anyhow!(
            "Image sizes differ: carrier is {}x{} but secret is {}x{}",
            cw, ch, sw, sh
        ));
    }

    let width = carrier.width() as usize;
    let secret_pixels = secret.as_raw();
    let mut mixed = carrier.clone();

    for_each_row(&mut mixed, width, |y, row| {
        let secret_row = &secret_pixels[y * width..(y + 1) * width];
        for (pixel, &hidden) in row.iter_mut().zip(secret_row) {
            *pixel = mix_pixel(*pixel, hidden);
        }
    });

    Ok(mixed)
}

/// Recover the hidden image from the low bit plane of `mixed`.
///
/// Any grayscale image is accepted; an image that was never combined simply
/// yields its own low bit plane.
pub fn extract(mixed: &GrayImage) -> GrayImage {
    let width = mixed.width() as usize;
    let mut secret = mixed.clone();

    for_each_row(&mut secret, width, |_, row| {
        for pixel in row.iter_mut() {
            *pixel = demix_pixel(*pixel);
        }
    });

    secret
}

/// Convert both images with [`to_gray`], then [`combine`] them.
pub fn combine_images(carrier: &DynamicImage, secret: &DynamicImage) -> Result<GrayImage> {
    log::debug!(
        "Combining carrier {:?} with secret {:?}",
        carrier.dimensions(),
        secret.dimensions()
    );
    combine(&to_gray(carrier), &to_gray(secret))
}

/// Convert the image with [`to_gray`], then [`extract`] it.
pub fn extract_image(mixed: &DynamicImage) -> GrayImage {
    log::debug!("Extracting from {:?}", mixed.dimensions());
    extract(&to_gray(mixed))
}

/// Run `process_row(y, row)` over every row of `image`.
///
/// Rows are disjoint slices of the pixel buffer, so they can be handed to
/// separate workers.
fn for_each_row<F>(image: &mut GrayImage, width: usize, process_row: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if width == 0 {
        return;
    }
    let pixels: &mut [u8] = image;

    #[cfg(feature = "parallel")]
    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| process_row(y, row));
    #[cfg(not(feature = "parallel"))]
    pixels
        .chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| process_row(y, row));
}
