//! # Image Processing
//!
//! - [`steganography`]: hiding a bi-level image in a grayscale image's low bit plane
//! - [`codec`]: reading input images and writing PNG output

pub mod codec;
pub mod steganography;

// Re-export main functions for convenience
pub use codec::{encode_png, open_image, save_png, write_png};
pub use steganography::{combine, combine_images, extract, extract_image};
