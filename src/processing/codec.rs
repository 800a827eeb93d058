//! Image decoding and PNG encoding.

use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage, ImageFormat};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Open and decode an image file.
///
/// The format is detected from the file contents, so a mislabelled extension
/// still decodes.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let img = reader
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    log::debug!("Decoded {} ({:?})", path.display(), img.color());
    Ok(img)
}

/// Encode a grayscale image as PNG bytes.
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(output_bytes)
}

/// Encode a grayscale image as PNG and write all of it to `out`.
pub fn write_png<W: Write>(img: &GrayImage, mut out: W) -> Result<()> {
    let bytes = encode_png(img)?;
    out.write_all(&bytes).context("Failed to write PNG")?;
    out.flush().context("Failed to flush PNG output")?;
    Ok(())
}

/// Encode a grayscale image as PNG and save it to `path`.
///
/// The bytes go to a temporary file next to `path`, which is renamed over
/// `path` only once fully written. A failed save leaves no file behind.
pub fn save_png(img: &GrayImage, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_png(img, &mut file)?;
    file.persist(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_png_bytes_decode_back() {
        let img = GrayImage::from_fn(5, 3, |x, y| Luma([(x * 40 + y) as u8]));

        let bytes = encode_png(&img).unwrap();

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_luma8(), img);
    }

    #[test]
    fn test_write_png_to_writer() {
        let img = GrayImage::from_pixel(2, 2, Luma([255]));
        let mut out = Vec::new();

        write_png(&img, &mut out).unwrap();

        assert_eq!(out, encode_png(&img).unwrap());
    }

    #[test]
    fn test_save_png_leaves_only_the_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = GrayImage::from_fn(6, 2, |x, _| Luma([if x < 3 { 0 } else { 255 }]));

        save_png(&img, &path).unwrap();
        save_png(&img, &path).unwrap();

        assert_eq!(image::open(&path).unwrap().to_luma8(), img);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_png_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("out.png");

        let err = save_png(&GrayImage::new(1, 1), &path).unwrap_err();

        assert!(err.to_string().contains("Failed to create"));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_image_ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.dat");
        let img = GrayImage::from_pixel(4, 4, Luma([7]));
        std::fs::write(&path, encode_png(&img).unwrap()).unwrap();

        let decoded = open_image(&path).unwrap();

        assert_eq!(decoded.to_luma8(), img);
    }

    #[test]
    fn test_open_image_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"definitely not an image").unwrap();

        let err = open_image(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));

        let err = open_image(&garbage).unwrap_err();
        assert!(err.to_string().contains("Failed to decode"));
    }
}
