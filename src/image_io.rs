//! Image decoding, encoding and output file naming.
//!
//! Files are always read and written as raw bytes and decoded in memory, so
//! paths containing non-ASCII characters behave like any other.

use crate::error::{Result, SegmentError};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Decode an in-memory image of any format the `image` crate recognises
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| SegmentError::decode("input is not a readable image", e))?;
    if img.width() == 0 || img.height() == 0 {
        return Err(SegmentError::Decode {
            message: "image has no pixels".to_string(),
            source: None,
        });
    }
    Ok(img)
}

/// Read and decode an image file
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| SegmentError::decode(format!("cannot read {}", path.display()), e))?;
    decode(&bytes)
}

/// Encode an image into `format`.
///
/// JPEG has no alpha channel, so images are flattened to 8-bit RGB first.
pub fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let written = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut buffer, format)
    } else {
        img.write_to(&mut buffer, format)
    };
    written.map_err(|e| SegmentError::encode(format!("cannot encode as {:?}", format), e))?;
    Ok(buffer.into_inner())
}

/// Write bytes to `path`, creating parent directories as needed
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SegmentError::io(parent, e))?;
    }
    std::fs::write(path, bytes).map_err(|e| SegmentError::io(path, e))
}

/// Encode and write an image, picking the format from the file extension
pub fn save_image(img: &DynamicImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .map_err(|e| SegmentError::encode(format!("unknown output format for {}", path.display()), e))?;
    write_bytes(path, &encode(img, format)?)
}

/// File stem used to name outputs derived from `path`
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// `{base}_segment_{index:03}.{extension}`
pub fn segment_file_name(base: &str, index: usize, extension: &str) -> String {
    format!("{}_segment_{:03}.{}", base, index, extension)
}

/// `{base}_result.jpg`
pub fn preview_file_name(base: &str) -> String {
    format!("{}_result.jpg", base)
}
