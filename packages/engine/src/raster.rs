//! Decoded RGBA bitmaps

use crate::{Result, SnapDiffError};
use image::{ColorType, ImageFormat, ImageReader};
use std::path::Path;

/// Bytes per pixel: red, green, blue, alpha
pub const CHANNELS: usize = 4;

/// An immutable, row-major RGBA8 bitmap.
///
/// The buffer always holds exactly `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an interleaved RGBA buffer, validating its length
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SnapDiffError::InvalidRaster(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(SnapDiffError::InvalidRaster(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A raster where every pixel has the same color
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let count = width as usize * height as usize;
        let pixels = rgba.iter().copied().cycle().take(count * CHANNELS).collect();
        Self::from_rgba(width, height, pixels)
    }

    /// Load any image file the `image` crate understands and convert it to RGBA8.
    ///
    /// The format comes from the file's leading bytes, not its extension.
    pub fn open(path: &Path) -> Result<Self> {
        let decode_error = |message: String| SnapDiffError::Decode {
            path: path.to_path_buf(),
            message,
        };

        let decoded = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_error(e.to_string()))?
            .decode()
            .map_err(|e| decode_error(e.to_string()))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        Self::from_rgba(width, height, rgba.into_raw()).map_err(|e| decode_error(e.to_string()))
    }

    /// Encode as an 8-bit RGBA PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            ColorType::Rgba8,
            ImageFormat::Png,
        )
        .map_err(|e| SnapDiffError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Raw interleaved RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let p = &self.pixels[offset..offset + CHANNELS];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Iterate pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}
