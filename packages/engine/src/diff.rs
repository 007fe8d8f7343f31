//! Threshold-based pixel classification and diff rendering

use crate::raster::{RasterImage, CHANNELS};
use crate::{Result, SnapDiffError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Squared RGBA distance above which a pixel counts as different.
///
/// Roughly 40 units on a single channel.
pub const DEFAULT_THRESHOLD: u32 = 1600;

/// Rendering for pixels that match: dim gray, mostly transparent
pub const SAME_PIXEL: [u8; 4] = [100, 100, 100, 100];

/// Options for a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Squared distance threshold; a pixel differs when `d² > threshold`
    pub threshold: u32,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DiffOptions {
    pub fn with_threshold(threshold: u32) -> Self {
        Self { threshold }
    }
}

/// Visualized difference between two rasters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub image: RasterImage,
    pub differing_pixels: u64,
}

impl DiffResult {
    pub fn total_pixels(&self) -> u64 {
        self.image.pixel_count()
    }

    pub fn is_identical(&self) -> bool {
        self.differing_pixels == 0
    }

    pub fn mismatch_percent(&self) -> f64 {
        self.differing_pixels as f64 * 100.0 / self.total_pixels() as f64
    }
}

/// Sum of squared per-channel differences across R, G, B and A
pub fn squared_distance(a: [u8; 4], b: [u8; 4]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// Output color for one pixel position
pub fn render_pixel(a: [u8; 4], b: [u8; 4], threshold: u32) -> [u8; 4] {
    if squared_distance(a, b) > threshold {
        [double(b[0]), double(b[1]), double(b[2]), 255]
    } else {
        SAME_PIXEL
    }
}

fn double(channel: u8) -> u8 {
    channel.saturating_mul(2)
}

/// Compare two rasters of identical size
pub fn compare(a: &RasterImage, b: &RasterImage, threshold: u32) -> Result<DiffResult> {
    if a.dimensions() != b.dimensions() {
        return Err(SnapDiffError::SizeMismatch {
            expected_width: a.width(),
            expected_height: a.height(),
            actual_width: b.width(),
            actual_height: b.height(),
        });
    }

    let mut out = Vec::with_capacity(a.as_bytes().len());
    let mut differing_pixels = 0u64;

    for (pa, pb) in a.pixels().zip(b.pixels()) {
        let rendered = render_pixel(pa, pb, threshold);
        // Differing pixels are always opaque; SAME_PIXEL never is.
        if rendered[3] == 255 {
            differing_pixels += 1;
        }
        out.extend_from_slice(&rendered);
    }

    debug_assert_eq!(out.len(), a.pixel_count() as usize * CHANNELS);

    let image = RasterImage::from_rgba(a.width(), a.height(), out)?;

    Ok(DiffResult {
        image,
        differing_pixels,
    })
}

/// Load two images, compare them and write the diff as PNG.
///
/// Nothing is written when either input fails to decode or the sizes differ.
#[instrument(skip(options), fields(threshold = options.threshold))]
pub fn compare_files(
    reference: &Path,
    actual: &Path,
    output: &Path,
    options: DiffOptions,
) -> Result<DiffResult> {
    let a = RasterImage::open(reference)?;
    let b = RasterImage::open(actual)?;

    let result = compare(&a, &b, options.threshold)?;
    result.image.save_png(output)?;

    debug!(
        differing = result.differing_pixels,
        total = result.total_pixels(),
        "Wrote diff"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RasterImage {
        RasterImage::filled(w, h, rgba).unwrap()
    }

    #[test]
    fn test_squared_distance() {
        assert_eq!(squared_distance([0, 0, 0, 0], [0, 0, 0, 0]), 0);
        assert_eq!(squared_distance([0, 0, 0, 255], [40, 0, 0, 255]), 1600);
        assert_eq!(squared_distance([0, 0, 0, 0], [255, 255, 255, 255]), 260_100);
        assert_eq!(squared_distance([10, 20, 30, 40], [13, 16, 30, 40]), 25);
    }

    #[test]
    fn test_threshold_boundary_is_strict() {
        let a = [0, 0, 0, 255];

        assert_eq!(render_pixel(a, [40, 0, 0, 255], 1600), SAME_PIXEL);
        assert_eq!(render_pixel(a, [41, 0, 0, 255], 1600), [82, 0, 0, 255]);
    }

    #[test]
    fn test_different_pixel_doubles_and_clamps() {
        let rendered = render_pixel([0, 0, 0, 255], [200, 127, 128, 10], 0);
        assert_eq!(rendered, [255, 254, 255, 255]);
    }

    #[test]
    fn test_self_compare_is_all_same() {
        let raster = RasterImage::from_rgba(
            2,
            2,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 128, 7, 7, 7, 0,
            ],
        )
        .unwrap();

        for threshold in [0, 1, DEFAULT_THRESHOLD, u32::MAX] {
            let result = compare(&raster, &raster, threshold).unwrap();
            assert!(result.is_identical());
            assert!(result.image.pixels().all(|p| p == SAME_PIXEL));
        }
    }

    #[test]
    fn test_black_vs_white_is_all_different() {
        let black = solid(2, 2, [0, 0, 0, 255]);
        let white = solid(2, 2, [255, 255, 255, 255]);

        let result = compare(&black, &white, DEFAULT_THRESHOLD).unwrap();

        assert_eq!(result.differing_pixels, 4);
        assert_eq!(result.mismatch_percent(), 100.0);
        assert!(result.image.pixels().all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_diff_uses_second_image_color() {
        let reference = solid(1, 1, [255, 255, 255, 255]);
        let actual = solid(1, 1, [0, 0, 0, 255]);

        let result = compare(&reference, &actual, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(result.image.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(result.differing_pixels, 1);
    }

    #[test]
    fn test_size_mismatch() {
        let a = solid(2, 2, [0, 0, 0, 255]);
        let b = solid(3, 2, [0, 0, 0, 255]);

        let err = compare(&a, &b, DEFAULT_THRESHOLD).unwrap_err();
        match err {
            SnapDiffError::SizeMismatch {
                expected_width,
                expected_height,
                actual_width,
                actual_height,
            } => {
                assert_eq!((expected_width, expected_height), (2, 2));
                assert_eq!((actual_width, actual_height), (3, 2));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_compare_is_deterministic() {
        let a = RasterImage::from_rgba(
            3,
            1,
            vec![0, 0, 0, 255, 50, 60, 70, 255, 200, 10, 10, 255],
        )
        .unwrap();
        let b = RasterImage::from_rgba(
            3,
            1,
            vec![0, 0, 0, 255, 52, 61, 70, 255, 20, 100, 10, 255],
        )
        .unwrap();

        let results: Vec<DiffResult> = (0..10)
            .map(|_| compare(&a, &b, DEFAULT_THRESHOLD).unwrap())
            .collect();

        for i in 1..results.len() {
            assert_eq!(results[0], results[i], "Comparison {} differs", i);
        }
        assert_eq!(results[0].differing_pixels, 1);
    }
}
