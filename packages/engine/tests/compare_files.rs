/// End-to-end tests for the path-based comparison: decode PNGs from disk,
/// compare, and encode the diff back to disk.
use image::{Rgba, RgbaImage};
use snapdiff_engine::{compare_files, DiffOptions, RasterImage, SnapDiffError, SAME_PIXEL};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_solid_png(dir: &Path, name: &str, w: u32, h: u32, rgba: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(w, h, Rgba(rgba)).save(&path).unwrap();
    path
}

#[test]
fn test_black_vs_black_renders_same_everywhere() {
    let temp_dir = TempDir::new().unwrap();
    let reference = write_solid_png(temp_dir.path(), "reference.png", 2, 2, [0, 0, 0, 255]);
    let failed = write_solid_png(temp_dir.path(), "failed.png", 2, 2, [0, 0, 0, 255]);
    let output = temp_dir.path().join("diff.png");

    let result = compare_files(&reference, &failed, &output, DiffOptions::default()).unwrap();
    assert_eq!(result.differing_pixels, 0);

    let diff = image::open(&output).unwrap().to_rgba8();
    assert_eq!(diff.dimensions(), (2, 2));
    for pixel in diff.pixels() {
        assert_eq!(pixel.0, SAME_PIXEL);
    }
}

#[test]
fn test_black_vs_white_renders_white_opaque() {
    let temp_dir = TempDir::new().unwrap();
    let reference = write_solid_png(temp_dir.path(), "reference.png", 2, 2, [0, 0, 0, 255]);
    let failed = write_solid_png(temp_dir.path(), "failed.png", 2, 2, [255, 255, 255, 255]);
    let output = temp_dir.path().join("diff.png");

    let result = compare_files(&reference, &failed, &output, DiffOptions::default()).unwrap();
    assert_eq!(result.differing_pixels, 4);

    let diff = image::open(&output).unwrap().to_rgba8();
    for pixel in diff.pixels() {
        assert_eq!(pixel.0, [255, 255, 255, 255]);
    }
}

#[test]
fn test_size_mismatch_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let reference = write_solid_png(temp_dir.path(), "reference.png", 2, 2, [0, 0, 0, 255]);
    let failed = write_solid_png(temp_dir.path(), "failed.png", 4, 3, [0, 0, 0, 255]);
    let output = temp_dir.path().join("diff.png");

    let err = compare_files(&reference, &failed, &output, DiffOptions::default()).unwrap_err();

    assert!(matches!(err, SnapDiffError::SizeMismatch { .. }));
    assert!(err.to_string().contains("2x2"));
    assert!(err.to_string().contains("4x3"));
    assert!(!output.exists());
}

#[test]
fn test_undecodable_input_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let reference = write_solid_png(temp_dir.path(), "reference.png", 2, 2, [0, 0, 0, 255]);
    let failed = temp_dir.path().join("failed.png");
    std::fs::write(&failed, b"not an image").unwrap();
    let output = temp_dir.path().join("diff.png");

    let err = compare_files(&reference, &failed, &output, DiffOptions::default()).unwrap_err();

    assert!(matches!(err, SnapDiffError::Decode { .. }));
    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_is_encode_error() {
    let temp_dir = TempDir::new().unwrap();
    let reference = write_solid_png(temp_dir.path(), "reference.png", 1, 1, [0, 0, 0, 255]);
    let failed = write_solid_png(temp_dir.path(), "failed.png", 1, 1, [0, 0, 0, 255]);
    let output = temp_dir.path().join("missing-dir").join("diff.png");

    let err = compare_files(&reference, &failed, &output, DiffOptions::default()).unwrap_err();
    assert!(matches!(err, SnapDiffError::Encode { .. }));
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let reference = write_solid_png(temp_dir.path(), "reference.png", 8, 8, [30, 60, 90, 255]);

    let mut actual = RgbaImage::from_pixel(8, 8, Rgba([30, 60, 90, 255]));
    for x in 2..6 {
        actual.put_pixel(x, 4, Rgba([200, 10, 10, 255]));
    }
    let failed = temp_dir.path().join("failed.png");
    actual.save(&failed).unwrap();

    let first = temp_dir.path().join("first.png");
    let second = temp_dir.path().join("second.png");
    compare_files(&reference, &failed, &first, DiffOptions::default()).unwrap();
    compare_files(&reference, &failed, &second, DiffOptions::default()).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());

    let diff = RasterImage::open(&first).unwrap();
    assert_eq!(diff.pixel(3, 4), Some([255, 20, 20, 255]));
    assert_eq!(diff.pixel(0, 0), Some(SAME_PIXEL));
}

#[test]
fn test_custom_threshold() {
    let temp_dir = TempDir::new().unwrap();
    let reference = write_solid_png(temp_dir.path(), "reference.png", 1, 1, [100, 100, 100, 255]);
    let failed = write_solid_png(temp_dir.path(), "failed.png", 1, 1, [110, 100, 100, 255]);
    let output = temp_dir.path().join("diff.png");

    let lenient = compare_files(&reference, &failed, &output, DiffOptions::default()).unwrap();
    assert_eq!(lenient.differing_pixels, 0);

    let strict =
        compare_files(&reference, &failed, &output, DiffOptions::with_threshold(99)).unwrap();
    assert_eq!(strict.differing_pixels, 1);
}
