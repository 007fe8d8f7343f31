//! # snapdiff engine
//!
//! Pixel-by-pixel comparison of two equally sized RGBA rasters.
//!
//! The output is a third raster of the same size in which matching pixels are
//! rendered as a dim, translucent gray and differing pixels show the second
//! image's color, doubled per channel, at full opacity.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use snapdiff_engine::{compare_files, DiffOptions};
//! use std::path::Path;
//!
//! let result = compare_files(
//!     Path::new("reference.png"),
//!     Path::new("failed.png"),
//!     Path::new("diff.png"),
//!     DiffOptions::default(),
//! )
//! .unwrap();
//!
//! println!("{} pixels differ", result.differing_pixels);
//! ```

mod diff;
mod raster;

pub use diff::{
    compare, compare_files, render_pixel, squared_distance, DiffOptions, DiffResult,
    DEFAULT_THRESHOLD, SAME_PIXEL,
};
pub use raster::{RasterImage, CHANNELS};

pub use snapdiff_common::{CommonResult as Result, SnapDiffError};
