use crate::config::Config;
use clap::{Parser, ValueEnum};
use snapdiff_batch::BatchOptions;
use snapdiff_common::SnapDiffError;
use snapdiff_engine::DiffOptions;
use std::path::{Path, PathBuf};

/// Render diff bundles for failed snapshot tests
#[derive(Parser, Debug)]
#[command(name = "snapdiff")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "snapdiff [OPTIONS]\n       \
    snapdiff --artifacts <PATH> --output <PATH> --tests <PATH> [OPTIONS]\n       \
    snapdiff <IMAGE_A> <IMAGE_B> <OUTPUT> [OPTIONS]")]
pub struct Cli {
    /// Two-image mode: reference image, actual image and diff output path
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Directory of failed snapshot images
    #[arg(long, value_name = "PATH")]
    pub artifacts: Option<PathBuf>,

    /// Directory receiving the diff bundles (recreated on every run)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Test sources tree containing the reference marker directories
    #[arg(long, value_name = "PATH")]
    pub tests: Option<PathBuf>,

    /// Squared RGBA distance above which a pixel counts as different
    #[arg(long)]
    pub threshold: Option<u32>,

    /// Name of the directories holding reference images
    #[arg(long)]
    pub marker: Option<String>,

    /// Summary format for batch mode
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub format: SummaryFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    Text,
    Json,
}

/// What to run, with every path and setting resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Batch {
        artifacts: PathBuf,
        output: PathBuf,
        tests: PathBuf,
        options: BatchOptions,
        format: SummaryFormat,
    },
    Pair {
        reference: PathBuf,
        actual: PathBuf,
        output: PathBuf,
        options: DiffOptions,
    },
}

impl Cli {
    /// Check the argument shape and merge flags over the config file
    pub fn resolve(self, config: &Config, cwd: &Path) -> Result<Mode, SnapDiffError> {
        let threshold = self.threshold.unwrap_or(config.threshold);
        let diff = DiffOptions::with_threshold(threshold);

        match (self.paths.len(), self.artifacts, self.output, self.tests) {
            (0, None, None, None) => Ok(Mode::Batch {
                artifacts: config.artifacts_path(cwd),
                output: config.output_path(cwd),
                tests: config.tests_path(cwd),
                options: BatchOptions {
                    diff,
                    marker_dir: self.marker.unwrap_or_else(|| config.marker_dir.clone()),
                },
                format: self.format,
            }),
            (0, Some(artifacts), Some(output), Some(tests)) => Ok(Mode::Batch {
                artifacts,
                output,
                tests,
                options: BatchOptions {
                    diff,
                    marker_dir: self.marker.unwrap_or_else(|| config.marker_dir.clone()),
                },
                format: self.format,
            }),
            (0, ..) => Err(SnapDiffError::Argument(
                "--artifacts, --output and --tests must be given together".to_string(),
            )),
            (3, None, None, None) => {
                let mut paths = self.paths.into_iter();
                match (paths.next(), paths.next(), paths.next()) {
                    (Some(reference), Some(actual), Some(output)) => Ok(Mode::Pair {
                        reference,
                        actual,
                        output,
                        options: diff,
                    }),
                    _ => Err(SnapDiffError::Argument(
                        "expected <IMAGE_A> <IMAGE_B> <OUTPUT>".to_string(),
                    )),
                }
            }
            (3, ..) => Err(SnapDiffError::Argument(
                "two-image mode does not take --artifacts, --output or --tests".to_string(),
            )),
            (n, ..) => Err(SnapDiffError::Argument(format!(
                "expected 0 or 3 positional arguments, got {}",
                n
            ))),
        }
    }
}
