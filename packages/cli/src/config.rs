use anyhow::Context;
use serde::{Deserialize, Serialize};
use snapdiff_batch::DEFAULT_MARKER_DIR;
use snapdiff_engine::DEFAULT_THRESHOLD;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "snapdiff.config.json";

/// snapdiff configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Squared RGBA distance above which a pixel counts as different
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Name of the directories holding reference images
    #[serde(default = "default_marker_dir")]
    pub marker_dir: String,

    /// Directory of failed snapshot images
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,

    /// Directory that receives the diff bundles (wiped on every run)
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Test sources tree containing the marker directories
    #[serde(default = "default_tests_dir")]
    pub tests_dir: String,
}

fn default_threshold() -> u32 {
    DEFAULT_THRESHOLD
}

fn default_marker_dir() -> String {
    DEFAULT_MARKER_DIR.to_string()
}

fn default_artifacts_dir() -> String {
    "../SnapshotArtifacts".to_string()
}

fn default_output_dir() -> String {
    "../SnapshotDiffs".to_string()
}

fn default_tests_dir() -> String {
    "../AppSnapshotTests".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn artifacts_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.artifacts_dir)
    }

    pub fn output_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.output_dir)
    }

    pub fn tests_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.tests_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            marker_dir: default_marker_dir(),
            artifacts_dir: default_artifacts_dir(),
            output_dir: default_output_dir(),
            tests_dir: default_tests_dir(),
        }
    }
}
