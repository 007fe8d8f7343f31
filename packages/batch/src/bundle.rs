//! Three-file output bundles

use snapdiff_common::{copy_file, sanitize_path_component, CommonResult, FreshDir};
use snapdiff_engine::{compare_files, DiffOptions, DiffResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const BUNDLE_REFERENCE: &str = "reference.png";
pub const BUNDLE_FAILED: &str = "failed.png";
pub const BUNDLE_DIFF: &str = "diff.png";

/// Test name for a failure: its parent directory's name, sanitized
pub fn test_name(failure: &Path) -> String {
    let raw = failure
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string());

    sanitize_path_component(&raw)
}

/// Snapshot name for a failure: its file name without extension, sanitized
pub fn snapshot_name(failure: &Path) -> String {
    let raw = failure
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    sanitize_path_component(&raw)
}

/// `<TestName>/<SnapshotName>`, relative to the output root
pub(crate) fn bundle_dir(failure: &Path) -> PathBuf {
    PathBuf::from(test_name(failure)).join(snapshot_name(failure))
}

/// Recreate the bundle directory, copy both inputs and render the diff.
///
/// A bundle is either complete or absent: when any step after the directory
/// was recreated fails, the directory is removed again.
pub(crate) fn write_bundle(
    output_root: &FreshDir,
    relative_dir: &Path,
    failure: &Path,
    reference: &Path,
    options: DiffOptions,
) -> CommonResult<(FreshDir, DiffResult)> {
    let bundle = output_root.recreate_child(relative_dir)?;

    match populate(&bundle, failure, reference, options) {
        Ok(result) => Ok((bundle, result)),
        Err(e) => {
            if let Err(cleanup) = fs::remove_dir_all(bundle.path()) {
                warn!(
                    bundle = %bundle.path().display(),
                    error = %cleanup,
                    "Could not remove incomplete bundle"
                );
            }
            Err(e)
        }
    }
}

fn populate(
    bundle: &FreshDir,
    failure: &Path,
    reference: &Path,
    options: DiffOptions,
) -> CommonResult<DiffResult> {
    let failed_copy = bundle.join(BUNDLE_FAILED);
    let reference_copy = bundle.join(BUNDLE_REFERENCE);

    copy_file(failure, &failed_copy)?;
    copy_file(reference, &reference_copy)?;

    let result = compare_files(
        &reference_copy,
        &failed_copy,
        &bundle.join(BUNDLE_DIFF),
        options,
    )?;

    Ok(result)
}
