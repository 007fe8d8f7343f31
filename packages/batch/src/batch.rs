//! Batch and two-image entry points

use crate::bundle::{bundle_dir, write_bundle};
use crate::discovery::find_failures;
use crate::matcher::SnapshotMatcher;
use crate::types::{BatchOptions, BatchReport, OutcomeStatus, PairingOutcome, SnapshotPairing};
use snapdiff_common::{ensure_parent_dir, CommonResult, FreshDir, SnapDiffError};
use snapdiff_engine::{compare, DiffOptions, DiffResult, RasterImage};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Run a batch without progress reporting
pub fn process_all(
    failures_dir: &Path,
    references_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> CommonResult<BatchReport> {
    process_all_with(failures_dir, references_dir, output_dir, options, |_| {})
}

/// Pair every failure with a reference and write one bundle per pair.
///
/// Returns `Err` only for setup problems: a missing input directory or an
/// output root that cannot be recreated. Problems with individual pairings
/// are recorded in the report and passed to `on_outcome` as they happen.
#[instrument(skip(options, on_outcome), fields(marker = %options.marker_dir))]
pub fn process_all_with<F>(
    failures_dir: &Path,
    references_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    mut on_outcome: F,
) -> CommonResult<BatchReport>
where
    F: FnMut(&PairingOutcome),
{
    for input in [failures_dir, references_dir] {
        if contains_path(output_dir, input) {
            return Err(SnapDiffError::Argument(format!(
                "output directory {} would delete input {}",
                output_dir.display(),
                input.display()
            )));
        }
    }

    // Bundles from an earlier run must not be picked up as failures.
    let failures: Vec<_> = find_failures(failures_dir)?
        .into_iter()
        .filter(|failure| !contains_path(output_dir, failure))
        .collect();
    let matcher = SnapshotMatcher::scan(references_dir, &options.marker_dir)?;
    let output_root = FreshDir::recreate(output_dir)?;

    info!(
        failures = failures.len(),
        references = matcher.len(),
        "Starting batch"
    );

    let mut report = BatchReport::default();
    report.summary.found = failures.len();
    let mut written = HashSet::new();

    for failure in failures {
        let pairing = SnapshotPairing {
            reference: matcher.find_reference(&failure).map(Path::to_path_buf),
            bundle_dir: bundle_dir(&failure),
            failure,
        };

        let outcome = process_pairing(&output_root, pairing, options.diff, &mut written);
        on_outcome(&outcome);
        report.push(outcome);
    }

    info!(
        processed = report.summary.processed,
        unmatched = report.summary.unmatched,
        diff_failed = report.summary.diff_failed,
        "Batch complete"
    );

    Ok(report)
}

/// True when `inner` is `outer` or lies below it. Paths that cannot be
/// resolved (typically an output directory that does not exist yet) contain
/// nothing.
fn contains_path(outer: &Path, inner: &Path) -> bool {
    match (outer.canonicalize(), inner.canonicalize()) {
        (Ok(outer), Ok(inner)) => inner.starts_with(outer),
        _ => false,
    }
}

fn process_pairing(
    output_root: &FreshDir,
    pairing: SnapshotPairing,
    options: DiffOptions,
    written: &mut HashSet<PathBuf>,
) -> PairingOutcome {
    let SnapshotPairing {
        failure,
        reference,
        bundle_dir,
    } = pairing;

    let Some(reference) = reference else {
        let err = SnapDiffError::NoMatchFound {
            failure: failure.clone(),
        };
        warn!(error = %err, "Skipping pairing");
        return PairingOutcome {
            failure,
            reference: None,
            bundle: None,
            status: OutcomeStatus::Unmatched,
        };
    };

    // Distinct failures can sanitize to the same bundle; the first one keeps it.
    let result = if written.contains(&bundle_dir) {
        Err(SnapDiffError::io(
            output_root.join(&bundle_dir),
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "bundle already written for another failure in this run",
            ),
        ))
    } else {
        write_bundle(output_root, &bundle_dir, &failure, &reference, options)
    };

    match result {
        Ok((bundle, result)) => {
            written.insert(bundle_dir);
            PairingOutcome {
                failure,
                reference: Some(reference),
                bundle: Some(bundle.path().to_path_buf()),
                status: OutcomeStatus::Diffed {
                    differing_pixels: result.differing_pixels,
                    total_pixels: result.total_pixels(),
                },
            }
        }
        Err(e) => {
            warn!(failure = %failure.display(), error = %e, "Pairing failed");
            PairingOutcome {
                failure,
                reference: Some(reference),
                bundle: None,
                status: OutcomeStatus::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                },
            }
        }
    }
}

/// Diff two explicit images into `output`, skipping discovery and matching.
///
/// The output's parent directory is created if needed, but only once both
/// inputs have decoded and their sizes agree.
pub fn diff_pair(
    reference: &Path,
    actual: &Path,
    output: &Path,
    options: DiffOptions,
) -> CommonResult<DiffResult> {
    let a = RasterImage::open(reference)?;
    let b = RasterImage::open(actual)?;
    let result = compare(&a, &b, options.threshold)?;

    ensure_parent_dir(output)?;
    result.image.save_png(output)?;

    Ok(result)
}
