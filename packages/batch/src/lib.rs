//! # snapdiff batch
//!
//! Batch orchestration for snapshot test failures.
//!
//! A failures directory holds the "actual" images a snapshot framework wrote
//! when an assertion failed. A separate tree holds the reference images, kept
//! in marker directories (`__Snapshots__` by default) next to the test
//! sources. The batch pairs every failure with a reference by name and writes
//! one bundle per pair:
//!
//! ```text
//! <output>/<TestName>/<SnapshotName>/reference.png
//! <output>/<TestName>/<SnapshotName>/failed.png
//! <output>/<TestName>/<SnapshotName>/diff.png
//! ```
//!
//! Pairing is by substring containment of cleaned file names; the first
//! candidate in lexicographic traversal order wins. There is no scoring, so
//! two references that both contain the failure's name are resolved purely by
//! path order.

mod batch;
mod bundle;
mod discovery;
mod matcher;
mod types;

pub use batch::{diff_pair, process_all, process_all_with};
pub use bundle::{snapshot_name, test_name, BUNDLE_DIFF, BUNDLE_FAILED, BUNDLE_REFERENCE};
pub use discovery::{find_failures, find_marker_dirs, list_pngs};
pub use matcher::{keys_match, snapshot_key, SnapshotMatcher};
pub use types::{
    BatchOptions, BatchReport, BatchSummary, OutcomeStatus, PairingOutcome, SnapshotPairing,
    DEFAULT_MARKER_DIR,
};

pub use snapdiff_common::{CommonResult as Result, ErrorKind, SnapDiffError};
