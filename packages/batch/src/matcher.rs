//! Name-based pairing of failure images with reference images

use crate::discovery::{find_marker_dirs, list_pngs};
use snapdiff_common::CommonResult;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Comparison key for a snapshot file.
///
/// The extension is dropped, then one trailing `.<digits>` variant suffix, so
/// `Login.1.png` and `Login.png` share the key `Login`.
pub fn snapshot_key(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    strip_variant_suffix(&stem).to_string()
}

fn strip_variant_suffix(stem: &str) -> &str {
    match stem.rsplit_once('.') {
        Some((base, suffix)) if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) => {
            base
        }
        _ => stem,
    }
}

/// Bidirectional substring containment. Empty keys never match.
pub fn keys_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    a.contains(b) || b.contains(a)
}

#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    key: String,
}

/// Reference candidates collected from every marker directory, in scan order
#[derive(Debug, Clone, Default)]
pub struct SnapshotMatcher {
    candidates: Vec<Candidate>,
}

impl SnapshotMatcher {
    /// Collect reference PNGs from all `marker` directories below `references_dir`
    pub fn scan(references_dir: &Path, marker: &str) -> CommonResult<Self> {
        let mut paths = Vec::new();

        for dir in find_marker_dirs(references_dir, marker)? {
            match list_pngs(&dir) {
                Ok(pngs) => paths.extend(pngs),
                Err(e) => warn!(dir = %dir.display(), error = %e, "Skipping marker directory"),
            }
        }

        Ok(Self::from_candidates(paths))
    }

    /// Build a matcher from an explicit, already ordered list of references
    pub fn from_candidates(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let candidates = paths
            .into_iter()
            .map(|path| Candidate {
                key: snapshot_key(&path),
                path,
            })
            .collect();

        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// First candidate whose key contains, or is contained in, the failure's key
    pub fn find_reference(&self, failure: &Path) -> Option<&Path> {
        let key = snapshot_key(failure);

        let found = self
            .candidates
            .iter()
            .find(|candidate| keys_match(&key, &candidate.key))
            .map(|candidate| candidate.path.as_path());

        debug!(
            failure = %failure.display(),
            key = %key,
            reference = ?found,
            "Reference lookup"
        );

        found
    }
}
