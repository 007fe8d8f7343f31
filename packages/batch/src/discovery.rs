//! Directory traversal for failure and reference images
//!
//! Every listing is sorted by file name so pairing decisions are reproducible.

use snapdiff_common::{is_png, CommonResult, SnapDiffError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// All PNG files below `dir`, recursively, in lexicographic traversal order
pub fn find_failures(dir: &Path) -> CommonResult<Vec<PathBuf>> {
    require_dir(dir)?;

    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_png(path) {
            files.push(path.to_path_buf());
        }
    }

    debug!(dir = %dir.display(), count = files.len(), "Discovered failure images");
    Ok(files)
}

/// Every directory named `marker` anywhere below `root`
pub fn find_marker_dirs(root: &Path, marker: &str) -> CommonResult<Vec<PathBuf>> {
    require_dir(root)?;

    let mut dirs = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() && entry.file_name() == marker {
            dirs.push(entry.path().to_path_buf());
        }
    }

    debug!(root = %root.display(), marker, count = dirs.len(), "Discovered marker directories");
    Ok(dirs)
}

/// PNG files directly inside `dir`, sorted by file name
pub fn list_pngs(dir: &Path) -> CommonResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| SnapDiffError::io(dir, e))? {
        let entry = entry.map_err(|e| SnapDiffError::io(dir, e))?;
        let path = entry.path();

        if path.is_file() && is_png(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn require_dir(dir: &Path) -> CommonResult<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(SnapDiffError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "directory does not exist"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_find_failures_is_recursive_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        touch(&root.join("b/Zeta.png"));
        touch(&root.join("a/Alpha.1.png"));
        touch(&root.join("a/notes.txt"));
        touch(&root.join("Top.PNG"));

        let files = find_failures(root).unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("Top.PNG"),
                PathBuf::from("a/Alpha.1.png"),
                PathBuf::from("b/Zeta.png"),
            ]
        );
    }

    #[test]
    fn test_find_failures_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let err = find_failures(&temp_dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), snapdiff_common::ErrorKind::Io);
    }

    #[test]
    fn test_find_marker_dirs_nested() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("Suite/Login/__Snapshots__")).unwrap();
        fs::create_dir_all(root.join("Other/__Snapshots__")).unwrap();
        fs::create_dir_all(root.join("Other/Snapshots")).unwrap();

        let dirs = find_marker_dirs(root, "__Snapshots__").unwrap();
        assert_eq!(
            dirs,
            vec![
                root.join("Other/__Snapshots__"),
                root.join("Suite/Login/__Snapshots__"),
            ]
        );
    }

    #[test]
    fn test_list_pngs_is_flat() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();

        touch(&dir.join("b.png"));
        touch(&dir.join("a.png"));
        touch(&dir.join("readme.md"));
        touch(&dir.join("nested/c.png"));

        let files = list_pngs(dir).unwrap();
        assert_eq!(files, vec![dir.join("a.png"), dir.join("b.png")]);
    }
}
