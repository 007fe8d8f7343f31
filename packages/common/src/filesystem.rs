use crate::error::SnapDiffError;
use crate::result::CommonResult;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PNG_EXTENSION: &str = "png";

/// A directory that has been wiped and recreated.
///
/// The only way to obtain one is [`FreshDir::recreate`], so anything holding
/// a `FreshDir` knows no stale files from a previous run are left inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshDir {
    path: PathBuf,
}

impl FreshDir {
    /// Remove `path` (if present) with everything below it, then create it empty
    pub fn recreate(path: impl Into<PathBuf>) -> CommonResult<Self> {
        let path = path.into();

        if path.exists() {
            debug!(path = %path.display(), "Removing existing directory");
            if path.is_dir() {
                fs::remove_dir_all(&path).map_err(|e| SnapDiffError::io(&path, e))?;
            } else {
                fs::remove_file(&path).map_err(|e| SnapDiffError::io(&path, e))?;
            }
        }

        fs::create_dir_all(&path).map_err(|e| SnapDiffError::io(&path, e))?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Recreate a child directory below this one
    pub fn recreate_child(&self, relative: impl AsRef<Path>) -> CommonResult<FreshDir> {
        FreshDir::recreate(self.path.join(relative))
    }
}

/// Copy a file. Errors opening the source name the source; errors creating
/// or writing the copy name the destination.
pub fn copy_file(from: &Path, to: &Path) -> CommonResult<()> {
    let mut source = fs::File::open(from).map_err(|e| SnapDiffError::io(from, e))?;
    let mut target = fs::File::create(to).map_err(|e| SnapDiffError::io(to, e))?;
    io::copy(&mut source, &mut target).map_err(|e| SnapDiffError::io(to, e))?;
    Ok(())
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent_dir(path: &Path) -> CommonResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| SnapDiffError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// True when the file name ends with the PNG extension (case-insensitive)
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(PNG_EXTENSION))
        .unwrap_or(false)
}

/// Make a name usable as a single, flat directory component.
///
/// Anything other than ASCII letters, digits, `-` and `_` becomes `_`, which
/// covers `+`, embedded dots, path separators and whitespace.
pub fn sanitize_path_component(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}
