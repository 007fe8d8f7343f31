use crate::error::SnapDiffError;

/// Common Result type alias
pub type CommonResult<T> = Result<T, SnapDiffError>;
