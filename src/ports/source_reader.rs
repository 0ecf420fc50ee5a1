//! Content source port definition.

use std::path::Path;

use crate::domain::{AppError, FileOption};

/// Port resolving a selected source option to the bytes to upload.
///
/// No size limit is enforced here; the gateway applies the dataset's own
/// record constraints.
pub trait SourceReader {
    fn resolve_bytes(&self, option: &FileOption, workspace_root: &Path)
    -> Result<Vec<u8>, AppError>;
}
