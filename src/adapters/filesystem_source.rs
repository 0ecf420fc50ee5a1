//! Filesystem-backed source reader.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, FileOption};
use crate::ports::SourceReader;

/// Reads upload content from the local filesystem or passes inline content
/// through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemSourceReader;

impl FilesystemSourceReader {
    pub fn new() -> Self {
        Self
    }

    fn read(path: &Path) -> Result<Vec<u8>, AppError> {
        fs::read(path).map_err(|err| AppError::SourceRead {
            path: path.display().to_string(),
            details: err.to_string(),
        })
    }
}

impl SourceReader for FilesystemSourceReader {
    fn resolve_bytes(
        &self,
        option: &FileOption,
        workspace_root: &Path,
    ) -> Result<Vec<u8>, AppError> {
        match option {
            FileOption::Local(path) => Self::read(path),
            FileOption::Workspace(path) => Self::read(&workspace_root.join(path)),
            FileOption::Inline(content) => Ok(content.clone().into_bytes()),
        }
    }
}
