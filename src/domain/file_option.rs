//! Content source selection for a member write.

use std::path::PathBuf;

/// Where the bytes for a write come from. Exactly one variant is populated
/// per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOption {
    /// Absolute (or invocation-relative) filesystem path.
    Local(PathBuf),
    /// Path resolved against the execution context's workspace root.
    Workspace(PathBuf),
    /// Content supplied directly by the caller.
    Inline(String),
}

impl FileOption {
    /// Form key used by front-end field validation.
    pub fn key(&self) -> &'static str {
        match self {
            FileOption::Local(_) => keys::LOCAL,
            FileOption::Workspace(_) => keys::WORKSPACE,
            FileOption::Inline(_) => keys::CHOOSE,
        }
    }
}

/// Recognized form keys for the `fileOption` field.
pub mod keys {
    pub const LOCAL: &str = "local";
    pub const WORKSPACE: &str = "workspace";
    pub const CHOOSE: &str = "choose";

    pub fn is_recognized(value: &str) -> bool {
        matches!(value, LOCAL | WORKSPACE | CHOOSE)
    }
}
