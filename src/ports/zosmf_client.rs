//! z/OSMF gateway port definition.

use crate::domain::{AppError, DatasetTarget};

/// One row of a dataset listing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    pub dsname: String,
}

/// Result of a dataset listing query.
#[derive(Debug, Clone, Default)]
pub struct DatasetListing {
    pub items: Vec<DatasetEntry>,
    pub returned_rows: u32,
}

impl DatasetListing {
    /// Whether the listing names `dataset_name`. Gateway responses carry
    /// uppercase names regardless of request casing.
    pub fn contains(&self, dataset_name: &str) -> bool {
        self.items.iter().any(|entry| entry.dsname.eq_ignore_ascii_case(dataset_name))
    }
}

/// Port for z/OSMF dataset operations.
pub trait ZosmfClient {
    /// List datasets whose name matches `name_filter`.
    fn list_datasets(&self, name_filter: &str) -> Result<DatasetListing, AppError>;

    /// Replace the content of `target` wholesale with `bytes`.
    fn write_member(&self, target: &DatasetTarget, bytes: &[u8]) -> Result<(), AppError>;
}
