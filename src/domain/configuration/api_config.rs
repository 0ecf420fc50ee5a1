//! Gateway request tuning.

use serde::Deserialize;

use crate::domain::AppError;

/// Request tuning for the z/OSMF gateway.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ZosmfApiConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Upper bound on rows returned by a dataset listing.
    #[serde(default = "default_max_items")]
    pub max_items: u32,
    /// Accept self-signed gateway certificates. Common on test LPARs.
    #[serde(default)]
    pub allow_self_signed: bool,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_items() -> u32 {
    100
}

impl Default for ZosmfApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_items: default_max_items(),
            allow_self_signed: false,
        }
    }
}

impl ZosmfApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_items == 0 {
            return Err(AppError::Configuration("max_items must be greater than 0".to_string()));
        }
        Ok(())
    }
}
