//! Connection profile loading.
//!
//! A profile file carries everything needed to reach one gateway except the
//! password, which always comes from the environment:
//!
//! ```toml
//! [connection]
//! host = "mainframe.example.com"
//! port = 10443
//! user = "ibmuser"
//! protocol = "https"
//!
//! [api]
//! timeout_secs = 30
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::domain::{AppError, ZosmfApiConfig};

pub const PASSWORD_ENV_VAR: &str = "DSPUT_PASSWORD";

/// Parsed profile file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionProfile {
    pub connection: ProfileConnection,
    #[serde(default)]
    pub api: ZosmfApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConnection {
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

fn default_protocol() -> String {
    "https".to_string()
}

impl ConnectionProfile {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            AppError::Configuration(format!("Cannot read profile '{}': {}", path.display(), err))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, AppError> {
        let profile: ConnectionProfile = toml::from_str(content)?;
        profile.api.validate()?;
        Ok(profile)
    }
}
