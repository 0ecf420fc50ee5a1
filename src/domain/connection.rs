//! z/OSMF gateway connection parameters.

use url::Url;

use crate::domain::AppError;

/// Connection parameters for one z/OSMF gateway, supplied externally and
/// immutable for the duration of a single write operation.
#[derive(Clone)]
pub struct ZosConnection {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub protocol: Protocol,
}

/// Transport scheme accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Https,
    Http,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "https" => Some(Protocol::Https),
            "http" => Some(Protocol::Http),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ZosConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZosConnection")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("protocol", &self.protocol)
            .finish()
    }
}

impl ZosConnection {
    /// Base URL of the gateway, e.g. `https://host:port`.
    pub fn base_url(&self) -> Result<Url, AppError> {
        let raw = format!("{}://{}:{}", self.protocol.as_str(), self.host, self.port);
        Url::parse(&raw)
            .map_err(|e| AppError::Configuration(format!("Invalid gateway address '{}': {}", raw, e)))
    }
}
