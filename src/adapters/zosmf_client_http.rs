//! z/OSMF gateway client implementation using reqwest.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, DatasetTarget, ZosConnection, ZosmfApiConfig};
use crate::ports::{DatasetEntry, DatasetListing, ZosmfClient};

const X_CSRF_ZOSMF_HEADER: &str = "X-CSRF-ZOSMF-HEADER";
const X_IBM_MAX_ITEMS: &str = "X-IBM-Max-Items";
const X_IBM_DATA_TYPE: &str = "X-IBM-Data-Type";
const RESTFILES_DS: [&str; 3] = ["zosmf", "restfiles", "ds"];

/// HTTP transport for the z/OSMF restfiles API.
///
/// Each call performs a single blocking request; the step has no built-in
/// retry.
pub struct HttpZosmfClient {
    connection: ZosConnection,
    base_url: Url,
    max_items: u32,
    client: Client,
}

impl std::fmt::Debug for HttpZosmfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpZosmfClient")
            .field("base_url", &self.base_url)
            .field("user", &self.connection.user)
            .finish()
    }
}

impl HttpZosmfClient {
    /// Create a new client for one gateway connection.
    pub fn new(connection: ZosConnection, config: &ZosmfApiConfig) -> Result<Self, AppError> {
        config.validate()?;
        let base_url = connection.base_url()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.allow_self_signed)
            .build()
            .map_err(|e| {
                AppError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { connection, base_url, max_items: config.max_items, client })
    }

    fn restfiles_url(&self, resource: Option<&str>) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                AppError::Configuration("Gateway address cannot be a base URL".to_string())
            })?;
            segments.extend(RESTFILES_DS);
            if let Some(resource) = resource {
                segments.push(resource);
            }
        }
        Ok(url)
    }

    fn map_send_error(err: reqwest::Error) -> AppError {
        AppError::Connection(err.to_string())
    }

    fn error_from_response(status: StatusCode, body: &str) -> AppError {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return AppError::Auth { status: status.as_u16() };
        }

        let message = extract_error_message(body).unwrap_or_else(|| {
            if !body.trim().is_empty() {
                body.trim().to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                "z/OSMF request failed".to_string()
            }
        });

        AppError::Remote { message, status: Some(status.as_u16()) }
    }
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    items: Vec<ListingItem>,
    #[serde(default, rename = "returnedRows")]
    returned_rows: u32,
}

#[derive(Debug, Deserialize)]
struct ListingItem {
    #[serde(default)]
    dsname: String,
}

/// z/OSMF error bodies carry `{"message": ...}` alongside rc/reason codes.
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl ZosmfClient for HttpZosmfClient {
    fn list_datasets(&self, name_filter: &str) -> Result<DatasetListing, AppError> {
        let mut url = self.restfiles_url(None)?;
        url.query_pairs_mut().append_pair("dslevel", name_filter);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.connection.user, Some(&self.connection.password))
            .header(X_CSRF_ZOSMF_HEADER, "")
            .header(X_IBM_MAX_ITEMS, self.max_items.to_string())
            .send()
            .map_err(Self::map_send_error)?;

        let status = response.status();
        let body = response.text().unwrap_or_default();

        if !status.is_success() {
            return Err(Self::error_from_response(status, &body));
        }

        let listing: ListingResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::Remote {
                message: format!("Failed to parse dataset listing: {}", e),
                status: Some(status.as_u16()),
            }
        })?;

        Ok(DatasetListing {
            items: listing
                .items
                .into_iter()
                .map(|item| DatasetEntry { dsname: item.dsname })
                .collect(),
            returned_rows: listing.returned_rows,
        })
    }

    fn write_member(&self, target: &DatasetTarget, bytes: &[u8]) -> Result<(), AppError> {
        let url = self.restfiles_url(Some(&target.resource_name()))?;

        let response = self
            .client
            .put(url)
            .basic_auth(&self.connection.user, Some(&self.connection.password))
            .header(X_CSRF_ZOSMF_HEADER, "")
            .header(X_IBM_DATA_TYPE, "text")
            .header(CONTENT_TYPE, "text/plain")
            .body(bytes.to_vec())
            .send()
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        Err(Self::error_from_response(status, &body))
    }
}
