pub mod console_log;
pub mod filesystem_source;
pub mod zosmf_client_http;

pub use console_log::ConsoleLogSink;
pub use filesystem_source::FilesystemSourceReader;
pub use zosmf_client_http::HttpZosmfClient;
