pub mod log_sink;
pub mod source_reader;
pub mod zosmf_client;

pub use log_sink::{LogEvent, LogSink, MemoryLogSink};
pub use source_reader::SourceReader;
pub use zosmf_client::{DatasetEntry, DatasetListing, ZosmfClient};
