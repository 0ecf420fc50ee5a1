pub mod configuration;
pub mod connection;
pub mod dataset;
pub mod error;
pub mod file_option;
pub mod validation;

pub use configuration::{ConnectionProfile, PASSWORD_ENV_VAR, ZosmfApiConfig};
pub use connection::{Protocol, ZosConnection};
pub use dataset::DatasetTarget;
pub use error::AppError;
pub use file_option::FileOption;
pub use validation::{Field, ValidationOutcome, validate_field};
