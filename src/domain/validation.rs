//! Field validation table.
//!
//! Pure replacement for dynamic form-validation callbacks: each recognized
//! field name maps to one validation function, and front-ends (the CLI
//! `check` command, or any future form surface) dispatch through
//! [`validate_field`].

use crate::domain::dataset::{
    MAX_MEMBER_NAME_LEN, dataset_name_is_valid, member_name_is_valid,
};
use crate::domain::file_option::keys;

pub const MSG_VALUE_MUST_NOT_BE_EMPTY: &str = "value must not be empty";
pub const MSG_DATASET_NAME_IS_INVALID: &str = "dataset name is invalid";
pub const MSG_VALUE_UP_TO_EIGHT_IN_LENGTH: &str = "value up to eight in length";
pub const MSG_MEMBER_NAME_IS_INVALID: &str = "member name is invalid";
pub const MSG_WRITE_OPTIONS_REQUIRED: &str = "classic write options required";

/// Outcome of validating a single field. A warning does not block
/// execution; an error does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    Warning(String),
    Error(String),
}

impl ValidationOutcome {
    pub fn is_blocking(&self) -> bool {
        matches!(self, ValidationOutcome::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Ok => None,
            ValidationOutcome::Warning(m) | ValidationOutcome::Error(m) => Some(m),
        }
    }
}

/// Recognized configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Dsn,
    Member,
    FileOption,
    LocalFilePath,
    WorkspacePath,
}

impl Field {
    pub const ALL: [Field; 5] =
        [Field::Dsn, Field::Member, Field::FileOption, Field::LocalFilePath, Field::WorkspacePath];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "dsn" => Some(Field::Dsn),
            "member" => Some(Field::Member),
            "fileOption" => Some(Field::FileOption),
            "localFilePath" => Some(Field::LocalFilePath),
            "workspacePath" => Some(Field::WorkspacePath),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Field::Dsn => "dsn",
            Field::Member => "member",
            Field::FileOption => "fileOption",
            Field::LocalFilePath => "localFilePath",
            Field::WorkspacePath => "workspacePath",
        }
    }
}

/// Validate one field value. `file_option` carries the currently selected
/// source key and only affects the two path fields, which are required only
/// while their source is selected.
pub fn validate_field(field: Field, value: &str, file_option: Option<&str>) -> ValidationOutcome {
    match field {
        Field::Dsn => validate_dataset(value),
        Field::Member => validate_member(value),
        Field::FileOption => validate_file_option(value),
        Field::LocalFilePath => validate_path(value, keys::LOCAL, file_option),
        Field::WorkspacePath => validate_path(value, keys::WORKSPACE, file_option),
    }
}

/// Dataset names must be non-empty and follow the qualifier grammar.
pub fn validate_dataset(name: &str) -> ValidationOutcome {
    if name.is_empty() {
        return ValidationOutcome::Error(MSG_VALUE_MUST_NOT_BE_EMPTY.to_string());
    }
    if !dataset_name_is_valid(name) {
        return ValidationOutcome::Error(MSG_DATASET_NAME_IS_INVALID.to_string());
    }
    ValidationOutcome::Ok
}

/// Member names must be 1-8 characters. A character-set mismatch inside
/// that length is downgraded to a warning so edge-case members remain
/// writable.
pub fn validate_member(name: &str) -> ValidationOutcome {
    if name.is_empty() || name.len() > MAX_MEMBER_NAME_LEN {
        return ValidationOutcome::Error(MSG_VALUE_UP_TO_EIGHT_IN_LENGTH.to_string());
    }
    if !member_name_is_valid(name) {
        return ValidationOutcome::Warning(MSG_MEMBER_NAME_IS_INVALID.to_string());
    }
    ValidationOutcome::Ok
}

/// A source option must be selected.
pub fn validate_file_option(value: &str) -> ValidationOutcome {
    if keys::is_recognized(value) {
        ValidationOutcome::Ok
    } else {
        ValidationOutcome::Error(MSG_WRITE_OPTIONS_REQUIRED.to_string())
    }
}

fn validate_path(value: &str, required_for: &str, file_option: Option<&str>) -> ValidationOutcome {
    if file_option == Some(required_for) && value.is_empty() {
        return ValidationOutcome::Error(MSG_VALUE_MUST_NOT_BE_EMPTY.to_string());
    }
    ValidationOutcome::Ok
}
