//! Dataset and member naming rules.
//!
//! A partitioned dataset name is a dot-separated sequence of qualifiers.
//! Each qualifier is 1-8 characters, starts with a letter or a national
//! character (`#`, `$`, `@`), and continues with letters, digits, national
//! characters, or hyphens. The full name is at most 44 characters. Member
//! names follow the qualifier rule without dots and without hyphens.

pub const MAX_DATASET_NAME_LEN: usize = 44;
pub const MAX_MEMBER_NAME_LEN: usize = 8;
const MAX_QUALIFIER_LEN: usize = 8;

fn is_national(c: char) -> bool {
    matches!(c, '#' | '$' | '@')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || is_national(c)
}

fn qualifier_is_valid(qualifier: &str) -> bool {
    let mut chars = qualifier.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    qualifier.len() <= MAX_QUALIFIER_LEN
        && is_name_start(first)
        && chars.all(|c| c.is_ascii_alphanumeric() || is_national(c) || c == '-')
}

/// Whether `name` conforms to the dataset qualifier grammar.
pub fn dataset_name_is_valid(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_DATASET_NAME_LEN
        && name.split('.').all(qualifier_is_valid)
}

/// Whether `name` conforms to the member-name grammar. Length limits are
/// checked separately by the validation table; this covers the character
/// set only.
pub fn member_name_is_valid(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_name_start(first) && chars.all(|c| c.is_ascii_alphanumeric() || is_national(c))
}

/// The `DSN(MEMBER)` pair a write operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetTarget {
    pub dataset_name: String,
    pub member_name: String,
}

impl DatasetTarget {
    pub fn new<D: Into<String>, M: Into<String>>(dataset_name: D, member_name: M) -> Self {
        Self { dataset_name: dataset_name.into(), member_name: member_name.into() }
    }

    /// Resource name used on the gateway member endpoint.
    pub fn resource_name(&self) -> String {
        format!("{}({})", self.dataset_name, self.member_name)
    }
}

impl std::fmt::Display for DatasetTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.dataset_name, self.member_name)
    }
}
