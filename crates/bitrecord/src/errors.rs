//! Error types for schema declaration and record validation.

use std::fmt;

use thiserror::Error;

/// Errors produced when compiling [crate::field::Field]s into a [crate::schema::Schema].
///
/// Every variant names the record kind being declared so a failure can be traced
/// back to its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field name begins with the reserved `_` prefix.
    #[error("{kind} field '{field}' begins with an underscore")]
    ReservedName { kind: String, field: String },

    /// Field name is the empty string.
    #[error("{kind} has a field with an empty name")]
    EmptyName { kind: String },

    /// Declared width is not an integer (only reachable from textual definitions).
    #[error("{kind} field '{field}' has annotation {annotation} that is not an integer")]
    NonIntegerWidth {
        kind: String,
        field: String,
        annotation: String,
    },

    /// Declared width is zero or negative.
    #[error("{kind} field '{field}' has non-positive field width {width}")]
    NonPositiveWidth {
        kind: String,
        field: String,
        width: i64,
    },

    /// Declared width does not fit a `u64` field value.
    #[error("{kind} field '{field}' has field width {width} which exceeds the maximum of {max}")]
    WidthTooLarge {
        kind: String,
        field: String,
        width: u64,
        max: u32,
    },

    /// The same field name is declared twice.
    #[error("{kind} field '{field}' is declared more than once")]
    DuplicateField { kind: String, field: String },

    /// No fields were declared.
    #[error("{kind} has no fields")]
    EmptySchema { kind: String },

    /// Sum of all widths does not fit the packed `u128`.
    #[error("{kind} fields span {total_bits} bits which exceeds the maximum of {max}")]
    SchemaTooWide {
        kind: String,
        total_bits: u64,
        max: u32,
    },
}

/// Errors produced when constructing or writing a [crate::record::Record].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// One or more supplied names are not fields of the schema. All of them are
    /// listed, in the order they were supplied.
    #[error(
        "{kind} got unexpected field{}: {}",
        plural_suffix(.names),
        QuotedList(.names)
    )]
    UnknownFields { kind: String, names: Vec<String> },

    /// Value is outside `min..=max` for the field width.
    #[error(
        "{kind} field '{field}' got value {value} which is out of range {min}-{max} for a {width} bit field"
    )]
    OutOfRange {
        kind: String,
        field: String,
        value: i128,
        min: u64,
        max: u64,
        width: u32,
    },
}

/// Errors produced when loading a schema from a JSON definition.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Input is not a well-formed schema definition.
    #[error("invalid schema definition: {0}")]
    Json(#[from] serde_json::Error),

    /// Definition parsed but the declared fields are invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

fn plural_suffix(names: &[String]) -> &'static str {
    if names.len() == 1 { "" } else { "s" }
}

struct QuotedList<'a>(&'a [String]);

impl fmt::Display for QuotedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{name}'")?;
        }
        Ok(())
    }
}
