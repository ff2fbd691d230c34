//! Definition of logical fields used to build a [crate::schema::Schema].

/// A single named field as declared: a name and a width in bits.
///
/// The width is signed so that a bad declaration (zero or negative) can be
/// expressed and rejected by [crate::schema::Schema::compile] with a precise
/// error instead of failing to type-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Name used to address the field on a record.
    pub name: String,
    /// Number of bits the field occupies in the packed value.
    pub width: i64,
}

impl Field {
    pub fn new(name: impl Into<String>, width: i64) -> Self {
        Field {
            name: name.into(),
            width,
        }
    }
}

impl<S: Into<String>> From<(S, i64)> for Field {
    fn from((name, width): (S, i64)) -> Self {
        Field::new(name, width)
    }
}
