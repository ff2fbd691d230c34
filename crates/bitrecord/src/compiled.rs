use crate::{
    bits::{self, MAX_FIELD_BITS},
    errors::{RecordError, SchemaError},
    field::Field,
};

/// Prefix reserved for internal names; declared fields may not start with it.
pub const RESERVED_PREFIX: char = '_';

/// Rejects empty names and names starting with [RESERVED_PREFIX].
pub fn check_name(kind: &str, name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::EmptyName {
            kind: kind.to_string(),
        });
    }

    if name.starts_with(RESERVED_PREFIX) {
        return Err(SchemaError::ReservedName {
            kind: kind.to_string(),
            field: name.to_string(),
        });
    }

    Ok(())
}

/// A validated field with its position inside the packed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    pub name: String,
    /// Declaration order, also the index into a record's value storage.
    pub index: usize,
    /// Bit offset from the least-significant bit of the packed value.
    pub offset: u32,
    pub width: u32,
}

impl CompiledField {
    /// Validates a declared field of record kind `kind` and places it at `offset`.
    pub fn compile(
        kind: &str,
        field: &Field,
        index: usize,
        offset: u32,
    ) -> Result<Self, SchemaError> {
        check_name(kind, &field.name)?;

        if field.width < 1 {
            return Err(SchemaError::NonPositiveWidth {
                kind: kind.to_string(),
                field: field.name.clone(),
                width: field.width,
            });
        }

        if field.width > i64::from(MAX_FIELD_BITS) {
            return Err(SchemaError::WidthTooLarge {
                kind: kind.to_string(),
                field: field.name.clone(),
                width: field.width as u64,
                max: MAX_FIELD_BITS,
            });
        }

        Ok(CompiledField {
            name: field.name.clone(),
            index,
            offset,
            width: field.width as u32,
        })
    }

    /// Largest value this field accepts.
    pub fn max_value(&self) -> u64 {
        bits::max_value(self.width)
    }

    /// Checks that `value` fits this field, returning it as stored.
    pub fn check(&self, kind: &str, value: i128) -> Result<u64, RecordError> {
        let max = self.max_value();

        match u64::try_from(value) {
            Ok(v) if v <= max => Ok(v),
            _ => Err(RecordError::OutOfRange {
                kind: kind.to_string(),
                field: self.name.clone(),
                value,
                min: 0,
                max,
                width: self.width,
            }),
        }
    }

    /// ORs `value` into `packed` at this field's position.
    pub fn insert(&self, packed: u128, value: u64) -> u128 {
        bits::insert_bits(packed, self.offset, self.width, value)
    }

    /// Reads this field's bits back out of a packed value.
    pub fn extract(&self, packed: u128) -> u64 {
        bits::extract_bits(packed, self.offset, self.width)
    }
}
