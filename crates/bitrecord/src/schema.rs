//! Schema: the ordered, immutable set of fields describing one record kind.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    bits::{self, MAX_TOTAL_BITS},
    compiled::CompiledField,
    errors::SchemaError,
    field::Field,
};

/// A compiled schema: the record kind name, its [CompiledField]s in declaration
/// order and the total bit width. Use [Schema::compile] or [Schema::builder] to
/// build one, then share it (usually behind an `Arc`) between
/// [crate::record::Record]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    kind: String,
    fields: Vec<CompiledField>,
    by_name: HashMap<String, usize>,
    total_bits: u32,
}

impl Schema {
    /// Compiles `fields` for record kind `kind`. The first field occupies the
    /// least-significant bits of the packed value.
    pub fn compile(kind: impl Into<String>, fields: &[Field]) -> Result<Self, SchemaError> {
        let kind = kind.into();

        if fields.is_empty() {
            return Err(SchemaError::EmptySchema { kind });
        }

        let mut compiled_fields = Vec::with_capacity(fields.len());
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut offset = 0u32;

        for (index, field) in fields.iter().enumerate() {
            let compiled_field = CompiledField::compile(&kind, field, index, offset)?;

            if by_name.insert(compiled_field.name.clone(), index).is_some() {
                return Err(SchemaError::DuplicateField {
                    kind,
                    field: compiled_field.name,
                });
            }

            offset = offset
                .checked_add(compiled_field.width)
                .filter(|&end| end <= MAX_TOTAL_BITS)
                .ok_or_else(|| SchemaError::SchemaTooWide {
                    kind: kind.clone(),
                    total_bits: u64::from(offset) + u64::from(compiled_field.width),
                    max: MAX_TOTAL_BITS,
                })?;

            compiled_fields.push(compiled_field);
        }

        debug!(
            kind = %kind,
            fields = compiled_fields.len(),
            total_bits = offset,
            "compiled bit-field schema"
        );

        Ok(Self {
            kind,
            fields: compiled_fields,
            by_name,
            total_bits: offset,
        })
    }

    /// Starts an ordered declaration of record kind `kind`.
    pub fn builder(kind: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Name of the record kind, used in error messages and `Display`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&CompiledField> {
        self.index_of(name).map(|index| &self.fields[index])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Number of fields. Never zero for a compiled schema.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sum of all field widths.
    pub fn total_bits(&self) -> u32 {
        self.total_bits
    }

    /// Length of the little-endian byte encoding: `ceil(total_bits / 8)`.
    pub fn byte_len(&self) -> usize {
        bits::byte_len(self.total_bits)
    }
}

/// Ordered builder for a [Schema]; see [Schema::builder].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    kind: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Appends a field. Declaration order is significant.
    pub fn field(mut self, name: impl Into<String>, width: i64) -> Self {
        self.fields.push(Field::new(name, width));
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        Schema::compile(self.kind, &self.fields)
    }
}
