//! JSON-deserializable schema description.
//!
//! These types describe a record layout so it can be shipped as data (for
//! example a register map file next to the application) and compiled into a
//! [Schema] at startup:
//!
//! ```json
//! { "kind": "DateBitField", "fields": [ { "name": "day", "width": 5 } ] }
//! ```
//!
//! A width that is not a JSON integer still deserializes, and is rejected when
//! the definition is compiled so the error can name the offending field.

use serde::{Deserialize, Serialize, ser::SerializeMap};

use crate::{
    bits::MAX_FIELD_BITS,
    compiled::{self, CompiledField},
    errors::{DefinitionError, SchemaError},
    field::Field,
    record::Record,
    schema::Schema,
};

/// Top-level definition of one record kind.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SchemaDef {
    /// Record kind name, used in error messages.
    pub kind: String,
    /// Fields in declaration order; the first one is packed into the lowest bits.
    pub fields: Vec<FieldDef>,
}

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub width: WidthDef,
}

/// Declared width, as written in the definition.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum WidthDef {
    /// An integer width; still subject to the positivity check.
    Bits(i64),
    /// An integer width beyond `i64::MAX`; always too large.
    Wide(u64),
    /// A non-integral number such as `2.5`.
    Number(f64),
    /// Any string, e.g. `"Wednesday"`.
    Text(String),
}

impl WidthDef {
    fn annotation(&self) -> String {
        match self {
            WidthDef::Bits(bits) => bits.to_string(),
            WidthDef::Wide(bits) => bits.to_string(),
            WidthDef::Number(number) => format!("{number:?}"),
            WidthDef::Text(text) => format!("'{text}'"),
        }
    }
}

impl From<&CompiledField> for FieldDef {
    fn from(value: &CompiledField) -> Self {
        FieldDef {
            name: value.name.clone(),
            width: WidthDef::Bits(i64::from(value.width)),
        }
    }
}

impl TryFrom<&SchemaDef> for Schema {
    type Error = SchemaError;

    fn try_from(def: &SchemaDef) -> Result<Self, Self::Error> {
        let mut fields = Vec::with_capacity(def.fields.len());

        for field in &def.fields {
            match &field.width {
                WidthDef::Bits(width) => fields.push(Field::new(field.name.clone(), *width)),
                other => {
                    // Earlier fields are reported first.
                    if !fields.is_empty() {
                        Schema::compile(def.kind.as_str(), &fields)?;
                    }
                    compiled::check_name(&def.kind, &field.name)?;

                    return Err(match other {
                        WidthDef::Wide(width) => SchemaError::WidthTooLarge {
                            kind: def.kind.clone(),
                            field: field.name.clone(),
                            width: *width,
                            max: MAX_FIELD_BITS,
                        },
                        _ => SchemaError::NonIntegerWidth {
                            kind: def.kind.clone(),
                            field: field.name.clone(),
                            annotation: other.annotation(),
                        },
                    });
                }
            }
        }

        Schema::compile(def.kind.as_str(), &fields)
    }
}

impl Schema {
    /// Parses and compiles a JSON [SchemaDef].
    pub fn from_json(json: &str) -> Result<Schema, DefinitionError> {
        let def: SchemaDef = serde_json::from_str(json)?;
        Ok(Schema::try_from(&def)?)
    }

    /// The definition this schema compiles from.
    pub fn to_def(&self) -> SchemaDef {
        SchemaDef {
            kind: self.kind().to_string(),
            fields: self.fields().iter().map(Into::into).collect(),
        }
    }
}

/// A record serializes as a map of field name to value, in declaration order.
impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.schema().len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
