//! Record: concrete field values for one [Schema], with integer and byte views.

use std::{collections::BTreeMap, fmt, sync::Arc};

use tracing::{debug, trace};

use crate::{bits, errors::RecordError, schema::Schema};

/// One value per schema field, each kept within `0..=2^width - 1`.
///
/// Every record owns its own value storage; only the [Schema] is shared.
/// The packed integer and byte encodings are computed from the current values
/// on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    schema: Arc<Schema>,
    values: Vec<u64>,
}

impl Record {
    /// Builds a record from `(name, value)` pairs. Fields that are not supplied
    /// hold 0.
    ///
    /// All supplied names are checked before any value: if some are not fields
    /// of the schema, a single [RecordError::UnknownFields] lists every one of
    /// them. Values are then range-checked in the order supplied. When a name
    /// is supplied more than once the last value wins.
    pub fn new<I, K, V>(schema: &Arc<Schema>, values: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<i128>,
    {
        let mut resolved = Vec::new();
        let mut unknown: Vec<String> = Vec::new();

        for (name, value) in values {
            let name = name.as_ref();
            match schema.index_of(name) {
                Some(index) => resolved.push((index, value.into())),
                None if !unknown.iter().any(|n| n == name) => unknown.push(name.to_string()),
                None => {}
            }
        }

        if !unknown.is_empty() {
            debug!(kind = schema.kind(), names = ?unknown, "rejected unknown fields");
            return Err(RecordError::UnknownFields {
                kind: schema.kind().to_string(),
                names: unknown,
            });
        }

        let mut stored = vec![0u64; schema.len()];
        for (index, value) in resolved {
            let field = &schema.fields()[index];
            stored[index] = field.check(schema.kind(), value).inspect_err(|err| {
                debug!(%err, "rejected record construction");
            })?;
        }

        Ok(Self {
            schema: Arc::clone(schema),
            values: stored,
        })
    }

    /// A record with every field set to 0.
    pub fn zeroed(schema: &Arc<Schema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            values: vec![0; schema.len()],
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn kind(&self) -> &str {
        self.schema.kind()
    }

    /// Current value of field `name`, or `None` if the schema has no such field.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.schema.index_of(name).map(|index| self.values[index])
    }

    /// Current value of the field at declaration position `index`.
    pub fn value_at(&self, index: usize) -> Option<u64> {
        self.values.get(index).copied()
    }

    /// Values in declaration order.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Replaces the value of field `name`.
    ///
    /// The value is range-checked exactly as in [Record::new]; on failure the
    /// record keeps its previous value.
    pub fn set(&mut self, name: &str, value: impl Into<i128>) -> Result<(), RecordError> {
        let Some(field) = self.schema.field(name) else {
            debug!(kind = self.schema.kind(), name, "rejected write to unknown field");
            return Err(RecordError::UnknownFields {
                kind: self.schema.kind().to_string(),
                names: vec![name.to_string()],
            });
        };

        let value = field.check(self.schema.kind(), value.into()).inspect_err(|err| {
            debug!(%err, "rejected field write");
        })?;

        trace!(kind = self.schema.kind(), name, value, "field written");
        self.values[field.index] = value;
        Ok(())
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(field, &value)| (field.name.as_str(), value))
    }

    /// Field values keyed by name.
    pub fn to_map(&self) -> BTreeMap<String, u64> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// Packs all fields into one integer, first-declared field in the lowest bits.
    pub fn to_int(&self) -> u128 {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .fold(0u128, |packed, (field, &value)| field.insert(packed, value))
    }

    /// The packed integer as exactly [Schema::byte_len] little-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        bits::to_le_bytes(self.to_int(), self.schema.byte_len())
    }
}

impl From<&Record> for u128 {
    fn from(record: &Record) -> Self {
        record.to_int()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.schema.kind())?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date_schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder("DateBitField")
                .field("day", 5)
                .field("month", 4)
                .field("year", 14)
                .build()
                .unwrap(),
        )
    }

    fn day_schema() -> Arc<Schema> {
        Arc::new(Schema::builder("DateBitField").field("day", 5).build().unwrap())
    }

    #[test]
    fn test_instantiate_with_value() {
        let record = Record::new(&day_schema(), [("day", 23)]).unwrap();
        assert_eq!(record.get("day"), Some(23));
    }

    #[test]
    fn test_fields_default_to_zero() {
        let schema = day_schema();
        let record = Record::zeroed(&schema);
        assert_eq!(record.get("day"), Some(0));
        assert_eq!(record.to_int(), 0);

        let empty: [(&str, u64); 0] = [];
        assert_eq!(Record::new(&schema, empty).unwrap(), record);
    }

    #[test]
    fn test_initialized_values_can_be_retrieved() {
        let record = Record::new(&date_schema(), [("month", 5), ("year", 14)]).unwrap();
        assert_eq!(record.get("day"), Some(0));
        assert_eq!(record.get("month"), Some(5));
        assert_eq!(record.get("year"), Some(14));
        assert_eq!(record.get("hour"), None);
        assert_eq!(record.value_at(1), Some(5));
        assert_eq!(record.value_at(3), None);
    }

    #[test]
    fn test_unknown_names_reported_together() {
        let err = Record::new(&date_schema(), [("day", 5), ("mnth", 4), ("yr", 1994)]).unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownFields {
                kind: "DateBitField".to_string(),
                names: vec!["mnth".to_string(), "yr".to_string()],
            }
        );
        assert_eq!(
            err.to_string(),
            "DateBitField got unexpected fields: 'mnth', 'yr'"
        );
    }

    #[test]
    fn test_unknown_names_checked_before_values() {
        let err = Record::new(&date_schema(), [("day", 99), ("mnth", 4)]).unwrap_err();
        assert!(matches!(err, RecordError::UnknownFields { .. }));
    }

    #[test]
    fn test_repeated_unknown_name_listed_once() {
        let err = Record::new(&date_schema(), [("yr", 1), ("yr", 2)]).unwrap_err();
        assert_eq!(err.to_string(), "DateBitField got unexpected field: 'yr'");
    }

    #[test]
    fn test_out_of_upper_range() {
        let err = Record::new(&day_schema(), [("day", 32)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "DateBitField field 'day' got value 32 which is out of range 0-31 for a 5 bit field"
        );
    }

    #[test]
    fn test_range_boundaries() {
        let schema = day_schema();
        assert!(Record::new(&schema, [("day", 0)]).is_ok());
        assert!(Record::new(&schema, [("day", 31)]).is_ok());
        assert!(matches!(
            Record::new(&schema, [("day", -1)]).unwrap_err(),
            RecordError::OutOfRange { value: -1, .. }
        ));
        assert!(matches!(
            Record::new(&schema, [("day", 32)]).unwrap_err(),
            RecordError::OutOfRange { value: 32, max: 31, .. }
        ));
    }

    #[test]
    fn test_last_duplicate_value_wins() {
        let record = Record::new(&day_schema(), [("day", 1), ("day", 2)]).unwrap();
        assert_eq!(record.get("day"), Some(2));
    }

    #[test]
    fn test_conversion_to_integer() {
        let record = Record::new(&date_schema(), [("day", 25), ("month", 3), ("year", 2010)]).unwrap();
        assert_eq!(record.to_int(), 0b00011111011010_0011_11001);
        assert_eq!(u128::from(&record), record.to_int());
    }

    #[test]
    fn test_conversion_to_bytes() {
        let record = Record::new(&date_schema(), [("day", 25), ("month", 3), ("year", 2010)]).unwrap();
        let expected = (0b00011111011010_0011_11001u32).to_le_bytes();
        assert_eq!(record.to_bytes(), expected[..3].to_vec());
    }

    #[test]
    fn test_set_then_get() {
        let mut record = Record::zeroed(&day_schema());
        record.set("day", 26).unwrap();
        assert_eq!(record.get("day"), Some(26));
    }

    #[test]
    fn test_failed_set_leaves_value_unchanged() {
        let mut record = Record::zeroed(&day_schema());
        record.set("day", 26).unwrap();

        let err = record.set("day", 32).unwrap_err();
        assert!(matches!(err, RecordError::OutOfRange { value: 32, .. }));
        assert_eq!(record.get("day"), Some(26));

        assert!(record.set("day", -5).is_err());
        assert_eq!(record.get("day"), Some(26));
    }

    #[test]
    fn test_set_unknown_field() {
        let mut record = Record::zeroed(&day_schema());
        assert_eq!(
            record.set("month", 1).unwrap_err(),
            RecordError::UnknownFields {
                kind: "DateBitField".to_string(),
                names: vec!["month".to_string()],
            }
        );
    }

    #[test]
    fn test_views_track_mutation() {
        let mut record = Record::new(&date_schema(), [("day", 1)]).unwrap();
        assert_eq!(record.to_int(), 1);
        record.set("month", 1).unwrap();
        assert_eq!(record.to_int(), 0b1_00001);
        assert_eq!(record.to_bytes(), vec![0b0010_0001, 0, 0]);
    }

    #[test]
    fn test_records_do_not_share_values() {
        let schema = date_schema();
        let mut first = Record::zeroed(&schema);
        let second = Record::zeroed(&schema);
        first.set("year", 2024).unwrap();
        assert_eq!(first.get("year"), Some(2024));
        assert_eq!(second.get("year"), Some(0));
    }

    #[test]
    fn test_mapping_views() {
        let record = Record::new(&date_schema(), [("year", 2010), ("day", 25), ("month", 3)]).unwrap();
        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(pairs, vec![("day", 25), ("month", 3), ("year", 2010)]);
        assert_eq!(record.to_map().get("year"), Some(&2010));
        assert_eq!(record.values(), &[25, 3, 2010]);
    }

    #[test]
    fn test_display() {
        let record = Record::new(&date_schema(), [("day", 25), ("month", 3), ("year", 2010)]).unwrap();
        assert_eq!(record.to_string(), "DateBitField(day=25, month=3, year=2010)");
    }
}
