//! # bitrecord
//!
//! Declarative fixed-width bit-field records.
//!
//! Declare a record kind as an ordered list of named unsigned fields with bit
//! widths, then build records holding one value per field. Values are
//! range-checked against their width on construction and on every write. A
//! record packs into a single integer (first-declared field in the lowest bits)
//! and serializes to a fixed number of little-endian bytes.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bitrecord::{record::Record, schema::Schema};
//!
//! let schema = Arc::new(
//!     Schema::builder("DateBitField")
//!         .field("day", 5)
//!         .field("month", 4)
//!         .field("year", 14)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let mut date = Record::new(&schema, [("day", 25), ("month", 3), ("year", 2010)]).unwrap();
//! assert_eq!(date.to_int(), 0b00011111011010_0011_11001);
//! assert_eq!(date.to_bytes().len(), 3);
//!
//! assert!(date.set("day", 32).is_err());
//! assert_eq!(date.get("day"), Some(25));
//! ```

pub mod bits;
pub mod compiled;
pub mod errors;
pub mod field;
pub mod record;
pub mod schema;
#[cfg(feature = "serde")]
pub mod serde;

pub use errors::{RecordError, SchemaError};
pub use field::Field;
pub use record::Record;
pub use schema::{Schema, SchemaBuilder};
