//! DS3231 real-time-clock register image built on [bitrecord].
//!
//! The DS3231 keeps its timekeeping registers (0x00..=0x06) as packed BCD
//! digits. [ds3231_schema] describes those seven bytes as a bit-field record,
//! and [registers] fills one in from a calendar time.
//!
//! ```
//! use bitrecord_rtc::{RtcTime, register_bytes};
//!
//! let time = RtcTime {
//!     second: 27,
//!     minute: 45,
//!     hour: 13,
//!     weekday: 5,
//!     day: 15,
//!     month: 3,
//!     year: 2024,
//! };
//! assert_eq!(
//!     register_bytes(&time).unwrap(),
//!     vec![0x27, 0x45, 0x13, 0x05, 0x15, 0x03, 0x24]
//! );
//! ```

use std::sync::{Arc, OnceLock};

use bitrecord::{Field, Record, RecordError, Schema};
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};

/// Record kind name of the register image.
pub const DS3231_KIND: &str = "Ds3231Registers";

/// Register fields in declaration order, least-significant first.
pub const DS3231_FIELDS: [(&str, i64); 21] = [
    ("seconds_ones", 4),
    ("seconds_tens", 3),
    ("seconds_pad", 1),
    ("minutes_ones", 4),
    ("minutes_tens", 3),
    ("minutes_pad", 1),
    ("hour_ones", 4),
    ("hour_tens", 2),
    ("hour_mode_flag", 1),
    ("hour_pad", 1),
    ("weekday", 3),
    ("weekday_pad", 5),
    ("day_ones", 4),
    ("day_tens", 2),
    ("day_pad", 2),
    ("month_ones", 4),
    ("month_tens", 1),
    ("month_pad", 2),
    ("century_flag", 1),
    ("year_ones", 4),
    ("year_tens", 4),
];

/// The shared DS3231 register layout: 56 bits, 7 bytes.
pub fn ds3231_schema() -> Arc<Schema> {
    static SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();

    SCHEMA
        .get_or_init(|| {
            let fields: Vec<Field> = DS3231_FIELDS.iter().map(|&pair| pair.into()).collect();
            Arc::new(Schema::compile(DS3231_KIND, &fields).expect("DS3231 layout is valid"))
        })
        .clone()
}

/// Calendar time as the DS3231 stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcTime {
    pub second: u32,
    pub minute: u32,
    pub hour: u32,
    /// ISO weekday, Monday = 1 through Sunday = 7.
    pub weekday: u32,
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl<T: Datelike + Timelike> From<&T> for RtcTime {
    fn from(value: &T) -> Self {
        RtcTime {
            second: value.second(),
            minute: value.minute(),
            hour: value.hour(),
            weekday: value.weekday().number_from_monday(),
            day: value.day(),
            month: value.month(),
            year: value.year(),
        }
    }
}

/// Fills a register record from `time`, in 24-hour mode with the century flag
/// clear. Only the last two digits of the year are kept.
///
/// Calendar values that do not fit their digit fields (a weekday of 9, an hour
/// of 42) fail with the usual [RecordError::OutOfRange].
pub fn registers(time: &RtcTime) -> Result<Record, RecordError> {
    let year = time.year.rem_euclid(100);

    Record::new(
        &ds3231_schema(),
        [
            ("seconds_ones", i128::from(time.second % 10)),
            ("seconds_tens", i128::from(time.second / 10)),
            ("minutes_ones", i128::from(time.minute % 10)),
            ("minutes_tens", i128::from(time.minute / 10)),
            ("hour_ones", i128::from(time.hour % 10)),
            ("hour_tens", i128::from(time.hour / 10)),
            ("hour_mode_flag", 0),
            ("weekday", i128::from(time.weekday)),
            ("day_ones", i128::from(time.day % 10)),
            ("day_tens", i128::from(time.day / 10)),
            ("month_ones", i128::from(time.month % 10)),
            ("month_tens", i128::from(time.month / 10)),
            ("century_flag", 0),
            ("year_ones", i128::from(year % 10)),
            ("year_tens", i128::from(year / 10)),
        ],
    )
}

/// The seven register bytes for `time`, register 0x00 first.
pub fn register_bytes(time: &RtcTime) -> Result<Vec<u8>, RecordError> {
    Ok(registers(time)?.to_bytes())
}

/// Renders bytes as space-separated 8-digit binary, e.g. `00100111 01000101`.
pub fn format_registers(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{byte:08b}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses an RFC 3339 timestamp (keeping its local wall-clock time) or a naive
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` one.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
}
