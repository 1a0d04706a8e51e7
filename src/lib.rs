pub mod cache;
pub mod calendar;
mod consts;
mod error;
mod parse;
mod prelude;
mod value;

pub use cache::{CacheConfig, Cacheable, ValueCache};
pub use consts::*;
pub use error::ValueError;
pub use parse::{LiteralError, parse_date_value};
pub use value::{Value, ValueType};

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// An immutable SQL `DATE`.
///
/// The date is held as a single packed integer (see [`calendar::date_value`])
/// whose numeric order is chronological order. Instances are only handed out
/// as `Arc`s by the factory functions, which intern them in the process-wide
/// [`cache::date_cache`]. Interning is an optimization only: compare with
/// `==` and `cmp`, never with `Arc::ptr_eq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateValue {
    date_value: i64,
}

impl DateValue {
    /// Gets or creates the date for a packed date value.
    ///
    /// The value is trusted as is. Anything not produced by
    /// [`calendar::date_value`] yields meaningless fields.
    pub fn from_date_value(date_value: i64) -> Arc<Self> {
        cache::date_cache().canonicalize(Self { date_value })
    }

    /// Gets or creates the date for the given fields (not validated)
    pub fn from_date_fields(year: i32, month: u32, day: u32) -> Arc<Self> {
        Self::from_date_value(calendar::date_value(year, month, day))
    }

    /// Gets or creates the date on which the instant `millis` (milliseconds
    /// since 1970-01-01T00:00Z) falls in the local time zone.
    ///
    /// Instants the system time zone database cannot place are read as UTC.
    pub fn from_epoch_millis(millis: i64) -> Arc<Self> {
        let offset = DateTime::<Utc>::from_timestamp_millis(millis).map_or(0, |utc| {
            Local
                .offset_from_utc_datetime(&utc.naive_utc())
                .local_minus_utc()
        });
        Self::from_date_value(calendar::date_value_from_local_millis(millis, offset))
    }

    /// Like [`DateValue::from_epoch_millis`] with a fixed UTC offset.
    pub fn from_epoch_millis_with_offset(millis: i64, offset: FixedOffset) -> Arc<Self> {
        Self::from_date_value(calendar::date_value_from_local_millis(
            millis,
            offset.local_minus_utc(),
        ))
    }

    /// Gets or creates the date for a chrono calendar date
    pub fn from_naive_date(date: NaiveDate) -> Arc<Self> {
        Self::from_date_fields(date.year(), date.month(), date.day())
    }

    /// Parses a date literal such as `2000-01-02` or `-44-03-15`.
    ///
    /// # Errors
    /// Returns `ValueError::InvalidDateTimeLiteral` tagged `"DATE"` with the
    /// original text if it is not a valid date.
    pub fn parse(text: &str) -> Result<Arc<Self>, ValueError> {
        match parse_date_value(text) {
            Ok(date_value) => Ok(Self::from_date_value(date_value)),
            Err(source) => {
                debug!(text, %source, "rejected date literal");
                Err(ValueError::invalid_literal(SQL_KEYWORD, text, Some(source)))
            }
        }
    }

    /// Returns the packed date value
    #[inline]
    pub const fn date_value(&self) -> i64 {
        self.date_value
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        calendar::year_from_date_value(self.date_value)
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        calendar::month_from_date_value(self.date_value)
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        calendar::day_from_date_value(self.date_value)
    }

    /// Returns (year, month, day)
    pub const fn fields(&self) -> (i32, u32, u32) {
        calendar::decode(self.date_value)
    }

    /// Formats as `YYYY-MM-DD`; see [`calendar::write_date`] for years
    /// outside `1..=9999`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// SQL literal form, e.g. `DATE '2000-01-02'`
    pub fn to_sql(&self) -> String {
        format!("{SQL_KEYWORD} '{}'", self)
    }

    /// Always [`PRECISION`]
    pub const fn precision(&self) -> u32 {
        PRECISION
    }

    /// Always [`DISPLAY_SIZE`], whatever the rendered length.
    pub const fn display_size(&self) -> usize {
        DISPLAY_SIZE
    }

    pub const fn value_type(&self) -> ValueType {
        ValueType::Date
    }

    /// The packed value folded to 32 bits (high half xor low half).
    pub const fn hash_code(&self) -> i32 {
        (self.date_value ^ ((self.date_value as u64) >> 32) as i64) as i32
    }

    /// Converts to a chrono date for parameter binding.
    /// Returns `None` for invalid fields or years chrono cannot represent.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let (year, month, day) = self.fields();
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// `#[serde(deserialize_with)]` helper yielding the interned instance.
    ///
    /// # Errors
    /// Fails if the input is not a string holding a valid date literal.
    pub fn deserialize_shared<'de, D>(deserializer: D) -> Result<Arc<Self>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Cacheable for DateValue {
    fn hash_code(&self) -> i32 {
        Self::hash_code(self)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        calendar::write_date(f, self.date_value)
    }
}

impl PartialOrd for DateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Packed order is chronological order.
        self.date_value.cmp(&other.date_value)
    }
}

impl FromStr for DateValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map(|shared| Self::clone(&shared))
    }
}

impl serde::Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
