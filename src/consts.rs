/// Precision in digits of a date literal without separators (`YYYYMMDD`)
pub const PRECISION: u32 = 8;

/// Display size of the textual representation of a date.
/// Example: `2000-01-02`
///
/// This stays fixed even though years outside `1..=9999` render longer.
pub const DISPLAY_SIZE: usize = 10;

/// Bit offset of the year within a packed date value
pub const SHIFT_YEAR: u32 = 9;
/// Bit offset of the month within a packed date value
pub const SHIFT_MONTH: u32 = 5;

/// Mask for the month bits once shifted down
pub(crate) const MONTH_MASK: i64 = 0b1111;
/// Mask for the day bits
pub(crate) const DAY_MASK: i64 = 0b1_1111;

/// Largest year rendered with a fixed four-digit width
pub const MAX_PADDED_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u32 = 12;

/// Month number for February
pub const FEBRUARY: u32 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in one 400 year Gregorian cycle
pub(crate) const DAYS_IN_ERA: i64 = 146_097;
/// Days from 0000-03-01 to 1970-01-01
pub(crate) const DAYS_FROM_0000_03_01_TO_1970_01_01: i64 = 719_468;

/// Milliseconds in one day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Type keyword prefixed to a date in generated SQL
pub const SQL_KEYWORD: &str = "DATE";

/// Default number of slots in the value cache
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
/// Largest number of slots the value cache will allocate
pub const MAX_CACHE_CAPACITY: usize = 1 << 20;

/// Environment variable toggling the value cache (`true` / `false`)
pub const CACHE_ENABLED_ENV: &str = "SQL_DATE_OBJECT_CACHE";
/// Environment variable setting the value cache slot count
pub const CACHE_CAPACITY_ENV: &str = "SQL_DATE_OBJECT_CACHE_SIZE";
