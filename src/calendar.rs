use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAY_MASK, DAYS_FROM_0000_03_01_TO_1970_01_01, DAYS_IN_ERA,
    DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH,
    MAX_PADDED_YEAR, MILLIS_PER_DAY, MONTH_MASK, SHIFT_MONTH, SHIFT_YEAR,
};
use std::fmt;

// Packed layout: | year (signed) | month (4 bits) | day (5 bits) |
//
// The low nine bits are never negative, so the numeric order of packed
// values is the chronological order, negative years included.

/// Packs a (year, month, day) triple. No validation is performed.
#[inline]
pub const fn date_value(year: i32, month: u32, day: u32) -> i64 {
    ((year as i64) << SHIFT_YEAR) | ((month as i64) << SHIFT_MONTH) | day as i64
}

/// Year of a packed date value
#[inline]
pub const fn year_from_date_value(date_value: i64) -> i32 {
    (date_value >> SHIFT_YEAR) as i32
}

/// Month (1-12) of a packed date value
#[inline]
pub const fn month_from_date_value(date_value: i64) -> u32 {
    ((date_value >> SHIFT_MONTH) & MONTH_MASK) as u32
}

/// Day of month (1-31) of a packed date value
#[inline]
pub const fn day_from_date_value(date_value: i64) -> u32 {
    (date_value & DAY_MASK) as u32
}

/// Unpacks a date value into (year, month, day)
#[inline]
pub const fn decode(date_value: i64) -> (i32, u32, u32) {
    (
        year_from_date_value(date_value),
        month_from_date_value(date_value),
        day_from_date_value(date_value),
    )
}

/// Proleptic Gregorian leap year rule
pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Whether the fields name a real day of the proleptic Gregorian calendar.
///
/// There is no Julian switchover: `1582-10-10` is valid and `1500-02-29`
/// is not, unlike calendars that change rules in October 1582.
pub const fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    if month == 0 || month > MAX_MONTH {
        return false;
    }
    day != 0 && day <= days_in_month(year, month)
}

/// Days since 1970-01-01 of the given civil date.
///
/// ref: http://howardhinnant.github.io/date_algorithms.html
pub const fn epoch_days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let month = (if month > 2 { month - 3 } else { month + 9 }) as i64;
    let era = year.div_euclid(GREGORIAN_CYCLE as i64);
    let year_of_era = year.rem_euclid(GREGORIAN_CYCLE as i64);
    let day_of_year = (153 * month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_IN_ERA + day_of_era - DAYS_FROM_0000_03_01_TO_1970_01_01
}

/// Civil date of the given number of days since 1970-01-01.
///
/// ref: http://howardhinnant.github.io/date_algorithms.html
pub const fn civil_from_epoch_days(days: i64) -> (i32, u32, u32) {
    let days = days + DAYS_FROM_0000_03_01_TO_1970_01_01;
    let era = days.div_euclid(DAYS_IN_ERA);
    let day_of_era = days.rem_euclid(DAYS_IN_ERA);
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / (DAYS_IN_ERA - 1))
            / 365;
    let year = year_of_era + era * GREGORIAN_CYCLE as i64;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month = (day_of_year * 5 + 2) / 153;
    let day = day_of_year - (153 * month + 2) / 5 + 1;
    let month = if month < 10 { month + 3 } else { month - 9 };
    let year = if month <= 2 { year + 1 } else { year };
    (year as i32, month as u32, day as u32)
}

/// Packed date value of the local day containing `millis`, where
/// `offset_seconds` is the UTC offset in effect at that instant.
pub const fn date_value_from_local_millis(millis: i64, offset_seconds: i32) -> i64 {
    let local = millis.saturating_add(offset_seconds as i64 * 1000);
    let (year, month, day) = civil_from_epoch_days(local.div_euclid(MILLIS_PER_DAY));
    date_value(year, month, day)
}

/// Writes `date_value` as `YYYY-MM-DD`.
///
/// Years outside `1..=9999` are written without padding (`-44-03-15`,
/// `10000-01-01`). Month and day are always two digits.
pub fn write_date<W: fmt::Write>(out: &mut W, date_value: i64) -> fmt::Result {
    let (year, month, day) = decode(date_value);
    if year > 0 && year <= MAX_PADDED_YEAR {
        write!(out, "{year:04}")?;
    } else {
        write!(out, "{year}")?;
    }
    write!(out, "{DATE_SEPARATOR}{month:02}{DATE_SEPARATOR}{day:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        assert_eq!(date_value(2000, 1, 2), (2000 << 9) | (1 << 5) | 2);
        assert_eq!(date_value(0, 1, 1), 33);
    }

    #[test]
    fn test_decode_roundtrip() {
        for &(y, m, d) in &[
            (1, 1, 1),
            (1999, 12, 31),
            (2000, 2, 29),
            (9999, 12, 31),
            (0, 6, 15),
            (-1, 12, 31),
            (-44, 3, 15),
            (10_000, 1, 1),
            (i32::MAX, 12, 31),
            (i32::MIN, 1, 1),
        ] {
            let packed = date_value(y, m, d);
            assert_eq!(decode(packed), (y, m, d));
            assert_eq!(decode(date_value(y, m, d)), decode(packed));
        }
    }

    #[test]
    fn test_packed_order_is_chronological() {
        let dates = [
            date_value(-2, 12, 31),
            date_value(-1, 1, 1),
            date_value(-1, 12, 31),
            date_value(0, 1, 1),
            date_value(0, 12, 31),
            date_value(1, 1, 1),
            date_value(1999, 12, 31),
            date_value(2000, 1, 1),
            date_value(2000, 1, 2),
            date_value(2000, 2, 1),
        ];
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
    }

    #[test]
    fn test_valid_dates() {
        assert!(is_valid_date(2020, 2, 29));
        assert!(!is_valid_date(2021, 2, 29));
        assert!(!is_valid_date(2021, 4, 31));
        assert!(!is_valid_date(2021, 0, 1));
        assert!(!is_valid_date(2021, 13, 1));
        assert!(!is_valid_date(2021, 1, 0));
        assert!(is_valid_date(-1, 12, 31));
        // no Julian switchover
        assert!(is_valid_date(1582, 10, 10));
        assert!(!is_valid_date(1500, 2, 29));
    }

    #[test]
    fn test_epoch_days() {
        assert_eq!(epoch_days_from_civil(1970, 1, 1), 0);
        assert_eq!(epoch_days_from_civil(1969, 12, 31), -1);
        assert_eq!(epoch_days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(civil_from_epoch_days(0), (1970, 1, 1));
        assert_eq!(civil_from_epoch_days(-1), (1969, 12, 31));
        assert_eq!(civil_from_epoch_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_epoch_days(-719_528), (0, 1, 1));
    }

    #[test]
    fn test_epoch_days_roundtrip() {
        for days in (-1_000_000..1_000_000).step_by(997) {
            let (y, m, d) = civil_from_epoch_days(days);
            assert!(is_valid_date(y, m, d));
            assert_eq!(epoch_days_from_civil(y, m, d), days);
        }
    }

    #[test]
    fn test_local_millis() {
        assert_eq!(date_value_from_local_millis(0, 0), date_value(1970, 1, 1));
        assert_eq!(date_value_from_local_millis(-1, 0), date_value(1969, 12, 31));
        // 1970-01-01T20:00Z is already the 2nd east of UTC+4
        assert_eq!(
            date_value_from_local_millis(20 * 3_600_000, 4 * 3600),
            date_value(1970, 1, 2)
        );
        assert_eq!(
            date_value_from_local_millis(3_600_000, -2 * 3600),
            date_value(1969, 12, 31)
        );
        // saturates instead of overflowing
        let (y, _, _) = decode(date_value_from_local_millis(i64::MAX, 3600));
        assert!(y > 292_000_000);
    }

    #[test]
    fn test_write_date() {
        let render = |v| {
            let mut s = String::new();
            write_date(&mut s, v).unwrap();
            s
        };
        assert_eq!(render(date_value(2000, 1, 2)), "2000-01-02");
        assert_eq!(render(date_value(1, 1, 1)), "0001-01-01");
        assert_eq!(render(date_value(9999, 12, 31)), "9999-12-31");
        assert_eq!(render(date_value(0, 1, 1)), "0-01-01");
        assert_eq!(render(date_value(-44, 3, 15)), "-44-03-15");
        assert_eq!(render(date_value(10_000, 1, 1)), "10000-01-01");
    }
}
