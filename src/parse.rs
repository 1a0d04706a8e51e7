use crate::calendar::{date_value, is_valid_date};
use crate::consts::DATE_SEPARATOR;
use crate::prelude::*;

/// Why a date literal was rejected.
///
/// Carried as the source of [`crate::ValueError::InvalidDateTimeLiteral`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LiteralError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Missing '{}' separator in {:?}", DATE_SEPARATOR, "_0")]
    MissingSeparator(String),
    #[display(fmt = "Invalid number: {_0:?}")]
    InvalidNumber(String),
    #[display(fmt = "Invalid date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

impl std::error::Error for LiteralError {}

/// Parses a date literal into a packed date value.
///
/// Accepts `[+|-]Y-M-D` after trimming whitespace. The year may have any
/// number of digits and a sign; the first separator is looked for after the
/// first character so that a leading `-` reads as a negative year.
pub fn parse_date_value(text: &str) -> Result<i64, LiteralError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LiteralError::EmptyInput);
    }
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let sign_len = body.chars().next().map_or(0, char::len_utf8);
    let first = body[sign_len..]
        .find(DATE_SEPARATOR)
        .map(|i| i + sign_len)
        .ok_or_else(|| LiteralError::MissingSeparator(trimmed.to_owned()))?;
    let second = body[first + 1..]
        .find(DATE_SEPARATOR)
        .map(|i| i + first + 1)
        .ok_or_else(|| LiteralError::MissingSeparator(trimmed.to_owned()))?;

    let year = parse_field::<i32>(&body[..first])?;
    let month = parse_field::<u32>(&body[first + 1..second])?;
    let day = parse_field::<u32>(&body[second + 1..])?;

    if !is_valid_date(year, month, day) {
        return Err(LiteralError::InvalidDate { year, month, day });
    }
    Ok(date_value(year, month, day))
}

/// Helper to parse one numeric field with a better error message
fn parse_field<T: std::str::FromStr>(s: &str) -> Result<T, LiteralError> {
    s.parse::<T>()
        .map_err(|_| LiteralError::InvalidNumber(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date_value("2000-01-02"), Ok(date_value(2000, 1, 2)));
        assert_eq!(parse_date_value("1991-08-15"), Ok(date_value(1991, 8, 15)));
    }

    #[test]
    fn test_parse_unpadded_fields() {
        assert_eq!(parse_date_value("2000-1-2"), Ok(date_value(2000, 1, 2)));
        assert_eq!(parse_date_value("1-1-1"), Ok(date_value(1, 1, 1)));
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(parse_date_value("  2000-01-02\n"), Ok(date_value(2000, 1, 2)));
    }

    #[test]
    fn test_parse_signed_years() {
        assert_eq!(parse_date_value("-44-03-15"), Ok(date_value(-44, 3, 15)));
        assert_eq!(parse_date_value("+2000-01-02"), Ok(date_value(2000, 1, 2)));
        assert_eq!(parse_date_value("0-01-01"), Ok(date_value(0, 1, 1)));
        assert_eq!(parse_date_value("12345-06-07"), Ok(date_value(12_345, 6, 7)));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_date_value(""), Err(LiteralError::EmptyInput));
        assert_eq!(parse_date_value("   "), Err(LiteralError::EmptyInput));
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            parse_date_value("20000102"),
            Err(LiteralError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_date_value("2000-01"),
            Err(LiteralError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_date_value("-2000"),
            Err(LiteralError::MissingSeparator(_))
        ));
    }

    #[test]
    fn test_bad_tokens() {
        assert_eq!(
            parse_date_value("not-a-date"),
            Err(LiteralError::InvalidNumber("not".to_owned()))
        );
        assert!(matches!(
            parse_date_value("2000-XX-01"),
            Err(LiteralError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_date_value("2000-01-02-03"),
            Err(LiteralError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_date_value("2000--01"),
            Err(LiteralError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_invalid_calendar_dates() {
        assert_eq!(
            parse_date_value("2021-02-29"),
            Err(LiteralError::InvalidDate { year: 2021, month: 2, day: 29 })
        );
        assert!(parse_date_value("2020-02-29").is_ok());
        assert!(parse_date_value("1900-02-29").is_err());
        assert!(parse_date_value("2000-13-01").is_err());
        assert!(parse_date_value("2000-00-01").is_err());
        assert!(parse_date_value("2000-04-31").is_err());
        assert!(parse_date_value("2000-01-00").is_err());
    }

    #[test]
    fn test_non_ascii_input() {
        assert!(parse_date_value("é-01-01").is_err());
        assert!(parse_date_value("２０００-01-01").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(LiteralError::EmptyInput.to_string(), "Empty date string");
        assert_eq!(
            LiteralError::InvalidDate { year: 2021, month: 2, day: 29 }.to_string(),
            "Invalid date 2021-02-29"
        );
        assert_eq!(
            LiteralError::InvalidNumber("not".to_owned()).to_string(),
            "Invalid number: \"not\""
        );
    }
}
