//! Line parser for car counter input.

use chrono::{NaiveDateTime, Timelike};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

use crate::record::{Record, TIMESTAMP_FORMAT};

/// Reasons a line of input cannot be turned into a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected a timestamp and a count, found {0} field(s)")]
    FieldCount(usize),

    #[error("invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("invalid timestamp '{0}': leap seconds are not accepted")]
    LeapSecond(String),

    #[error("invalid count '{value}': {source}")]
    Count {
        value: String,
        source: ParseIntError,
    },
}

/// Parses a `<YYYY-MM-DDTHH:MM:SS> <count>` line.
///
/// Fields may be separated by any run of whitespace; leading and trailing
/// whitespace is ignored.
///
/// # Errors
///
/// Returns a [`ParseError`] if the line does not hold exactly two fields, the
/// timestamp does not match the pattern or names a leap second, or the count
/// is not a non-negative integer.
pub fn parse_line(line: &str) -> Result<Record, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[timestamp, count] = fields.as_slice() else {
        return Err(ParseError::FieldCount(fields.len()));
    };

    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|source| {
        ParseError::Timestamp {
            value: timestamp.to_string(),
            source,
        }
    })?;
    // chrono maps `:60` to nanosecond >= 1e9
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(ParseError::LeapSecond(timestamp.format(TIMESTAMP_FORMAT).to_string()));
    }

    let count = count.parse::<u64>().map_err(|source| ParseError::Count {
        value: count.to_string(),
        source,
    })?;

    Ok(Record::new(timestamp, count))
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_space_separated() {
        let record = parse_line("2021-12-01T07:00:00 10").unwrap();
        assert_eq!(record.timestamp, expected_timestamp());
        assert_eq!(record.count, 10);
    }

    #[test]
    fn test_parse_tab_separated() {
        let record = parse_line("2021-12-01T07:00:00\t10").unwrap();
        assert_eq!(record.timestamp, expected_timestamp());
        assert_eq!(record.count, 10);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let record = parse_line("  2021-12-01T07:00:00   \t 10\r\n").unwrap();
        assert_eq!(record, Record::new(expected_timestamp(), 10));
    }

    #[test]
    fn test_parse_via_from_str() {
        let record: Record = "2021-12-01T07:00:00 10".parse().unwrap();
        assert_eq!(record.count, 10);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        assert_eq!(parse_line(""), Err(ParseError::FieldCount(0)));
        assert_eq!(
            parse_line("2021-12-01T07:00:00"),
            Err(ParseError::FieldCount(1))
        );
        assert_eq!(
            parse_line("2021-12-01T07:00:00 10 12"),
            Err(ParseError::FieldCount(3))
        );
    }

    #[test]
    fn test_parse_bad_timestamp() {
        for line in [
            "2021-12-01 10",
            "2021-12-01 07:00:00 10",
            "2021-13-01T07:00:00 10",
            "yesterday 10",
        ] {
            let err = parse_line(line).unwrap_err();
            assert!(
                matches!(err, ParseError::Timestamp { .. } | ParseError::FieldCount(_)),
                "unexpected error for {line:?}: {err}"
            );
        }

        let err = parse_line("2021-12-01T7am 10").unwrap_err();
        assert!(matches!(err, ParseError::Timestamp { ref value, .. } if value == "2021-12-01T7am"));
    }

    #[test]
    fn test_parse_rejects_leap_second() {
        assert!(matches!(
            parse_line("2016-12-31T23:59:60 4"),
            Err(ParseError::LeapSecond(_))
        ));
        assert!(parse_line("2016-12-31T23:59:59 4").is_ok());
    }

    #[test]
    fn test_parse_bad_count() {
        for line in [
            "2021-12-01T07:00:00 ten",
            "2021-12-01T07:00:00 -3",
            "2021-12-01T07:00:00 1.5",
        ] {
            let err = parse_line(line).unwrap_err();
            assert!(matches!(err, ParseError::Count { .. }), "{line:?}: {err}");
        }
    }

    #[test]
    fn test_error_message_names_offending_value() {
        let err = parse_line("2021-12-01T07:00:00 ten").unwrap_err();
        assert!(err.to_string().contains("'ten'"));
    }

    #[test]
    fn test_formatted_record_reparses_to_itself() {
        let records = [
            Record::new(expected_timestamp(), 0),
            Record::new(expected_timestamp(), 42),
            Record::new(
                NaiveDate::from_ymd_opt(1999, 2, 28)
                    .unwrap()
                    .and_hms_opt(23, 59, 59)
                    .unwrap(),
                u64::MAX,
            ),
        ];

        for record in records {
            assert_eq!(parse_line(&record.to_string()), Ok(record));
        }
    }

    fn expected_timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 12, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap()
    }
}
