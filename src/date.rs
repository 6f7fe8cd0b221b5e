//! Wire date format used when decoding response bodies.
//!
//! Dates travel as `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'` in UTC, e.g.
//! `2021-01-19T00:00:00.000Z`. Typed decoding relies on serde, so date
//! fields opt into the format with the [`iso8601_full`] adapter:
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Event {
//!     #[serde(with = "fetch::date::iso8601_full")]
//!     when: DateTime<Utc>,
//! }
//!
//! let event: Event = serde_json::from_str(r#"{"when":"2021-01-19T00:00:00.000Z"}"#).unwrap();
//! assert_eq!(fetch::date::format_date(&event.when), "2021-01-19T00:00:00.000Z");
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};

/// `chrono` pattern for `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// `chrono` pattern for the short `yyyy-MM-dd` form.
pub const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a date in the wire format as a UTC instant.
///
/// # Errors
///
/// Returns the `chrono` parse error when `s` does not match [`DATE_FORMAT`].
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT).map(|naive| naive.and_utc())
}

/// Formats a UTC instant in the wire format, always with three fractional digits.
#[must_use]
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats the UTC calendar day of `date` as `yyyy-MM-dd`.
#[must_use]
pub fn format_local_date(date: &DateTime<Utc>) -> String {
    date.format(LOCAL_DATE_FORMAT).to_string()
}

/// Serde adapter for `DateTime<Utc>` fields in the wire format.
pub mod iso8601_full {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serializes `date` with [`DATE_FORMAT`](super::DATE_FORMAT).
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        date: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(date))
    }

    /// Deserializes a string in [`DATE_FORMAT`](super::DATE_FORMAT).
    ///
    /// # Errors
    ///
    /// Fails when the value is not a string in the wire format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(|e| de::Error::custom(format!("invalid date {raw:?}: {e}")))
    }

    /// Serde adapter for `Option<DateTime<Utc>>` fields; `null` maps to `None`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer, de};

        /// Serializes `Some` in the wire format and `None` as `null`.
        ///
        /// # Errors
        ///
        /// Propagates serializer errors.
        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.serialize_some(&super::super::format_date(date)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional string in the wire format.
        ///
        /// # Errors
        ///
        /// Fails when a present value is not a string in the wire format.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| {
                    super::super::parse_date(&raw)
                        .map_err(|e| de::Error::custom(format!("invalid date {raw:?}: {e}")))
                })
                .transpose()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, TimeZone, Timelike};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(with = "iso8601_full")]
        created: DateTime<Utc>,
        #[serde(default, with = "iso8601_full::option")]
        updated: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_date_reads_utc_instant() {
        let date = parse_date("2021-01-19T00:00:00.000Z").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2021, 1, 19, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_keeps_milliseconds() {
        let date = parse_date("2023-06-30T23:59:58.123Z").unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date.second(), 58);
        assert_eq!(date.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        assert!(parse_date("2021-01-19").is_err());
        assert!(parse_date("2021-01-19T00:00:00+08:00").is_err());
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn test_format_date_always_has_millis() {
        let date = Utc.with_ymd_and_hms(2021, 1, 19, 8, 5, 3).unwrap();
        assert_eq!(format_date(&date), "2021-01-19T08:05:03.000Z");
    }

    #[test]
    fn test_format_local_date() {
        let date = Utc.with_ymd_and_hms(2021, 1, 19, 23, 0, 0).unwrap();
        assert_eq!(format_local_date(&date), "2021-01-19");
    }

    #[test]
    fn test_serde_adapters() {
        let json = r#"{"created":"2021-01-19T00:00:00.000Z","updated":null}"#;
        let parsed: Stamped = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.created.day(), 19);
        assert!(parsed.updated.is_none());

        let missing: Stamped =
            serde_json::from_str(r#"{"created":"2021-01-19T00:00:00.000Z"}"#).unwrap();
        assert!(missing.updated.is_none());

        let json = serde_json::to_string(&Stamped {
            created: parsed.created,
            updated: Some(parsed.created),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"created":"2021-01-19T00:00:00.000Z","updated":"2021-01-19T00:00:00.000Z"}"#
        );
    }

    #[test]
    fn test_serde_adapter_rejects_bad_date() {
        let result = serde_json::from_str::<Stamped>(r#"{"created":"yesterday"}"#);
        assert!(result.is_err());
    }
}
