//! Timestamp handling for the page payload.
//!
//! The service renders `created_at` values in the legacy Ruby date
//! format (`Wed Oct 10 20:19:24 +0000 2018`); the CSV sink wants ISO-8601.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Format of `created_at` values in the payload.
pub const RUBY_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Render a timestamp as ISO-8601 with an explicit `+00:00` offset.
pub fn iso8601(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Deserialize an optional Ruby-date string into a UTC timestamp.
pub(crate) fn ruby_date_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) => DateTime::parse_from_str(&s, RUBY_DATE_FORMAT)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "ruby_date_opt")]
        created_at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_ruby_date() {
        let w: Wrapper = serde_json::from_str(r#"{ "created_at": "Wed Oct 10 20:19:24 +0000 2018" }"#).unwrap();
        let expected = Utc.with_ymd_and_hms(2018, 10, 10, 20, 19, 24).unwrap();
        assert_eq!(w.created_at, Some(expected));
    }

    #[test]
    fn test_parse_ruby_date_with_offset() {
        let w: Wrapper = serde_json::from_str(r#"{ "created_at": "Mon Aug 19 02:04:28 +0900 2013" }"#).unwrap();
        let expected = Utc.with_ymd_and_hms(2013, 8, 18, 17, 4, 28).unwrap();
        assert_eq!(w.created_at, Some(expected));
    }

    #[test]
    fn test_missing_created_at() {
        let w: Wrapper = serde_json::from_str("{}").unwrap();
        assert_eq!(w.created_at, None);
    }

    #[test]
    fn test_invalid_ruby_date_is_an_error() {
        let res: Result<Wrapper, _> = serde_json::from_str(r#"{ "created_at": "2018-10-10" }"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_iso8601() {
        let t = Utc.with_ymd_and_hms(2013, 8, 19, 2, 4, 28).unwrap();
        assert_eq!(iso8601(&t), "2013-08-19T02:04:28+00:00");
    }
}
