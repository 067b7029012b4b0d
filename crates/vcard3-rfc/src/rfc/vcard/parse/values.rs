//! vCard value parsers for the non-text value types.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::rfc::vcard::core::{DateOrDateTime, TemporalType};

/// Date-time layouts, extended then basic ISO 8601. `%.f` makes the
/// fraction optional.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y%m%dT%H%M%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M",
];

/// Date layouts, extended then basic ISO 8601.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

/// Unescapes a vCard text value.
///
/// vCard escapes: \n, \N (newline), \, (comma), \; (semicolon), \\ (backslash).
/// Unknown escapes are kept as written.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }

        match chars.peek() {
            Some('n' | 'N') => {
                chars.next();
                result.push('\n');
            }
            Some(&escaped @ (',' | ';' | '\\')) => {
                chars.next();
                result.push(escaped);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parses a BDAY or REV value.
///
/// With no declared type, date-time layouts are tried first and then date
/// layouts; every layout is tried and the last one that parses wins.
#[must_use]
pub fn parse_temporal(value: &str, value_type: Option<TemporalType>) -> Option<DateOrDateTime> {
    match value_type {
        Some(TemporalType::Date) => parse_date(value),
        Some(TemporalType::DateTime) => parse_date_time(value),
        None => {
            let date_time = parse_date_time(value);
            parse_date(value).or(date_time)
        }
    }
}

/// Parses a date-time, with `Z`, a numeric offset, or no offset at all.
#[must_use]
pub fn parse_date_time(value: &str) -> Option<DateOrDateTime> {
    let mut parsed = None;

    for format in DATE_TIME_FORMATS {
        if let Some(body) = value.strip_suffix(['Z', 'z']) {
            if let Ok(naive) = NaiveDateTime::parse_from_str(body, format) {
                parsed = Some(DateOrDateTime::DateTime(naive.and_utc().fixed_offset()));
            }
        } else if let Ok(dt) = DateTime::parse_from_str(value, &format!("{format}%z")) {
            parsed = Some(DateOrDateTime::DateTime(dt));
        } else if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            parsed = Some(DateOrDateTime::Floating(naive));
        }
    }

    parsed
}

/// Parses a calendar date.
#[must_use]
pub fn parse_date(value: &str) -> Option<DateOrDateTime> {
    let mut parsed = None;

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            parsed = Some(DateOrDateTime::Date(date));
        }
    }

    parsed
}

/// Parses a GEO value: two floats separated by `;`.
#[must_use]
pub fn parse_geo(value: &str) -> Option<(f64, f64)> {
    let (latitude, longitude) = value.split_once(';')?;
    Some((latitude.parse().ok()?, longitude.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone as _};

    use super::*;

    #[test]
    fn unescape_known_sequences() {
        assert_eq!(unescape_text("a\\,b\\;c\\\\d\\ne\\Nf"), "a,b;c\\d\ne\nf");
    }

    #[test]
    fn unescape_keeps_unknown_sequences() {
        assert_eq!(unescape_text("C:\\temp\\"), "C:\\temp\\");
    }

    #[test]
    fn date_extended_and_basic() {
        let expected = DateOrDateTime::Date(NaiveDate::from_ymd_opt(1996, 4, 15).unwrap());
        assert_eq!(parse_temporal("1996-04-15", None), Some(expected));
        assert_eq!(parse_temporal("19960415", None), Some(expected));
    }

    #[test]
    fn date_time_utc() {
        let parsed = parse_temporal("1995-10-31T22:27:10Z", None).unwrap();
        let expected = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(1995, 10, 31, 22, 27, 10)
            .unwrap();
        assert_eq!(parsed, DateOrDateTime::DateTime(expected));
    }

    #[test]
    fn date_time_with_offset_and_fraction() {
        let parsed = parse_date_time("1953-10-15T23:10:00.5-05:00").unwrap();
        let DateOrDateTime::DateTime(dt) = parsed else {
            panic!("expected an offset date-time, got {parsed:?}");
        };
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(dt.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn date_time_basic_floating() {
        let parsed = parse_date_time("19531015T231000").unwrap();
        assert!(matches!(parsed, DateOrDateTime::Floating(_)));
    }

    #[test]
    fn declared_type_restricts_layouts() {
        assert!(parse_temporal("1996-04-15", Some(TemporalType::DateTime)).is_none());
        assert!(parse_temporal("1995-10-31T22:27:10Z", Some(TemporalType::Date)).is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_temporal("yesterday", None).is_none());
    }

    #[test]
    fn geo_pairs() {
        let (lat, long) = parse_geo("37.386013;-122.082932").unwrap();
        assert!((lat - 37.386_013).abs() < 1e-9);
        assert!((long + 122.082_932).abs() < 1e-9);
        assert_eq!(parse_geo("37.386013,-122.082932"), None);
        assert_eq!(parse_geo("north;-122"), None);
    }
}
