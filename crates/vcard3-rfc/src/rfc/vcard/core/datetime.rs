//! vCard date and date-time values (BDAY, REV).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use super::parameter::{ExtensionParam, values};

/// A date, or a date-time with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    /// Calendar date (`1996-04-15`).
    Date(NaiveDate),
    /// Date-time with an offset (`1995-10-31T22:27:10Z`).
    DateTime(DateTime<FixedOffset>),
    /// Date-time without an offset (`1995-10-31T22:27:10`).
    Floating(NaiveDateTime),
}

impl DateOrDateTime {
    /// Returns the calendar date part.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(d) => *d,
            Self::DateTime(dt) => dt.date_naive(),
            Self::Floating(dt) => dt.date(),
        }
    }

    /// Returns whether this value carries a time of day.
    #[must_use]
    pub fn has_time(&self) -> bool {
        !matches!(self, Self::Date(_))
    }
}

impl From<NaiveDate> for DateOrDateTime {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<FixedOffset>> for DateOrDateTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveDateTime> for DateOrDateTime {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Floating(dt)
    }
}

/// The `VALUE` a temporal property declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalType {
    Date,
    DateTime,
}

impl TemporalType {
    /// Parses a `VALUE` parameter (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case(values::DATE) {
            Some(Self::Date)
        } else if value.eq_ignore_ascii_case(values::DATE_TIME) {
            Some(Self::DateTime)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => values::DATE,
            Self::DateTime => values::DATE_TIME,
        }
    }
}

/// BDAY or REV value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Temporal {
    pub value: DateOrDateTime,
    /// Declared `VALUE`, kept so output declares the same type.
    pub value_type: Option<TemporalType>,
    pub x_params: Vec<ExtensionParam>,
}

impl Temporal {
    #[must_use]
    pub fn new(value: impl Into<DateOrDateTime>) -> Self {
        Self {
            value: value.into(),
            value_type: None,
            x_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: TemporalType) -> Self {
        self.value_type = Some(value_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temporal_type_parse_ignores_case() {
        assert_eq!(TemporalType::parse("DATE"), Some(TemporalType::Date));
        assert_eq!(TemporalType::parse("date-time"), Some(TemporalType::DateTime));
        assert_eq!(TemporalType::parse("time"), None);
    }

    #[test]
    fn date_part() {
        let date = NaiveDate::from_ymd_opt(1996, 4, 15).unwrap();
        let dt = date.and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(DateOrDateTime::from(date).date(), date);
        assert_eq!(DateOrDateTime::from(dt).date(), date);
        assert!(!DateOrDateTime::from(date).has_time());
        assert!(DateOrDateTime::from(dt).has_time());
    }
}
