use {
    super::variant::Variant,
    crate::BuilderError,
    chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc},
    std::str::FromStr,
};

/// Date operation names.
pub(super) const DATE_DISPLAY_NAMES: [&str; 12] = [
    "DateEquals",
    "DateEqualsIfExists",
    "DateNotEquals",
    "DateNotEqualsIfExists",
    "DateLessThan",
    "DateLessThanIfExists",
    "DateGreaterThanEquals",
    "DateGreaterThanEqualsIfExists",
    "DateLessThanEquals",
    "DateLessThanEqualsIfExists",
    "DateGreaterThan",
    "DateGreaterThanIfExists",
];

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum DateCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

impl DateCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        DATE_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }
}

/// Render a timestamp the way condition blocks carry it: ISO 8601 in UTC with milliseconds.
pub(super) fn format_date(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Date condition values are RFC 3339 timestamps, ISO 8601 dates or date-times without an offset, or epoch seconds.
pub(super) fn validate_date_value(value: &str) -> Result<(), BuilderError> {
    if DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || i64::from_str(value).is_ok()
    {
        Ok(())
    } else {
        Err(BuilderError::InvalidConditionValue(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{format_date, validate_date_value, DateCmp},
        crate::condition::variant::Variant,
        chrono::{DateTime, Utc},
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_names() {
        assert_eq!(DateCmp::LessThanEquals.display_name(&Variant::None), "DateLessThanEquals");
        assert_eq!(DateCmp::LessThan.display_name(&Variant::Negated), "DateGreaterThanEquals");
    }

    #[test_log::test]
    fn test_format() {
        let dt = DateTime::parse_from_rfc3339("2022-03-04T07:06:07.089+02:00").unwrap().with_timezone(&Utc);
        assert_eq!(format_date(&dt), "2022-03-04T05:06:07.089Z");
    }

    #[test_log::test]
    fn test_values() {
        assert!(validate_date_value("2022-03-04T05:06:07.089Z").is_ok());
        assert!(validate_date_value("2022-03-04T05:06:07+02:00").is_ok());
        assert!(validate_date_value("2022-03-04T05:06:07").is_ok());
        assert!(validate_date_value("2022-03-04").is_ok());
        assert!(validate_date_value("1646370367").is_ok());
        assert!(validate_date_value("next tuesday").is_err());
        assert!(validate_date_value("2022-13-01").is_err());
    }
}
