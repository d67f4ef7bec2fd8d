use {super::variant::Variant, crate::BuilderError, std::str::FromStr};

/// Numeric operation names.
pub(super) const NUMERIC_DISPLAY_NAMES: [&str; 12] = [
    "NumericEquals",
    "NumericEqualsIfExists",
    "NumericNotEquals",
    "NumericNotEqualsIfExists",
    "NumericLessThan",
    "NumericLessThanIfExists",
    "NumericGreaterThanEquals",
    "NumericGreaterThanEqualsIfExists",
    "NumericLessThanEquals",
    "NumericLessThanEqualsIfExists",
    "NumericGreaterThan",
    "NumericGreaterThanIfExists",
];

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum NumericCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

impl NumericCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        NUMERIC_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }
}

/// Numeric condition values are integers or finite decimals.
pub(super) fn validate_numeric_value(value: &str) -> Result<(), BuilderError> {
    if i64::from_str(value).is_ok() {
        return Ok(());
    }

    match f64::from_str(value) {
        Ok(f) if f.is_finite() => Ok(()),
        _ => Err(BuilderError::InvalidConditionValue(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{validate_numeric_value, NumericCmp},
        crate::condition::variant::Variant,
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_names() {
        assert_eq!(NumericCmp::LessThan.display_name(&Variant::None), "NumericLessThan");
        assert_eq!(NumericCmp::LessThan.display_name(&Variant::Negated), "NumericGreaterThanEquals");
        assert_eq!(NumericCmp::LessThanEquals.display_name(&Variant::IfExistsNegated), "NumericGreaterThanIfExists");
    }

    #[test_log::test]
    fn test_values() {
        assert!(validate_numeric_value("3600").is_ok());
        assert!(validate_numeric_value("-12").is_ok());
        assert!(validate_numeric_value("1.5").is_ok());
        assert!(validate_numeric_value("one").is_err());
        assert!(validate_numeric_value("NaN").is_err());
        assert!(validate_numeric_value("").is_err());
    }
}
