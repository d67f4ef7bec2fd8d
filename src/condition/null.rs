use {super::boolean::validate_bool_value, crate::BuilderError};

/// Null operation name.
pub(super) const NULL_DISPLAY_NAME: &str = "Null";

/// `Null` takes `true` (the key must be absent) or `false` (the key must be present).
pub(super) fn validate_null_value(value: &str) -> Result<(), BuilderError> {
    validate_bool_value(value)
}

#[cfg(test)]
mod tests {
    use super::validate_null_value;

    #[test_log::test]
    fn test_values() {
        assert!(validate_null_value("true").is_ok());
        assert!(validate_null_value("false").is_ok());
        assert!(validate_null_value("absent").is_err());
    }
}
