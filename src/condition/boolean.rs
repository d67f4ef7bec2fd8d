use crate::BuilderError;

/// Boolean operation names.
pub(super) const BOOL_DISPLAY_NAMES: [&str; 2] = ["Bool", "BoolIfExists"];

pub(super) fn validate_bool_value(value: &str) -> Result<(), BuilderError> {
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        Ok(())
    } else {
        Err(BuilderError::InvalidConditionValue(value.to_string()))
    }
}
