use crate::BuilderError;

/// Binary operation names.
pub(super) const BINARY_DISPLAY_NAMES: [&str; 2] = ["BinaryEquals", "BinaryEqualsIfExists"];

/// Binary condition values are base64-encoded.
pub(super) fn validate_binary_value(value: &str) -> Result<(), BuilderError> {
    match base64::decode(value) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::debug!("Binary condition value {:?} is not base64: {}", value, e);
            Err(BuilderError::InvalidConditionValue(value.to_string()))
        }
    }
}
