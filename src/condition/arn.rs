use {super::variant::Variant, crate::BuilderError};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum ArnCmp {
    Equals = 0,
    Like = 4,
}

impl ArnCmp {
    pub(super) fn display_name(&self, variant: &Variant) -> &'static str {
        ARN_DISPLAY_NAMES[*self as usize | variant.as_usize()]
    }
}

// The order is important here. For a given operation, the if-exists variant must follow, then the negated variant,
// then the negated if-exists variant.

/// ARN operation names.
const ARN_DISPLAY_NAMES: [&str; 8] = [
    "ArnEquals",
    "ArnEqualsIfExists",
    "ArnNotEquals",
    "ArnNotEqualsIfExists",
    "ArnLike",
    "ArnLikeIfExists",
    "ArnNotLike",
    "ArnNotLikeIfExists",
];

/// ARN condition values are either `*` or have all six ARN segments. Segments may hold wildcards.
pub(super) fn validate_arn_value(value: &str) -> Result<(), BuilderError> {
    if value == "*" {
        return Ok(());
    }

    let parts = value.splitn(6, ':').collect::<Vec<&str>>();
    if parts.len() != 6 || parts[0] != "arn" {
        return Err(BuilderError::InvalidConditionValue(value.to_string()));
    }

    Ok(())
}
