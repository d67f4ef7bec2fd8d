/// The variant on an operation.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Variant {
    None = 0,
    IfExists = 1,
    Negated = 2,
    IfExistsNegated = 3,
}

impl Variant {
    #[inline]
    pub(super) fn as_usize(self) -> usize {
        self as usize
    }

    #[inline]
    pub(super) fn if_exists(self) -> bool {
        matches!(self, Self::IfExists | Self::IfExistsNegated)
    }

    #[inline]
    pub(super) fn negated(self) -> bool {
        matches!(self, Self::Negated | Self::IfExistsNegated)
    }
}

#[cfg(test)]
mod tests {
    use super::Variant;

    #[test_log::test]
    fn test_variant_flags() {
        assert_eq!(Variant::None.as_usize(), 0);
        assert_eq!(Variant::IfExistsNegated.as_usize(), 3);
        assert!(!Variant::None.if_exists());
        assert!(Variant::IfExists.if_exists());
        assert!(!Variant::IfExists.negated());
        assert!(Variant::Negated.negated());
        assert!(Variant::IfExistsNegated.if_exists());
        assert!(Variant::IfExistsNegated.negated());
    }
}
