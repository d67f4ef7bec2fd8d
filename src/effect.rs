use {
    serde::Serialize,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The effect of a built statement. Statements produced by this crate only ever grant access.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum Effect {
    #[default]
    Allow,
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Allow => f.write_str("Allow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use {crate::Effect, pretty_assertions::assert_eq};

    #[test_log::test]
    fn test_display() {
        assert_eq!(format!("{}", Effect::Allow), "Allow");
        assert_eq!(Effect::default(), Effect::Allow);
        assert_eq!(serde_json::to_string(&Effect::Allow).unwrap(), r#""Allow""#);
    }
}
