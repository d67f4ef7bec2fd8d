use {
    crate::{display_json, BuilderError, StatementDocument},
    derive_builder::Builder,
    serde::{
        ser::{SerializeMap, Serializer},
        Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Policy versions.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PolicyVersion {
    V2008_10_17,
    #[default]
    V2012_10_17,
}

impl Display for PolicyVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::V2008_10_17 => f.write_str("2008-10-17"),
            Self::V2012_10_17 => f.write_str("2012-10-17"),
        }
    }
}

impl FromStr for PolicyVersion {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2008-10-17" => Ok(Self::V2008_10_17),
            "2012-10-17" => Ok(Self::V2012_10_17),
            _ => Err(BuilderError::InvalidPolicyVersion(s.to_string())),
        }
    }
}

impl Serialize for PolicyVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// A policy document wrapping one or more built statements.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct Policy {
    /// The version of the policy language. Policy variables such as `${aws:username}` in resources are only
    /// honored under `2012-10-17`, which is the default.
    #[builder(setter(into), default)]
    version: PolicyVersion,

    /// An optional identifier for the policy. Some services require this element.
    #[builder(setter(into, strip_option), default)]
    id: Option<String>,

    /// The statements in the policy. Always rendered as an array, even for a single statement.
    #[builder(setter(into))]
    statement: Vec<StatementDocument>,
}

impl Policy {
    #[inline]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    #[inline]
    pub fn version(&self) -> PolicyVersion {
        self.version
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn statement(&self) -> &[StatementDocument] {
        &self.statement
    }
}

display_json!(Policy);

impl From<StatementDocument> for Policy {
    fn from(statement: StatementDocument) -> Self {
        Self {
            version: PolicyVersion::default(),
            id: None,
            statement: vec![statement],
        }
    }
}

impl FromIterator<StatementDocument> for Policy {
    fn from_iter<I: IntoIterator<Item = StatementDocument>>(iter: I) -> Self {
        Self {
            version: PolicyVersion::default(),
            id: None,
            statement: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(None)?;
        state.serialize_entry("Version", &self.version)?;

        if let Some(id) = &self.id {
            state.serialize_entry("Id", id)?;
        }

        state.serialize_entry("Statement", &self.statement)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{Action, BuilderError, Policy, PolicyVersion, Resource, StatementDocument},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    fn get_parameter() -> StatementDocument {
        StatementDocument::builder()
            .action(Action::from_str("ssm:GetParameter").unwrap())
            .resource(Resource::from_str("arn:aws:ssm:*:*:parameter/app").unwrap())
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn test_versions() {
        assert_eq!(PolicyVersion::default(), PolicyVersion::V2012_10_17);
        assert_eq!(PolicyVersion::from_str("2008-10-17").unwrap(), PolicyVersion::V2008_10_17);
        assert_eq!(PolicyVersion::V2012_10_17.to_string(), "2012-10-17");
        assert_eq!(
            PolicyVersion::from_str("2020-01-01").unwrap_err(),
            BuilderError::InvalidPolicyVersion("2020-01-01".to_string())
        );
    }

    #[test_log::test]
    fn test_single_statement_is_array() {
        let policy = Policy::from(get_parameter());
        assert_eq!(policy.version(), PolicyVersion::V2012_10_17);
        assert!(policy.id().is_none());
        assert_eq!(policy.statement().len(), 1);

        assert_eq!(
            policy.to_string(),
            indoc! { r#"
            {
                "Version": "2012-10-17",
                "Statement": [
                    {
                        "Effect": "Allow",
                        "Action": "ssm:GetParameter",
                        "Resource": "arn:aws:ssm:*:*:parameter/app"
                    }
                ]
            }"# }
        );
    }

    #[test_log::test]
    fn test_builder() {
        let err = Policy::builder().build().unwrap_err();
        assert_eq!(err.to_string(), "`statement` must be initialized");

        let policy = Policy::builder()
            .version(PolicyVersion::V2008_10_17)
            .id("ParameterAccess")
            .statement(vec![get_parameter(), get_parameter()])
            .build()
            .unwrap();
        assert_eq!(policy.id(), Some("ParameterAccess"));

        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["Version"], "2008-10-17");
        assert_eq!(json["Id"], "ParameterAccess");
        assert_eq!(json["Statement"].as_array().unwrap().len(), 2);

        let collected: Policy = vec![get_parameter()].into_iter().collect();
        assert_eq!(collected.statement()[0], get_parameter());
    }
}
