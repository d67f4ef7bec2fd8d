mod arn;
mod resolver;

use {
    crate::{serutil::ElementList, BuilderError},
    serde::{ser::Serializer, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

pub use {
    arn::ResourceArn,
    resolver::{ArnDefaults, ArnDefaultsBuilder, ArnDefaultsBuilderError, ArnResolver},
};

/// A list of resources as it appears in a statement document.
pub type ResourceList = ElementList<Resource>;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Resource {
    Any,
    Arn(ResourceArn),
}

impl Resource {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<ResourceArn> for Resource {
    fn from(arn: ResourceArn) -> Self {
        Self::Arn(arn)
    }
}

impl FromStr for Resource {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::Any);
        }

        let arn = ResourceArn::from_str(s)?;
        Ok(Self::Arn(arn))
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Any => f.write_str("*"),
            Self::Arn(arn) => f.write_str(arn.as_str()),
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_str("*"),
            Self::Arn(arn) => serializer.serialize_str(arn.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{Resource, ResourceArn, ResourceList},
        indoc::indoc,
        pretty_assertions::{assert_eq, assert_ne},
        std::str::FromStr,
    };

    #[test_log::test]
    fn check_from() {
        let arn = ResourceArn::from_str("arn:aws:kms:*:*:key/1234abcd").unwrap();
        let rl1: ResourceList = Resource::from(arn.clone()).into();
        let rl2: ResourceList = vec![Resource::Arn(arn.clone())].into();
        let rl3: ResourceList = vec![Resource::Arn(arn.clone()), Resource::Any].into();

        assert_eq!(rl1, rl2);
        assert_ne!(rl1, rl3);
        assert_eq!(rl1.len(), 1);
        assert_eq!(rl3.len(), 2);
        assert_eq!(rl1[0], Resource::Arn(arn));

        assert_eq!(format!("{}", rl1), r#""arn:aws:kms:*:*:key/1234abcd""#);
        assert_eq!(
            format!("{}", rl3),
            indoc! { r#"
            [
                "arn:aws:kms:*:*:key/1234abcd",
                "*"
            ]"# }
        );
    }

    #[test_log::test]
    fn check_bad() {
        let e = Resource::from_str("arn:aws").unwrap_err();
        assert_eq!(e.to_string(), "Invalid resource: arn:aws");
        let e = Resource::from_str("**").unwrap_err();
        assert_eq!(e.to_string(), "Invalid resource: **");
    }

    #[test_log::test]
    fn check_derived() {
        let r1a = Resource::from_str("arn:aws:ssm:us-east-2:123456789012:document/*").unwrap();
        let r1b = Resource::from_str("arn:aws:ssm:us-east-2:123456789012:document/*").unwrap();
        let r2 = Resource::from_str("*").unwrap();

        assert_eq!(r1a, r1b);
        assert_ne!(r1a, r2);
        assert!(r2.is_any());
        assert!(!r1a.is_any());

        assert_eq!(r1a.to_string(), "arn:aws:ssm:us-east-2:123456789012:document/*");
        assert_eq!(r2.to_string(), "*");
        assert_eq!(serde_json::to_string(&r2).unwrap(), r#""*""#);
    }
}
