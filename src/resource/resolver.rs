use {
    crate::{resource::ResourceArn, template::Template, BuilderError},
    derive_builder::Builder,
    log::{debug, trace},
    std::{collections::BTreeMap, str::FromStr},
};

const DEFAULT_PARTITION: &str = "aws";
const DEFAULT_ACCOUNT: &str = "*";
const DEFAULT_REGION: &str = "*";

/// Per-statement fallback values for the conventional `Account`, `Region`, and `Partition` placeholders.
///
/// Unset fields fall back to `*` for the account and region, and to `aws` for the partition.
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq)]
pub struct ArnDefaults {
    #[builder(setter(into, strip_option), default)]
    account: Option<String>,

    #[builder(setter(into, strip_option), default)]
    region: Option<String>,

    #[builder(setter(into, strip_option), default)]
    partition: Option<String>,
}

impl ArnDefaults {
    pub fn builder() -> ArnDefaultsBuilder {
        ArnDefaultsBuilder::default()
    }

    #[inline]
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    #[inline]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    #[inline]
    pub fn partition(&self) -> Option<&str> {
        self.partition.as_deref()
    }
}

/// Turns a resource type's ARN template and caller-supplied values into a concrete [ResourceArn].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArnResolver<'a> {
    service_prefix: &'a str,
    defaults: &'a ArnDefaults,
}

impl<'a> ArnResolver<'a> {
    pub fn new(service_prefix: &'a str, defaults: &'a ArnDefaults) -> Self {
        Self {
            service_prefix,
            defaults,
        }
    }

    /// Resolve a single placeholder name.
    ///
    /// An explicitly supplied value always wins, even when empty. Otherwise the conventional placeholders fall back
    /// to the instance defaults and then to the universal fallbacks; any other placeholder is unresolved.
    pub fn lookup(&self, name: &str, values: &BTreeMap<String, String>) -> Option<String> {
        if let Some(value) = values.get(name) {
            return Some(value.clone());
        }

        let fallback = match name {
            "Partition" => self.defaults.partition().unwrap_or(DEFAULT_PARTITION),
            "Region" => self.defaults.region().unwrap_or(DEFAULT_REGION),
            "Account" | "AccountId" => {
                match values.get(if name == "Account" { "AccountId" } else { "Account" }) {
                    Some(alias) => return Some(alias.clone()),
                    None => self.defaults.account().unwrap_or(DEFAULT_ACCOUNT),
                }
            }
            "ServicePrefix" => self.service_prefix,
            _ => return None,
        };

        trace!("Placeholder ${{{}}} not supplied; using fallback {:?}", name, fallback);
        Some(fallback.to_string())
    }

    /// Resolve `template` into an ARN.
    ///
    /// # Errors
    ///
    /// * [BuilderError::UnresolvedPlaceholder] if a resource-identifying placeholder was not supplied, or a supplied
    ///   or default value carries a `${...}` token other than an IAM policy variable.
    /// * [BuilderError::InvalidResource] if the rendered string is not ARN-shaped.
    pub fn resolve(&self, template: &Template, values: &BTreeMap<String, String>) -> Result<ResourceArn, BuilderError> {
        for key in values.keys() {
            if !template.placeholders().contains(&key.as_str()) {
                debug!("Value for {} ignored: template {} has no such placeholder", key, template);
            }
        }

        let rendered = template.render(|name| self.lookup(name, values))?;
        let arn = ResourceArn::from_str(&rendered)?;
        debug!("Resolved {} -> {}", template, arn);
        Ok(arn)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{ArnDefaults, ArnResolver},
        crate::{template::Template, BuilderError},
        pretty_assertions::assert_eq,
        std::{collections::BTreeMap, str::FromStr},
    };

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    const PARAMETER: &str = "arn:${Partition}:ssm:${Region}:${Account}:parameter/${FullyQualifiedParameterName}";

    #[test_log::test]
    fn test_universal_fallbacks() {
        let defaults = ArnDefaults::default();
        let resolver = ArnResolver::new("ssm", &defaults);
        let template = Template::from_str(PARAMETER).unwrap();

        let arn = resolver.resolve(&template, &values(&[("FullyQualifiedParameterName", "/app/db/password")])).unwrap();
        assert_eq!(arn.to_string(), "arn:aws:ssm:*:*:parameter//app/db/password");
        assert!(!arn.to_string().contains("${"));
    }

    #[test_log::test]
    fn test_instance_defaults() {
        let defaults =
            ArnDefaults::builder().account("123456789012").region("us-west-2").partition("aws-cn").build().unwrap();
        assert_eq!(defaults.account(), Some("123456789012"));
        let resolver = ArnResolver::new("ssm", &defaults);
        let template = Template::from_str(PARAMETER).unwrap();

        let arn = resolver.resolve(&template, &values(&[("FullyQualifiedParameterName", "app")])).unwrap();
        assert_eq!(arn.to_string(), "arn:aws-cn:ssm:us-west-2:123456789012:parameter/app");

        // Explicit values beat instance defaults, and an empty value is used verbatim.
        let explicit = values(&[("FullyQualifiedParameterName", "app"), ("Region", ""), ("Account", "111122223333")]);
        let arn = resolver.resolve(&template, &explicit).unwrap();
        assert_eq!(arn.to_string(), "arn:aws-cn:ssm::111122223333:parameter/app");
    }

    #[test_log::test]
    fn test_account_alias_and_service_prefix() {
        let defaults = ArnDefaults::default();
        let resolver = ArnResolver::new("kms", &defaults);

        let template =
            Template::from_str("arn:${Partition}:${ServicePrefix}:${Region}:${AccountId}:key/${KeyId}").unwrap();
        let arn = resolver.resolve(&template, &values(&[("KeyId", "k1"), ("Account", "123456789012")])).unwrap();
        assert_eq!(arn.to_string(), "arn:aws:kms:*:123456789012:key/k1");

        let arn = resolver.resolve(&template, &values(&[("KeyId", "k1")])).unwrap();
        assert_eq!(arn.to_string(), "arn:aws:kms:*:*:key/k1");
    }

    #[test_log::test]
    fn test_missing_identifier() {
        let defaults = ArnDefaults::default();
        let resolver = ArnResolver::new("ssm", &defaults);
        let template = Template::from_str(PARAMETER).unwrap();

        let e = resolver.resolve(&template, &values(&[("Region", "us-east-1")])).unwrap_err();
        assert_eq!(
            e,
            BuilderError::UnresolvedPlaceholder {
                placeholder: "FullyQualifiedParameterName".to_string(),
                template: PARAMETER.to_string(),
            }
        );
    }

    #[test_log::test]
    fn test_values_never_leave_tokens() {
        let defaults = ArnDefaults::default();
        let resolver = ArnResolver::new("ssm", &defaults);
        let template = Template::from_str(PARAMETER).unwrap();

        let e = resolver
            .resolve(&template, &values(&[("FullyQualifiedParameterName", "${FullyQualifiedParameterName}")]))
            .unwrap_err();
        assert_eq!(
            e,
            BuilderError::UnresolvedPlaceholder {
                placeholder: "FullyQualifiedParameterName".to_string(),
                template: PARAMETER.to_string(),
            }
        );

        let bad_default = ArnDefaults::builder().account("${Account}").build().unwrap();
        let resolver = ArnResolver::new("ssm", &bad_default);
        assert!(resolver.resolve(&template, &values(&[("FullyQualifiedParameterName", "app")])).is_err());

        // IAM policy variables are resolved at evaluation time and pass through.
        let resolver = ArnResolver::new("ssm", &defaults);
        let arn = resolver
            .resolve(&template, &values(&[("FullyQualifiedParameterName", "home/${aws:username}")]))
            .unwrap();
        assert_eq!(arn.to_string(), "arn:aws:ssm:*:*:parameter/home/${aws:username}");
    }

    #[test_log::test]
    fn test_repeated_and_raw() {
        let defaults = ArnDefaults::default();
        let resolver = ArnResolver::new("s3", &defaults);

        let template = Template::from_str("arn:${Partition}:s3:::${BucketName}/${BucketName}/*").unwrap();
        let arn = resolver.resolve(&template, &values(&[("BucketName", "logs")])).unwrap();
        assert_eq!(arn.to_string(), "arn:aws:s3:::logs/logs/*");

        let template = Template::from_str("arn:aws:s3:::fixed-bucket").unwrap();
        let arn = resolver.resolve(&template, &values(&[])).unwrap();
        assert_eq!(arn.to_string(), "arn:aws:s3:::fixed-bucket");
    }

    #[test_log::test]
    fn test_not_an_arn() {
        let defaults = ArnDefaults::default();
        let resolver = ArnResolver::new("ssm", &defaults);
        let template = Template::from_str("parameter/${Name}").unwrap();

        let e = resolver.resolve(&template, &values(&[("Name", "x")])).unwrap_err();
        assert_eq!(e, BuilderError::InvalidResource("parameter/x".to_string()));
    }
}
