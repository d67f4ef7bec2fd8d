use {
    crate::BuilderError,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

const PARTITION_START: usize = 4;

/// A resolved Amazon Resource Name (ARN) destined for the `Resource` element of a statement.
///
/// The resource segment may contain `*`/`?` wildcards and IAM policy variables such as `${aws:username}`; the other
/// segments are stored as given. For example, `arn:aws:ssm:*:*:parameter//app/db/password` has partition `aws`,
/// service `ssm`, region `*`, account `*` and resource `parameter//app/db/password`.
///
/// [ResourceArn] objects are immutable.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct ResourceArn {
    arn: String,
    service_start: usize,
    region_start: usize,
    account_id_start: usize,
    resource_start: usize,
}

impl ResourceArn {
    /// Create a new ARN from the specified components.
    ///
    /// * `partition` - The partition the resource is in.
    /// * `service` - The service the resource belongs to.
    /// * `region` - The region the resource is in.
    /// * `account_id` - The account ID the resource belongs to.
    /// * `resource` - The resource name.
    pub fn new(partition: &str, service: &str, region: &str, account_id: &str, resource: &str) -> Self {
        let arn = format!("arn:{partition}:{service}:{region}:{account_id}:{resource}");
        let service_start = PARTITION_START + partition.len() + 1;
        let region_start = service_start + service.len() + 1;
        let account_id_start = region_start + region.len() + 1;
        let resource_start = account_id_start + account_id.len() + 1;

        Self {
            arn,
            service_start,
            region_start,
            account_id_start,
            resource_start,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.arn
    }

    #[inline]
    pub fn partition(&self) -> &str {
        &self.arn[PARTITION_START..self.service_start - 1]
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.arn[self.service_start..self.region_start - 1]
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.arn[self.region_start..self.account_id_start - 1]
    }

    #[inline]
    pub fn account_id(&self) -> &str {
        &self.arn[self.account_id_start..self.resource_start - 1]
    }

    #[inline]
    pub fn resource(&self) -> &str {
        &self.arn[self.resource_start..]
    }
}

impl FromStr for ResourceArn {
    type Err = BuilderError;

    /// Create a [ResourceArn] from a string.
    ///
    /// The string must have the form `arn:partition:service:region:account:resource` with non-empty partition,
    /// service and resource segments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(6, ':').collect();
        if parts.len() != 6 || parts[0] != "arn" {
            return Err(BuilderError::InvalidResource(s.to_string()));
        }

        if parts[1].is_empty() || parts[2].is_empty() || parts[5].is_empty() {
            log::debug!("ARN {} is missing a partition, service, or resource", s);
            return Err(BuilderError::InvalidResource(s.to_string()));
        }

        let arn = s.to_string();
        let service_start = PARTITION_START + parts[1].len() + 1;
        let region_start = service_start + parts[2].len() + 1;
        let account_id_start = region_start + parts[3].len() + 1;
        let resource_start = account_id_start + parts[4].len() + 1;

        Ok(Self {
            arn,
            service_start,
            region_start,
            account_id_start,
            resource_start,
        })
    }
}

impl Display for ResourceArn {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.arn)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::ResourceArn,
        crate::BuilderError,
        pretty_assertions::{assert_eq, assert_ne},
        std::{collections::hash_map::DefaultHasher, hash::Hash, str::FromStr},
    };

    #[test_log::test]
    fn check_arn_derived() {
        let arn1a = ResourceArn::from_str("arn:aws:ssm:us-east-1:123456789012:parameter/app/*").unwrap();
        let arn1b = ResourceArn::new("aws", "ssm", "us-east-1", "123456789012", "parameter/app/*");
        let arn1c = arn1a.clone();
        let arn2 = ResourceArn::from_str("arn:aws:ssm:*:*:parameter//app/db/password").unwrap();

        assert_eq!(arn1a, arn1b);
        assert_ne!(arn1a, arn2);
        assert_eq!(arn1c, arn1b);

        // Ensure we can derive a hash for the arn.
        let mut h2 = DefaultHasher::new();
        arn2.hash(&mut h2);

        // Ensure we can debug print the arn.
        _ = format!("{arn2:?}");

        assert_eq!(arn2.to_string(), "arn:aws:ssm:*:*:parameter//app/db/password");
        assert_eq!(arn2.as_str(), "arn:aws:ssm:*:*:parameter//app/db/password");
    }

    #[test_log::test]
    fn check_arn_components() {
        let arn = ResourceArn::from_str("arn:aws:ssm:*:*:parameter//app/db/password").unwrap();
        assert_eq!(arn.partition(), "aws");
        assert_eq!(arn.service(), "ssm");
        assert_eq!(arn.region(), "*");
        assert_eq!(arn.account_id(), "*");
        assert_eq!(arn.resource(), "parameter//app/db/password");

        let arn = ResourceArn::from_str("arn:aws:s3:::examplebucket/${aws:username}/*").unwrap();
        assert_eq!(arn.region(), "");
        assert_eq!(arn.account_id(), "");
        assert_eq!(arn.resource(), "examplebucket/${aws:username}/*");
    }

    #[test_log::test]
    fn check_malformed_arns() {
        let wrong_parts = vec![
            "arn",
            "arn:aws",
            "arn:aws:ssm",
            "arn:aws:ssm:us-east-1",
            "arn:aws:ssm:us-east-1:123456789012",
            "arn::ssm:us-east-1:123456789012:parameter/x",
            "arn:aws::us-east-1:123456789012:parameter/x",
            "arn:aws:ssm:us-east-1:123456789012:",
        ];
        for wrong_part in wrong_parts {
            assert_eq!(
                ResourceArn::from_str(wrong_part).unwrap_err().to_string(),
                format!("Invalid resource: {wrong_part}")
            );
        }

        let err = ResourceArn::from_str("https:aws:ssm:us-east-1:123456789012:parameter/x").unwrap_err();
        assert_eq!(err, BuilderError::InvalidResource("https:aws:ssm:us-east-1:123456789012:parameter/x".to_string()));
    }
}
