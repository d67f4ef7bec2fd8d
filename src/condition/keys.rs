use {
    super::{op::SetQualifier, ConditionType, Operator},
    crate::{condop, template::Template},
    lazy_static::lazy_static,
    std::str::FromStr,
};

/// A global (`aws:`) condition key: available on every action of every service.
#[derive(Clone, Debug)]
pub struct GlobalKey {
    key: Template,
    condition_type: ConditionType,
    multivalued: bool,
    default_operator: Operator,
}

impl GlobalKey {
    fn new(key: &str, condition_type: ConditionType, multivalued: bool, default_operator: Operator) -> Self {
        Self {
            key: Template::from_str(key).unwrap_or_else(|e| panic!("invalid global condition key {}: {}", key, e)),
            condition_type,
            multivalued,
            default_operator,
        }
    }

    #[inline]
    pub fn key(&self) -> &Template {
        &self.key
    }

    #[inline]
    pub fn condition_type(&self) -> ConditionType {
        self.condition_type
    }

    #[inline]
    pub fn is_multivalued(&self) -> bool {
        self.multivalued
    }

    #[inline]
    pub fn default_operator(&self) -> Operator {
        self.default_operator
    }
}

const STRING_LIKE: Operator = Operator::new(condop::StringLike);

lazy_static! {
    static ref GLOBAL_KEYS: Vec<GlobalKey> = {
        use ConditionType::*;
        vec![
            GlobalKey::new(
                "aws:CalledVia",
                String,
                true,
                Operator::qualified(SetQualifier::ForAnyValue, condop::StringEquals),
            ),
            GlobalKey::new("aws:CalledViaFirst", String, false, STRING_LIKE),
            GlobalKey::new("aws:CalledViaLast", String, false, STRING_LIKE),
            GlobalKey::new("aws:CurrentTime", Date, false, Operator::new(condop::DateLessThanEquals)),
            GlobalKey::new("aws:EpochTime", Date, false, Operator::new(condop::DateLessThanEquals)),
            GlobalKey::new("aws:MultiFactorAuthAge", Numeric, false, Operator::new(condop::NumericLessThan)),
            GlobalKey::new("aws:MultiFactorAuthPresent", Bool, false, Operator::new(condop::Bool)),
            GlobalKey::new("aws:PrincipalAccount", String, false, STRING_LIKE),
            GlobalKey::new("aws:PrincipalArn", Arn, false, Operator::new(condop::ArnLike)),
            GlobalKey::new("aws:PrincipalOrgID", String, false, STRING_LIKE),
            GlobalKey::new("aws:PrincipalOrgPaths", String, true, STRING_LIKE),
            GlobalKey::new("aws:PrincipalTag/${TagKey}", String, false, STRING_LIKE),
            GlobalKey::new("aws:PrincipalType", String, false, STRING_LIKE),
            GlobalKey::new("aws:referer", String, false, STRING_LIKE),
            GlobalKey::new("aws:RequestedRegion", String, false, STRING_LIKE),
            GlobalKey::new("aws:RequestTag/${TagKey}", String, false, STRING_LIKE),
            GlobalKey::new("aws:ResourceTag/${TagKey}", String, false, STRING_LIKE),
            GlobalKey::new("aws:SecureTransport", Bool, false, Operator::new(condop::Bool)),
            GlobalKey::new("aws:SourceAccount", String, false, STRING_LIKE),
            GlobalKey::new("aws:SourceArn", Arn, false, Operator::new(condop::ArnLike)),
            GlobalKey::new("aws:SourceIp", IpAddress, false, Operator::new(condop::IpAddress)),
            GlobalKey::new("aws:SourceVpc", String, false, STRING_LIKE),
            GlobalKey::new("aws:SourceVpce", String, false, STRING_LIKE),
            GlobalKey::new("aws:TagKeys", String, true, STRING_LIKE),
            GlobalKey::new("aws:TokenIssueTime", Date, false, Operator::new(condop::DateGreaterThanEquals)),
            GlobalKey::new("aws:UserAgent", String, false, STRING_LIKE),
            GlobalKey::new("aws:userid", String, false, STRING_LIKE),
            GlobalKey::new("aws:username", String, false, STRING_LIKE),
            GlobalKey::new("aws:ViaAWSService", Bool, false, Operator::new(condop::Bool)),
            GlobalKey::new("aws:VpcSourceIp", IpAddress, false, Operator::new(condop::IpAddress)),
        ]
    };
}

/// Look up a concrete global key such as `aws:SourceIp` or `aws:RequestTag/Team`.
///
/// Key names are matched case-insensitively, as IAM does. Tag keys match their `${TagKey}` template.
pub fn global_key(key: &str) -> Option<&'static GlobalKey> {
    if let Some(exact) = GLOBAL_KEYS.iter().find(|g| g.key.as_str().eq_ignore_ascii_case(key)) {
        return Some(exact);
    }

    GLOBAL_KEYS.iter().filter(|g| g.key.has_placeholders()).find(|g| g.key.matches(key))
}

/// The default operator for a key in the `aws:` namespace, or `None` for service keys.
///
/// Uncatalogued `aws:` keys default to `StringLike`.
pub fn global_default_operator(key: &str) -> Option<Operator> {
    if !is_global_key(key) {
        return None;
    }

    Some(global_key(key).map(GlobalKey::default_operator).unwrap_or(STRING_LIKE))
}

#[inline]
pub fn is_global_key(key: &str) -> bool {
    key.len() > 4 && key.get(..4).map_or(false, |prefix| prefix.eq_ignore_ascii_case("aws:"))
}
