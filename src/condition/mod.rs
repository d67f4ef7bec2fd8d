mod arn;
mod binary;
mod boolean;
mod builder;
mod date;
mod ipaddr;
mod keys;
mod null;
mod numeric;

#[allow(non_upper_case_globals)]
pub mod op;

mod string;
mod variant;

pub use {
    builder::ConditionBuilder,
    keys::{global_default_operator, global_key, is_global_key, GlobalKey},
    op::{ConditionOp, Operator, SetQualifier},
};

use {
    crate::{condop, display_json, serutil::StringList, BuilderError},
    chrono::{DateTime, Utc},
    ipnet::IpNet,
    serde::{ser::Serializer, Serialize},
    std::{
        collections::btree_map::{BTreeMap, Iter, Keys},
        fmt::{Display, Formatter, Result as FmtResult},
        net::IpAddr,
        ops::Index,
        str::FromStr,
    },
};

/// The keys and values under a single operator in a `Condition` block.
pub type ConditionMap = BTreeMap<String, StringList>;

/// The `Condition` element of a statement document: operator -> { key -> value-or-values }.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Condition {
    map: BTreeMap<Operator, ConditionMap>,
}

display_json!(Condition);

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

impl Condition {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn contains_key(&self, key: &Operator) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    pub fn get(&self, key: &Operator) -> Option<&ConditionMap> {
        self.map.get(key)
    }

    #[inline]
    pub fn insert(&mut self, key: Operator, value: ConditionMap) -> Option<ConditionMap> {
        self.map.insert(key, value)
    }

    /// Add a single key under `operator`, collapsing a one-element value list to a bare string.
    pub fn insert_clause<K: Into<String>>(&mut self, operator: Operator, key: K, values: Vec<String>) {
        self.map.entry(operator).or_default().insert(key.into(), StringList::collapse(values));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Operator, ConditionMap> {
        self.map.iter()
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, Operator, ConditionMap> {
        self.map.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }
}

impl FromIterator<(Operator, ConditionMap)> for Condition {
    #[inline]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Operator, ConditionMap)>,
    {
        Condition {
            map: BTreeMap::from_iter(iter),
        }
    }
}

impl Index<&Operator> for Condition {
    type Output = ConditionMap;

    fn index(&self, key: &Operator) -> &ConditionMap {
        self.map.index(key)
    }
}

impl<'a> IntoIterator for &'a Condition {
    type Item = (&'a Operator, &'a ConditionMap);
    type IntoIter = Iter<'a, Operator, ConditionMap>;
    fn into_iter(self) -> Iter<'a, Operator, ConditionMap> {
        self.map.iter()
    }
}

/// The value type of a catalogued condition key.
///
/// Catalogues also carry `ArrayOf...` types for multivalued keys; those map to their element type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ConditionType {
    String,
    Arn,
    Numeric,
    Date,
    Bool,
    IpAddress,
    Binary,
}

impl ConditionType {
    /// The operator applied when a caller omits one for a key of this type.
    pub fn default_operator(&self) -> Operator {
        Operator::new(match self {
            Self::String => condop::StringLike,
            Self::Arn => condop::ArnLike,
            Self::Numeric => condop::NumericEquals,
            Self::Date => condop::DateEquals,
            Self::Bool => condop::Bool,
            Self::IpAddress => condop::IpAddress,
            Self::Binary => condop::BinaryEquals,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Arn => "ARN",
            Self::Numeric => "Numeric",
            Self::Date => "Date",
            Self::Bool => "Bool",
            Self::IpAddress => "IPAddress",
            Self::Binary => "Binary",
        }
    }
}

impl Display for ConditionType {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionType {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let element = lower.strip_prefix("arrayof").unwrap_or(&lower);

        match element {
            "string" => Ok(Self::String),
            "arn" => Ok(Self::Arn),
            "numeric" => Ok(Self::Numeric),
            "date" => Ok(Self::Date),
            "bool" | "boolean" => Ok(Self::Bool),
            "ipaddress" => Ok(Self::IpAddress),
            "binary" => Ok(Self::Binary),
            _ => Err(BuilderError::InvalidServiceDefinition(format!("Unknown condition type: {}", s))),
        }
    }
}

/// One or more condition values, normalized to strings in the form they take in a policy document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConditionValues(Vec<String>);

impl ConditionValues {
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Raw bytes for a `Binary` key, base64-encoded.
    pub fn binary<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self(vec![base64::encode(bytes)])
    }

    /// Several timestamps, each rendered as ISO 8601 with milliseconds.
    pub fn dates<I: IntoIterator<Item = DateTime<Utc>>>(dates: I) -> Self {
        Self(dates.into_iter().map(|d| date::format_date(&d)).collect())
    }

    pub fn push<S: Into<String>>(&mut self, value: S) {
        self.0.push(value.into());
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for ConditionValues {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for ConditionValues {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<&String> for ConditionValues {
    fn from(value: &String) -> Self {
        Self(vec![value.clone()])
    }
}

impl From<Vec<String>> for ConditionValues {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<Vec<&str>> for ConditionValues {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ConditionValues {
    fn from(values: &[&str]) -> Self {
        Self(values.iter().map(|v| v.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ConditionValues {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<bool> for ConditionValues {
    fn from(value: bool) -> Self {
        Self(vec![value.to_string()])
    }
}

macro_rules! condition_values_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ConditionValues {
                fn from(value: $ty) -> Self {
                    Self(vec![value.to_string()])
                }
            }
        )*
    };
}

condition_values_from_number!(i32, i64, u32, u64, f64);

impl From<DateTime<Utc>> for ConditionValues {
    fn from(value: DateTime<Utc>) -> Self {
        Self(vec![date::format_date(&value)])
    }
}

impl From<IpNet> for ConditionValues {
    fn from(value: IpNet) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<IpAddr> for ConditionValues {
    fn from(value: IpAddr) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<Vec<IpNet>> for ConditionValues {
    fn from(values: Vec<IpNet>) -> Self {
        Self(values.iter().map(IpNet::to_string).collect())
    }
}

/// A single normalized clause held by a statement under a concrete condition key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionClause {
    operator: Operator,
    values: Vec<String>,
}

impl ConditionClause {
    pub fn new(operator: Operator, values: Vec<String>) -> Self {
        Self {
            operator,
            values,
        }
    }

    #[inline]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            condition::{ConditionClause, ConditionType, ConditionValues, Operator, SetQualifier},
            condop,
            serutil::StringList,
            BuilderError, Condition, ConditionMap,
        },
        chrono::{DateTime, Utc},
        indoc::indoc,
        ipnet::IpNet,
        pretty_assertions::assert_eq,
        std::{net::IpAddr, str::FromStr},
    };

    #[test_log::test]
    fn test_map_ops() {
        let mut c1 = Condition::default();
        let c2 = Condition::new();
        assert_eq!(c1, c2);
        assert!(c1.is_empty());

        c1.insert_clause(Operator::new(condop::StringEquals), "ssm:SyncType", vec!["A".to_string(), "B".to_string()]);
        c1.insert_clause(Operator::new(condop::StringLike), "aws:RequestTag/Team", vec!["infra".to_string()]);
        c1.insert_clause(Operator::new(condop::StringLike), "aws:RequestTag/Env", vec!["prod".to_string()]);
        assert_eq!(c1.len(), 2);
        assert!(c1.contains_key(&Operator::new(condop::StringLike)));
        assert!(!c1.contains_key(&Operator::new(condop::Bool)));
        assert_eq!(c1.get(&Operator::new(condop::StringLike)).unwrap().len(), 2);
        assert_eq!(
            c1[&Operator::new(condop::StringEquals)]["ssm:SyncType"],
            StringList::List(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(c1.keys().map(|k| k.to_string()).collect::<Vec<_>>(), vec!["StringEquals", "StringLike"]);

        let c3 = Condition::from_iter((&c1).into_iter().map(|(k, v)| (*k, v.clone())));
        assert_eq!(c1, c3);

        let mut cmap = ConditionMap::new();
        cmap.insert("aws:SecureTransport".to_string(), StringList::from("true".to_string()));
        assert!(c1.insert(Operator::new(condop::Bool), cmap).is_none());

        assert_eq!(
            c1.to_string(),
            indoc! { r#"
            {
                "Bool": {
                    "aws:SecureTransport": "true"
                },
                "StringEquals": {
                    "ssm:SyncType": [
                        "A",
                        "B"
                    ]
                },
                "StringLike": {
                    "aws:RequestTag/Env": "prod",
                    "aws:RequestTag/Team": "infra"
                }
            }"# }
        );
    }

    #[test_log::test]
    fn test_condition_type() {
        assert_eq!(ConditionType::from_str("String").unwrap(), ConditionType::String);
        assert_eq!(ConditionType::from_str("ARN").unwrap(), ConditionType::Arn);
        assert_eq!(ConditionType::from_str("ArrayOfARN").unwrap(), ConditionType::Arn);
        assert_eq!(ConditionType::from_str("ArrayOfString").unwrap(), ConditionType::String);
        assert_eq!(ConditionType::from_str("Boolean").unwrap(), ConditionType::Bool);
        assert_eq!(ConditionType::from_str("IPAddress").unwrap(), ConditionType::IpAddress);
        assert_eq!(
            ConditionType::from_str("Long").unwrap_err(),
            BuilderError::InvalidServiceDefinition("Unknown condition type: Long".to_string())
        );

        assert_eq!(ConditionType::String.default_operator(), Operator::new(condop::StringLike));
        assert_eq!(ConditionType::Arn.default_operator(), Operator::new(condop::ArnLike));
        assert_eq!(ConditionType::Numeric.default_operator(), Operator::new(condop::NumericEquals));
        assert_eq!(ConditionType::Date.default_operator(), Operator::new(condop::DateEquals));
        assert_eq!(ConditionType::Bool.default_operator(), Operator::new(condop::Bool));
        assert_eq!(ConditionType::IpAddress.default_operator(), Operator::new(condop::IpAddress));
        assert_eq!(ConditionType::Binary.default_operator(), Operator::new(condop::BinaryEquals));
        assert_eq!(ConditionType::IpAddress.to_string(), "IPAddress");
    }

    #[test_log::test]
    fn test_values_conversion() {
        assert_eq!(ConditionValues::from("infra").as_slice(), &["infra".to_string()]);
        assert_eq!(ConditionValues::from(["A", "B"]).into_vec(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(ConditionValues::from(vec!["A".to_string()]).len(), 1);
        assert_eq!(ConditionValues::from(&["x", "y", "z"][..]).len(), 3);
        assert_eq!(ConditionValues::from(true).as_slice(), &["true".to_string()]);
        assert_eq!(ConditionValues::from(3600u32).as_slice(), &["3600".to_string()]);
        assert_eq!(ConditionValues::from(-5i64).as_slice(), &["-5".to_string()]);
        assert_eq!(ConditionValues::from(1.5f64).as_slice(), &["1.5".to_string()]);
        let net = IpNet::from_str("10.0.0.0/8").unwrap();
        assert_eq!(ConditionValues::from(net).as_slice(), &["10.0.0.0/8".to_string()]);
        assert_eq!(ConditionValues::from(vec![net, net]).len(), 2);
        assert_eq!(ConditionValues::from(IpAddr::from_str("::1").unwrap()).as_slice(), &["::1".to_string()]);
        assert_eq!(ConditionValues::binary(b"BinaryValue").as_slice(), &["QmluYXJ5VmFsdWU=".to_string()]);

        let dt = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap().with_timezone(&Utc);
        assert_eq!(ConditionValues::from(dt).as_slice(), &["2024-01-02T03:04:05.000Z".to_string()]);
        assert_eq!(ConditionValues::dates(vec![dt, dt]).len(), 2);

        let mut v = ConditionValues::new();
        assert!(v.is_empty());
        v.push("a");
        v.push(String::from("b"));
        assert_eq!(v.len(), 2);
    }

    #[test_log::test]
    fn test_clause() {
        let op = Operator::qualified(SetQualifier::ForAnyValue, condop::StringEquals);
        let clause = ConditionClause::new(op, vec!["athena.amazonaws.com".to_string()]);
        assert_eq!(clause.operator(), op);
        assert_eq!(clause.values(), &["athena.amazonaws.com".to_string()]);
    }
}
