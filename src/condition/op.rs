use {
    super::{
        arn::{validate_arn_value, ArnCmp},
        binary::{validate_binary_value, BINARY_DISPLAY_NAMES},
        boolean::{validate_bool_value, BOOL_DISPLAY_NAMES},
        date::{validate_date_value, DateCmp},
        ipaddr::{validate_ip_address_value, IP_ADDRESS_DISPLAY_NAMES},
        null::{validate_null_value, NULL_DISPLAY_NAME},
        numeric::{validate_numeric_value, NumericCmp},
        string::StringCmp,
        variant::Variant,
    },
    crate::BuilderError,
    serde::{ser::Serializer, Serialize},
    std::{
        borrow::Borrow,
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// An operator for a condition clause.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConditionOp {
    /// Operators for ARNs.
    Arn(ArnCmp, Variant),

    /// Operators for binary values. Variant here is only allowed to be [Variant::None] or [Variant::IfExists].
    Binary(Variant),

    /// Operators on boolean values. Variant here is only allowed to be [Variant::None] or [Variant::IfExists].
    Bool(Variant),

    /// Operators for date/time values.
    Date(DateCmp, Variant),

    /// Operators on IP addresses and networks.
    IpAddress(Variant),

    /// Operator on the presence/absence of a value.
    Null,

    /// Operators on numeric values.
    Numeric(NumericCmp, Variant),

    /// Operators on string vaules.
    String(StringCmp, Variant),
}

// Named operators, in vocabulary order. Re-exported as `condop`.
pub const ArnEquals: ConditionOp = ConditionOp::Arn(ArnCmp::Equals, Variant::None);

pub const ArnEqualsIfExists: ConditionOp = ConditionOp::Arn(ArnCmp::Equals, Variant::IfExists);

pub const ArnNotEquals: ConditionOp = ConditionOp::Arn(ArnCmp::Equals, Variant::Negated);

pub const ArnNotEqualsIfExists: ConditionOp = ConditionOp::Arn(ArnCmp::Equals, Variant::IfExistsNegated);

pub const ArnLike: ConditionOp = ConditionOp::Arn(ArnCmp::Like, Variant::None);

pub const ArnLikeIfExists: ConditionOp = ConditionOp::Arn(ArnCmp::Like, Variant::IfExists);

pub const ArnNotLike: ConditionOp = ConditionOp::Arn(ArnCmp::Like, Variant::Negated);

pub const ArnNotLikeIfExists: ConditionOp = ConditionOp::Arn(ArnCmp::Like, Variant::IfExistsNegated);

pub const BinaryEquals: ConditionOp = ConditionOp::Binary(Variant::None);

pub const BinaryEqualsIfExists: ConditionOp = ConditionOp::Binary(Variant::IfExists);

pub const Bool: ConditionOp = ConditionOp::Bool(Variant::None);

pub const BoolIfExists: ConditionOp = ConditionOp::Bool(Variant::IfExists);

pub const DateEquals: ConditionOp = ConditionOp::Date(DateCmp::Equals, Variant::None);

pub const DateEqualsIfExists: ConditionOp = ConditionOp::Date(DateCmp::Equals, Variant::IfExists);

pub const DateNotEquals: ConditionOp = ConditionOp::Date(DateCmp::Equals, Variant::Negated);

pub const DateNotEqualsIfExists: ConditionOp = ConditionOp::Date(DateCmp::Equals, Variant::IfExistsNegated);

pub const DateLessThan: ConditionOp = ConditionOp::Date(DateCmp::LessThan, Variant::None);

pub const DateLessThanIfExists: ConditionOp = ConditionOp::Date(DateCmp::LessThan, Variant::IfExists);

pub const DateGreaterThanEquals: ConditionOp = ConditionOp::Date(DateCmp::LessThan, Variant::Negated);

pub const DateGreaterThanEqualsIfExists: ConditionOp = ConditionOp::Date(DateCmp::LessThan, Variant::IfExistsNegated);

pub const DateLessThanEquals: ConditionOp = ConditionOp::Date(DateCmp::LessThanEquals, Variant::None);

pub const DateLessThanEqualsIfExists: ConditionOp = ConditionOp::Date(DateCmp::LessThanEquals, Variant::IfExists);

pub const DateGreaterThan: ConditionOp = ConditionOp::Date(DateCmp::LessThanEquals, Variant::Negated);

pub const DateGreaterThanIfExists: ConditionOp = ConditionOp::Date(DateCmp::LessThanEquals, Variant::IfExistsNegated);

pub const IpAddress: ConditionOp = ConditionOp::IpAddress(Variant::None);

pub const IpAddressIfExists: ConditionOp = ConditionOp::IpAddress(Variant::IfExists);

pub const NotIpAddress: ConditionOp = ConditionOp::IpAddress(Variant::Negated);

pub const NotIpAddressIfExists: ConditionOp = ConditionOp::IpAddress(Variant::IfExistsNegated);

pub const Null: ConditionOp = ConditionOp::Null;

pub const NumericEquals: ConditionOp = ConditionOp::Numeric(NumericCmp::Equals, Variant::None);

pub const NumericEqualsIfExists: ConditionOp = ConditionOp::Numeric(NumericCmp::Equals, Variant::IfExists);

pub const NumericNotEquals: ConditionOp = ConditionOp::Numeric(NumericCmp::Equals, Variant::Negated);

pub const NumericNotEqualsIfExists: ConditionOp = ConditionOp::Numeric(NumericCmp::Equals, Variant::IfExistsNegated);

pub const NumericLessThan: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThan, Variant::None);

pub const NumericLessThanIfExists: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThan, Variant::IfExists);

pub const NumericGreaterThanEquals: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThan, Variant::Negated);

pub const NumericGreaterThanEqualsIfExists: ConditionOp =
    ConditionOp::Numeric(NumericCmp::LessThan, Variant::IfExistsNegated);

pub const NumericLessThanEquals: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::None);

pub const NumericLessThanEqualsIfExists: ConditionOp =
    ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::IfExists);

pub const NumericGreaterThan: ConditionOp = ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::Negated);

pub const NumericGreaterThanIfExists: ConditionOp =
    ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::IfExistsNegated);

pub const StringEquals: ConditionOp = ConditionOp::String(StringCmp::Equals, Variant::None);

pub const StringEqualsIfExists: ConditionOp = ConditionOp::String(StringCmp::Equals, Variant::IfExists);

pub const StringNotEquals: ConditionOp = ConditionOp::String(StringCmp::Equals, Variant::Negated);

pub const StringNotEqualsIfExists: ConditionOp = ConditionOp::String(StringCmp::Equals, Variant::IfExistsNegated);

pub const StringEqualsIgnoreCase: ConditionOp = ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::None);

pub const StringEqualsIgnoreCaseIfExists: ConditionOp =
    ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExists);

pub const StringNotEqualsIgnoreCase: ConditionOp = ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::Negated);

pub const StringNotEqualsIgnoreCaseIfExists: ConditionOp =
    ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExistsNegated);

pub const StringLike: ConditionOp = ConditionOp::String(StringCmp::Like, Variant::None);

pub const StringLikeIfExists: ConditionOp = ConditionOp::String(StringCmp::Like, Variant::IfExists);

pub const StringNotLike: ConditionOp = ConditionOp::String(StringCmp::Like, Variant::Negated);

pub const StringNotLikeIfExists: ConditionOp = ConditionOp::String(StringCmp::Like, Variant::IfExistsNegated);

impl Borrow<str> for ConditionOp {
    fn borrow(&self) -> &str {
        match self {
            Self::Arn(cmp, variant) => cmp.display_name(variant),
            Self::Binary(variant) => BINARY_DISPLAY_NAMES[variant.as_usize()],
            Self::Bool(variant) => BOOL_DISPLAY_NAMES[variant.as_usize()],
            Self::Date(cmp, variant) => cmp.display_name(variant),
            Self::IpAddress(variant) => IP_ADDRESS_DISPLAY_NAMES[variant.as_usize()],
            Self::Null => NULL_DISPLAY_NAME,
            Self::Numeric(cmp, variant) => cmp.display_name(variant),
            Self::String(cmp, variant) => cmp.display_name(variant),
        }
    }
}

impl PartialEq<str> for ConditionOp {
    fn eq(&self, other: &str) -> bool {
        self.to_string().as_str() == other
    }
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.borrow())
    }
}

impl Serialize for ConditionOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl ConditionOp {
    /// Indicates whether this is one of the `...IfExists` operators.
    #[inline]
    pub fn is_if_exists(&self) -> bool {
        match self {
            Self::Arn(_, variant)
            | Self::Binary(variant)
            | Self::Bool(variant)
            | Self::Date(_, variant)
            | Self::IpAddress(variant)
            | Self::Numeric(_, variant)
            | Self::String(_, variant) => variant.if_exists(),
            Self::Null => false,
        }
    }

    /// Indicates whether this is one of the negated (`...Not...`) operators.
    #[inline]
    pub fn is_negated(&self) -> bool {
        match self {
            Self::Arn(_, variant)
            | Self::Binary(variant)
            | Self::Bool(variant)
            | Self::Date(_, variant)
            | Self::IpAddress(variant)
            | Self::Numeric(_, variant)
            | Self::String(_, variant) => variant.negated(),
            Self::Null => false,
        }
    }

    /// Check that `value` can be compared by this operator.
    ///
    /// Values containing a `${...}` policy variable are resolved at evaluation time and are not checked. String
    /// operators accept any value.
    ///
    /// # Errors
    ///
    /// If the value cannot be parsed for this operator's family, [BuilderError::InvalidConditionValue] is returned.
    pub fn validate_value(&self, value: &str) -> Result<(), BuilderError> {
        if value.contains("${") {
            return Ok(());
        }

        match self {
            Self::Arn(..) => validate_arn_value(value),
            Self::Binary(_) => validate_binary_value(value),
            Self::Bool(_) => validate_bool_value(value),
            Self::Date(..) => validate_date_value(value),
            Self::IpAddress(_) => validate_ip_address_value(value),
            Self::Null => validate_null_value(value),
            Self::Numeric(..) => validate_numeric_value(value),
            Self::String(..) => Ok(()),
        }
    }
}

/// Every operator in the IAM vocabulary.
pub const ALL_CONDITION_OPS: [ConditionOp; 53] = [
    ArnEquals, ArnEqualsIfExists, ArnNotEquals, ArnNotEqualsIfExists, ArnLike, ArnLikeIfExists, ArnNotLike,
    ArnNotLikeIfExists, BinaryEquals, BinaryEqualsIfExists, Bool, BoolIfExists, DateEquals, DateEqualsIfExists,
    DateNotEquals, DateNotEqualsIfExists, DateLessThan, DateLessThanIfExists, DateGreaterThanEquals,
    DateGreaterThanEqualsIfExists, DateLessThanEquals, DateLessThanEqualsIfExists, DateGreaterThan,
    DateGreaterThanIfExists, IpAddress, IpAddressIfExists, NotIpAddress, NotIpAddressIfExists, Null, NumericEquals,
    NumericEqualsIfExists, NumericNotEquals, NumericNotEqualsIfExists, NumericLessThan, NumericLessThanIfExists,
    NumericGreaterThanEquals, NumericGreaterThanEqualsIfExists, NumericLessThanEquals, NumericLessThanEqualsIfExists,
    NumericGreaterThan, NumericGreaterThanIfExists, StringEquals, StringEqualsIfExists, StringNotEquals,
    StringNotEqualsIfExists, StringEqualsIgnoreCase, StringEqualsIgnoreCaseIfExists, StringNotEqualsIgnoreCase,
    StringNotEqualsIgnoreCaseIfExists, StringLike, StringLikeIfExists, StringNotLike, StringNotLikeIfExists,
];

impl FromStr for ConditionOp {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CONDITION_OPS
            .iter()
            .find(|op| <ConditionOp as Borrow<str>>::borrow(op) == s)
            .copied()
            .ok_or_else(|| BuilderError::InvalidConditionOperator(s.to_string()))
    }
}

/// A set qualifier for multivalued condition keys.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SetQualifier {
    ForAllValues,
    ForAnyValue,
}

impl SetQualifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForAllValues => "ForAllValues",
            Self::ForAnyValue => "ForAnyValue",
        }
    }
}

impl Display for SetQualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// The full operator of a condition clause: an optional set qualifier and a [ConditionOp].
///
/// This is the key of the outer map in a `Condition` block, e.g. `StringLike` or `ForAnyValue:StringEquals`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Operator {
    op: ConditionOp,
    qualifier: Option<SetQualifier>,
}

impl Operator {
    pub const fn new(op: ConditionOp) -> Self {
        Self {
            op,
            qualifier: None,
        }
    }

    pub const fn qualified(qualifier: SetQualifier, op: ConditionOp) -> Self {
        Self {
            op,
            qualifier: Some(qualifier),
        }
    }

    #[inline]
    pub fn op(&self) -> ConditionOp {
        self.op
    }

    #[inline]
    pub fn qualifier(&self) -> Option<SetQualifier> {
        self.qualifier
    }

    #[inline]
    pub fn validate_value(&self, value: &str) -> Result<(), BuilderError> {
        self.op.validate_value(value)
    }
}

impl From<ConditionOp> for Operator {
    fn from(op: ConditionOp) -> Self {
        Self::new(op)
    }
}

impl PartialEq<str> for Operator {
    fn eq(&self, other: &str) -> bool {
        self.to_string().as_str() == other
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.qualifier {
            None => write!(f, "{}", self.op),
            Some(qualifier) => write!(f, "{}:{}", qualifier, self.op),
        }
    }
}

impl FromStr for Operator {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (qualifier, op) = match s.split_once(':') {
            None => (None, s),
            Some(("ForAllValues", op)) => (Some(SetQualifier::ForAllValues), op),
            Some(("ForAnyValue", op)) => (Some(SetQualifier::ForAnyValue), op),
            Some(_) => return Err(BuilderError::InvalidConditionOperator(s.to_string())),
        };

        let op = ConditionOp::from_str(op).map_err(|_| BuilderError::InvalidConditionOperator(s.to_string()))?;

        Ok(Self {
            op,
            qualifier,
        })
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
