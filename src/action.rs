use {
    crate::{serutil::ElementList, BuilderError},
    log::debug,
    regex::{Regex, RegexBuilder},
    serde::{ser::Serializer, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// A list of actions as it appears in a statement document: a bare string for a single action, an array otherwise.
pub type ActionList = ElementList<Action>;

/// A fully qualified action identifier, `service:Action`.
///
/// The action part may contain `*` wildcards. Actions order by service prefix, then by action name, so a set of
/// actions always renders in the same order.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Action {
    service: String,
    action: String,
}

impl Action {
    pub fn new<S: Into<String>, A: Into<String>>(service: S, action: A) -> Result<Self, BuilderError> {
        let service = service.into();
        let action = action.into();

        validate_service_prefix(&service).map_err(|_| {
            debug!("Action '{service}:{action}' has an invalid service.");
            BuilderError::InvalidAction(format!("{}:{}", service, action))
        })?;

        validate_action_name(&action).map_err(|_| {
            debug!("Action '{service}:{action}' has an invalid action.");
            BuilderError::InvalidAction(format!("{}:{}", service, action))
        })?;

        Ok(Action {
            service,
            action,
        })
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Indicates whether the action part contains a `*` wildcard.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.action.contains('*')
    }

    /// Indicates whether this action, treated as a glob, covers the bare action name `candidate`.
    ///
    /// To test many candidates, build an [ActionMatcher] once with [Action::matcher].
    pub fn covers(&self, candidate: &str) -> bool {
        self.matcher().is_match(candidate)
    }

    /// Compile this action into a reusable matcher for bare action names.
    pub fn matcher(&self) -> ActionMatcher {
        if !self.is_wildcard() {
            return ActionMatcher::Exact(self.action.clone());
        }

        match regex_from_glob(&self.action).case_insensitive(true).build() {
            Ok(re) => ActionMatcher::Glob(re),
            Err(e) => {
                log::error!("Failed to compile glob for action {}: {}", self, e);
                ActionMatcher::Nothing
            }
        }
    }

    /// IAM action names are case-insensitive.
    pub fn eq_ignore_ascii_case(&self, other: &Action) -> bool {
        self.service.eq_ignore_ascii_case(&other.service) && self.action.eq_ignore_ascii_case(&other.action)
    }
}

/// A compiled [Action], matching bare action names case-insensitively.
#[derive(Clone, Debug)]
pub enum ActionMatcher {
    Exact(String),
    Glob(Regex),
    Nothing,
}

impl ActionMatcher {
    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            Self::Exact(name) => name.eq_ignore_ascii_case(candidate),
            Self::Glob(re) => re.is_match(candidate),
            Self::Nothing => false,
        }
    }
}

/// Service prefixes are ASCII alphanumerics with optional interior dashes and underscores.
pub(crate) fn validate_service_prefix(service: &str) -> Result<(), BuilderError> {
    if service.is_empty() || !service.is_ascii() {
        return Err(BuilderError::InvalidAction(service.to_string()));
    }

    for (i, c) in service.bytes().enumerate() {
        if !c.is_ascii_alphanumeric() && !(i > 0 && i < service.len() - 1 && (c == b'-' || c == b'_')) {
            return Err(BuilderError::InvalidAction(service.to_string()));
        }
    }

    Ok(())
}

/// Action names are ASCII alphanumerics and `*`, with optional interior dashes and underscores.
pub(crate) fn validate_action_name(action: &str) -> Result<(), BuilderError> {
    if action.is_empty() || !action.is_ascii() {
        return Err(BuilderError::InvalidAction(action.to_string()));
    }

    for (i, c) in action.bytes().enumerate() {
        if !c.is_ascii_alphanumeric() && c != b'*' && !(i > 0 && i < action.len() - 1 && (c == b'-' || c == b'_')) {
            return Err(BuilderError::InvalidAction(action.to_string()));
        }
    }

    Ok(())
}

/// Convert a `*`/`?` glob into an anchored regular expression builder.
pub(crate) fn regex_from_glob(s: &str) -> RegexBuilder {
    let mut pattern = String::with_capacity(2 + s.len());
    pattern.push('^');

    for c in s.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => {
                let escaped: String = regex::escape(&String::from(c));
                pattern.push_str(&escaped);
            }
        }
    }
    pattern.push('$');
    RegexBuilder::new(&pattern)
}

impl FromStr for Action {
    type Err = BuilderError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = v.split(':').collect();
        if parts.len() != 2 {
            return Err(BuilderError::InvalidAction(v.to_string()));
        }

        Action::new(parts[0], parts[1])
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}:{}", self.service, self.action)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::ActionMatcher,
        crate::{Action, ActionList},
        indoc::indoc,
        pretty_assertions::{assert_eq, assert_ne},
        std::{collections::BTreeSet, panic::catch_unwind, str::FromStr},
    };

    #[test_log::test]
    fn test_eq_and_order() {
        let a1 = Action::new("ssm", "GetParameter").unwrap();
        let a2 = Action::from_str("ssm:GetParameter").unwrap();
        let a3 = Action::new("ssm", "PutParameter").unwrap();
        let a4 = Action::new("kms", "PutParameter").unwrap();

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
        assert_ne!(a3, a4);

        let set: BTreeSet<Action> = [a3.clone(), a1.clone(), a4.clone(), a2].into_iter().collect();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![a4, a1, a3]);
    }

    #[test_log::test]
    fn test_list_display() {
        let single: ActionList = Action::new("ssm", "GetParameter").unwrap().into();
        let multi: ActionList =
            vec![Action::new("ssm", "GetParameter").unwrap(), Action::new("ssm", "GetParameters").unwrap()].into();

        assert_eq!(format!("{}", single), r#""ssm:GetParameter""#);
        assert_eq!(
            format!("{}", multi),
            indoc! {r#"
            [
                "ssm:GetParameter",
                "ssm:GetParameters"
            ]"#}
        );
        assert_eq!(multi[1].action(), "GetParameters");

        let e = catch_unwind(|| {
            println!("This will not be printed: {}", single[1]);
        })
        .unwrap_err();
        assert_eq!(*e.downcast::<String>().unwrap(), "index out of bounds: the len is 1 but the index is 1");
    }

    #[test_log::test]
    fn test_wildcards() {
        let all = Action::new("ssm", "*").unwrap();
        assert!(all.is_wildcard());
        assert!(all.covers("GetParameter"));

        let get = Action::new("ssm", "GetParam*").unwrap();
        assert!(get.covers("GetParameter"));
        assert!(get.covers("getparameters"));
        assert!(!get.covers("PutParameter"));

        let exact = Action::new("ssm", "GetParameter").unwrap();
        assert!(!exact.is_wildcard());
        assert!(exact.covers("GetParameter"));
        assert!(!exact.covers("GetParameters"));

        let matcher = get.matcher();
        let names = ["GetParameter", "GetParameters", "GetParametersByPath", "PutParameter", "DeleteParameter"];
        assert_eq!(names.iter().filter(|n| matcher.is_match(n)).count(), 3);
        assert!(matches!(exact.matcher(), ActionMatcher::Exact(_)));
    }

    #[test_log::test]
    fn test_case_insensitive_equality() {
        let a = Action::new("ssm", "BrandNew").unwrap();
        let b = Action::new("SSM", "brandnew").unwrap();
        assert_ne!(a, b);
        assert!(a.eq_ignore_ascii_case(&b));
        assert!(!a.eq_ignore_ascii_case(&Action::new("ssm", "BrandNewer").unwrap()));
    }

    #[test_log::test]
    fn test_bad_strings() {
        assert_eq!(Action::from_str("").unwrap_err().to_string(), "Invalid action: ");
        assert_eq!(Action::from_str("*").unwrap_err().to_string(), "Invalid action: *");
        assert_eq!(Action::from_str("ssm:").unwrap_err().to_string(), "Invalid action: ssm:");
        assert_eq!(Action::from_str(":GetParameter").unwrap_err().to_string(), "Invalid action: :GetParameter");
        assert_eq!(Action::from_str("ssm:a:b").unwrap_err().to_string(), "Invalid action: ssm:a:b");
        assert_eq!(Action::from_str("🦀:GetParameter").unwrap_err().to_string(), "Invalid action: 🦀:GetParameter");
        assert_eq!(Action::from_str("ssm:🦀").unwrap_err().to_string(), "Invalid action: ssm:🦀");
        assert_eq!(Action::from_str("-ssm:GetParameter").unwrap_err().to_string(), "Invalid action: -ssm:GetParameter");
        assert_eq!(Action::from_str("ssm_:GetParameter").unwrap_err().to_string(), "Invalid action: ssm_:GetParameter");
        assert_eq!(Action::from_str("ssm:_GetParameter").unwrap_err().to_string(), "Invalid action: ssm:_GetParameter");
        assert_eq!(Action::from_str("ssm:GetParameter-").unwrap_err().to_string(), "Invalid action: ssm:GetParameter-");

        let a = Action::from_str("e_c-2:De-scribe_Instances").unwrap();
        assert_eq!(a.service(), "e_c-2");
        assert_eq!(a.action(), "De-scribe_Instances");
        assert_eq!(serde_json::to_string(&a).unwrap(), r#""e_c-2:De-scribe_Instances""#);
    }
}
