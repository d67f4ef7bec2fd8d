use {
    crate::BuilderError,
    serde::{Deserialize, Serialize},
    std::{
        collections::{BTreeMap, BTreeSet},
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The coarse classification of an action's blast radius.
///
/// Levels order from the narrowest (`List`) to the broadest (`PermissionsManagement`).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum AccessLevel {
    List,
    Read,
    Tagging,
    Write,
    #[serde(rename = "Permissions management")]
    PermissionsManagement,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 5] =
        [Self::List, Self::Read, Self::Tagging, Self::Write, Self::PermissionsManagement];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Read => "Read",
            Self::Tagging => "Tagging",
            Self::Write => "Write",
            Self::PermissionsManagement => "Permissions management",
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "List" => Ok(Self::List),
            "Read" => Ok(Self::Read),
            "Tagging" => Ok(Self::Tagging),
            "Write" => Ok(Self::Write),
            "Permissions management" | "PermissionsManagement" => Ok(Self::PermissionsManagement),
            _ => Err(BuilderError::InvalidServiceDefinition(format!("Unknown access level: {}", s))),
        }
    }
}

/// A read-only partition of a service's actions by [AccessLevel].
///
/// Built once when a service definition is loaded. Action names are bare (without the service prefix).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccessLevelIndex {
    by_level: BTreeMap<AccessLevel, BTreeSet<String>>,
    by_action: BTreeMap<String, AccessLevel>,
}

impl AccessLevelIndex {
    pub fn insert<S: Into<String>>(&mut self, action: S, level: AccessLevel) {
        let action = action.into();
        if let Some(previous) = self.by_action.insert(action.clone(), level) {
            if let Some(actions) = self.by_level.get_mut(&previous) {
                actions.remove(&action);
            }
        }
        self.by_level.entry(level).or_default().insert(action);
    }

    /// The access level of a bare action name, if catalogued.
    pub fn level_of(&self, action: &str) -> Option<AccessLevel> {
        self.by_action.get(action).copied()
    }

    /// The catalogued actions at the given level, in name order.
    pub fn actions(&self, level: AccessLevel) -> impl Iterator<Item = &str> {
        self.by_level.get(&level).into_iter().flat_map(|actions| actions.iter().map(String::as_str))
    }

    /// The levels that have at least one catalogued action, narrowest first.
    pub fn levels(&self) -> Vec<AccessLevel> {
        self.by_level.iter().filter(|(_, actions)| !actions.is_empty()).map(|(level, _)| *level).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_action.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_action.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, AccessLevel)> for AccessLevelIndex {
    fn from_iter<I: IntoIterator<Item = (S, AccessLevel)>>(iter: I) -> Self {
        let mut index = Self::default();
        for (action, level) in iter {
            index.insert(action, level);
        }
        index
    }
}
