use {
    crate::{
        action::{regex_from_glob, validate_action_name, validate_service_prefix},
        condition::ConditionType,
        from_str_json,
        template::Template,
        AccessLevel, AccessLevelIndex, Action, BuilderError,
    },
    log::{debug, warn},
    serde::Deserialize,
    std::{collections::BTreeMap, convert::TryFrom, fs, path::Path, str::FromStr},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawServiceDefinition {
    #[serde(default)]
    name: Option<String>,
    service_prefix: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    actions: BTreeMap<String, RawAction>,
    #[serde(default)]
    resource_types: BTreeMap<String, RawResourceType>,
    #[serde(default)]
    conditions: BTreeMap<String, RawConditionKey>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAction {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    access_level: String,
    #[serde(default)]
    resource_types: BTreeMap<String, RawResourceRequirement>,
    #[serde(default)]
    conditions: Vec<String>,
    #[serde(default)]
    dependent_actions: Vec<String>,
}

#[derive(Deserialize)]
struct RawResourceRequirement {
    #[serde(default)]
    required: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResourceType {
    #[serde(default)]
    url: Option<String>,
    arn: String,
    #[serde(default)]
    condition_keys: Vec<String>,
}

#[derive(Deserialize)]
struct RawConditionKey {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "type")]
    condition_type: String,
}

/// Static metadata for one action of a service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionMetadata {
    name: String,
    description: Option<String>,
    url: Option<String>,
    access_level: AccessLevel,
    resource_types: BTreeMap<String, bool>,
    conditions: Vec<String>,
    dependent_actions: Vec<Action>,
}

impl ActionMetadata {
    /// The bare action name, e.g. `GetParameter`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    /// The resource types this action can be scoped to, each with its required flag.
    #[inline]
    pub fn resource_types(&self) -> &BTreeMap<String, bool> {
        &self.resource_types
    }

    pub fn required_resource_types(&self) -> impl Iterator<Item = &str> {
        self.resource_types.iter().filter(|(_, required)| **required).map(|(name, _)| name.as_str())
    }

    /// The condition keys this action supports.
    #[inline]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Actions this action implicitly requires. Informational only.
    #[inline]
    pub fn dependent_actions(&self) -> &[Action] {
        &self.dependent_actions
    }
}

/// A named resource kind with its ARN template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceType {
    name: String,
    url: Option<String>,
    arn: Template,
    condition_keys: Vec<String>,
}

impl ResourceType {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[inline]
    pub fn arn(&self) -> &Template {
        &self.arn
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

/// A catalogued condition key. The key may be templated, e.g. `ssm:resourceTag/${TagKey}`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionKeyMetadata {
    key: Template,
    description: Option<String>,
    url: Option<String>,
    condition_type: ConditionType,
    multivalued: bool,
}

impl ConditionKeyMetadata {
    #[inline]
    pub fn key(&self) -> &Template {
        &self.key
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[inline]
    pub fn condition_type(&self) -> ConditionType {
        self.condition_type
    }

    /// Indicates whether the catalogue types this key as an `ArrayOf...`.
    #[inline]
    pub fn is_multivalued(&self) -> bool {
        self.multivalued
    }
}

/// Everything the builder knows about one service: actions, resource types, condition keys, and the access-level
/// index derived from the actions.
///
/// Service definitions are loaded from JSON and are read-only afterwards, so one definition can back any number of
/// statements.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawServiceDefinition")]
pub struct ServiceDefinition {
    name: Option<String>,
    prefix: String,
    url: Option<String>,
    actions: BTreeMap<String, ActionMetadata>,
    resource_types: BTreeMap<String, ResourceType>,
    conditions: BTreeMap<String, ConditionKeyMetadata>,
    access_levels: AccessLevelIndex,
}

from_str_json!(ServiceDefinition);

fn invalid<S: Into<String>>(prefix: &str, msg: S) -> BuilderError {
    let msg = msg.into();
    debug!("Service definition {}: {}", prefix, msg);
    BuilderError::InvalidServiceDefinition(format!("{}: {}", prefix, msg))
}

impl TryFrom<RawServiceDefinition> for ServiceDefinition {
    type Error = BuilderError;

    fn try_from(raw: RawServiceDefinition) -> Result<Self, Self::Error> {
        let prefix = raw.service_prefix;
        validate_service_prefix(&prefix).map_err(|_| invalid(&prefix, "invalid service prefix"))?;

        let mut resource_types = BTreeMap::new();
        for (name, rt) in raw.resource_types {
            let arn = Template::from_str(&rt.arn)
                .map_err(|e| invalid(&prefix, format!("resource type {}: {}", name, e)))?;

            resource_types.insert(
                name.clone(),
                ResourceType {
                    name,
                    url: rt.url,
                    arn,
                    condition_keys: rt.condition_keys,
                },
            );
        }

        let mut conditions = BTreeMap::new();
        for (key, ck) in raw.conditions {
            let template =
                Template::from_str(&key).map_err(|e| invalid(&prefix, format!("condition key {}: {}", key, e)))?;
            let condition_type = ConditionType::from_str(&ck.condition_type)
                .map_err(|e| invalid(&prefix, format!("condition key {}: {}", key, e)))?;
            let multivalued = ck.condition_type.to_ascii_lowercase().starts_with("arrayof");

            conditions.insert(
                key,
                ConditionKeyMetadata {
                    key: template,
                    description: ck.description,
                    url: ck.url,
                    condition_type,
                    multivalued,
                },
            );
        }

        let mut actions = BTreeMap::new();
        let mut access_levels = AccessLevelIndex::default();
        for (name, action) in raw.actions {
            if name.contains('*') || validate_action_name(&name).is_err() {
                return Err(invalid(&prefix, format!("invalid action name {}", name)));
            }

            let access_level = AccessLevel::from_str(&action.access_level)
                .map_err(|e| invalid(&prefix, format!("action {}: {}", name, e)))?;

            let mut action_resource_types = BTreeMap::new();
            for (rt_name, requirement) in action.resource_types {
                if !resource_types.contains_key(&rt_name) {
                    warn!("Service {}: action {} references unknown resource type {}", prefix, name, rt_name);
                }
                action_resource_types.insert(rt_name, requirement.required);
            }

            let mut dependent_actions = Vec::with_capacity(action.dependent_actions.len());
            for dependent in &action.dependent_actions {
                let dependent = Action::from_str(dependent)
                    .map_err(|e| invalid(&prefix, format!("action {}: dependent action: {}", name, e)))?;
                dependent_actions.push(dependent);
            }

            access_levels.insert(name.clone(), access_level);
            actions.insert(
                name.clone(),
                ActionMetadata {
                    name,
                    description: action.description,
                    url: action.url,
                    access_level,
                    resource_types: action_resource_types,
                    conditions: action.conditions,
                    dependent_actions,
                },
            );
        }

        debug!(
            "Loaded service {}: {} actions, {} resource types, {} condition keys",
            prefix,
            actions.len(),
            resource_types.len(),
            conditions.len()
        );

        Ok(Self {
            name: raw.name,
            prefix,
            url: raw.url,
            actions,
            resource_types,
            conditions,
            access_levels,
        })
    }
}

impl ServiceDefinition {
    /// Load a service definition from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BuilderError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| BuilderError::InvalidServiceDefinition(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents).map_err(|e| match e {
            BuilderError::InvalidServiceDefinition(msg) => {
                BuilderError::InvalidServiceDefinition(format!("{}: {}", path.display(), msg))
            }
            e => e,
        })
    }

    /// Parse a service definition from JSON, reporting failures as [BuilderError::InvalidServiceDefinition].
    pub fn from_json(json: &str) -> Result<Self, BuilderError> {
        let raw: RawServiceDefinition = serde_json::from_str(json).map_err(|e| {
            debug!("Failed to parse service definition: {}", e);
            BuilderError::InvalidServiceDefinition(e.to_string())
        })?;
        Self::try_from(raw)
    }

    /// The human-readable service name, if the definition carries one.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The service prefix used in action names and condition keys, e.g. `ssm`.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Look up an action by bare name. Action names are case-insensitive, as in IAM.
    pub fn action(&self, name: &str) -> Option<&ActionMetadata> {
        self.actions.get(name).or_else(|| self.actions.values().find(|a| a.name.eq_ignore_ascii_case(name)))
    }

    pub fn actions(&self) -> impl Iterator<Item = &ActionMetadata> {
        self.actions.values()
    }

    /// The catalogued actions whose names match a `*`/`?` glob, case-insensitively.
    pub fn matching_actions(&self, glob: &str) -> Result<Vec<&ActionMetadata>, BuilderError> {
        let re = regex_from_glob(glob)
            .case_insensitive(true)
            .build()
            .map_err(|e| BuilderError::InvalidAction(format!("{}:{}: {}", self.prefix, glob, e)))?;
        Ok(self.actions.values().filter(|a| re.is_match(&a.name)).collect())
    }

    pub fn resource_type(&self, name: &str) -> Option<&ResourceType> {
        self.resource_types.get(name)
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &ResourceType> {
        self.resource_types.values()
    }

    /// Look up a concrete condition key such as `ssm:SyncType` or `ssm:resourceTag/Team`.
    ///
    /// Exact matches win, then case-insensitive matches, then templated keys.
    pub fn condition_key(&self, key: &str) -> Option<&ConditionKeyMetadata> {
        if let Some(ck) = self.conditions.get(key) {
            return Some(ck);
        }

        if let Some(ck) = self.conditions.values().find(|ck| ck.key.as_str().eq_ignore_ascii_case(key)) {
            return Some(ck);
        }

        self.conditions.values().filter(|ck| ck.key.has_placeholders()).find(|ck| ck.key.matches(key))
    }

    pub fn condition_keys(&self) -> impl Iterator<Item = &ConditionKeyMetadata> {
        self.conditions.values()
    }

    #[inline]
    pub fn access_levels(&self) -> &AccessLevelIndex {
        &self.access_levels
    }
}
