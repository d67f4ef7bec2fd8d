mod aws;


use {
    crate::{
        condition::{ConditionBuilder, ConditionClause, ConditionValues, Operator},
        AccessLevel, Action, ActionList, ArnDefaults, ArnResolver, BuilderError, Condition, Resource, ResourceList,
        ServiceDefinition, StatementDocument,
    },
    derive_builder::Builder,
    log::{debug, warn},
    std::{
        collections::{BTreeMap, BTreeSet},
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
        sync::Arc,
    },
};

/// Where a statement is in its lifecycle.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StatementState {
    /// Freshly constructed; nothing has been added.
    Empty,

    /// At least one mutating call has succeeded.
    Building,

    /// A document has been produced. Further mutation is rejected.
    Finalized,
}

impl Display for StatementState {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Building => f.write_str("Building"),
            Self::Finalized => f.write_str("Finalized"),
        }
    }
}

/// How [Statement::select_action] treats actions that are not in the service catalogue.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ActionValidation {
    /// Reject uncatalogued actions with [BuilderError::UnknownAction].
    Strict,

    /// Log a warning and accept the action. Providers add actions faster than catalogues are refreshed.
    #[default]
    Permissive,
}

/// Construction-time settings for a [Statement].
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq)]
pub struct StatementOptions {
    #[builder(setter(into, strip_option), default)]
    sid: Option<String>,

    #[builder(default)]
    action_validation: ActionValidation,

    #[builder(default)]
    arn_defaults: ArnDefaults,
}

impl StatementOptions {
    pub fn builder() -> StatementOptionsBuilder {
        StatementOptionsBuilder::default()
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn action_validation(&self) -> ActionValidation {
        self.action_validation
    }

    #[inline]
    pub fn arn_defaults(&self) -> &ArnDefaults {
        &self.arn_defaults
    }
}

/// A single allow statement under construction for one service.
///
/// Every mutating method returns `Result<&mut Self, BuilderError>` so calls chain with `?`. A failed call leaves the
/// statement unchanged. Once [Statement::to_document] has been called the statement is finalized and all further
/// mutation fails with [BuilderError::InvalidStatement].
#[derive(Clone, Debug)]
pub struct Statement {
    service: Arc<ServiceDefinition>,
    sid: Option<String>,
    action_validation: ActionValidation,
    arn_defaults: ArnDefaults,
    state: StatementState,
    actions: BTreeSet<Action>,
    resources: Vec<Resource>,
    conditions: BTreeMap<String, ConditionClause>,
    document: Option<StatementDocument>,
}

impl Statement {
    pub fn new(service: Arc<ServiceDefinition>) -> Self {
        Self::with_options(service, StatementOptions::default())
    }

    pub fn with_options(service: Arc<ServiceDefinition>, options: StatementOptions) -> Self {
        Self {
            service,
            sid: options.sid,
            action_validation: options.action_validation,
            arn_defaults: options.arn_defaults,
            state: StatementState::Empty,
            actions: BTreeSet::new(),
            resources: Vec::new(),
            conditions: BTreeMap::new(),
            document: None,
        }
    }

    #[inline]
    pub fn service(&self) -> &ServiceDefinition {
        &self.service
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn state(&self) -> StatementState {
        self.state
    }

    #[inline]
    pub fn action_validation(&self) -> ActionValidation {
        self.action_validation
    }

    #[inline]
    pub fn arn_defaults(&self) -> &ArnDefaults {
        &self.arn_defaults
    }

    /// The selected actions, in sorted order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// The attached resources, in attachment order. Empty means the wildcard resource.
    #[inline]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// The condition clauses, keyed by concrete condition key.
    #[inline]
    pub fn conditions(&self) -> &BTreeMap<String, ConditionClause> {
        &self.conditions
    }

    fn check_mutable(&self, operation: &str) -> Result<(), BuilderError> {
        if self.state == StatementState::Finalized {
            debug!("Rejecting {} on finalized statement for {}", operation, self.service.prefix());
            return Err(BuilderError::InvalidStatement(format!(
                "cannot {} after the statement was serialized",
                operation
            )));
        }

        Ok(())
    }

    fn mark_building(&mut self) {
        if self.state == StatementState::Empty {
            self.state = StatementState::Building;
        }
    }

    pub fn with_sid<S: Into<String>>(&mut self, sid: S) -> Result<&mut Self, BuilderError> {
        self.check_mutable("set Sid")?;
        let sid = sid.into();
        debug!("Statement for {}: Sid = {}", self.service.prefix(), sid);
        self.sid = Some(sid);
        self.mark_building();
        Ok(self)
    }

    /// Parse `name` as an action on this service, accepting either `Name` or `prefix:Name`.
    fn parse_action(&self, name: &str) -> Result<Action, BuilderError> {
        let prefix = self.service.prefix();
        let bare = match name.split_once(':') {
            None => name,
            Some((service, bare)) if service.eq_ignore_ascii_case(prefix) => bare,
            Some(_) => {
                debug!("Action {} does not belong to service {}", name, prefix);
                return Err(BuilderError::InvalidAction(name.to_string()));
            }
        };

        let action = Action::new(prefix, bare)?;
        if action.is_wildcard() {
            return Ok(action);
        }

        // Use the catalogue's spelling for known actions.
        match self.service.action(bare) {
            Some(metadata) => Action::new(prefix, metadata.name()),
            None => Ok(action),
        }
    }

    fn is_catalogued(&self, action: &Action) -> bool {
        if action.is_wildcard() {
            let matcher = action.matcher();
            self.service.actions().any(|metadata| matcher.is_match(metadata.name()))
        } else {
            self.service.action(action.action()).is_some()
        }
    }

    fn insert_action(&mut self, action: Action) {
        match self.actions.iter().find(|selected| selected.eq_ignore_ascii_case(&action)) {
            Some(selected) => {
                debug!("Statement for {}: {} already selected as {}", self.service.prefix(), action, selected)
            }
            None => {
                debug!("Statement for {}: selecting {}", self.service.prefix(), action);
                self.actions.insert(action);
            }
        }

        self.mark_building();
    }

    /// Select an action by bare name (`GetParameter`) or qualified name (`ssm:GetParameter`).
    ///
    /// Names may contain `*` wildcards. Selecting an action twice has no further effect.
    ///
    /// # Errors
    ///
    /// * [BuilderError::InvalidAction] if the name is malformed or qualified with another service's prefix.
    /// * [BuilderError::UnknownAction] in strict mode, if the action (or, for a wildcard, every action it could
    ///   cover) is missing from the catalogue.
    pub fn select_action(&mut self, name: &str) -> Result<&mut Self, BuilderError> {
        self.check_mutable("select an action")?;
        let action = self.parse_action(name)?;

        if !self.is_catalogued(&action) {
            match self.action_validation {
                ActionValidation::Strict => {
                    debug!("Rejecting uncatalogued action {}", action);
                    return Err(BuilderError::UnknownAction(action.to_string()));
                }
                ActionValidation::Permissive => {
                    warn!("Action {} is not in the {} catalogue; allowing it", action, self.service.prefix());
                }
            }
        }

        self.insert_action(action);
        Ok(self)
    }

    /// Select several actions. Stops at, and returns, the first failure; earlier selections are kept.
    pub fn select_actions<I, S>(&mut self, names: I) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.select_action(name.as_ref())?;
        }

        Ok(self)
    }

    /// Select every action on the service as `prefix:*`.
    pub fn select_all_actions(&mut self) -> Result<&mut Self, BuilderError> {
        self.check_mutable("select an action")?;
        let action = Action::new(self.service.prefix(), "*")?;
        self.insert_action(action);
        Ok(self)
    }

    /// Select every catalogued action whose name matches a `*`/`?` glob. Each match is added by its exact name.
    pub fn select_matching_actions(&mut self, glob: &str) -> Result<&mut Self, BuilderError> {
        self.check_mutable("select an action")?;
        let prefix = self.service.prefix().to_string();

        let mut matched = Vec::new();
        for metadata in self.service.matching_actions(glob)? {
            matched.push(Action::new(prefix.as_str(), metadata.name())?);
        }

        if matched.is_empty() {
            match self.action_validation {
                ActionValidation::Strict => {
                    debug!("Glob {} matches no {} actions", glob, prefix);
                    return Err(BuilderError::UnknownAction(format!("{}:{}", prefix, glob)));
                }
                ActionValidation::Permissive => warn!("Glob {} matches no {} actions", glob, prefix),
            }
        }

        for action in matched {
            self.insert_action(action);
        }

        Ok(self)
    }

    /// Select every catalogued action with the given access level.
    pub fn select_access_level(&mut self, level: AccessLevel) -> Result<&mut Self, BuilderError> {
        self.check_mutable("select an action")?;
        let prefix = self.service.prefix().to_string();

        let mut matched = Vec::new();
        for name in self.service.access_levels().actions(level) {
            matched.push(Action::new(prefix.as_str(), name)?);
        }

        if matched.is_empty() {
            warn!("Service {} has no {} actions", prefix, level);
        }

        for action in matched {
            self.insert_action(action);
        }

        Ok(self)
    }

    fn push_resource(&mut self, resource: Resource) {
        if self.resources.contains(&resource) {
            debug!("Statement for {}: {} already attached", self.service.prefix(), resource);
        } else {
            debug!("Statement for {}: attaching {}", self.service.prefix(), resource);
            self.resources.push(resource);
        }

        self.mark_building();
    }

    /// Resolve the ARN template of `resource_type` with the supplied placeholder values and attach the result.
    ///
    /// `Partition`, `Region`, and `Account` fall back to the statement's [ArnDefaults] when not supplied.
    ///
    /// # Errors
    ///
    /// * [BuilderError::UnknownResourceType] if the service has no such resource type.
    /// * [BuilderError::UnresolvedPlaceholder] if a resource-identifying placeholder was not supplied.
    /// * [BuilderError::InvalidResource] if the resolved string is not an ARN.
    pub fn attach_resource<I, K, V>(&mut self, resource_type: &str, values: I) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.check_mutable("attach a resource")?;

        let rt = self.service.resource_type(resource_type).ok_or_else(|| {
            debug!("Service {} has no resource type {}", self.service.prefix(), resource_type);
            BuilderError::UnknownResourceType(format!("{}:{}", self.service.prefix(), resource_type))
        })?;

        let values: BTreeMap<String, String> = values.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        let resolver = ArnResolver::new(self.service.prefix(), &self.arn_defaults);
        let arn = resolver.resolve(rt.arn(), &values)?;

        self.push_resource(Resource::Arn(arn));
        Ok(self)
    }

    /// Attach `*` or an already-resolved ARN verbatim. Policy variables such as `${aws:username}` are left alone.
    pub fn attach_raw_resource(&mut self, arn: &str) -> Result<&mut Self, BuilderError> {
        self.check_mutable("attach a resource")?;
        let resource = Resource::from_str(arn)?;
        self.push_resource(resource);
        Ok(self)
    }

    fn insert_condition(&mut self, key: String, clause: ConditionClause) {
        let existing = self.conditions.keys().find(|k| k.eq_ignore_ascii_case(&key)).cloned();
        if let Some(existing) = existing {
            if let Some(previous) = self.conditions.remove(&existing) {
                debug!(
                    "Statement for {}: replacing {} {} with {} {}",
                    self.service.prefix(),
                    previous.operator(),
                    existing,
                    clause.operator(),
                    key
                );
            }
        }

        self.conditions.insert(key, clause);
        self.mark_building();
    }

    /// Add a condition clause. The operator defaults to the documented default for the key.
    ///
    /// A key without a namespace is qualified with the service prefix. Adding a key that is already present replaces
    /// its operator and values.
    ///
    /// # Errors
    ///
    /// * [BuilderError::InvalidConditionOperator] if `operator` is not an IAM condition operator.
    /// * [BuilderError::InvalidConditionValue] if no values were given or a value does not fit the operator.
    /// * [BuilderError::UnresolvedPlaceholder] if the key still contains a `${...}` slot.
    pub fn with_condition<V: Into<ConditionValues>>(
        &mut self,
        key: &str,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.check_mutable("add a condition")?;
        let (key, clause) = ConditionBuilder::new(&self.service).build(key, values.into(), operator)?;
        self.insert_condition(key, clause);
        Ok(self)
    }

    /// Add a condition clause with an already-typed operator.
    pub fn with_condition_op<V: Into<ConditionValues>>(
        &mut self,
        key: &str,
        values: V,
        operator: Operator,
    ) -> Result<&mut Self, BuilderError> {
        self.check_mutable("add a condition")?;
        let (key, clause) = ConditionBuilder::new(&self.service).build_with(key, values.into(), Some(operator))?;
        self.insert_condition(key, clause);
        Ok(self)
    }

    /// Add a condition on a templated key such as `aws:ResourceTag/${TagKey}`, substituting `tag` into the key.
    pub fn with_tagged_condition<V: Into<ConditionValues>>(
        &mut self,
        key_template: &str,
        tag: &str,
        values: V,
        operator: Option<&str>,
    ) -> Result<&mut Self, BuilderError> {
        self.check_mutable("add a condition")?;
        let (key, clause) =
            ConditionBuilder::new(&self.service).build_tagged(key_template, tag, values.into(), operator)?;
        self.insert_condition(key, clause);
        Ok(self)
    }

    /// The access levels covered by the selected actions. Wildcards contribute the level of every catalogued action
    /// they cover; uncatalogued actions contribute nothing.
    pub fn access_levels(&self) -> BTreeSet<AccessLevel> {
        let index = self.service.access_levels();
        let mut result = BTreeSet::new();

        for action in &self.actions {
            if action.is_wildcard() {
                let matcher = action.matcher();
                result.extend(self.service.actions().filter(|m| matcher.is_match(m.name())).map(|m| m.access_level()));
            } else if let Some(level) = index.level_of(action.action()) {
                result.insert(level);
            }
        }

        result
    }

    /// Indicates whether the statement grants a Permissions-management action on the wildcard resource.
    pub fn has_broad_permissions_management(&self) -> bool {
        let wildcard_resource = self.resources.is_empty() || self.resources.iter().any(Resource::is_any);
        wildcard_resource && self.access_levels().contains(&AccessLevel::PermissionsManagement)
    }

    /// Dependent actions of the selected catalogued actions that no selected action covers.
    pub fn missing_dependent_actions(&self) -> Vec<Action> {
        let mut missing = BTreeSet::new();
        let matchers = self.actions.iter().map(|a| (a.service(), a.matcher())).collect::<Vec<_>>();

        for action in &self.actions {
            let metadata = match self.service.action(action.action()) {
                Some(metadata) => metadata,
                None => continue,
            };

            for dependent in metadata.dependent_actions() {
                let covered = matchers.iter().any(|(service, matcher)| {
                    service.eq_ignore_ascii_case(dependent.service()) && matcher.is_match(dependent.action())
                });

                if !covered {
                    missing.insert(dependent.clone());
                }
            }
        }

        missing.into_iter().collect()
    }

    /// Render the statement and finalize it.
    ///
    /// The first call builds the document; later calls return the same document. With no resources attached, the
    /// document carries the wildcard resource.
    ///
    /// # Errors
    ///
    /// * [BuilderError::InvalidStatement] if no actions have been selected.
    pub fn to_document(&mut self) -> Result<StatementDocument, BuilderError> {
        if let Some(document) = &self.document {
            return Ok(document.clone());
        }

        if self.actions.is_empty() {
            debug!("Statement for {} has no actions", self.service.prefix());
            return Err(BuilderError::InvalidStatement("no actions selected".to_string()));
        }

        if self.has_broad_permissions_management() {
            warn!(
                "Statement for {} grants Permissions management actions on all resources",
                self.service.prefix()
            );
        }

        let resources = if self.resources.is_empty() {
            vec![Resource::Any]
        } else {
            self.resources.clone()
        };

        let mut builder = StatementDocument::builder();
        builder
            .action(ActionList::collapse(self.actions.iter().cloned().collect()))
            .resource(ResourceList::collapse(resources));

        if let Some(sid) = &self.sid {
            builder.sid(sid.as_str());
        }

        if !self.conditions.is_empty() {
            let mut condition = Condition::new();
            for (key, clause) in &self.conditions {
                condition.insert_clause(clause.operator(), key.as_str(), clause.values().to_vec());
            }
            builder.condition(condition);
        }

        let document = builder.build().map_err(|e| BuilderError::InvalidStatement(e.to_string()))?;
        debug!("Statement for {} finalized", self.service.prefix());
        self.state = StatementState::Finalized;
        self.document = Some(document.clone());
        Ok(document)
    }
}
