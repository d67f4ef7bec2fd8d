use {
    super::{
        keys::{global_default_operator, global_key, GlobalKey},
        ConditionClause, ConditionValues, Operator,
    },
    crate::{condop, template::Template, BuilderError, ConditionKeyMetadata, ServiceDefinition},
    log::{debug, trace},
    std::str::FromStr,
};

/// Validates and normalizes condition clauses for statements on one service.
#[derive(Clone, Copy, Debug)]
pub struct ConditionBuilder<'a> {
    service: &'a ServiceDefinition,
}

impl<'a> ConditionBuilder<'a> {
    pub fn new(service: &'a ServiceDefinition) -> Self {
        Self {
            service,
        }
    }

    /// Qualify a bare key with the service prefix and give it a canonical spelling.
    ///
    /// IAM compares condition keys case-insensitively. The namespace is lowercased, and a key matching a global or
    /// catalogued key takes that key's spelling; text standing in for a template slot, such as a tag name, is kept as
    /// given. Uncatalogued keys keep the caller's spelling.
    pub fn qualify_key(&self, key: &str) -> String {
        let qualified = match key.split_once(':') {
            Some((ns, name)) => format!("{}:{}", ns.to_ascii_lowercase(), name),
            None => format!("{}:{}", self.service.prefix().to_ascii_lowercase(), key),
        };

        let template = if qualified.starts_with("aws:") {
            global_key(&qualified).map(GlobalKey::key)
        } else {
            self.service.condition_key(&qualified).map(ConditionKeyMetadata::key)
        };

        match template.and_then(|t| t.canonicalize(&qualified)) {
            Some(canonical) => {
                trace!("Condition key {} -> {}", key, canonical);
                canonical
            }
            None => qualified,
        }
    }

    /// The operator used for `key` when the caller does not supply one.
    ///
    /// Global `aws:` keys use their own table, service keys use the default for their catalogued type, and anything
    /// else falls back to `StringLike`.
    pub fn default_operator(&self, key: &str) -> Operator {
        if let Some(op) = global_default_operator(key) {
            trace!("Global key {} defaults to {}", key, op);
            return op;
        }

        if let Some(metadata) = self.service.condition_key(key) {
            let op = metadata.condition_type().default_operator();
            trace!("Key {} has type {}; defaulting to {}", key, metadata.condition_type(), op);
            return op;
        }

        trace!("Key {} is not catalogued; defaulting to StringLike", key);
        Operator::new(condop::StringLike)
    }

    /// Build a clause from a caller-supplied operator name such as `StringEquals` or `ForAnyValue:StringLike`.
    ///
    /// # Errors
    ///
    /// * [BuilderError::InvalidConditionOperator] if `operator` is not in the IAM vocabulary.
    /// * Any error from [ConditionBuilder::build_with].
    pub fn build(
        &self,
        key: &str,
        values: ConditionValues,
        operator: Option<&str>,
    ) -> Result<(String, ConditionClause), BuilderError> {
        let operator = match operator {
            None => None,
            Some(op) => match Operator::from_str(op) {
                Ok(op) => Some(op),
                Err(e) => {
                    debug!("Rejecting condition on {}: {}", key, e);
                    return Err(e);
                }
            },
        };

        self.build_with(key, values, operator)
    }

    /// Build a clause from an already-typed operator.
    ///
    /// # Errors
    ///
    /// * [BuilderError::UnresolvedPlaceholder] if the key still contains a `${...}` slot.
    /// * [BuilderError::InvalidConditionValue] if no values were given, or a value does not fit the operator.
    pub fn build_with(
        &self,
        key: &str,
        values: ConditionValues,
        operator: Option<Operator>,
    ) -> Result<(String, ConditionClause), BuilderError> {
        let key = self.qualify_key(key);

        let key_template = Template::from_str(&key)?;
        if let Some(placeholder) = key_template.placeholders().first() {
            return Err(BuilderError::UnresolvedPlaceholder {
                placeholder: placeholder.to_string(),
                template: key,
            });
        }

        let operator = operator.unwrap_or_else(|| self.default_operator(&key));

        if values.is_empty() {
            debug!("Rejecting condition {} {}: no values", operator, key);
            return Err(BuilderError::InvalidConditionValue(format!("no values for {}", key)));
        }

        for value in values.as_slice() {
            if let Err(e) = operator.validate_value(value) {
                debug!("Rejecting condition {} {}: {}", operator, key, e);
                return Err(e);
            }
        }

        debug!("Condition {} {} = {:?}", operator, key, values.as_slice());
        Ok((key, ConditionClause::new(operator, values.into_vec())))
    }

    /// Substitute `tag` into every slot of a templated key such as `aws:ResourceTag/${TagKey}`, then build the clause.
    pub fn build_tagged(
        &self,
        key_template: &str,
        tag: &str,
        values: ConditionValues,
        operator: Option<&str>,
    ) -> Result<(String, ConditionClause), BuilderError> {
        let template = Template::from_str(key_template)?;
        let key = template.render(|_| Some(tag.to_string()))?;
        trace!("Tagged key {} with {:?} -> {}", key_template, tag, key);
        self.build(&key, values, operator)
    }
}
