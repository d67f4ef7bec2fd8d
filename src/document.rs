use {
    crate::{display_json, ActionList, Condition, Effect, ResourceList},
    derive_builder::Builder,
    serde::Serialize,
};

/// The serialized form of a built statement.
///
/// Field order is fixed (`Sid`, `Effect`, `Action`, `Resource`, `Condition`) so two documents built from the same
/// state always render identically.
#[derive(Builder, Clone, Debug, Eq, PartialEq, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(rename_all = "PascalCase")]
pub struct StatementDocument {
    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    sid: Option<String>,

    #[builder(default)]
    effect: Effect,

    #[builder(setter(into))]
    action: ActionList,

    #[builder(setter(into))]
    resource: ResourceList,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
}

impl StatementDocument {
    pub fn builder() -> StatementDocumentBuilder {
        StatementDocumentBuilder::default()
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    #[inline]
    pub fn action(&self) -> &ActionList {
        &self.action
    }

    #[inline]
    pub fn resource(&self) -> &ResourceList {
        &self.resource
    }

    #[inline]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

display_json!(StatementDocument);

impl StatementDocumentBuilder {
    fn validate(&self) -> Result<(), StatementDocumentBuilderError> {
        let mut errors = Vec::with_capacity(2);

        match &self.action {
            None => errors.push("Action must be set."),
            Some(action) if action.is_empty() => errors.push("Action cannot be empty."),
            _ => (),
        }

        match &self.resource {
            None => errors.push("Resource must be set."),
            Some(resource) if resource.is_empty() => errors.push("Resource cannot be empty."),
            _ => (),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StatementDocumentBuilderError::ValidationError(errors.join(" ")))
        }
    }
}
