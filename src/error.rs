use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug, Eq, PartialEq)]
pub enum BuilderError {
    InvalidAction(String),
    InvalidConditionOperator(String),
    InvalidConditionValue(String),
    InvalidPolicyVersion(String),
    InvalidResource(String),
    InvalidServiceDefinition(String),
    InvalidStatement(String),
    InvalidSubstitution(String),
    UnknownAction(String),
    UnknownResourceType(String),
    UnknownService(String),
    UnresolvedPlaceholder {
        placeholder: String,
        template: String,
    },
}

impl Display for BuilderError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAction(action) => write!(f, "Invalid action: {}", action),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::InvalidConditionValue(value) => write!(f, "Invalid condition value: {}", value),
            Self::InvalidPolicyVersion(version) => write!(f, "Invalid policy version: {}", version),
            Self::InvalidResource(resource) => write!(f, "Invalid resource: {}", resource),
            Self::InvalidServiceDefinition(msg) => write!(f, "Invalid service definition: {}", msg),
            Self::InvalidStatement(msg) => write!(f, "Invalid statement: {}", msg),
            Self::InvalidSubstitution(element) => write!(f, "Invalid variable substitution: {}", element),
            Self::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            Self::UnknownResourceType(resource_type) => write!(f, "Unknown resource type: {}", resource_type),
            Self::UnknownService(prefix) => write!(f, "Unknown service: {}", prefix),
            Self::UnresolvedPlaceholder {
                placeholder,
                template,
            } => write!(f, "Unresolved placeholder ${{{}}} in template: {}", placeholder, template),
        }
    }
}

impl Error for BuilderError {}
