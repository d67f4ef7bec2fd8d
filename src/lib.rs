//! Data-driven builder for AWS IAM policy statements.
//!
//! A [ServiceDefinition] describes one service: its actions, resource types with their ARN templates, and condition
//! keys. A [Statement] built against a definition selects actions, attaches resources by resolving ARN templates, and
//! adds condition clauses with per-key default operators. [Statement::to_document] renders the result as a
//! [StatementDocument].
#![warn(clippy::all)]
pub(crate) mod access;
pub(crate) mod action;
pub(crate) mod condition;
pub(crate) mod document;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod policy;
pub(crate) mod registry;
pub(crate) mod resource;
pub(crate) mod service;
pub(crate) mod statement;
pub(crate) mod template;

#[macro_use]
pub(crate) mod serutil;

pub use {
    access::{AccessLevel, AccessLevelIndex},
    action::{Action, ActionList, ActionMatcher},
    condition::{
        global_default_operator, global_key, is_global_key, op as condop, Condition, ConditionBuilder, ConditionClause,
        ConditionMap, ConditionOp, ConditionType, ConditionValues, GlobalKey, Operator, SetQualifier,
    },
    document::{StatementDocument, StatementDocumentBuilder, StatementDocumentBuilderError},
    effect::Effect,
    error::BuilderError,
    policy::{Policy, PolicyBuilder, PolicyBuilderError, PolicyVersion},
    registry::ServiceRegistry,
    resource::{
        ArnDefaults, ArnDefaultsBuilder, ArnDefaultsBuilderError, ArnResolver, Resource, ResourceArn, ResourceList,
    },
    serutil::{ElementList, StringList},
    service::{ActionMetadata, ConditionKeyMetadata, ResourceType, ServiceDefinition},
    statement::{
        ActionValidation, Statement, StatementOptions, StatementOptionsBuilder, StatementOptionsBuilderError,
        StatementState,
    },
    template::Template,
};
