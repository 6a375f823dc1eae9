//! Directive resolution: decides which operations a `@model` type gets and
//! under which name.
//!
//! Each operation is decided independently from two facts: whether its
//! argument group (`queries` or `mutations`) was given, and what its key is
//! bound to.
//!
//! | Group given | Key value          | Decision   |
//! |-------------|--------------------|------------|
//! | no          | (n/a)              | default    |
//! | yes         | missing or null    | suppress   |
//! | yes         | `""`               | suppress   |
//! | yes         | non-empty string   | override   |

use serde::Serialize;

use crate::ast::{InputValue, ObjectType, TypeRef};
use crate::config::ModelDirectiveArgs;
use crate::types::{OperationKind, RootOperation, MODEL_DIRECTIVE};

/// Emission decision for a single operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "name", rename_all = "lowercase")]
pub enum NameDecision {
    /// Do not generate the operation.
    Suppress,
    /// Generate it under the binder's default name.
    Default,
    /// Generate it under the given name.
    Override(String),
}

/// State of an operation's key inside a given group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyState<'a> {
    Missing,
    Empty,
    Bound(&'a str),
}

impl<'a> KeyState<'a> {
    fn of(value: Option<&'a str>) -> Self {
        match value {
            None => KeyState::Missing,
            Some("") => KeyState::Empty,
            Some(name) => KeyState::Bound(name),
        }
    }
}

/// Decide one operation from its group presence and key value.
pub fn decide(group_present: bool, value: Option<&str>) -> NameDecision {
    match (group_present, KeyState::of(value)) {
        (false, KeyState::Missing) => NameDecision::Default,
        (false, KeyState::Empty) => NameDecision::Default,
        (false, KeyState::Bound(_)) => NameDecision::Default,
        (true, KeyState::Missing) => NameDecision::Suppress,
        (true, KeyState::Empty) => NameDecision::Suppress,
        (true, KeyState::Bound(name)) => NameDecision::Override(name.to_string()),
    }
}

/// Decision for `kind` under the parsed configuration.
pub fn decide_operation(args: &ModelDirectiveArgs, kind: OperationKind) -> NameDecision {
    decide(args.group_present(kind), args.name_for(kind))
}

/// One accepted operation, with everything needed to build its field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationPlan {
    pub kind: OperationKind,
    pub root: RootOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_override: Option<String>,
    pub resource_key: String,
    pub arguments: Vec<InputValue>,
    pub return_type: TypeRef,
}

/// Ordered decision list for one annotated type: create, update, delete, get.
///
/// Suppressed operations are left out.
pub fn plan_operations(type_name: &str, args: &ModelDirectiveArgs) -> Vec<OperationPlan> {
    OperationKind::ALL
        .iter()
        .filter_map(|&kind| {
            let name_override = match decide_operation(args, kind) {
                NameDecision::Suppress => {
                    log::debug!("{}: suppressing {:?}", type_name, kind);
                    return None;
                }
                NameDecision::Default => None,
                NameDecision::Override(name) => Some(name),
            };

            Some(OperationPlan {
                kind,
                root: kind.root(),
                name_override,
                resource_key: kind.resource_key(type_name),
                arguments: operation_arguments(type_name, kind),
                return_type: TypeRef::named(type_name),
            })
        })
        .collect()
}

/// Plan for an object carrying `@model`, `None` when it carries no such directive.
pub fn plan_for_object(def: &ObjectType) -> Option<Vec<OperationPlan>> {
    let directive = def.directive(MODEL_DIRECTIVE)?;
    let args = ModelDirectiveArgs::from_arguments(Some(&directive.arguments));
    Some(plan_operations(&def.name, &args))
}

/// `id: ID!` for the read-one query, `input: <Verb><Type>Input!` for mutations.
fn operation_arguments(type_name: &str, kind: OperationKind) -> Vec<InputValue> {
    match kind.input_type_name(type_name) {
        Some(input) => vec![InputValue::new(
            "input",
            TypeRef::non_null(TypeRef::named(input)),
        )],
        None => vec![InputValue::new("id", TypeRef::non_null(TypeRef::named("ID")))],
    }
}
