//! Typed view of the `@model` directive arguments.
//!
//! ```graphql
//! type Post @model(queries: { get: "post" }, mutations: { create: "addPost" }) { ... }
//! ```
//!
//! Reading never fails. A group that is not an object reads as absent, and
//! so does a key whose value is not a string.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{json_type_name, OperationKind};

/// Argument group holding query name overrides.
pub const QUERIES_ARG: &str = "queries";

/// Argument group holding mutation name overrides.
pub const MUTATIONS_ARG: &str = "mutations";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryNameMap {
    pub get: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutationNameMap {
    pub create: Option<String>,
    pub update: Option<String>,
    pub delete: Option<String>,
}

/// Parsed `@model` arguments.
///
/// `None` for a group means the group was not given, so every operation in
/// it keeps its default name. A given group suppresses every key that is
/// not bound to a non-empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelDirectiveArgs {
    pub queries: Option<QueryNameMap>,
    pub mutations: Option<MutationNameMap>,
}

impl ModelDirectiveArgs {
    /// Read the configuration from raw directive arguments.
    ///
    /// `None` behaves like an empty argument list.
    pub fn from_arguments(arguments: Option<&Map<String, Value>>) -> Self {
        let Some(arguments) = arguments else {
            return Self::default();
        };

        let queries = group(arguments, QUERIES_ARG).map(|map| QueryNameMap {
            get: name_key(map, QUERIES_ARG, "get"),
        });
        let mutations = group(arguments, MUTATIONS_ARG).map(|map| MutationNameMap {
            create: name_key(map, MUTATIONS_ARG, "create"),
            update: name_key(map, MUTATIONS_ARG, "update"),
            delete: name_key(map, MUTATIONS_ARG, "delete"),
        });

        Self { queries, mutations }
    }

    /// Whether the group that owns `kind` was given.
    pub fn group_present(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Get => self.queries.is_some(),
            _ => self.mutations.is_some(),
        }
    }

    /// Raw value bound to `kind`'s key, if its group was given and the key is a string.
    pub fn name_for(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Get => self.queries.as_ref()?.get.as_deref(),
            OperationKind::Create => self.mutations.as_ref()?.create.as_deref(),
            OperationKind::Update => self.mutations.as_ref()?.update.as_deref(),
            OperationKind::Delete => self.mutations.as_ref()?.delete.as_deref(),
        }
    }
}

fn group<'a>(arguments: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    match arguments.get(key)? {
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => {
            log::warn!(
                "ignoring @model argument `{}`: expected object, got {}",
                key,
                json_type_name(other)
            );
            None
        }
    }
}

fn name_key(map: &Map<String, Value>, group: &str, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            log::warn!(
                "ignoring @model argument `{}.{}`: expected string, got {}",
                group,
                key,
                json_type_name(other)
            );
            None
        }
    }
}
