//! Core types shared by the resolver, the resource factory, and the transformer.

use serde::Serialize;
use serde_json::Value;

/// Name of the structural annotation that marks a type for CRUD generation.
pub const MODEL_DIRECTIVE: &str = "model";

/// Default key of the final schema artifact.
pub const DEFAULT_ARTIFACT_KEY: &str = "GraphQLSchema";

/// Default name of the data source every generated resolver binds to.
pub const DEFAULT_DATA_SOURCE: &str = "ModelDataSource";

/// Built-in GraphQL scalars. These always resolve.
pub const BUILTIN_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

/// Returns the JSON type name for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Root operation type a generated field is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RootOperation {
    Query,
    Mutation,
}

impl RootOperation {
    /// Name of the root object type.
    pub fn type_name(&self) -> &'static str {
        match self {
            RootOperation::Query => "Query",
            RootOperation::Mutation => "Mutation",
        }
    }

    /// Keyword used in the `schema { ... }` block.
    pub fn keyword(&self) -> &'static str {
        match self {
            RootOperation::Query => "query",
            RootOperation::Mutation => "mutation",
        }
    }
}

/// A generated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Get,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// Emission order of the decision list.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Create,
        OperationKind::Update,
        OperationKind::Delete,
        OperationKind::Get,
    ];

    /// Key of this operation inside its `@model` argument group.
    pub fn config_key(&self) -> &'static str {
        match self {
            OperationKind::Get => "get",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }

    /// Capitalized verb used in resource keys and input names.
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Get => "Get",
            OperationKind::Create => "Create",
            OperationKind::Update => "Update",
            OperationKind::Delete => "Delete",
        }
    }

    pub fn root(&self) -> RootOperation {
        match self {
            OperationKind::Get => RootOperation::Query,
            _ => RootOperation::Mutation,
        }
    }

    /// Unique resource key, e.g. `CreatePostResolver`.
    pub fn resource_key(&self, type_name: &str) -> String {
        format!("{}{}Resolver", self.verb(), type_name)
    }

    /// Input object consumed by a mutation, e.g. `UpdatePostInput`.
    ///
    /// Returns `None` for the read-one query, which takes a bare `id`.
    pub fn input_type_name(&self, type_name: &str) -> Option<String> {
        match self {
            OperationKind::Get => None,
            _ => Some(format!("{}{}Input", self.verb(), type_name)),
        }
    }
}

/// Options for a transformation run.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Data source that every generated resolver reads from and writes to.
    pub data_source_name: String,
    /// Key under which the final schema artifact is registered.
    pub artifact_key: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            data_source_name: DEFAULT_DATA_SOURCE.to_string(),
            artifact_key: DEFAULT_ARTIFACT_KEY.to_string(),
        }
    }
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backing data source name.
    pub fn data_source(mut self, name: impl Into<String>) -> Self {
        self.data_source_name = name.into();
        self
    }

    /// Set the artifact key.
    pub fn artifact_key(mut self, key: impl Into<String>) -> Self {
        self.artifact_key = key.into();
        self
    }
}
