//! Resource descriptors binding generated operations to the backing data source.
//!
//! Every model type shares one data source keyed by `(__typename, id)`.
//! A resolver descriptor names the root type and field it serves, the data
//! operation it performs, and how arguments map onto the item key.

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::{OperationKind, TransformOptions};

/// Definition text held by the schema artifact until `after` fulfills it.
pub const PLACEHOLDER_DEFINITION: &str = "placeholder";

/// Partition key of the shared data source.
pub const TYPENAME_KEY: &str = "__typename";

/// Sort key of the shared data source.
pub const ID_KEY: &str = "id";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum Resource {
    DataSource(DataSource),
    Resolver(Resolver),
    Schema(SchemaArtifact),
}

impl Resource {
    pub fn as_resolver(&self) -> Option<&Resolver> {
        match self {
            Resource::Resolver(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_schema(&self) -> Option<&SchemaArtifact> {
        match self {
            Resource::Schema(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataSource {
    pub name: String,
    pub hash_key: String,
    pub sort_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resolver {
    /// Root type the field lives on (`Query` or `Mutation`).
    pub type_name: String,
    /// Resolved field name: the override, or the default for the operation.
    pub field_name: String,
    pub data_source_name: String,
    pub request_mapping: Value,
    pub response_mapping: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaArtifact {
    pub definition: String,
}

impl SchemaArtifact {
    pub fn is_placeholder(&self) -> bool {
        self.definition == PLACEHOLDER_DEFINITION
    }
}

/// Produces resource descriptors for a transformation run.
pub trait ResourceBinder {
    /// Baseline resources registered in `before`, keyed by resource key.
    fn init_resources(&self) -> Vec<(String, Resource)>;

    /// Descriptor for one generated operation.
    fn bind_operation(
        &self,
        type_name: &str,
        kind: OperationKind,
        name_override: Option<&str>,
    ) -> Resolver;

    /// Schema artifact holding the given definition text.
    fn schema_artifact(&self, definition: &str) -> Resource;
}

/// Default field name for an operation, e.g. `getPost`, `createPost`.
pub fn default_field_name(type_name: &str, kind: OperationKind) -> String {
    format!("{}{}", kind.config_key(), type_name)
}

/// Default binder: one shared data source for all model types.
#[derive(Debug, Clone)]
pub struct ResourceFactory {
    data_source_name: String,
}

impl Default for ResourceFactory {
    fn default() -> Self {
        Self::new(&TransformOptions::default())
    }
}

impl ResourceFactory {
    pub fn new(options: &TransformOptions) -> Self {
        Self {
            data_source_name: options.data_source_name.clone(),
        }
    }

    fn request_mapping(type_name: &str, kind: OperationKind) -> Value {
        match kind {
            OperationKind::Get => json!({
                "operation": "GetItem",
                "key": { TYPENAME_KEY: type_name, ID_KEY: "$ctx.args.id" }
            }),
            OperationKind::Create => json!({
                "operation": "PutItem",
                "key": { TYPENAME_KEY: type_name, ID_KEY: "$util.autoId($ctx.args.input.id)" },
                "attributeValues": "$ctx.args.input",
                "condition": "attribute_not_exists(id)"
            }),
            OperationKind::Update => json!({
                "operation": "UpdateItem",
                "key": { TYPENAME_KEY: type_name, ID_KEY: "$ctx.args.input.id" },
                "attributeValues": "$ctx.args.input",
                "condition": "attribute_exists(id)"
            }),
            OperationKind::Delete => json!({
                "operation": "DeleteItem",
                "key": { TYPENAME_KEY: type_name, ID_KEY: "$ctx.args.input.id" }
            }),
        }
    }
}

impl ResourceBinder for ResourceFactory {
    fn init_resources(&self) -> Vec<(String, Resource)> {
        vec![(
            self.data_source_name.clone(),
            Resource::DataSource(DataSource {
                name: self.data_source_name.clone(),
                hash_key: TYPENAME_KEY.to_string(),
                sort_key: ID_KEY.to_string(),
            }),
        )]
    }

    fn bind_operation(
        &self,
        type_name: &str,
        kind: OperationKind,
        name_override: Option<&str>,
    ) -> Resolver {
        let field_name = name_override
            .map(str::to_string)
            .unwrap_or_else(|| default_field_name(type_name, kind));

        Resolver {
            type_name: kind.root().type_name().to_string(),
            field_name,
            data_source_name: self.data_source_name.clone(),
            request_mapping: Self::request_mapping(type_name, kind),
            response_mapping: "$util.toJson($ctx.result)".to_string(),
        }
    }

    fn schema_artifact(&self, definition: &str) -> Resource {
        Resource::Schema(SchemaArtifact {
            definition: definition.to_string(),
        })
    }
}
