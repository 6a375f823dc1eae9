//! Model Transform
//!
//! Generates CRUD operations for GraphQL object types annotated with `@model`.
//!
//! For every annotated type the transformer registers the type itself, its
//! `Create`/`Update`/`Delete` input objects, one resolver descriptor per
//! generated operation, and the matching fields on the `Query` and
//! `Mutation` root types. The result is a complete schema document plus a
//! map of named resources.
//!
//! # Example
//!
//! ```
//! use model_transform::{load_document_str, transform, TransformOptions};
//!
//! let doc = load_document_str(r#"
//!     type Post @model(mutations: { create: "addPost" }) {
//!         id: ID!
//!         title: String
//!     }
//! "#).unwrap();
//!
//! let output = transform(&doc, &TransformOptions::default()).unwrap();
//!
//! assert!(output.schema.contains("getPost(id: ID!): Post"));
//! assert!(output.schema.contains("addPost(input: CreatePostInput!): Post"));
//! assert!(!output.schema.contains("updatePost"));
//! assert!(output.resources.contains_key("CreatePostResolver"));
//! ```
//!
//! # Directive Arguments
//!
//! | Arguments | Effect |
//! |-----------|--------|
//! | (none) | `get`, `create`, `update`, `delete` under default names |
//! | `queries: {}` | no `get` query |
//! | `queries: { get: "post" }` | `get` query named `post` |
//! | `mutations: {}` | no mutations |
//! | `mutations: { create: "addPost" }` | only `create`, named `addPost` |

mod ast;
mod config;
mod context;
mod error;
mod extension;
mod inputs;
mod loader;
mod parser;
mod printer;
mod resolver;
mod resources;
mod transformer;
mod types;

pub use ast::{
    Definition, Directive, Document, EnumType, FieldDefinition, InputObjectType, InputValue,
    ObjectExtension, ObjectType, OperationTypeDefinition, ScalarType, SchemaDefinition, TypeRef,
};
pub use config::{ModelDirectiveArgs, MutationNameMap, QueryNameMap};
pub use context::TransformerContext;
pub use error::TransformError;
pub use extension::{extension_with_fields, make_field, operation_field};
pub use inputs::{make_create_input, make_delete_input, make_update_input};
pub use loader::{load_document, load_document_str, write_output};
pub use parser::parse_document;
pub use printer::print_document;
pub use resolver::{
    decide, decide_operation, plan_for_object, plan_operations, NameDecision, OperationPlan,
};
pub use resources::{
    default_field_name, DataSource, Resource, ResourceBinder, ResourceFactory, Resolver,
    SchemaArtifact, PLACEHOLDER_DEFINITION,
};
pub use transformer::{run, transform, ModelTransformer, Stage, TransformOutput};
pub use types::{
    OperationKind, RootOperation, TransformOptions, DEFAULT_ARTIFACT_KEY, DEFAULT_DATA_SOURCE,
    MODEL_DIRECTIVE,
};
