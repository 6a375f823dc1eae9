//! Owned AST for the schema definition language subset handled here.
//!
//! Directive arguments and default values are kept as `serde_json::Value`
//! so the `@model` configuration can be read the same way any other JSON
//! payload is read.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::types::RootOperation;

pub(crate) fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True when `name` matches `[_A-Za-z][_0-9A-Za-z]*`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start) && chars.all(is_name_continue)
}

/// A reference to a type: `Post`, `[Post]`, `Post!`, `[Post!]!`.
///
/// Serializes as its schema text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn non_null(inner: TypeRef) -> Self {
        match inner {
            already @ TypeRef::NonNull(_) => already,
            other => TypeRef::NonNull(Box::new(other)),
        }
    }

    /// Innermost named type.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Strip the outermost non-null wrapper, if any.
    pub fn nullable(&self) -> TypeRef {
        match self {
            TypeRef::NonNull(inner) => (**inner).clone(),
            other => other.clone(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directive {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }
}

/// An argument definition or an input object field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputValue {
    pub name: String,
    pub ty: TypeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl InputValue {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<InputValue>,
    pub ty: TypeRef,
    #[serde(skip)]
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, arguments: Vec<InputValue>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            arguments,
            ty,
            directives: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    pub directives: Vec<Directive>,
}

impl ObjectType {
    /// An object type with no fields and no directives.
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            directives: Vec::new(),
        }
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub fields: Vec<InputValue>,
}

/// Fields appended to an existing object type (`extend type Query { ... }`).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExtension {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

impl ObjectExtension {
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarType {
    pub name: String,
}

/// One `query: Query` line of a `schema { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationTypeDefinition {
    pub operation: RootOperation,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaDefinition {
    pub operations: Vec<OperationTypeDefinition>,
}

impl SchemaDefinition {
    /// Schema block binding each given root operation to its default type name.
    pub fn with_roots(roots: &[RootOperation]) -> Self {
        Self {
            operations: roots
                .iter()
                .map(|root| OperationTypeDefinition {
                    operation: *root,
                    type_name: root.type_name().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Schema(SchemaDefinition),
    Object(ObjectType),
    Input(InputObjectType),
    Extension(ObjectExtension),
    Enum(EnumType),
    Scalar(ScalarType),
}

impl Definition {
    /// Name of the defined type, `None` for a schema block.
    pub fn name(&self) -> Option<&str> {
        match self {
            Definition::Schema(_) => None,
            Definition::Object(o) => Some(&o.name),
            Definition::Input(i) => Some(&i.name),
            Definition::Extension(e) => Some(&e.name),
            Definition::Enum(e) => Some(&e.name),
            Definition::Scalar(s) => Some(&s.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn objects(&self) -> impl Iterator<Item = &ObjectType> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Object(o) => Some(o),
            _ => None,
        })
    }

    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        self.objects().find(|o| o.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&InputObjectType> {
        self.definitions.iter().find_map(|d| match d {
            Definition::Input(i) if i.name == name => Some(i),
            _ => None,
        })
    }

    pub fn schema(&self) -> Option<&SchemaDefinition> {
        self.definitions.iter().find_map(|d| match d {
            Definition::Schema(s) => Some(s),
            _ => None,
        })
    }
}
