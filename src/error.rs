//! Error types for schema transformation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, transforming, or printing a schema.
///
/// Malformed `@model` arguments are never reported here: they are read as
/// absent by the configuration model.
#[derive(Debug, Error)]
pub enum TransformError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("syntax error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    // Duplicate registrations (exit code 2)
    #[error("type \"{name}\" is already registered")]
    DuplicateType { name: String },

    #[error("field \"{field}\" is already defined on \"{type_name}\"")]
    DuplicateField { type_name: String, field: String },

    #[error("resource \"{key}\" is already registered")]
    DuplicateResource { key: String },

    #[error("a schema definition is already registered")]
    DuplicateSchema,

    // Generated names (exit code 2)
    #[error("\"{field}\" is not a valid field name on \"{type_name}\"")]
    InvalidName { type_name: String, field: String },

    // Unresolvable references (exit code 2)
    #[error("unknown type \"{name}\" referenced by {referenced_by}")]
    UnresolvedType { name: String, referenced_by: String },

    #[error("cannot extend unknown type \"{name}\"")]
    UnknownExtensionTarget { name: String },

    // Lifecycle misuse (exit code 2)
    #[error("hook `{hook}` cannot run in stage {stage}")]
    InvalidStage { hook: &'static str, stage: String },

    #[error("artifact \"{key}\" was never reserved")]
    ArtifactNotReserved { key: String },

    #[error("artifact \"{key}\" is already fulfilled")]
    ArtifactAlreadyFulfilled { key: String },

    #[error("failed to serialize output: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl TransformError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TransformError::FileNotFound { .. }
            | TransformError::ReadError { .. }
            | TransformError::WriteError { .. } => 3,
            _ => 2,
        }
    }

    /// True for the duplicate-registration family of errors.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            TransformError::DuplicateType { .. }
                | TransformError::DuplicateField { .. }
                | TransformError::DuplicateResource { .. }
                | TransformError::DuplicateSchema
        )
    }
}
