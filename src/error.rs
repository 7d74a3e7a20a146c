//! Error types for schema introspection and export

use std::path::PathBuf;

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema introspection and export errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("input is not a struct: {type_name}")]
    NotARecord { type_name: String },

    #[error("cyclic type {type_name}: {}", path.join(" -> "))]
    CyclicType { type_name: String, path: Vec<String> },

    #[error("nesting of {type_name} exceeds maximum depth {max_depth}")]
    DepthExceeded { type_name: String, max_depth: usize },

    #[error("duplicate field {field} in {record}")]
    DuplicateField { record: String, field: String },

    #[error("unknown type: {name}{}", did_you_mean(suggestions))]
    UnknownType { name: String, suggestions: Vec<String> },

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("error creating file {}: {source}", path.display())]
    CreateArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error writing to file {}: {source}", path.display())]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading file {}: {source}", path.display())]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}
