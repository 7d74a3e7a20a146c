//! struct-schema
//!
//! Describes record types as nested JSON schema documents: field names,
//! declared type names, and per-shape metadata.
//!
//! ## Features
//!
//! - **Shape classification**: every field is a scalar, mapping, sequence, or
//!   nested record
//! - **Recursive description**: nested records and record-typed sequence
//!   elements are described in place
//! - **Cycle detection**: self-referential types are rejected instead of
//!   recursing forever
//! - **Safe persistence**: artifacts are rendered fully, then swapped in
//! - **Drift checking**: compare a stored artifact with a fresh render
//!
//! ## Output
//!
//! ```text
//! {
//!   "Student": {
//!     "fields": {
//!       "Name": { "type": "string" },
//!       "Age": { "type": "int" },
//!       "Classes": { "type": "[]string", "element_type": "string" }
//!     }
//!   }
//! }
//! ```

pub mod catalog;
pub mod checksum;
pub mod config;
pub mod error;
pub mod export;
pub mod introspect;
pub mod models;
pub mod reflect;
pub mod schema;

pub use catalog::TypeCatalog;
pub use checksum::Checksum;
pub use config::{OutputFormat, SchemaConfig};
pub use error::{Result, SchemaError};
pub use export::{check_artifact, render, write_artifact, DriftReport};
pub use introspect::{describe, Introspector};
pub use reflect::{FieldDescriptor, RecordDescriptor, Reflect, Shape, ShapeKind, TypeDescriptor};
pub use schema::{FieldSchema, FieldShape, RecordSchema, SchemaDocument};
