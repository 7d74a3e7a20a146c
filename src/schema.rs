//! Schema document types
//!
//! The document mirrors the JSON it serializes to:
//!
//! ```text
//! { "<TypeName>": { "fields": { "<FieldName>": { "type": ..., ... } } } }
//! ```
//!
//! Shape-specific attributes live in [`FieldShape`], so a field can never
//! carry more than one attribute group.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Top-level output: type name to record schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaDocument {
    records: IndexMap<String, RecordSchema>,
}

impl SchemaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_name: impl Into<String>, record: RecordSchema) {
        self.records.insert(type_name.into(), record);
    }

    /// Look up a record schema by type name
    pub fn get(&self, type_name: &str) -> Option<&RecordSchema> {
        self.records.get(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Fields of one record, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordSchema {
    pub fields: IndexMap<String, FieldSchema>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Description of a single field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Declared type name
    pub type_name: String,
    /// Shape-specific attributes
    pub shape: FieldShape,
    /// Serialization alias
    pub json_tag: Option<String>,
}

/// Attribute group attached to a field according to its shape
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    Scalar,
    Mapping {
        key_type: String,
        value_type: String,
    },
    Sequence {
        element_type: String,
        /// Present when the element type is a record
        element_fields: Option<RecordSchema>,
    },
    Record {
        fields: RecordSchema,
    },
}

impl FieldSchema {
    pub fn scalar(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            shape: FieldShape::Scalar,
            json_tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.json_tag = tag;
        self
    }

    /// Number of JSON attributes this field serializes to
    pub fn attribute_count(&self) -> usize {
        let shape = match &self.shape {
            FieldShape::Scalar => 0,
            FieldShape::Mapping { .. } => 2,
            FieldShape::Sequence { element_fields, .. } => 1 + element_fields.is_some() as usize,
            FieldShape::Record { .. } => 1,
        };
        1 + shape + self.json_tag.is_some() as usize
    }
}

impl Serialize for FieldSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attribute_count()))?;
        map.serialize_entry("type", &self.type_name)?;
        match &self.shape {
            FieldShape::Scalar => {}
            FieldShape::Mapping { key_type, value_type } => {
                map.serialize_entry("key_type", key_type)?;
                map.serialize_entry("value_type", value_type)?;
            }
            FieldShape::Sequence { element_type, element_fields } => {
                map.serialize_entry("element_type", element_type)?;
                if let Some(fields) = element_fields {
                    map.serialize_entry("element_fields", fields)?;
                }
            }
            FieldShape::Record { fields } => {
                map.serialize_entry("fields", fields)?;
            }
        }
        if let Some(tag) = &self.json_tag {
            map.serialize_entry("json_tag", tag)?;
        }
        map.end()
    }
}
