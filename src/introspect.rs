//! Schema introspection
//!
//! Walks a record's fields in declaration order, classifies each field's
//! shape, and recurses into nested records and record-typed sequence
//! elements. Mapping keys and values are named but never recursed into.
//!
//! Any failure aborts the whole description; there is no partial document.

use std::any::TypeId;

use tracing::{debug, trace};

use crate::error::{Result, SchemaError};
use crate::reflect::{RecordDescriptor, Reflect, Shape, TypeDescriptor};
use crate::schema::{FieldSchema, FieldShape, RecordSchema, SchemaDocument};

/// Describe `T` with the default introspector
pub fn describe<T: Reflect + ?Sized>() -> Result<SchemaDocument> {
    Introspector::default().describe::<T>()
}

/// Builds schema documents from type descriptors.
///
/// Holds configuration only; every call starts from scratch. Nesting depth is
/// unbounded unless a limit is set; cycles are always rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Introspector {
    max_depth: Option<usize>,
}

impl Introspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit record nesting depth (the top-level record is depth 1)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn describe<T: Reflect + ?Sized>(&self) -> Result<SchemaDocument> {
        self.describe_descriptor(&T::descriptor())
    }

    pub fn describe_descriptor(&self, descriptor: &TypeDescriptor) -> Result<SchemaDocument> {
        let record = descriptor.as_record().ok_or_else(|| SchemaError::NotARecord {
            type_name: descriptor.name.clone(),
        })?;

        let mut chain = Vec::new();
        let schema = self.describe_record(record, &mut chain)?;

        let mut document = SchemaDocument::new();
        document.insert(record.name(), schema);
        Ok(document)
    }

    /// `chain` holds the records currently being described, outermost first.
    /// Cycles are detected by type identity; names are only for reporting.
    fn describe_record(
        &self,
        record: &RecordDescriptor,
        chain: &mut Vec<(TypeId, String)>,
    ) -> Result<RecordSchema> {
        let qualified = record.qualified_name();

        if chain.iter().any(|(id, _)| *id == record.type_id()) {
            let mut path: Vec<String> = chain.iter().map(|(_, name)| name.clone()).collect();
            path.push(qualified.clone());
            return Err(SchemaError::CyclicType {
                type_name: qualified,
                path,
            });
        }
        if let Some(max_depth) = self.max_depth {
            if chain.len() >= max_depth {
                return Err(SchemaError::DepthExceeded {
                    type_name: qualified,
                    max_depth,
                });
            }
        }

        debug!(record = %qualified, depth = chain.len() + 1, "describing record");
        chain.push((record.type_id(), qualified));

        let mut schema = RecordSchema::new();
        for field in record.fields() {
            if schema.fields.contains_key(&field.name) {
                return Err(SchemaError::DuplicateField {
                    record: record.qualified_name(),
                    field: field.name.clone(),
                });
            }

            let ty = (field.ty)();
            trace!(field = %field.name, ty = %ty.name, kind = ?ty.kind(), "classified field");

            let shape = self.describe_shape(&ty, chain)?;
            let field_schema = FieldSchema {
                type_name: ty.name,
                shape,
                json_tag: field.tag.clone(),
            };
            schema.fields.insert(field.name.clone(), field_schema);
        }

        chain.pop();
        Ok(schema)
    }

    fn describe_shape(
        &self,
        ty: &TypeDescriptor,
        chain: &mut Vec<(TypeId, String)>,
    ) -> Result<FieldShape> {
        let shape = match &ty.shape {
            Shape::Scalar => FieldShape::Scalar,
            Shape::Mapping { key, value } => FieldShape::Mapping {
                key_type: key().name,
                value_type: value().name,
            },
            Shape::Sequence { element } => {
                let element = element();
                let element_fields = match element.as_record() {
                    Some(record) => Some(self.describe_record(record, chain)?),
                    None => None,
                };
                FieldShape::Sequence {
                    element_type: element.name,
                    element_fields,
                }
            }
            Shape::Record(record) => FieldShape::Record {
                fields: self.describe_record(record, chain)?,
            },
        };
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Leaf;
    struct Branch;
    struct Node;
    struct Dup;

    impl Reflect for Leaf {
        fn descriptor() -> TypeDescriptor {
            RecordDescriptor::of::<Self>("Leaf").field::<u32>("Value").into()
        }
    }

    impl Reflect for Branch {
        fn descriptor() -> TypeDescriptor {
            RecordDescriptor::of::<Self>("Branch")
                .field::<Leaf>("Left")
                .field::<Leaf>("Right")
                .field::<HashMap<String, Leaf>>("Index")
                .into()
        }
    }

    impl Reflect for Node {
        fn descriptor() -> TypeDescriptor {
            RecordDescriptor::of::<Self>("Node")
                .field::<String>("Label")
                .field::<Vec<Node>>("Children")
                .into()
        }
    }

    impl Reflect for Dup {
        fn descriptor() -> TypeDescriptor {
            RecordDescriptor::of::<Self>("Dup")
                .field::<bool>("A")
                .field::<bool>("A")
                .into()
        }
    }

    #[test]
    fn test_non_record_rejected() {
        let err = describe::<i32>().unwrap_err();
        assert!(matches!(err, SchemaError::NotARecord { ref type_name } if type_name == "int32"));

        assert!(matches!(describe::<Vec<Leaf>>(), Err(SchemaError::NotARecord { .. })));
        assert!(matches!(
            describe::<HashMap<String, Leaf>>(),
            Err(SchemaError::NotARecord { .. })
        ));
    }

    #[test]
    fn test_repeated_type_is_not_a_cycle() {
        let document = describe::<Branch>().unwrap();
        let branch = document.get("Branch").unwrap();
        for name in ["Left", "Right"] {
            match &branch.field(name).unwrap().shape {
                FieldShape::Record { fields } => assert_eq!(fields.len(), 1),
                other => panic!("Expected Record, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_mapping_values_not_recursed() {
        let document = describe::<Branch>().unwrap();
        let index = document.get("Branch").unwrap().field("Index").unwrap();
        assert_eq!(
            index.shape,
            FieldShape::Mapping {
                key_type: "string".to_string(),
                value_type: "Leaf".to_string(),
            }
        );
    }

    #[test]
    fn test_cycle_through_sequence() {
        match describe::<Node>() {
            Err(SchemaError::CyclicType { type_name, path }) => {
                assert_eq!(type_name, "Node");
                assert_eq!(path, vec!["Node".to_string(), "Node".to_string()]);
            }
            other => panic!("Expected CyclicType, got {:?}", other),
        }
    }

    #[test]
    fn test_depth_limit() {
        let err = Introspector::new().with_max_depth(1).describe::<Branch>().unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DepthExceeded { ref type_name, max_depth: 1 } if type_name == "Leaf"
        ));

        assert!(Introspector::new().with_max_depth(2).describe::<Branch>().is_ok());
    }

    mod api {
        use super::*;

        pub struct User;

        impl Reflect for User {
            fn descriptor() -> TypeDescriptor {
                RecordDescriptor::of::<Self>("User")
                    .field::<String>("Login")
                    .field::<super::db::User>("Row")
                    .into()
            }
        }
    }

    mod db {
        use super::*;

        pub struct User;

        impl Reflect for User {
            fn descriptor() -> TypeDescriptor {
                RecordDescriptor::of::<Self>("User").field::<i64>("Id").into()
            }
        }
    }

    #[test]
    fn test_same_name_distinct_types_are_not_a_cycle() {
        let document = describe::<api::User>().unwrap();
        let user = document.get("User").unwrap();
        let row = user.field("Row").unwrap();
        assert_eq!(row.type_name, "User");
        match &row.shape {
            FieldShape::Record { fields } => {
                assert_eq!(fields.fields.keys().collect::<Vec<_>>(), vec!["Id"]);
            }
            other => panic!("Expected Record, got {:?}", other),
        }
    }

    macro_rules! nested_chain {
        ($last:ident) => {
            struct $last;
            impl Reflect for $last {
                fn descriptor() -> TypeDescriptor {
                    RecordDescriptor::of::<Self>(stringify!($last)).field::<u8>("Value").into()
                }
            }
        };
        ($outer:ident, $inner:ident $(, $rest:ident)*) => {
            struct $outer;
            impl Reflect for $outer {
                fn descriptor() -> TypeDescriptor {
                    RecordDescriptor::of::<Self>(stringify!($outer)).field::<$inner>("Next").into()
                }
            }
            nested_chain!($inner $(, $rest)*);
        };
    }

    nested_chain!(
        L0, L1, L2, L3, L4, L5, L6, L7, L8, L9, L10, L11, L12, L13, L14, L15, L16, L17, L18,
        L19, L20, L21, L22, L23, L24, L25, L26, L27, L28, L29, L30, L31, L32, L33
    );

    #[test]
    fn test_deep_acyclic_nesting_is_unbounded_by_default() {
        assert_eq!(Introspector::default().max_depth(), None);
        let document = describe::<L0>().unwrap();

        let mut record = document.get("L0").unwrap();
        let mut depth = 1;
        while let Some(next) = record.field("Next") {
            match &next.shape {
                FieldShape::Record { fields } => record = fields,
                other => panic!("Expected Record, got {:?}", other),
            }
            depth += 1;
        }
        assert_eq!(depth, 34);
        assert!(record.field("Value").is_some());
    }

    #[test]
    fn test_explicit_depth_limit_boundary() {
        assert!(Introspector::new().with_max_depth(34).describe::<L0>().is_ok());

        let err = Introspector::new().with_max_depth(33).describe::<L0>().unwrap_err();
        assert!(matches!(
            err,
            SchemaError::DepthExceeded { ref type_name, max_depth: 33 } if type_name == "L33"
        ));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = describe::<Dup>().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { ref field, .. } if field == "A"));
    }
}
