//! Named lookup of record types
//!
//! The binary cannot reflect over arbitrary types at runtime, so the types it
//! can describe are registered here by name.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::IndexMap;

use crate::error::{Result, SchemaError};
use crate::introspect::Introspector;
use crate::models::{Address, Course, Enrollment, Instructor, Student};
use crate::reflect::{DescriptorFn, Reflect, TypeDescriptor};
use crate::schema::SchemaDocument;

const MAX_SUGGESTIONS: usize = 3;

/// Registered record types, keyed by bare record name
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: IndexMap<String, DescriptorFn>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the record types shipped with the crate
    pub fn builtin() -> Result<Self> {
        let mut catalog = Self::new();
        catalog
            .register::<Student>()?
            .register::<Address>()?
            .register::<Instructor>()?
            .register::<Course>()?
            .register::<Enrollment>()?;
        Ok(catalog)
    }

    /// Register a record type under its bare name, replacing any previous
    /// registration of the same name
    pub fn register<T: Reflect + ?Sized>(&mut self) -> Result<&mut Self> {
        let descriptor = T::descriptor();
        let record = descriptor.as_record().ok_or_else(|| SchemaError::NotARecord {
            type_name: descriptor.name.clone(),
        })?;
        self.types.insert(record.name().to_string(), T::descriptor);
        Ok(self)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Descriptor of a registered type
    pub fn get(&self, name: &str) -> Result<TypeDescriptor> {
        match self.types.get(name) {
            Some(descriptor) => Ok(descriptor()),
            None => Err(SchemaError::UnknownType {
                name: name.to_string(),
                suggestions: self.suggest(name),
            }),
        }
    }

    /// Describe a registered type
    pub fn describe(&self, name: &str, introspector: &Introspector) -> Result<SchemaDocument> {
        introspector.describe_descriptor(&self.get(name)?)
    }

    /// Registered names resembling `query`, best match first
    pub fn suggest(&self, query: &str) -> Vec<String> {
        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, &str)> = self
            .names()
            .filter_map(|name| {
                matcher
                    .fuzzy_match(name, query)
                    .or_else(|| matcher.fuzzy_match(query, name))
                    .map(|score| (score, name))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let catalog = TypeCatalog::builtin().unwrap();
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["Student", "Address", "Instructor", "Course", "Enrollment"]);
    }

    #[test]
    fn test_builtin_types_all_describe() {
        let catalog = TypeCatalog::builtin().unwrap();
        let introspector = Introspector::default();
        for name in catalog.names() {
            let document = catalog.describe(name, &introspector).unwrap();
            assert_eq!(document.type_names().collect::<Vec<_>>(), vec![name]);
        }
    }

    #[test]
    fn test_register_rejects_non_record() {
        let mut catalog = TypeCatalog::new();
        assert!(matches!(
            catalog.register::<Vec<String>>(),
            Err(SchemaError::NotARecord { .. })
        ));
        assert!(catalog.is_empty());

        catalog.register::<Student>().unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_unknown_name_suggests() {
        let catalog = TypeCatalog::builtin().unwrap();
        match catalog.get("Stud") {
            Err(SchemaError::UnknownType { name, suggestions }) => {
                assert_eq!(name, "Stud");
                assert_eq!(suggestions.first().map(String::as_str), Some("Student"));
            }
            other => panic!("Expected UnknownType, got {:?}", other),
        }
    }

    #[test]
    fn test_describe_by_name() {
        let catalog = TypeCatalog::builtin().unwrap();
        let document = catalog.describe("Course", &Introspector::default()).unwrap();
        assert!(document.get("Course").is_some());
    }
}
