//! Type metadata
//!
//! Record types describe their structure through the [`Reflect`] trait. The
//! resulting [`TypeDescriptor`] is the only thing the introspector looks at,
//! so any mechanism that can produce descriptors (hand-written impls,
//! generated code) plugs in here.
//!
//! Field and element types are held as `fn() -> TypeDescriptor` thunks and
//! only expanded when the introspector walks into them. A self-referential
//! type therefore has a finite descriptor.
//!
//! ```
//! use struct_schema::{Reflect, RecordDescriptor, TypeDescriptor};
//!
//! struct Student {
//!     name: String,
//!     age: isize,
//!     classes: Vec<String>,
//! }
//!
//! impl Reflect for Student {
//!     fn descriptor() -> TypeDescriptor {
//!         RecordDescriptor::of::<Self>("Student")
//!             .field::<String>("Name")
//!             .field::<isize>("Age")
//!             .field::<Vec<String>>("Classes")
//!             .into()
//!     }
//! }
//! ```

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Lazily evaluated descriptor of a field, element, key, or value type
pub type DescriptorFn = fn() -> TypeDescriptor;

/// Types that can describe their own structure
pub trait Reflect {
    /// Describe this type
    fn descriptor() -> TypeDescriptor;
}

/// Shape classification of a type
#[derive(Debug, Clone)]
pub enum Shape {
    /// Anything without inner structure worth describing
    Scalar,
    /// Keyed collection
    Mapping { key: DescriptorFn, value: DescriptorFn },
    /// Ordered or unordered collection of one element type
    Sequence { element: DescriptorFn },
    /// Struct-like type with named fields
    Record(RecordDescriptor),
}

/// Coarse shape kind, without the nested descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Scalar,
    Mapping,
    Sequence,
    Record,
}

/// Description of a single type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Display name, used as the `type` string of fields of this type
    pub name: String,
    /// Structure of the type
    pub shape: Shape,
}

impl TypeDescriptor {
    /// A type with no inner structure
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Scalar,
        }
    }

    /// A sequence of `element`, displayed as `name`
    pub fn sequence(name: impl Into<String>, element: DescriptorFn) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Sequence { element },
        }
    }

    /// A mapping from `key` to `value`, displayed as `name`
    pub fn mapping(name: impl Into<String>, key: DescriptorFn, value: DescriptorFn) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Mapping { key, value },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self.shape {
            Shape::Scalar => ShapeKind::Scalar,
            Shape::Mapping { .. } => ShapeKind::Mapping,
            Shape::Sequence { .. } => ShapeKind::Sequence,
            Shape::Record(_) => ShapeKind::Record,
        }
    }

    /// The record descriptor, if this type is a record
    pub fn as_record(&self) -> Option<&RecordDescriptor> {
        match &self.shape {
            Shape::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// A named field of a record
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name as declared
    pub name: String,
    /// Descriptor of the field's type
    pub ty: DescriptorFn,
    /// Serialization alias, emitted as `json_tag`
    pub tag: Option<String>,
}

/// Builder and descriptor for record types
#[derive(Debug, Clone)]
pub struct RecordDescriptor {
    id: TypeId,
    name: String,
    package: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Start describing the record type `T`, displayed as `name`.
    ///
    /// `T` is the record's identity. Two records with the same display name
    /// are still distinct types.
    pub fn of<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: name.into(),
            package: None,
            fields: Vec::new(),
        }
    }

    /// Identity of the described type
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Qualify the record's display name with a package, e.g. `school.Address`
    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Declare a field of type `F`
    pub fn field<F: Reflect + ?Sized>(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            ty: F::descriptor,
            tag: None,
        });
        self
    }

    /// Declare a field of type `F` with a serialization alias
    pub fn tagged_field<F: Reflect + ?Sized>(
        mut self,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            ty: F::descriptor,
            tag: Some(tag.into()),
        });
        self
    }

    /// Bare record name, used as the document key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name, package-qualified when a package was declared
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{}.{}", package, self.name),
            None => self.name.clone(),
        }
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

impl From<RecordDescriptor> for TypeDescriptor {
    fn from(record: RecordDescriptor) -> Self {
        Self {
            name: record.qualified_name(),
            shape: Shape::Record(record),
        }
    }
}

// =============================================================================
// Built-in impls
// =============================================================================

macro_rules! impl_scalar {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::scalar($name)
                }
            }
        )*
    };
}

impl_scalar! {
    bool => "bool",
    char => "rune",
    String => "string",
    str => "string",
    i8 => "int8",
    i16 => "int16",
    i32 => "int32",
    i64 => "int64",
    isize => "int",
    u8 => "uint8",
    u16 => "uint16",
    u32 => "uint32",
    u64 => "uint64",
    usize => "uint",
    f32 => "float32",
    f64 => "float64",
    () => "unit",
}

impl Reflect for Cow<'_, str> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar("string")
    }
}

fn slice_of<T: Reflect + ?Sized>() -> TypeDescriptor {
    TypeDescriptor::sequence(format!("[]{}", T::descriptor().name), T::descriptor)
}

impl<T: Reflect> Reflect for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        slice_of::<T>()
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    fn descriptor() -> TypeDescriptor {
        slice_of::<T>()
    }
}

impl<T: Reflect> Reflect for [T] {
    fn descriptor() -> TypeDescriptor {
        slice_of::<T>()
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        slice_of::<T>()
    }
}

impl<T: Reflect, S> Reflect for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        slice_of::<T>()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence(format!("[{}]{}", N, T::descriptor().name), T::descriptor)
    }
}

fn map_of<K: Reflect, V: Reflect>() -> TypeDescriptor {
    TypeDescriptor::mapping(
        format!("map[{}]{}", K::descriptor().name, V::descriptor().name),
        K::descriptor,
        V::descriptor,
    )
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn descriptor() -> TypeDescriptor {
        map_of::<K, V>()
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        map_of::<K, V>()
    }
}

// Optional values are described by name only.
impl<T: Reflect> Reflect for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::scalar(format!("*{}", T::descriptor().name))
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}
