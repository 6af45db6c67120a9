//! Type references used by fields, parameters and return types

use serde::{Deserialize, Serialize};

use crate::TypeId;

/// A reference to the declared type of a member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// No value (constructors, void methods)
    #[default]
    Void,

    /// The generic object supertype
    Object,

    /// A type outside the generated model: `String`, `int`, `java.util.List<Foo>`
    Named(String),

    /// A type generated in the same model
    Defined(TypeId),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, TypeRef::Object)
    }

    /// The generated type this reference points at, if any
    pub fn defined(&self) -> Option<TypeId> {
        match self {
            TypeRef::Defined(id) => Some(*id),
            _ => None,
        }
    }
}

/// Kind of a generated type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Enum,
}
