//! Annotation descriptors and the per-element annotation set

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the only annotation argument the engine reads
pub const VALUE_ARGUMENT: &str = "value";

/// A single annotation usage on an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationDescriptor {
    /// Globally unique marker name, e.g. `javax.annotation.Nullable`
    pub name: String,

    /// Key/value arguments in their textual form
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<String, String>,
}

impl AnnotationDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.with_argument(VALUE_ARGUMENT, value)
    }

    /// The `value` argument, if present
    pub fn value(&self) -> Option<&str> {
        self.arguments.get(VALUE_ARGUMENT).map(String::as_str)
    }
}

/// The annotations attached to one element
///
/// Descriptor names are unique within a set: inserting a descriptor whose name
/// is already present leaves the set unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationSet {
    descriptors: Vec<AnnotationDescriptor>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor unless one with the same name is already present.
    ///
    /// Returns whether the set changed.
    pub fn insert(&mut self, descriptor: AnnotationDescriptor) -> bool {
        if self.contains(&descriptor.name) {
            return false;
        }
        self.descriptors.push(descriptor);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.iter().any(|d| d.name == name)
    }

    /// Whether any of the given names is present
    pub fn contains_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|name| self.contains(name.as_ref()))
    }

    pub fn get(&self, name: &str) -> Option<&AnnotationDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationDescriptor> {
        self.descriptors.iter()
    }

    /// Descriptor names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl FromIterator<AnnotationDescriptor> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = AnnotationDescriptor>>(iter: I) -> Self {
        let mut set = AnnotationSet::new();
        for descriptor in iter {
            set.insert(descriptor);
        }
        set
    }
}
