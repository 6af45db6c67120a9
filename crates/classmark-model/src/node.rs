//! Member nodes of a generated type

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{AnnotationDescriptor, AnnotationSet, ModelError, TypeId, TypeKind, TypeRef};

/// Name prefix that marks a zero-parameter method as a getter
pub const GETTER_PREFIX: &str = "get";

/// Identifier of a method or constructor, unique within its owning type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct MethodId(pub u32);

/// A field declared on a generated type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub annotations: AnnotationSet,
}

impl FieldNode {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: AnnotationSet::new(),
        }
    }

    pub fn with_annotation(mut self, descriptor: AnnotationDescriptor) -> Self {
        self.annotations.insert(descriptor);
        self
    }
}

/// A parameter of a method or constructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamNode {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub annotations: AnnotationSet,
}

impl ParamNode {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: AnnotationSet::new(),
        }
    }
}

/// Role of a method, inferred from its shape and name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Getter,
    Other,
}

/// A method or constructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodNode {
    /// Assigned by the owning type on insertion
    #[serde(default)]
    pub id: MethodId,

    /// Empty for constructors
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub params: Vec<ParamNode>,

    #[serde(default)]
    pub return_type: TypeRef,

    #[serde(default)]
    pub is_constructor: bool,

    #[serde(default)]
    pub annotations: AnnotationSet,
}

impl MethodNode {
    pub fn constructor(params: Vec<ParamNode>) -> Self {
        Self {
            id: MethodId::default(),
            name: String::new(),
            params,
            return_type: TypeRef::Void,
            is_constructor: true,
            annotations: AnnotationSet::new(),
        }
    }

    pub fn method(name: impl Into<String>, return_type: TypeRef, params: Vec<ParamNode>) -> Self {
        Self {
            id: MethodId::default(),
            name: name.into(),
            params,
            return_type,
            is_constructor: false,
            annotations: AnnotationSet::new(),
        }
    }

    /// Getters are zero-parameter methods named `get...`
    pub fn kind(&self) -> MethodKind {
        if self.is_constructor {
            MethodKind::Constructor
        } else if self.params.is_empty() && self.name.starts_with(GETTER_PREFIX) {
            MethodKind::Getter
        } else {
            MethodKind::Other
        }
    }

    pub fn is_no_args_constructor(&self) -> bool {
        self.is_constructor && self.params.is_empty()
    }

    /// Whether the parameter types match `types` exactly, in order
    pub fn has_signature(&self, types: &[TypeRef]) -> bool {
        self.params.len() == types.len()
            && self.params.iter().zip(types).all(|(param, ty)| &param.ty == ty)
    }

    pub fn param(&self, name: &str) -> Option<&ParamNode> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Outcome of removing a method from a type
#[derive(Debug, Clone)]
pub struct Removal {
    pub method: MethodNode,
    /// Whether the method was also found in the lookup index
    pub indexed: bool,
}

/// A generated class or enum
///
/// `methods` is the canonical ownership list for methods and constructors;
/// `by_name` is a lookup index derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TypeNodeData", into = "TypeNodeData")]
pub struct TypeNode {
    pub id: TypeId,
    pub name: String,
    pub kind: TypeKind,
    pub parent: Option<TypeId>,
    pub nested: Vec<TypeId>,
    pub annotations: AnnotationSet,
    fields: Vec<FieldNode>,
    methods: Vec<MethodNode>,
    by_name: HashMap<String, Vec<MethodId>>,
    next_method_id: u32,
}

impl TypeNode {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            id: TypeId::default(),
            name: name.into(),
            kind,
            parent: None,
            nested: Vec::new(),
            annotations: AnnotationSet::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            by_name: HashMap::new(),
            next_method_id: 0,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn is_nested(&self) -> bool {
        self.parent.is_some()
    }

    // ========== Fields ==========

    pub fn add_field(&mut self, field: FieldNode) -> Result<(), ModelError> {
        if self.field(&field.name).is_some() {
            return Err(ModelError::DuplicateField {
                owner: self.name.clone(),
                field: field.name,
            });
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn fields(&self) -> &[FieldNode] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut FieldNode> {
        self.fields.iter_mut()
    }

    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldNode> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    // ========== Methods and constructors ==========

    /// Add a method or constructor, assigning it a fresh id
    pub fn add_method(&mut self, mut method: MethodNode) -> MethodId {
        let id = MethodId(self.next_method_id);
        self.next_method_id += 1;
        method.id = id;
        self.by_name.entry(method.name.clone()).or_default().push(id);
        self.methods.push(method);
        id
    }

    /// All members in declaration order, constructors included
    pub fn members(&self) -> &[MethodNode] {
        &self.methods
    }

    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut MethodNode> {
        self.methods.iter_mut()
    }

    pub fn methods(&self) -> impl DoubleEndedIterator<Item = &MethodNode> {
        self.methods.iter().filter(|m| !m.is_constructor)
    }

    pub fn constructors(&self) -> impl DoubleEndedIterator<Item = &MethodNode> {
        self.methods.iter().filter(|m| m.is_constructor)
    }

    pub fn method(&self, id: MethodId) -> Option<&MethodNode> {
        self.methods.iter().find(|m| m.id == id)
    }

    pub fn method_mut(&mut self, id: MethodId) -> Option<&mut MethodNode> {
        self.methods.iter_mut().find(|m| m.id == id)
    }

    /// Ordinary methods with the given name, looked up through the index
    pub fn methods_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a MethodNode> + 'a {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.method(*id))
            .filter(|m| !m.is_constructor)
    }

    /// Find an ordinary method by name and exact parameter types
    pub fn find_method(&self, name: &str, param_types: &[TypeRef]) -> Option<MethodId> {
        self.methods_named(name)
            .find(|m| m.has_signature(param_types))
            .map(|m| m.id)
    }

    /// Remove a member from the canonical list and the lookup index.
    ///
    /// Fails when the canonical list does not hold the member. A member absent
    /// from the lookup index is still removed; `Removal::indexed` reports it.
    pub fn remove_method(&mut self, id: MethodId) -> Result<Removal, ModelError> {
        let position = self
            .methods
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ModelError::MissingMember {
                owner: self.name.clone(),
                method: id,
            })?;
        let method = self.methods.remove(position);

        let mut indexed = false;
        if let Some(ids) = self.by_name.get_mut(&method.name) {
            let before = ids.len();
            ids.retain(|other| *other != id);
            indexed = ids.len() != before;
            if ids.is_empty() {
                self.by_name.remove(&method.name);
            }
        }

        Ok(Removal { method, indexed })
    }

    /// Number of ids held by the lookup index
    pub fn indexed_len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }
}

/// Serialized form of a type: the lookup index is rebuilt on load and field
/// names are checked for uniqueness
#[derive(Serialize, Deserialize)]
struct TypeNodeData {
    #[serde(default)]
    id: TypeId,
    name: String,
    #[serde(default)]
    kind: TypeKind,
    #[serde(default)]
    parent: Option<TypeId>,
    #[serde(default)]
    nested: Vec<TypeId>,
    #[serde(default)]
    annotations: AnnotationSet,
    #[serde(default)]
    fields: Vec<FieldNode>,
    #[serde(default)]
    methods: Vec<MethodNode>,
}

impl TryFrom<TypeNodeData> for TypeNode {
    type Error = ModelError;

    fn try_from(data: TypeNodeData) -> Result<Self, Self::Error> {
        let mut node = TypeNode::new(data.name, data.kind);
        node.id = data.id;
        node.parent = data.parent;
        node.nested = data.nested;
        node.annotations = data.annotations;
        for field in data.fields {
            node.add_field(field)?;
        }
        for method in data.methods {
            node.add_method(method);
        }
        Ok(node)
    }
}

impl From<TypeNode> for TypeNodeData {
    fn from(node: TypeNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            kind: node.kind,
            parent: node.parent,
            nested: node.nested,
            annotations: node.annotations,
            fields: node.fields,
            methods: node.methods,
        }
    }
}
