//! The code model arena

use serde::{Deserialize, Serialize};

use crate::{ModelError, TypeNode, TypeRef};

/// Index of a type in the model arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TypeId(pub u32);

/// All types produced by one generation run
///
/// Types are owned by the arena and refer to each other by `TypeId`. Nesting
/// forms a tree: every type has at most one parent and no cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelData")]
pub struct CodeModel {
    types: Vec<TypeNode>,
}

impl CodeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level type
    pub fn add_type(&mut self, mut node: TypeNode) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        node.id = id;
        node.parent = None;
        self.types.push(node);
        id
    }

    /// Add a type nested inside `parent`
    pub fn add_nested(&mut self, parent: TypeId, mut node: TypeNode) -> Result<TypeId, ModelError> {
        if self.get(parent).is_none() {
            return Err(ModelError::UnknownType(parent));
        }
        let id = TypeId(self.types.len() as u32);
        node.id = id;
        node.parent = Some(parent);
        self.types.push(node);
        self.types[parent.0 as usize].nested.push(id);
        Ok(id)
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.types.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut TypeNode> {
        self.types.get_mut(id.0 as usize)
    }

    /// Like `get`, failing with `ModelError::UnknownType`
    pub fn node(&self, id: TypeId) -> Result<&TypeNode, ModelError> {
        self.get(id).ok_or(ModelError::UnknownType(id))
    }

    /// Like `get_mut`, failing with `ModelError::UnknownType`
    pub fn node_mut(&mut self, id: TypeId) -> Result<&mut TypeNode, ModelError> {
        self.get_mut(id).ok_or(ModelError::UnknownType(id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<TypeId> {
        self.types.iter().find(|t| t.name == name).map(|t| t.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The type followed by all of its nested types, depth-first
    pub fn structure(&self, root: TypeId) -> Vec<TypeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.nested.iter().rev().copied());
        }
        out
    }

    /// Whether `ty` refers to a generated type declared inside another type
    pub fn is_nested_type(&self, ty: &TypeRef) -> bool {
        ty.defined()
            .and_then(|id| self.get(id))
            .is_some_and(TypeNode::is_nested)
    }
}

/// Serialized form of the model: ids and nesting are derived from positions and parents
#[derive(Deserialize)]
struct ModelData {
    #[serde(default)]
    types: Vec<TypeNode>,
}

impl TryFrom<ModelData> for CodeModel {
    type Error = ModelError;

    fn try_from(data: ModelData) -> Result<Self, Self::Error> {
        let mut types = data.types;
        for (index, node) in types.iter_mut().enumerate() {
            node.id = TypeId(index as u32);
            node.nested.clear();
        }

        for node in &types {
            let Some(parent) = node.parent else {
                continue;
            };
            if parent.0 as usize >= types.len() {
                return Err(ModelError::UnknownParent {
                    ty: node.name.clone(),
                    parent,
                });
            }
            // A chain longer than the arena must revisit some type
            let mut current = Some(parent);
            for _ in 0..types.len() {
                match current {
                    Some(id) if id == node.id => {
                        return Err(ModelError::NestingCycle { ty: node.name.clone() });
                    }
                    Some(id) => current = types.get(id.0 as usize).and_then(|t| t.parent),
                    None => break,
                }
            }
            if current.is_some() {
                return Err(ModelError::NestingCycle { ty: node.name.clone() });
            }
        }

        let parents: Vec<(usize, TypeId)> = types
            .iter()
            .filter_map(|t| t.parent.map(|p| (p.0 as usize, t.id)))
            .collect();
        for (parent, child) in parents {
            types[parent].nested.push(child);
        }
        Ok(CodeModel { types })
    }
}
