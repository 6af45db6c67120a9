//! The generation rule abstraction
//!
//! A rule turns one schema node into part of the code model. The wrappers in
//! this crate take the generator's own rule as a delegate, run it, then
//! post-process its output.

use classmark_model::{CodeModel, MethodId, TypeId};
use serde_json::Value;

use crate::error::Result;

/// The schema node a rule is applied to
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode<'a> {
    /// Property or definition name of the node
    pub node_name: &'a str,
    pub node: &'a Value,
    /// Content of the schema the node was read from
    pub schema: &'a Value,
}

impl<'a> SchemaNode<'a> {
    pub fn new(node_name: &'a str, node: &'a Value, schema: &'a Value) -> Self {
        Self { node_name, node, schema }
    }

    /// Names listed in the schema's `required` array
    pub fn required(&self) -> impl Iterator<Item = &'a str> {
        self.schema
            .get("required")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    pub fn is_required(&self) -> bool {
        self.required().any(|name| name == self.node_name)
    }
}

/// A generated element a property maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field { owner: TypeId, name: String },
    Method { owner: TypeId, method: MethodId },
}

/// A generation step of the class generator
pub trait Rule<I, O>: Send + Sync {
    fn apply(&self, node: SchemaNode<'_>, model: &mut CodeModel, input: I) -> Result<O>;
}

impl<I, O, F> Rule<I, O> for F
where
    F: Fn(SchemaNode<'_>, &mut CodeModel, I) -> Result<O> + Send + Sync,
{
    fn apply(&self, node: SchemaNode<'_>, model: &mut CodeModel, input: I) -> Result<O> {
        self(node, model, input)
    }
}

impl<I, O> Rule<I, O> for Box<dyn Rule<I, O>> {
    fn apply(&self, node: SchemaNode<'_>, model: &mut CodeModel, input: I) -> Result<O> {
        (**self).apply(node, model, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_names() {
        let schema = json!({ "type": "object", "required": ["id", 3, "name"] });
        let node = json!({ "type": "string" });

        let id = SchemaNode::new("id", &node, &schema);
        assert_eq!(id.required().collect::<Vec<_>>(), vec!["id", "name"]);
        assert!(id.is_required());
        assert!(!SchemaNode::new("email", &node, &schema).is_required());
    }

    #[test]
    fn test_no_required_array() {
        let schema = json!({ "type": "object" });
        let node = SchemaNode::new("id", &schema, &schema);
        assert_eq!(node.required().count(), 0);
        assert!(!node.is_required());
    }

    #[test]
    fn test_closures_are_rules() {
        let schema = json!({});
        let rule = |node: SchemaNode<'_>, _: &mut CodeModel, input: u32| -> Result<String> {
            Ok(format!("{}:{input}", node.node_name))
        };
        let boxed: Box<dyn Rule<u32, String>> = Box::new(rule);

        let mut model = CodeModel::new();
        let out = boxed.apply(SchemaNode::new("Person", &schema, &schema), &mut model, 7).unwrap();
        assert_eq!(out, "Person:7");
    }
}
