//! Checker-compatible handling of optional properties (deprecated mode)

use classmark_annotators::vocabulary::CHECKER_NULLABLE;
use classmark_model::{AnnotationDescriptor, CodeModel};
use tracing::debug;

use crate::error::Result;
use crate::rule::{Member, Rule, SchemaNode};

/// Marks members of properties missing from the schema's `required` array as
/// `Nullable`
///
/// Fields are always marked; methods only when they return a value.
pub struct NotRequiredRule<R> {
    delegate: R,
}

impl<R> NotRequiredRule<R> {
    pub fn new(delegate: R) -> Self {
        Self { delegate }
    }
}

impl<R> Rule<Member, Member> for NotRequiredRule<R>
where
    R: Rule<Member, Member>,
{
    fn apply(&self, node: SchemaNode<'_>, model: &mut CodeModel, member: Member) -> Result<Member> {
        let member = self.delegate.apply(node, model, member)?;
        if node.is_required() {
            return Ok(member);
        }

        let marker = AnnotationDescriptor::new(CHECKER_NULLABLE);
        let marked = match &member {
            Member::Field { owner, name } => model
                .node_mut(*owner)?
                .field_mut(name)
                .is_some_and(|field| field.annotations.insert(marker)),
            Member::Method { owner, method } => model
                .node_mut(*owner)?
                .method_mut(*method)
                .filter(|method| !method.return_type.is_void())
                .is_some_and(|method| method.annotations.insert(marker)),
        };
        debug!(node = node.node_name, marked, "optional property");
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classmark_model::{FieldNode, MethodNode, ParamNode, TypeId, TypeNode, TypeRef};
    use serde_json::{json, Value};

    fn passthrough(_: SchemaNode<'_>, _: &mut CodeModel, member: Member) -> Result<Member> {
        Ok(member)
    }

    fn person() -> (CodeModel, TypeId) {
        let mut ty = TypeNode::class("Person");
        ty.add_field(FieldNode::new("id", TypeRef::named("String"))).unwrap();
        ty.add_field(FieldNode::new("nickname", TypeRef::named("String"))).unwrap();
        let mut model = CodeModel::new();
        let id = model.add_type(ty);
        (model, id)
    }

    fn field(owner: TypeId, name: &str) -> Member {
        Member::Field {
            owner,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_optional_field_is_nullable() {
        let (mut model, person) = person();
        let schema = json!({ "required": ["id"] });
        let rule = NotRequiredRule::new(passthrough);

        rule.apply(SchemaNode::new("nickname", &Value::Null, &schema), &mut model, field(person, "nickname"))
            .unwrap();
        rule.apply(SchemaNode::new("id", &Value::Null, &schema), &mut model, field(person, "id"))
            .unwrap();

        let node = model.get(person).unwrap();
        assert!(node.field("nickname").unwrap().annotations.contains(CHECKER_NULLABLE));
        assert!(node.field("id").unwrap().annotations.is_empty());
    }

    #[test]
    fn test_only_value_returning_methods_are_marked() {
        let (mut model, person) = person();
        let (getter, setter) = {
            let node = model.get_mut(person).unwrap();
            let getter = node.add_method(MethodNode::method("getNickname", TypeRef::named("String"), vec![]));
            let setter = node.add_method(MethodNode::method(
                "setNickname",
                TypeRef::Void,
                vec![ParamNode::new("nickname", TypeRef::named("String"))],
            ));
            (getter, setter)
        };
        let schema = json!({});
        let rule = NotRequiredRule::new(passthrough);

        for method in [getter, setter] {
            rule.apply(
                SchemaNode::new("nickname", &Value::Null, &schema),
                &mut model,
                Member::Method { owner: person, method },
            )
            .unwrap();
        }

        let node = model.get(person).unwrap();
        assert!(node.method(getter).unwrap().annotations.contains(CHECKER_NULLABLE));
        assert!(node.method(setter).unwrap().annotations.is_empty());
    }

    #[test]
    fn test_marker_is_not_duplicated() {
        let (mut model, person) = person();
        let schema = json!({});
        let rule = NotRequiredRule::new(passthrough);

        for _ in 0..2 {
            rule.apply(SchemaNode::new("nickname", &Value::Null, &schema), &mut model, field(person, "nickname"))
                .unwrap();
        }
        assert_eq!(model.get(person).unwrap().field("nickname").unwrap().annotations.len(), 1);
    }
}
