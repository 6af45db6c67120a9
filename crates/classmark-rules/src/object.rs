//! Object and enum rules announcing finished types

use classmark_annotators::Listener;
use classmark_model::{CodeModel, TypeRef};
use tracing::debug;

use crate::error::Result;
use crate::rule::{Rule, SchemaNode};

/// Wraps the generator's object rule and fires the type event on its output
pub struct ObjectRule<R> {
    annotator: Listener,
    delegate: R,
}

impl<R> ObjectRule<R> {
    pub fn new(annotator: Listener, delegate: R) -> Self {
        Self { annotator, delegate }
    }
}

impl<I, R> Rule<I, TypeRef> for ObjectRule<R>
where
    R: Rule<I, TypeRef>,
{
    fn apply(&self, node: SchemaNode<'_>, model: &mut CodeModel, input: I) -> Result<TypeRef> {
        let ty = self.delegate.apply(node, model, input)?;
        debug!(node = node.node_name, ?ty, "object generated");
        self.annotator.dispatch_type(model, &ty);
        Ok(ty)
    }
}

/// Wraps the generator's enum rule and fires the type event on its output
pub struct EnumRule<R> {
    annotator: Listener,
    delegate: R,
}

impl<R> EnumRule<R> {
    pub fn new(annotator: Listener, delegate: R) -> Self {
        Self { annotator, delegate }
    }
}

impl<I, R> Rule<I, TypeRef> for EnumRule<R>
where
    R: Rule<I, TypeRef>,
{
    fn apply(&self, node: SchemaNode<'_>, model: &mut CodeModel, input: I) -> Result<TypeRef> {
        let ty = self.delegate.apply(node, model, input)?;
        debug!(node = node.node_name, ?ty, "enum generated");
        self.annotator.dispatch_type(model, &ty);
        Ok(ty)
    }
}
