//! Creator hints for deserialization through the widest constructor

use classmark_model::{AnnotationDescriptor, CodeModel, MethodId, ModelError, TypeId, TypeRef};
use tracing::{debug, warn};

use crate::listener::{Annotator, LifecycleAnnotator};
use crate::vocabulary::{CREATOR_MARKER, PROPERTY_MARKER};

/// Mark the constructor with the most parameters as the creator.
///
/// The first constructor wins on ties. Each of its parameters whose
/// same-named field is bound to an external property receives a property
/// marker with the same `value`. Returns the creator, or `None` when the type
/// declares no constructor.
pub fn annotate_creator(model: &mut CodeModel, ty: TypeId) -> Result<Option<MethodId>, ModelError> {
    let node = model.node_mut(ty)?;

    // max_by_key keeps the last maximum, so scan from the back
    let widest = node.constructors().rev().max_by_key(|ctor| ctor.params.len());
    let Some(creator) = widest.map(|ctor| ctor.id) else {
        return Ok(None);
    };

    let hints: Vec<(usize, String)> = match node.method(creator) {
        Some(ctor) => ctor
            .params
            .iter()
            .enumerate()
            .filter_map(|(index, param)| {
                let value = node.field(&param.name)?.annotations.get(PROPERTY_MARKER)?.value()?;
                Some((index, value.to_string()))
            })
            .collect(),
        None => Vec::new(),
    };

    if let Some(ctor) = node.method_mut(creator) {
        ctor.annotations.insert(AnnotationDescriptor::new(CREATOR_MARKER));
        for (index, value) in hints {
            if let Some(param) = ctor.params.get_mut(index) {
                param
                    .annotations
                    .insert(AnnotationDescriptor::new(PROPERTY_MARKER).with_value(value));
            }
        }
    }
    debug!(ty = %node.name, ?creator, "creator marked");
    Ok(Some(creator))
}

/// Adds creator hints when a type is finished
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatorAnnotator;

impl Annotator for CreatorAnnotator {
    fn name(&self) -> &str {
        "creator"
    }
}

impl LifecycleAnnotator for CreatorAnnotator {
    fn on_type(&self, model: &mut CodeModel, ty: &TypeRef) {
        let Some(id) = ty.defined() else {
            return;
        };
        if let Err(err) = annotate_creator(model, id) {
            warn!(code = err.code(), %err, "creator hints skipped");
        }
    }
}
