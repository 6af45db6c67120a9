//! Checker-compatible nullability (deprecated mode)
//!
//! Fields already marked with the checker's `Nullable` pass it on to every
//! same-named parameter of the type and its nested types. Creator hints and
//! marker families are not involved.

use std::collections::HashSet;

use classmark_model::{CodeModel, ModelError, TypeId, TypeRef};
use tracing::{debug, warn};

use crate::listener::{Annotator, LifecycleAnnotator};
use crate::propagate::{MemberAnnotationPropagator, PlacementRules};
use crate::vocabulary::{checker_nullable, CHECKER_NULLABLE};

#[derive(Debug, Clone)]
pub struct CheckerableAnnotator {
    propagator: MemberAnnotationPropagator,
}

impl Default for CheckerableAnnotator {
    fn default() -> Self {
        Self {
            propagator: MemberAnnotationPropagator::new(PlacementRules::unrestricted()),
        }
    }
}

impl CheckerableAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotate(&self, model: &mut CodeModel, ty: TypeId) -> Result<usize, ModelError> {
        let nullable: HashSet<String> = model
            .node(ty)?
            .fields()
            .iter()
            .filter(|field| field.annotations.contains(CHECKER_NULLABLE))
            .map(|field| field.name.clone())
            .collect();

        let markers = checker_nullable();
        let added = self.propagator.annotate_parameters(model, ty, &nullable, &markers)?;
        Ok(added + self.propagator.annotate_equals_parameter(model, ty, &markers)?)
    }
}

impl Annotator for CheckerableAnnotator {
    fn name(&self) -> &str {
        "checkerable"
    }

    fn is_checker_compatible(&self) -> bool {
        true
    }
}

impl LifecycleAnnotator for CheckerableAnnotator {
    fn on_type(&self, model: &mut CodeModel, ty: &TypeRef) {
        let Some(id) = ty.defined() else {
            return;
        };
        match self.annotate(model, id) {
            Ok(added) => debug!(ty = ?id, added, "checker markers applied"),
            Err(err) => warn!(code = err.code(), %err, "checker markers skipped"),
        }
    }
}
