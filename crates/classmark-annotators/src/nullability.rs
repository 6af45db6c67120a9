//! Nullability markers derived from property fields
//!
//! When a class is finished, its property fields are split into nullable and
//! non-nullable buckets, and each bucket's marker family is spread to the
//! matching constructor and setter parameters and getters. The `equals`
//! parameter is always nullable.

use classmark_config::GenerationConfig;
use classmark_model::{CodeModel, ModelError, TypeId, TypeRef};
use tracing::{debug, warn};

use crate::classify::{NullabilityBucket, NullabilityClassifier};
use crate::creator::annotate_creator;
use crate::listener::{Annotator, LifecycleAnnotator};
use crate::propagate::{MemberAnnotationPropagator, ParamMatching, PlacementRules};
use crate::vocabulary::{checker_nullable, MarkerFamilies, NON_NULLABLE_MARKERS, PROPERTY_MARKER};

/// Lifecycle annotator adding creator hints and nullability markers
#[derive(Debug, Clone)]
pub struct NullabilityAnnotator {
    families: MarkerFamilies,
    classifier: NullabilityClassifier,
    propagator: MemberAnnotationPropagator,
}

impl NullabilityAnnotator {
    /// Marker families are fixed from the switches at construction
    pub fn new(config: &dyn GenerationConfig) -> Self {
        Self {
            families: MarkerFamilies::resolve(config),
            classifier: NullabilityClassifier::new(NON_NULLABLE_MARKERS),
            propagator: MemberAnnotationPropagator::default(),
        }
    }

    pub fn with_placement_rules(mut self, rules: PlacementRules) -> Self {
        self.propagator = MemberAnnotationPropagator::new(rules);
        self
    }

    pub fn families(&self) -> &MarkerFamilies {
        &self.families
    }

    /// Annotate one finished type. Returns the number of descriptors added
    /// by nullability propagation.
    pub fn annotate(&self, model: &mut CodeModel, ty: TypeId) -> Result<usize, ModelError> {
        annotate_creator(model, ty)?;

        let classification = self
            .classifier
            .classify(model.node(ty)?, |field| field.annotations.contains(PROPERTY_MARKER));

        let mut added = 0;
        for bucket in NullabilityBucket::ALL {
            let markers = match bucket {
                NullabilityBucket::Nullable => &self.families.nullable,
                NullabilityBucket::NonNullable => &self.families.non_nullable,
            };
            added += self.propagator.propagate(
                model,
                ty,
                classification.fields(bucket),
                markers,
                ParamMatching::PropertyName,
            )?;
        }
        added += self
            .propagator
            .annotate_equals_parameter(model, ty, &checker_nullable())?;
        Ok(added)
    }
}

impl Annotator for NullabilityAnnotator {
    fn name(&self) -> &str {
        "nullability"
    }
}

impl LifecycleAnnotator for NullabilityAnnotator {
    fn on_type(&self, model: &mut CodeModel, ty: &TypeRef) {
        let Some(id) = ty.defined() else {
            debug!(?ty, "not a generated type");
            return;
        };
        match self.annotate(model, id) {
            Ok(added) => debug!(ty = ?id, added, "nullability markers applied"),
            Err(err) => warn!(code = err.code(), %err, "nullability markers skipped"),
        }
    }
}
