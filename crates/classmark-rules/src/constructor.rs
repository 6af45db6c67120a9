//! Constructor generation with optional no-args constructor removal

use std::sync::Arc;

use classmark_annotators::{ConstructorRef, Listener};
use classmark_config::GenerationConfig;
use classmark_model::{CodeModel, MethodId, TypeId};
use tracing::{debug, info};

use crate::error::{Result, RuleError};
use crate::prune::ConstructorPruner;
use crate::resolver::ConfigurationResolver;
use crate::rule::{Rule, SchemaNode};

/// Wraps the generator's constructor rule
///
/// After the delegate has produced the constructors of a class, the no-args
/// constructor is removed when the inclusion flag resolves to `false`, and
/// every remaining constructor is announced to the annotator tree.
pub struct ConstructorRule<R> {
    config: Arc<dyn GenerationConfig>,
    annotator: Listener,
    resolver: ConfigurationResolver,
    pruner: ConstructorPruner,
    delegate: R,
}

impl<R> ConstructorRule<R>
where
    R: Rule<TypeId, TypeId>,
{
    /// Fails when inner-class builders are requested without the no-args
    /// constructor they rely on. Only that combination resolves the inclusion
    /// flag eagerly.
    pub fn new(
        config: Arc<dyn GenerationConfig>,
        annotator: Listener,
        include_no_args_constructor: Option<bool>,
        delegate: R,
    ) -> Result<Self> {
        let resolver = ConfigurationResolver::new(include_no_args_constructor);
        if config.is_generate_builders() && config.is_use_inner_class_builders() && !resolver.resolve(config.as_ref())? {
            return Err(RuleError::InvalidConfiguration {
                reason: "inner-class builders require the no-args constructor".to_string(),
            });
        }
        Ok(Self {
            config,
            annotator,
            resolver,
            pruner: ConstructorPruner,
            delegate,
        })
    }

    pub fn resolver(&self) -> &ConfigurationResolver {
        &self.resolver
    }
}

impl<R> Rule<TypeId, TypeId> for ConstructorRule<R>
where
    R: Rule<TypeId, TypeId>,
{
    fn apply(&self, node: SchemaNode<'_>, model: &mut CodeModel, ty: TypeId) -> Result<TypeId> {
        let ty = self.delegate.apply(node, model, ty)?;

        if !self.resolver.resolve(self.config.as_ref())? {
            let removed = self.pruner.prune_no_args_constructor(model, ty)?;
            info!(node = node.node_name, removed = removed.len(), "no-args constructor excluded");
        }

        let constructors: Vec<MethodId> = model.node(ty)?.constructors().map(|ctor| ctor.id).collect();
        debug!(node = node.node_name, count = constructors.len(), "dispatching constructor events");
        for method in constructors {
            self.annotator
                .dispatch_constructor(model, ConstructorRef { owner: ty, method });
        }
        Ok(ty)
    }
}
