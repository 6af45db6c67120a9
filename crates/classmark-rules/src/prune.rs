//! Removal of generated no-args constructors

use classmark_model::{CodeModel, MethodId, TypeId};
use tracing::{debug, warn};

use crate::error::Result;

/// Removes zero-parameter constructors from a type
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructorPruner;

impl ConstructorPruner {
    /// Remove every zero-parameter constructor of `ty`.
    ///
    /// Other constructors keep their ids and content. Returns the ids removed,
    /// empty when the type had no such constructor.
    pub fn prune_no_args_constructor(&self, model: &mut CodeModel, ty: TypeId) -> Result<Vec<MethodId>> {
        let node = model.node_mut(ty)?;
        let targets: Vec<MethodId> = node
            .constructors()
            .filter(|ctor| ctor.is_no_args_constructor())
            .map(|ctor| ctor.id)
            .collect();

        for id in &targets {
            let removal = node.remove_method(*id)?;
            if !removal.indexed {
                warn!(ty = %node.name, method = ?id, "constructor missing from lookup index, skipped");
            }
        }
        if !targets.is_empty() {
            debug!(ty = %node.name, removed = targets.len(), "no-args constructor pruned");
        }
        Ok(targets)
    }
}
