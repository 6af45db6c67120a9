//! Inference of the no-args constructor inclusion flag
//!
//! The flag is either given explicitly or read once from the build tool's
//! plugin descriptor. Resolution is cached for the lifetime of the resolver.

use std::sync::OnceLock;

use classmark_config::{ConfigNode, GenerationConfig, PluginDescriptor};
use tracing::debug;

use crate::error::{Result, RuleError};

/// Plugin configuration key holding the inclusion flag
pub const INCLUDE_NO_ARGS_CONSTRUCTOR: &str = "includeNoArgsConstructor";

/// Value used when the plugin configuration does not mention the flag
pub const DEFAULT_INCLUDE_NO_ARGS_CONSTRUCTOR: bool = true;

/// Write-once cache of the inclusion flag
///
/// Concurrent first resolutions may both query the configuration; the first
/// write wins and both compute the same value.
#[derive(Debug, Default)]
pub struct ConfigurationResolver {
    flag: OnceLock<bool>,
}

impl ConfigurationResolver {
    /// Resolver seeded with an explicit value, or unset when `None`
    pub fn new(explicit: Option<bool>) -> Self {
        let flag = OnceLock::new();
        if let Some(value) = explicit {
            let _ = flag.set(value);
        }
        Self { flag }
    }

    /// The cached value, `None` while unresolved
    pub fn cached(&self) -> Option<bool> {
        self.flag.get().copied()
    }

    /// Resolve the flag, consulting `config` only on the first call
    pub fn resolve(&self, config: &dyn GenerationConfig) -> Result<bool> {
        if let Some(value) = self.cached() {
            return Ok(value);
        }
        let inferred = infer(config)?;
        let _ = self.flag.set(inferred);
        Ok(self.cached().unwrap_or(inferred))
    }
}

fn infer(config: &dyn GenerationConfig) -> Result<bool> {
    let Some(context) = config.plugin_context() else {
        return Err(RuleError::configuration_missing(INCLUDE_NO_ARGS_CONSTRUCTOR));
    };

    let descriptor = context.descriptor();
    let executions = descriptor.map_or(0, PluginDescriptor::execution_count);
    if executions > 1 {
        debug!(executions, "plugin bound more than once, inclusion flag is ambiguous");
        return Err(RuleError::configuration_missing(INCLUDE_NO_ARGS_CONSTRUCTOR));
    }

    let value = descriptor
        .and_then(|descriptor| descriptor.configuration.as_ref())
        .and_then(|configuration| configuration.child(INCLUDE_NO_ARGS_CONSTRUCTOR))
        .and_then(ConfigNode::value)
        .map(parse_flag)
        .unwrap_or(DEFAULT_INCLUDE_NO_ARGS_CONSTRUCTOR);
    debug!(executions, value, "inclusion flag inferred from plugin configuration");
    Ok(value)
}

/// `true` in any letter case is true, every other text is false
fn parse_flag(text: &str) -> bool {
    text.eq_ignore_ascii_case("true")
}
