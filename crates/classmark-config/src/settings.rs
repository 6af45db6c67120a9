//! Plain generation settings loaded from JSON

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{GenerationConfig, PluginContext, Result};

/// A `GenerationConfig` backed by plain values
///
/// Keys are camelCase and every key is optional:
///
/// ```json
/// {
///   "generateBuilders": true,
///   "useInnerClassBuilders": false,
///   "includeJsr305Annotations": true,
///   "pluginContext": { "pluginDescriptor": { "executions": [] } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub generate_builders: bool,
    pub use_inner_class_builders: bool,
    pub include_jsr303_annotations: bool,
    pub include_jsr305_annotations: bool,
    pub use_jakarta_validation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_annotator: Option<String>,
    /// Absent when the host offers no build-tool introspection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_context: Option<PluginContext>,
}

impl GenerationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn with_plugin_context(mut self, context: PluginContext) -> Self {
        self.plugin_context = Some(context);
        self
    }
}

impl GenerationConfig for GenerationSettings {
    fn is_generate_builders(&self) -> bool {
        self.generate_builders
    }

    fn is_use_inner_class_builders(&self) -> bool {
        self.use_inner_class_builders
    }

    fn is_include_jsr303_annotations(&self) -> bool {
        self.include_jsr303_annotations
    }

    fn is_include_jsr305_annotations(&self) -> bool {
        self.include_jsr305_annotations
    }

    fn is_use_jakarta_validation(&self) -> bool {
        self.use_jakarta_validation
    }

    fn custom_annotator(&self) -> Option<&str> {
        self.custom_annotator.as_deref()
    }

    fn plugin_context(&self) -> Option<&PluginContext> {
        self.plugin_context.as_ref()
    }
}
