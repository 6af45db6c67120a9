//! classmark config - Generation configuration query surface
//!
//! The engine never loads build-tool configuration itself. It queries a
//! `GenerationConfig` for a handful of switches and, optionally, for the
//! plugin context of the hosting build tool.

mod error;
mod plugin;
mod settings;

pub use error::{ConfigError, Result};
pub use plugin::{ConfigNode, ContextValue, PluginContext, PluginDescriptor, PluginExecution, PLUGIN_DESCRIPTOR_KEY};
pub use settings::GenerationSettings;

/// Switches of the class generator that the engine depends on
///
/// Every switch defaults to `false`, and the build-tool introspection
/// capability defaults to absent.
pub trait GenerationConfig: Send + Sync {
    fn is_generate_builders(&self) -> bool {
        false
    }

    fn is_use_inner_class_builders(&self) -> bool {
        false
    }

    /// Bean-validation (`NotNull`) markers are emitted
    fn is_include_jsr303_annotations(&self) -> bool {
        false
    }

    /// `Nonnull` / `Nullable` markers are emitted
    fn is_include_jsr305_annotations(&self) -> bool {
        false
    }

    /// Use the `jakarta.*` families instead of `javax.*`
    fn is_use_jakarta_validation(&self) -> bool {
        false
    }

    /// Name of the annotator configured in place of the generator's default,
    /// `None` when none is configured
    fn custom_annotator(&self) -> Option<&str> {
        None
    }

    /// Plugin context of the hosting build tool.
    ///
    /// `None` means the configuration has no introspection capability at all,
    /// which is different from a context without a plugin descriptor.
    fn plugin_context(&self) -> Option<&PluginContext> {
        None
    }
}
