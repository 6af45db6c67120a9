//! Build-tool plugin context
//!
//! A string-keyed map handed over by the hosting build tool. The only entry
//! the engine reads is the plugin descriptor, which exposes the executions
//! bound to the plugin and its configuration subtree.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key under which the build tool stores the plugin descriptor
pub const PLUGIN_DESCRIPTOR_KEY: &str = "pluginDescriptor";

/// Plugin context map
///
/// On load, the entry under `PLUGIN_DESCRIPTOR_KEY` is read as a plugin
/// descriptor when its shape allows; every other entry stays opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, serde_json::Value>", into = "HashMap<String, ContextValue>")]
pub struct PluginContext {
    entries: HashMap<String, ContextValue>,
}

/// A value stored in the plugin context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Descriptor(PluginDescriptor),
    Opaque(serde_json::Value),
}

impl PluginContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding only a plugin descriptor
    pub fn with_descriptor(descriptor: PluginDescriptor) -> Self {
        let mut context = Self::new();
        context.insert(PLUGIN_DESCRIPTOR_KEY, ContextValue::Descriptor(descriptor));
        context
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ContextValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    /// The plugin descriptor, if present under its key and of the right shape
    pub fn descriptor(&self) -> Option<&PluginDescriptor> {
        match self.get(PLUGIN_DESCRIPTOR_KEY)? {
            ContextValue::Descriptor(descriptor) => Some(descriptor),
            ContextValue::Opaque(_) => None,
        }
    }
}

impl From<HashMap<String, serde_json::Value>> for PluginContext {
    fn from(raw: HashMap<String, serde_json::Value>) -> Self {
        let entries = raw
            .into_iter()
            .map(|(key, value)| {
                let value = if key == PLUGIN_DESCRIPTOR_KEY {
                    match serde_json::from_value::<PluginDescriptor>(value.clone()) {
                        Ok(descriptor) => ContextValue::Descriptor(descriptor),
                        Err(_) => ContextValue::Opaque(value),
                    }
                } else {
                    ContextValue::Opaque(value)
                };
                (key, value)
            })
            .collect();
        Self { entries }
    }
}

impl From<PluginContext> for HashMap<String, ContextValue> {
    fn from(context: PluginContext) -> Self {
        context.entries
    }
}

/// The plugin as declared in the build file
///
/// Keys other than `executions` and `configuration` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    #[serde(default)]
    pub executions: Vec<PluginExecution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigNode>,
}

impl PluginDescriptor {
    pub fn execution_count(&self) -> usize {
        self.executions.len()
    }
}

/// One configured binding of the plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginExecution {
    pub id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<ConfigNode>,
}

impl PluginExecution {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// A node of the plugin configuration tree, queried by child name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    /// First direct child with the given name
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}
