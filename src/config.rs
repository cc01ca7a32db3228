//! # Builder Configuration
//!
//! This module defines the options a documentation generator passes to the
//! core, and the logic for loading them from YAML. Every field has a default,
//! so an empty document is a valid configuration.
//!
//! ```yaml
//! naming: lower-first
//! configurable-markers: [Configurable, proptools.Configurable]
//! filters:
//!   - key: blueprint
//!     value: mutated
//!     exclude: true
//! ```

use crate::builder::PropertyBuilder;
use crate::error::{Error, Result};
use crate::naming::NamingStyle;
use crate::property::PropertyStruct;
use serde::{Deserialize, Serialize};

/// One tag filter applied to built trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilterRule {
    /// Tag key to look up, e.g. `android`.
    pub key: String,
    /// Value that must (or must not) appear under the key.
    pub value: String,
    /// Drop matching nodes instead of keeping only them.
    #[serde(default)]
    pub exclude: bool,
}

/// Options controlling how property trees are built and post-processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuilderConfig {
    /// Convention mapping field names to property names.
    #[serde(default)]
    pub naming: NamingStyle,
    /// Generic base names treated as configurable wrappers.
    #[serde(default = "default_configurable_markers")]
    pub configurable_markers: Vec<String>,
    /// Tag filters applied in order by [`BuilderConfig::apply_filters`].
    #[serde(default)]
    pub filters: Vec<TagFilterRule>,
}

/// The generic base names documented as `configurable <T>` by default.
///
/// # Examples
///
/// ```
/// use propdoc::config::default_configurable_markers;
///
/// assert!(default_configurable_markers().contains(&"proptools.Configurable".to_string()));
/// ```
pub fn default_configurable_markers() -> Vec<String> {
    vec![
        "Configurable".to_string(),
        "proptools.Configurable".to_string(),
    ]
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            naming: NamingStyle::default(),
            configurable_markers: default_configurable_markers(),
            filters: Vec::new(),
        }
    }
}

impl BuilderConfig {
    /// Creates a builder honoring this configuration.
    pub fn builder(&self) -> PropertyBuilder<'static> {
        PropertyBuilder::new(self.naming.convention())
            .with_configurable_markers(self.configurable_markers.clone())
    }

    /// Applies every configured tag filter to `tree`, in order.
    pub fn apply_filters(&self, tree: &mut PropertyStruct) {
        for rule in &self.filters {
            tree.filter_by_tag(&rule.key, &rule.value, rule.exclude);
        }
    }
}

/// Parses a YAML string into a `BuilderConfig`.
pub fn parse(yaml_content: &str) -> Result<BuilderConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(BuilderConfig::default());
    }

    let config: BuilderConfig = serde_yaml::from_str(yaml_content).map_err(Error::Yaml)?;
    if let Some(rule) = config.filters.iter().find(|r| r.key.is_empty()) {
        return Err(Error::ConfigParse {
            message: format!("Tag filter for value {:?} has an empty key", rule.value),
        });
    }

    Ok(config)
}

/// Parse a `BuilderConfig` from a YAML file path
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<BuilderConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
