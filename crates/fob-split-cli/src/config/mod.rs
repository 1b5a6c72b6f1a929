//! Configuration for fob-split with multi-source loading.
//!
//! Merges settings from CLI args, environment variables and config files.
//! Priority: CLI > Environment (`FOB_SPLIT_*`) > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod tests;
mod validation;

use fob_split::NamingRules;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAMES, ConfigOverrides, ENV_PREFIX};

/// fob-split configuration, loaded from fob-split.config.json (or .toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SplitConfig {
    /// Module graph snapshot produced by the bundler
    #[serde(default = "default_graph")]
    pub graph: PathBuf,

    /// Directory receiving one folder per package
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Group whose package is validated against `allow`
    #[serde(default = "default_root_group")]
    pub root_group: String,

    /// Package name for the root group's own package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_package: Option<String>,

    /// npm scope prefixed to every package name (e.g. "@acme")
    #[schemars(regex(pattern = r"^@[a-z0-9][a-z0-9.-]*$"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Explicit group -> package name overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub package_names: BTreeMap<String, String>,

    /// Rules assigning entry points to groups
    #[serde(default)]
    pub naming: NamingRules,

    /// External dependencies allowed to reach the root package
    /// (exact names or "@scope/*")
    #[serde(default)]
    pub allow: Vec<String>,

    /// Version range per external dependency (default "*")
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub versions: BTreeMap<String, String>,

    /// Longest joined common-package name before falling back to a hash
    #[serde(default = "default_max_joined_name_length")]
    pub max_joined_name_length: usize,

    /// Reference sibling packages from dependencies / peerDependencies
    #[serde(default = "default_link_siblings")]
    pub link_siblings: bool,

    /// Version range used for sibling package references
    #[serde(default = "default_sibling_range")]
    pub sibling_range: String,

    /// Also write split-plan.dot
    #[serde(default)]
    pub dot: bool,
}

impl SplitConfig {
    /// JSON Schema for fob-split.config.json.
    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(SplitConfig).to_value()
    }

    /// Example fob-split.config.json content.
    pub fn example_config() -> serde_json::Result<String> {
        let config = Self {
            naming: NamingRules::new()
                .rule(r"^src/features/([^/]+)/", "$1")
                .fallback("main"),
            scope: Some("@acme".to_string()),
            allow: vec!["react".to_string(), "@types/*".to_string()],
            versions: BTreeMap::from([("react".to_string(), "^18.2.0".to_string())]),
            ..Self::default_config()
        };
        serde_json::to_string_pretty(&config)
    }
}
