use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::{GraphArgs, SplitArgs};
use crate::commands::utils::resolve_path;
use crate::config::SplitConfig;
use crate::error::{ConfigError, Result};

/// Config files searched in the working directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["fob-split.config.json", "fob-split.config.toml"];

/// Prefix of environment overrides (`FOB_SPLIT_ROOT_GROUP=app`).
/// Nested keys use a double underscore: `FOB_SPLIT_NAMING__FALLBACK`.
pub const ENV_PREFIX: &str = "FOB_SPLIT_";

/// Values given on the command line. Unset fields leave lower layers
/// alone; `allow` is appended to the configured list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dot: bool,
}

impl From<&GraphArgs> for ConfigOverrides {
    fn from(args: &GraphArgs) -> Self {
        Self {
            graph: args.graph.clone(),
            ..Self::default()
        }
    }
}

impl From<&SplitArgs> for ConfigOverrides {
    fn from(args: &SplitArgs) -> Self {
        Self {
            graph: args.graph.graph.clone(),
            out_dir: args.out_dir.clone(),
            root_group: args.root_group.clone(),
            scope: args.scope.clone(),
            allow: args.allow.clone(),
            dot: args.dot,
        }
    }
}

impl SplitConfig {
    /// Load configuration from every source.
    ///
    /// `config_path` (relative to `cwd`) must exist when given; otherwise
    /// [`CONFIG_FILE_NAMES`] are looked up in `cwd`.
    pub fn load(overrides: &ConfigOverrides, config_path: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        match find_config_file(config_path, cwd)? {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                figment = merge_file(figment, &path)?;
            }
            None => debug!("no config file found, using defaults"),
        }

        figment = figment.merge(env_provider());
        figment = figment.admerge(Serialized::defaults(overrides));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: "Check fob-split.config.json syntax, field names and FOB_SPLIT_* variables"
                    .to_string(),
            }
            .into()
        })
    }

    /// Default configuration values.
    pub fn default_config() -> Self {
        use crate::config::defaults::*;

        Self {
            graph: default_graph(),
            out_dir: default_out_dir(),
            root_group: default_root_group(),
            root_package: None,
            scope: None,
            package_names: Default::default(),
            naming: Default::default(),
            allow: Vec::new(),
            versions: Default::default(),
            max_joined_name_length: default_max_joined_name_length(),
            link_siblings: default_link_siblings(),
            sibling_range: default_sibling_range(),
            dot: false,
        }
    }
}

fn find_config_file(config_path: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = config_path {
        let path = resolve_path(path, cwd);
        if !path.is_file() {
            return Err(ConfigError::NotFound(path).into());
        }
        return Ok(Some(path));
    }

    Ok(CONFIG_FILE_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.is_file()))
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(figment.merge(Json::file(path))),
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf()).into()),
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .map(|key| env_key_to_path(key.as_str()).into())
        .lowercase(false)
}

/// `ROOT_GROUP` -> `rootGroup`, `NAMING__FALLBACK` -> `naming.fallback`.
pub(crate) fn env_key_to_path(key: &str) -> String {
    key.split("__")
        .map(|segment| {
            let mut out = String::with_capacity(segment.len());
            for (i, word) in segment.to_ascii_lowercase().split('_').enumerate() {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) if i > 0 => {
                        out.push(first.to_ascii_uppercase());
                        out.extend(chars);
                    }
                    _ => out.push_str(word),
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(".")
}
