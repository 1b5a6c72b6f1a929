use fob_split::SplitError;

use crate::cli::{parse_allow_pattern, parse_scope};
use crate::config::SplitConfig;
use crate::error::{ConfigError, Result};

impl SplitConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.root_group.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "rootGroup".to_string(),
                hint: "Name the group whose package must stay free of disallowed dependencies"
                    .to_string(),
            }
            .into());
        }

        match self.naming.compile() {
            Ok(_) => {}
            Err(SplitError::InvalidPattern { pattern, source }) => {
                return Err(ConfigError::InvalidValue {
                    field: "naming.rules".to_string(),
                    value: pattern,
                    hint: format!("Pattern is not a valid regular expression: {source}"),
                }
                .into());
            }
            Err(other) => return Err(other.into()),
        }

        if let Some(scope) = &self.scope {
            parse_scope(scope).map_err(|hint| ConfigError::InvalidValue {
                field: "scope".to_string(),
                value: scope.clone(),
                hint,
            })?;
        }

        for entry in &self.allow {
            parse_allow_pattern(entry).map_err(|hint| ConfigError::InvalidValue {
                field: "allow".to_string(),
                value: entry.clone(),
                hint,
            })?;
        }

        if self.max_joined_name_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "maxJoinedNameLength".to_string(),
                value: "0".to_string(),
                hint: "Must be a positive number of characters".to_string(),
            }
            .into());
        }

        if self.sibling_range.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "siblingRange".to_string(),
                value: String::new(),
                hint: "Use a version range such as \"workspace:*\" or \"^1.0.0\"".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
