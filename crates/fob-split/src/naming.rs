//! Package names derived from reachability sets.
//!
//! A package name is a pure function of its owning group set. Singleton
//! sets use the group's name (or a configured override); multi-group sets
//! get a [`CommonName`], which is either the joined group names or a UUID
//! hashed from them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SplitError};
use crate::group::{GroupId, GroupSet, GroupTable};

/// Suffix marking a package shared by several groups.
pub const COMMON_SUFFIX: &str = "-common";

/// Joined common names longer than this use the hashed form.
pub const DEFAULT_MAX_JOINED_NAME_LENGTH: usize = 64;

/// Separator between group names in a joined common name. Sanitized names
/// never contain it, so joined names cannot be ambiguous.
const JOIN_SEPARATOR: &str = "_";

/// UUID namespace for hashed common names.
const COMMON_NAMESPACE: Uuid = Uuid::from_u128(0x3b0c_44f1_2a7e_5d8b_9c61_f04e_8a2d_7c15);

/// Naming configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NamingOptions {
    /// Package name for the root group's own package.
    pub root_package: Option<String>,
    /// Explicit group -> package name overrides.
    pub package_names: BTreeMap<String, String>,
    /// npm scope (`@acme`) prefixed to every unscoped name.
    pub scope: Option<String>,
    pub max_joined_name_length: usize,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            root_package: None,
            package_names: BTreeMap::new(),
            scope: None,
            max_joined_name_length: DEFAULT_MAX_JOINED_NAME_LENGTH,
        }
    }
}

/// Map a group name to the npm-safe alphabet `[a-z0-9.-]`.
///
/// Every run of other characters collapses into one `-`; leading and
/// trailing `-` and `.` are trimmed.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '.' || ch == '-' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out.trim_matches(|c| c == '-' || c == '.').to_string()
}

/// Package name without its `@scope/` prefix; also its output directory.
pub fn unscoped(name: &str) -> &str {
    match name.split_once('/') {
        Some((scope, rest)) if scope.starts_with('@') => rest,
        _ => name,
    }
}

/// True when [`sanitize`] leaves `name` untouched.
pub fn is_lossless(name: &str) -> bool {
    !name.is_empty() && sanitize(name) == name
}

/// Name of a package shared by several groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "form", content = "value", rename_all = "camelCase")]
pub enum CommonName {
    /// Sorted group names joined by `_`.
    Joined(String),
    /// UUID v5 of the sorted group names.
    Hashed(Uuid),
}

impl CommonName {
    /// Pick the joined form when every name survives sanitization and the
    /// result fits `max_len`, the hashed form otherwise.
    ///
    /// `names` must be sorted; the result never depends on anything else.
    pub fn for_groups(names: &[&str], max_len: usize) -> Self {
        debug_assert!(names.windows(2).all(|w| w[0] <= w[1]));

        if names.iter().all(|name| is_lossless(name)) {
            let joined = names.join(JOIN_SEPARATOR);
            if joined.len() + COMMON_SUFFIX.len() <= max_len {
                return Self::Joined(joined);
            }
        }

        Self::Hashed(Self::hash(names))
    }

    /// Hashed form regardless of length.
    pub fn hash(names: &[&str]) -> Uuid {
        Uuid::new_v5(&COMMON_NAMESPACE, names.join("\0").as_bytes())
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, Self::Hashed(_))
    }
}

impl fmt::Display for CommonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joined(joined) => write!(f, "{joined}{COMMON_SUFFIX}"),
            Self::Hashed(uuid) => write!(f, "{}{COMMON_SUFFIX}", uuid.simple()),
        }
    }
}

/// A name chosen for one group set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenName {
    pub name: String,
    /// Set for multi-group sets.
    pub common: Option<CommonName>,
}

/// Names group sets according to [`NamingOptions`].
pub struct PackageNamer<'a> {
    options: &'a NamingOptions,
    table: &'a GroupTable,
    root: GroupId,
}

impl<'a> PackageNamer<'a> {
    pub fn new(options: &'a NamingOptions, table: &'a GroupTable, root: GroupId) -> Self {
        Self {
            options,
            table,
            root,
        }
    }

    pub fn name(&self, set: &GroupSet) -> Result<ChosenName> {
        if let Some(group) = set.single() {
            let name = self.table.name(group);
            let explicit = if group == self.root {
                self.options
                    .root_package
                    .as_ref()
                    .or_else(|| self.options.package_names.get(name))
            } else {
                self.options.package_names.get(name)
            };

            let base = match explicit {
                Some(explicit) => {
                    validate_explicit(name, explicit)?;
                    explicit.clone()
                }
                None => {
                    let sanitized = sanitize(name);
                    if sanitized.is_empty() {
                        return Err(SplitError::InvalidGroupName {
                            group: name.to_string(),
                            reason: "no package-safe characters".to_string(),
                        });
                    }
                    sanitized
                }
            };

            return Ok(ChosenName {
                name: self.scoped(base),
                common: None,
            });
        }

        let names = set.names(self.table);
        let common = CommonName::for_groups(&names, self.options.max_joined_name_length);
        Ok(ChosenName {
            name: self.scoped(common.to_string()),
            common: Some(common),
        })
    }

    fn scoped(&self, name: String) -> String {
        match &self.options.scope {
            Some(scope) if !name.starts_with('@') => {
                format!("{}/{name}", scope.trim_end_matches('/'))
            }
            _ => name,
        }
    }
}

/// Configured names are used verbatim, so they must already be valid.
fn validate_explicit(group: &str, name: &str) -> Result<()> {
    let bare = match name.strip_prefix('@') {
        Some(scoped) => match scoped.split_once('/') {
            Some((scope, rest)) if !scope.is_empty() => rest,
            _ => {
                return Err(SplitError::InvalidGroupName {
                    group: group.to_string(),
                    reason: format!("'{name}' is not a valid scoped package name"),
                });
            }
        },
        None => name,
    };

    let valid = !bare.is_empty()
        && !bare.starts_with(['.', '_'])
        && bare.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_')
        });

    if valid {
        Ok(())
    } else {
        Err(SplitError::InvalidGroupName {
            group: group.to_string(),
            reason: format!("'{name}' is not a valid package name"),
        })
    }
}
