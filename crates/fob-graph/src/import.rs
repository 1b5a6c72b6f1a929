use serde::{Deserialize, Serialize};

use super::ModuleId;

/// One import statement as reported by the compiler front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Specifier exactly as written (`./util`, `react/jsx-runtime`).
    pub source: String,
    /// Module the specifier resolved to, if resolution succeeded.
    pub resolved_to: Option<ModuleId>,
    /// `import type` / type-reference edge with no runtime value.
    pub type_only: bool,
}

impl Import {
    /// Value import of `source`, unresolved.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            resolved_to: None,
            type_only: false,
        }
    }

    /// Value import resolved to `target`.
    pub fn resolved(source: impl Into<String>, target: ModuleId) -> Self {
        Self {
            source: source.into(),
            resolved_to: Some(target),
            type_only: false,
        }
    }

    /// Mark the import as declaration-only.
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// True for `./x`, `../x` and absolute specifiers.
    pub fn is_relative(&self) -> bool {
        self.source.starts_with("./")
            || self.source.starts_with("../")
            || self.source.starts_with('/')
            || self.source == "."
            || self.source == ".."
    }
}
