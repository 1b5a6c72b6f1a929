use std::fmt;
use std::path::Path;
use std::sync::Arc;

use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while normalizing a module identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleIdError {
    #[error("module id cannot be empty")]
    Empty,

    #[error("module id '{0}' does not name a file")]
    NotAFile(String),
}

/// Resolved path of a module, normalized once at graph construction.
///
/// Separators are unified to `/` and `.`/`..` segments are collapsed, so
/// `./src/../src/index.ts` and `src/index.ts` name the same module.
/// Cloning is cheap (`Arc<str>`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(Arc<str>);

impl ModuleId {
    /// Normalize a path into a module id.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fob_graph::ModuleId;
    ///
    /// let id = ModuleId::new("./src/utils/../index.ts")?;
    /// assert_eq!(id.as_str(), "src/index.ts");
    /// # Ok::<(), fob_graph::ModuleIdError>(())
    /// ```
    pub fn new(path: impl AsRef<str>) -> Result<Self, ModuleIdError> {
        let raw = path.as_ref().trim();
        if raw.is_empty() {
            return Err(ModuleIdError::Empty);
        }

        let unified = raw.replace('\\', "/");
        let cleaned = Path::new(&unified).clean();
        let normalized = cleaned.to_string_lossy().replace('\\', "/");

        if normalized == "." || normalized.ends_with("/..") || normalized == ".." {
            return Err(ModuleIdError::NotAFile(raw.to_string()));
        }

        Ok(Self(Arc::from(normalized)))
    }

    /// Create an id without normalization (virtual modules, tests).
    pub fn new_virtual(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path string used in diagnostics and serialized output.
    pub fn path_string(&self) -> &str {
        &self.0
    }

    /// Returns true when the id lives under `root` (a normalized directory).
    ///
    /// The root `.` contains every relative id.
    pub fn is_within(&self, root: &str) -> bool {
        if root == "." {
            return !self.0.starts_with("../") && !self.0.starts_with('/');
        }
        let root = root.trim_end_matches('/');
        self.0
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// True for ids that point into an installed package.
    pub fn is_in_node_modules(&self) -> bool {
        self.0.starts_with("node_modules/") || self.0.contains("/node_modules/")
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ModuleId {
    type Error = ModuleIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0.to_string()
    }
}

/// Arena handle for a module inside one [`crate::ModuleGraph`].
///
/// Handles are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleIdx(u32);

impl ModuleIdx {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("module arena exceeds u32::MAX entries"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
