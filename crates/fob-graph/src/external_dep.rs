use serde::{Deserialize, Serialize};

use super::ModuleId;

/// An external dependency (npm package) and the modules that import it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalDependency {
    /// Package name (`react`, `@scope/pkg`), never a deep specifier.
    pub name: String,
    /// Importers in first-seen order, one record per module.
    pub importers: Vec<ExternalImporter>,
}

/// One module importing an external dependency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalImporter {
    pub module: ModuleId,
    /// True while every import of the dependency from `module` is
    /// declaration-only.
    pub type_only: bool,
}

impl ExternalDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            importers: Vec::new(),
        }
    }

    /// Record an import. Repeated imports from the same module collapse into
    /// one record that stays type-only only if all of them are.
    pub fn push_importer(&mut self, module: ModuleId, type_only: bool) {
        match self.importers.iter_mut().find(|i| i.module == module) {
            Some(existing) => existing.type_only &= type_only,
            None => self.importers.push(ExternalImporter { module, type_only }),
        }
    }

    /// True only if every importer uses the dependency solely for types.
    pub fn is_type_only(&self) -> bool {
        !self.importers.is_empty() && self.importers.iter().all(|i| i.type_only)
    }

    /// Modules importing the dependency for a runtime value.
    pub fn value_importers(&self) -> impl Iterator<Item = &ModuleId> {
        self.importers
            .iter()
            .filter(|i| !i.type_only)
            .map(|i| &i.module)
    }
}
