use serde::{Deserialize, Serialize};

use super::{Import, ModuleId};

/// Module as handed over by the compiler front end.
///
/// Modules are never mutated once the graph is built; the split engine only
/// reads and reclassifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub imports: Vec<Import>,
    pub is_entry: bool,
    /// Present when the module only carries type declarations.
    pub declaration: Option<Declaration>,
}

/// Declaration payload carried by a type-only module (e.g. a `.d.ts` file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Implementation module these declarations describe. `None` marks a
    /// pure type module.
    pub twin: Option<ModuleId>,
    /// Opaque declaration text. Never parsed by the graph or the splitter.
    pub payload: Option<String>,
}

impl Module {
    /// Create a new module builder with sensible defaults.
    pub fn builder(id: ModuleId) -> ModuleBuilder {
        ModuleBuilder {
            module: Self {
                id,
                imports: Vec::new(),
                is_entry: false,
                declaration: None,
            },
        }
    }

    /// Mark the module as an entry module.
    pub fn mark_entry(&mut self) {
        self.is_entry = true;
    }

    pub fn is_declaration(&self) -> bool {
        self.declaration.is_some()
    }
}

/// Builder for `Module` to avoid long argument lists in constructors.
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    pub fn imports(mut self, imports: Vec<Import>) -> Self {
        self.module.imports = imports;
        self
    }

    pub fn import(mut self, import: Import) -> Self {
        self.module.imports.push(import);
        self
    }

    pub fn entry(mut self, is_entry: bool) -> Self {
        self.module.is_entry = is_entry;
        self
    }

    /// Mark the module as declaration-only, optionally naming its twin.
    pub fn declaration_of(mut self, twin: Option<ModuleId>) -> Self {
        let declaration = self.module.declaration.get_or_insert_with(Declaration::default);
        declaration.twin = twin;
        self
    }

    pub fn declaration_payload(mut self, payload: impl Into<String>) -> Self {
        let declaration = self.module.declaration.get_or_insert_with(Declaration::default);
        declaration.payload = Some(payload.into());
        self
    }

    pub fn build(self) -> Module {
        self.module
    }
}

/// File suffixes that mark declaration-only modules.
const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

/// Extensions tried, in order, when pairing a declaration file with its
/// implementation.
const IMPLEMENTATION_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Returns the stem of a declaration file id (`src/a.d.ts` → `src/a`).
pub fn declaration_stem(id: &ModuleId) -> Option<&str> {
    DECLARATION_SUFFIXES
        .iter()
        .find_map(|suffix| id.as_str().strip_suffix(suffix))
}

/// Candidate implementation paths for a declaration file, most likely first.
pub fn implementation_candidates(id: &ModuleId) -> Vec<String> {
    match declaration_stem(id) {
        Some(stem) => IMPLEMENTATION_EXTENSIONS
            .iter()
            .map(|ext| format!("{stem}.{ext}"))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let module = Module::builder(ModuleId::new("src/a.ts").unwrap()).build();
        assert!(!module.is_entry);
        assert!(!module.is_declaration());
        assert!(module.imports.is_empty());
    }

    #[test]
    fn test_declaration_builder() {
        let twin = ModuleId::new("src/a.ts").unwrap();
        let module = Module::builder(ModuleId::new("src/a.d.ts").unwrap())
            .declaration_of(Some(twin.clone()))
            .declaration_payload("export declare const a: number;")
            .build();

        let declaration = module.declaration.unwrap();
        assert_eq!(declaration.twin, Some(twin));
        assert!(declaration.payload.unwrap().contains("declare"));
    }

    #[test]
    fn test_implementation_candidates() {
        let id = ModuleId::new("src/a.d.ts").unwrap();
        let candidates = implementation_candidates(&id);
        assert_eq!(candidates.first().map(String::as_str), Some("src/a.ts"));
        assert!(candidates.contains(&"src/a.js".to_string()));

        let plain = ModuleId::new("src/a.ts").unwrap();
        assert!(implementation_candidates(&plain).is_empty());
    }

    #[test]
    fn test_builder_keeps_import_order() {
        let target = ModuleId::new("src/b.ts").unwrap();
        let module = Module::builder(ModuleId::new("src/a.ts").unwrap())
            .import(Import::resolved("./b", target.clone()))
            .import(Import::new("react"))
            .build();

        let sources: Vec<_> = module.imports.iter().map(|i| i.source.as_str()).collect();
        assert_eq!(sources, ["./b", "react"]);
        assert_eq!(module.imports[0].resolved_to.as_ref(), Some(&target));
    }
}
