//! Snapshot loading tests.

use crate::{EdgeTarget, Error, ModuleGraph, ModuleId};

const SNAPSHOT: &str = r#"{
  "roots": ["src"],
  "modules": [
    { "id": "./src/index.ts",
      "entry": true,
      "imports": [
        { "source": "./util", "resolved": "src/util.ts" },
        { "source": "react", "typeOnly": true },
        { "source": "left-pad", "resolved": "node_modules/left-pad/index.js" },
        { "source": "node:fs" }
      ] },
    { "id": "src/util.ts" },
    { "id": "src/util.d.ts", "payload": "export declare function pad(): string;" },
    { "id": "src/shapes.d.ts", "declaration": true }
  ]
}"#;

#[test]
fn test_load_snapshot() {
    let graph = ModuleGraph::from_json(SNAPSHOT).unwrap();
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.roots(), ["src"]);

    let index = graph.idx_of(&ModuleId::new("src/index.ts").unwrap()).unwrap();
    assert_eq!(graph.entry_points(), [index]);

    let targets: Vec<_> = graph.edges(index).iter().map(|e| &e.target).collect();
    assert!(matches!(targets[0], EdgeTarget::Internal(_)));
    assert_eq!(targets[1], &EdgeTarget::External("react".to_string()));
    assert_eq!(targets[2], &EdgeTarget::External("left-pad".to_string()));
    assert_eq!(targets[3], &EdgeTarget::Builtin("fs".to_string()));
}

#[test]
fn test_declaration_files_are_detected() {
    let graph = ModuleGraph::from_json(SNAPSHOT).unwrap();
    let util = graph.idx_of(&ModuleId::new("src/util.ts").unwrap()).unwrap();
    let util_decl = graph.idx_of(&ModuleId::new("src/util.d.ts").unwrap()).unwrap();
    let shapes = graph.idx_of(&ModuleId::new("src/shapes.d.ts").unwrap()).unwrap();

    assert!(graph.is_declaration(util_decl));
    assert_eq!(graph.declaration_twin(util_decl), Some(util));
    assert!(graph.is_declaration(shapes));
    assert_eq!(graph.declaration_twin(shapes), None);
}

#[test]
fn test_snapshot_round_trip_is_normalized() {
    let graph = ModuleGraph::from_json(SNAPSHOT).unwrap();
    let snapshot = graph.to_snapshot();

    assert_eq!(snapshot.modules[0].id, "src/index.ts");
    assert_eq!(snapshot.entries, ["src/index.ts"]);

    let reloaded = ModuleGraph::from_snapshot(snapshot.clone()).unwrap();
    assert_eq!(reloaded.to_snapshot(), snapshot);
}

#[test]
fn test_unknown_fields_rejected() {
    let result = ModuleGraph::from_json(r#"{ "modules": [], "extra": 1 }"#);
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_invalid_module_id_rejected() {
    let result = ModuleGraph::from_json(r#"{ "modules": [{ "id": "" }] }"#);
    assert!(matches!(result, Err(Error::InvalidModuleId(_))));
}
