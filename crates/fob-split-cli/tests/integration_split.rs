//! Integration tests for the fob-split binary.
//!
//! Each test builds a small project in a temporary directory: a graph
//! snapshot plus fob-split.config.json, then runs the real binary in it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GRAPH: &str = r#"{
  "roots": ["src"],
  "modules": [
    { "id": "src/index.ts", "entry": true,
      "imports": [
        { "source": "./shared", "resolved": "src/shared.ts" },
        { "source": "react" }
      ] },
    { "id": "src/features/editor/index.ts", "entry": true,
      "imports": [
        { "source": "../../shared", "resolved": "src/shared.ts" },
        { "source": "monaco-editor" }
      ] },
    { "id": "src/shared.ts",
      "imports": [ { "source": "left-pad" } ] },
    { "id": "src/old.ts" }
  ]
}"#;

const CONFIG: &str = r#"{
  "graph": "module-graph.json",
  "naming": {
    "rules": [{ "pattern": "^src/features/([^/]+)/", "group": "$1" }],
    "fallback": "main"
  },
  "allow": ["react"],
  "versions": { "react": "^18.2.0" }
}"#;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("module-graph.json"), GRAPH).unwrap();
    fs::write(temp.path().join("fob-split.config.json"), CONFIG).unwrap();
    temp
}

fn fob_split(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fob-split"));
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_split_writes_manifests_and_plan() {
    let temp = project();

    fob_split(temp.path())
        .args(["split", "--allow", "left-pad"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 3 packages"));

    let out = temp.path().join("packages");
    let main = read_json(&out.join("main/package.json"));
    assert_eq!(main["name"], "main");
    assert_eq!(main["private"], false);
    assert_eq!(main["modules"], serde_json::json!(["src/index.ts"]));
    assert_eq!(main["dependencies"]["react"], "^18.2.0");
    assert_eq!(main["dependencies"]["editor_main-common"], "workspace:*");

    let common = read_json(&out.join("editor_main-common/package.json"));
    assert_eq!(common["modules"], serde_json::json!(["src/shared.ts"]));
    assert_eq!(common["dependencies"]["left-pad"], "*");

    let editor = read_json(&out.join("editor/package.json"));
    assert_eq!(editor["dependencies"]["monaco-editor"], "*");

    let plan = read_json(&out.join("split-plan.json"));
    assert_eq!(plan["rootGroup"], "main");
    assert_eq!(plan["assignment"]["src/shared.ts"], "editor_main-common");
    assert_eq!(plan["dropped"], serde_json::json!(["src/old.ts"]));
    assert!(!out.join("split-plan.dot").exists());
}

#[test]
fn test_split_reports_violation_tree_and_writes_nothing() {
    let temp = project();

    fob_split(temp.path())
        .arg("split")
        .assert()
        .failure()
        .stderr(predicate::str::contains("left-pad"))
        .stderr(predicate::str::contains(
            "src/shared.ts [editor_main-common] (imports \"left-pad\")",
        ))
        .stderr(predicate::str::contains("monaco-editor").not());

    assert!(!temp.path().join("packages").exists());
}

#[test]
fn test_split_dry_run_writes_nothing() {
    let temp = project();

    fob_split(temp.path())
        .args(["split", "--allow", "left-pad", "--dry-run", "--dot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("editor_main-common"))
        .stderr(predicate::str::contains("Would write"))
        .stderr(predicate::str::contains("split-plan.dot"));

    assert!(!temp.path().join("packages").exists());
}

#[test]
fn test_split_dot_and_scope() {
    let temp = project();

    fob_split(temp.path())
        .args([
            "split",
            "--allow",
            "left-pad",
            "--dot",
            "--scope",
            "@acme",
            "--out-dir",
            "dist",
        ])
        .assert()
        .success();

    let out = temp.path().join("dist");
    let main = read_json(&out.join("main/package.json"));
    assert_eq!(main["name"], "@acme/main");

    let dot = fs::read_to_string(out.join("split-plan.dot")).unwrap();
    assert!(dot.starts_with("digraph SplitPlan {"));
    assert!(dot.contains("\"@acme/main\" -> \"@acme/editor_main-common\";"));
}

#[test]
fn test_split_rejects_packages_sharing_a_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("module-graph.json"),
        r#"{
  "roots": ["src"],
  "modules": [
    { "id": "src/index.ts", "entry": true },
    { "id": "src/features/ui/index.ts", "entry": true },
    { "id": "src/features/editor/index.ts", "entry": true }
  ]
}"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("fob-split.config.json"),
        r#"{
  "scope": "@acme",
  "packageNames": { "editor": "@other/ui" },
  "naming": {
    "rules": [{ "pattern": "^src/features/([^/]+)/", "group": "$1" }],
    "fallback": "main"
  }
}"#,
    )
    .unwrap();

    fob_split(temp.path())
        .arg("split")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'@other/ui' and '@acme/ui'"))
        .stderr(predicate::str::contains("share the output directory 'ui'"))
        .stderr(predicate::str::contains("Hint: Rename one of the groups"));

    assert!(!temp.path().join("packages").exists());
}

#[test]
fn test_check_prints_summary() {
    let temp = project();

    fs::write(
        temp.path().join("fob-split.config.json"),
        CONFIG.replace(r#"["react"]"#, r#"["react", "left-pad"]"#),
    )
    .unwrap();

    fob_split(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Packages (3 packages, root group main)"))
        .stderr(predicate::str::contains("src/old.ts is unreachable"))
        .stderr(predicate::str::contains("No disallowed dependencies reach main"));

    assert!(!temp.path().join("packages").exists());
}

#[test]
fn test_check_json_output() {
    let temp = project();
    fs::write(
        temp.path().join("fob-split.config.json"),
        CONFIG.replace(r#"["react"]"#, r#"["react", "left-pad"]"#),
    )
    .unwrap();

    let output = fob_split(temp.path())
        .args(["check", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = plan["packages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["main", "editor", "editor_main-common"]);
}

#[test]
fn test_explain_module() {
    let temp = project();

    fob_split(temp.path())
        .args(["explain", "src/shared.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strong:   {editor, main}"))
        .stdout(predicate::str::contains("package:  editor_main-common"))
        .stdout(predicate::str::contains("left-pad (reaches root)"));
}

#[test]
fn test_explain_unknown_module() {
    let temp = project();

    fob_split(temp.path())
        .args(["explain", "src/missing.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not part of the graph"));
}

#[test]
fn test_unnamed_entries_fail_with_hint() {
    let temp = project();
    fs::write(
        temp.path().join("fob-split.config.json"),
        r#"{ "naming": { "rules": [{ "pattern": "^src/features/([^/]+)/", "group": "$1" }] } }"#,
    )
    .unwrap();

    fob_split(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("src/index.ts"))
        .stderr(predicate::str::contains("naming.fallback"));
}

#[test]
fn test_missing_graph_file() {
    let temp = TempDir::new().unwrap();

    fob_split(temp.path())
        .args(["check", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_graph_argument_overrides_config() {
    let temp = project();
    fs::rename(
        temp.path().join("module-graph.json"),
        temp.path().join("other.json"),
    )
    .unwrap();

    fob_split(temp.path())
        .args(["split", "other.json", "--allow", "left-pad", "--dry-run"])
        .assert()
        .success();
}

#[test]
fn test_schema_command() {
    let temp = TempDir::new().unwrap();

    let output = fob_split(temp.path()).arg("schema").output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["properties"]["rootGroup"].is_object());
    assert!(schema["properties"]["naming"].is_object());
}
