#[cfg(test)]
mod tests {
    use crate::config::loading::env_key_to_path;
    use crate::config::*;
    use crate::error::{CliError, ConfigError};
    use serial_test::serial;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn load(dir: &Path, overrides: &ConfigOverrides) -> crate::error::Result<SplitConfig> {
        SplitConfig::load(overrides, None, dir)
    }

    #[test]
    fn test_serialization() {
        let config = SplitConfig::default_config();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["outDir"], "packages");
        assert_eq!(json["rootGroup"], "main");
        assert_eq!(json["maxJoinedNameLength"], 64);
        assert_eq!(json["siblingRange"], "workspace:*");
        assert!(json.get("out_dir").is_none());
        assert!(json.get("scope").is_none());
        assert!(json.get("versions").is_none());

        let back: SplitConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<SplitConfig, _> = serde_json::from_str(r#"{ "entries": [] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        assert!(SplitConfig::default_config().validate().is_ok());

        let empty_root = SplitConfig {
            root_group: "  ".to_string(),
            ..SplitConfig::default_config()
        };
        assert!(matches!(
            empty_root.validate(),
            Err(CliError::Config(ConfigError::MissingField { .. }))
        ));

        let bad_scope = SplitConfig {
            scope: Some("acme".to_string()),
            ..SplitConfig::default_config()
        };
        assert!(bad_scope.validate().is_err());

        let bad_pattern = SplitConfig {
            naming: fob_split::NamingRules::new().rule("([", "x"),
            ..SplitConfig::default_config()
        };
        let err = bad_pattern.validate().unwrap_err().to_string();
        assert!(err.contains("naming.rules"));

        let zero = SplitConfig {
            max_joined_name_length: 0,
            ..SplitConfig::default_config()
        };
        assert!(zero.validate().is_err());

        let bad_allow = SplitConfig {
            allow: vec!["react-*".to_string()],
            ..SplitConfig::default_config()
        };
        assert!(bad_allow.validate().is_err());
    }

    #[test]
    fn test_conversions() {
        let config = SplitConfig {
            root_group: "app".to_string(),
            scope: Some("@acme".to_string()),
            allow: vec!["react".to_string()],
            link_siblings: false,
            ..SplitConfig::default_config()
        };

        let options = config.split_options();
        assert_eq!(options.root_group, "app");
        assert_eq!(options.naming.scope.as_deref(), Some("@acme"));
        assert_eq!(options.allow, ["react"]);

        let manifest = config.manifest_options();
        assert!(!manifest.link_siblings);
        assert_eq!(manifest.sibling_range, "workspace:*");
    }

    #[test]
    fn test_example_config_parses() {
        let example = SplitConfig::example_config().unwrap();
        let config: SplitConfig = serde_json::from_str(&example).unwrap();
        config.validate().unwrap();
        assert_eq!(config.naming.fallback.as_deref(), Some("main"));
    }

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = SplitConfig::json_schema();
        let properties = &schema["properties"];
        assert!(properties.get("rootGroup").is_some());
        assert!(properties.get("naming").is_some());
        assert!(properties.get("allow").is_some());
    }

    #[test]
    fn test_env_key_to_path() {
        assert_eq!(env_key_to_path("ROOT_GROUP"), "rootGroup");
        assert_eq!(env_key_to_path("MAX_JOINED_NAME_LENGTH"), "maxJoinedNameLength");
        assert_eq!(env_key_to_path("NAMING__FALLBACK"), "naming.fallback");
        assert_eq!(env_key_to_path("DOT"), "dot");
    }

    #[test]
    #[serial]
    fn test_load_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = load(temp.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config, SplitConfig::default_config());
    }

    #[test]
    #[serial]
    fn test_load_json_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("fob-split.config.json"),
            r#"{
                "graph": "build/graph.json",
                "rootGroup": "app",
                "naming": { "rules": [{ "pattern": "^src/(\\w+)/", "group": "$1" }] },
                "allow": ["react"]
            }"#,
        )
        .unwrap();

        let config = load(temp.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.graph, PathBuf::from("build/graph.json"));
        assert_eq!(config.root_group, "app");
        assert_eq!(config.naming.rules.len(), 1);
        assert_eq!(config.out_dir, PathBuf::from("packages"));
    }

    #[test]
    #[serial]
    fn test_load_toml_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("fob-split.config.toml"),
            "rootGroup = \"app\"\nscope = \"@acme\"\n\n[naming]\nfallback = \"app\"\n",
        )
        .unwrap();

        let config = load(temp.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.root_group, "app");
        assert_eq!(config.scope.as_deref(), Some("@acme"));
        assert_eq!(config.naming.fallback.as_deref(), Some("app"));
    }

    #[test]
    #[serial]
    fn test_cli_overrides_file_and_appends_allow() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("fob-split.config.json"),
            r#"{ "outDir": "file-out", "rootGroup": "app", "allow": ["react"] }"#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            out_dir: Some(PathBuf::from("cli-out")),
            allow: vec!["lodash".to_string()],
            ..ConfigOverrides::default()
        };
        let config = load(temp.path(), &overrides).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("cli-out"));
        assert_eq!(config.root_group, "app");
        assert_eq!(config.allow, ["react", "lodash"]);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("fob-split.config.json"),
            r#"{ "rootGroup": "app", "naming": { "fallback": "app" } }"#,
        )
        .unwrap();

        unsafe {
            std::env::set_var("FOB_SPLIT_ROOT_GROUP", "shell");
            std::env::set_var("FOB_SPLIT_NAMING__FALLBACK", "shell");
        }
        let result = load(temp.path(), &ConfigOverrides::default());
        unsafe {
            std::env::remove_var("FOB_SPLIT_ROOT_GROUP");
            std::env::remove_var("FOB_SPLIT_NAMING__FALLBACK");
        }

        let config = result.unwrap();
        assert_eq!(config.root_group, "shell");
        assert_eq!(config.naming.fallback.as_deref(), Some("shell"));
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_file() {
        let temp = TempDir::new().unwrap();
        let err = SplitConfig::load(
            &ConfigOverrides::default(),
            Some(Path::new("missing.json")),
            temp.path(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_unsupported_config_extension() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("split.yaml"), "rootGroup: app\n").unwrap();
        let err = SplitConfig::load(
            &ConfigOverrides::default(),
            Some(Path::new("split.yaml")),
            temp.path(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    #[serial]
    fn test_unknown_field_in_file_fails_to_load() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("fob-split.config.json"),
            r#"{ "rootGroups": "app" }"#,
        )
        .unwrap();
        let err = load(temp.path(), &ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("Hint:"));
    }
}
