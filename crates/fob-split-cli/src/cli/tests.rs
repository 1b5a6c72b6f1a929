#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command, parse_allow_pattern, parse_scope};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_parse_scope() {
        assert_eq!(parse_scope("@acme"), Ok("@acme".to_string()));
        assert_eq!(parse_scope("@my-org.io"), Ok("@my-org.io".to_string()));

        assert!(parse_scope("acme").is_err());
        assert!(parse_scope("@").is_err());
        assert!(parse_scope("@Acme").is_err());
        assert!(parse_scope("@acme/pkg").is_err());
    }

    #[test]
    fn test_parse_allow_pattern() {
        assert_eq!(parse_allow_pattern("react"), Ok("react".to_string()));
        assert_eq!(parse_allow_pattern(" @types/* "), Ok("@types/*".to_string()));

        assert!(parse_allow_pattern("").is_err());
        assert!(parse_allow_pattern("react-*").is_err());
        assert!(parse_allow_pattern("@/*").is_err());
        assert!(parse_allow_pattern("@a/b/*").is_err());
    }

    #[test]
    fn test_split_command_parsing() {
        let cli = Cli::try_parse_from([
            "fob-split",
            "split",
            "graph.json",
            "--out-dir",
            "out",
            "--allow",
            "react",
            "--allow",
            "@types/*",
            "--scope",
            "@acme",
            "--dry-run",
        ])
        .unwrap();

        let Command::Split(args) = cli.command else {
            panic!("expected split command");
        };
        assert_eq!(args.graph.graph, Some(PathBuf::from("graph.json")));
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert_eq!(args.allow, ["react", "@types/*"]);
        assert_eq!(args.scope.as_deref(), Some("@acme"));
        assert!(args.dry_run);
        assert!(!args.dot);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["fob-split", "check", "-v", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["fob-split", "-v", "-q", "check"]).is_err());
    }

    #[test]
    fn test_explain_requires_module() {
        assert!(Cli::try_parse_from(["fob-split", "explain"]).is_err());

        let cli = Cli::try_parse_from(["fob-split", "explain", "src/a.ts", "g.json"]).unwrap();
        let Command::Explain(args) = cli.command else {
            panic!("expected explain command");
        };
        assert_eq!(args.module, "src/a.ts");
        assert_eq!(args.graph.graph, Some(PathBuf::from("g.json")));
    }

    #[test]
    fn test_invalid_scope_is_rejected() {
        assert!(Cli::try_parse_from(["fob-split", "split", "--scope", "acme"]).is_err());
    }
}
