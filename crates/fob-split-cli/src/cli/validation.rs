use fob_split::sanitize;

/// Validate an npm scope given on the command line (`@acme`).
pub fn parse_scope(s: &str) -> Result<String, String> {
    let Some(name) = s.strip_prefix('@') else {
        return Err(format!("Scope must start with '@' (got '{s}')"));
    };

    if name.is_empty() {
        return Err("Scope name cannot be empty".to_string());
    }

    if sanitize(name) != name {
        return Err(format!(
            "Scope '{s}' may only contain lowercase letters, digits, '-' and '.'"
        ));
    }

    Ok(s.to_string())
}

/// Validate an allow-list entry: a package name or `@scope/*`.
pub fn parse_allow_pattern(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Allowed dependency cannot be empty".to_string());
    }

    if trimmed.contains('*') {
        let valid = trimmed
            .strip_prefix('@')
            .and_then(|rest| rest.strip_suffix("/*"))
            .is_some_and(|scope| !scope.is_empty() && !scope.contains(['/', '*']));
        if !valid {
            return Err(format!(
                "Wildcards are only supported as '@scope/*' (got '{trimmed}')"
            ));
        }
    }

    Ok(trimmed.to_string())
}
