//! npm package name extraction for external specifiers.

/// Node.js core modules that never become package dependencies.
const NODE_BUILTINS: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster", "console", "constants",
    "crypto", "dgram", "diagnostics_channel", "dns", "domain", "events", "fs", "http", "http2",
    "https", "inspector", "module", "net", "os", "path", "perf_hooks", "process", "punycode",
    "querystring", "readline", "repl", "stream", "string_decoder", "sys", "timers", "tls",
    "trace_events", "tty", "url", "util", "v8", "vm", "wasi", "worker_threads", "zlib",
];

/// Extract the package name from an import specifier.
///
/// ```rust
/// use fob_graph::extract_package_name;
///
/// assert_eq!(extract_package_name("@babel/core/lib/index"), "@babel/core");
/// assert_eq!(extract_package_name("lodash/fp"), "lodash");
/// ```
pub fn extract_package_name(specifier: &str) -> &str {
    if specifier.is_empty() {
        return specifier;
    }

    // Handle scoped packages (@org/package)
    if specifier.starts_with('@') {
        if let Some(first_slash) = specifier.find('/') {
            if let Some(second_slash) = specifier[first_slash + 1..].find('/') {
                return &specifier[..first_slash + 1 + second_slash];
            }
        }
        return specifier;
    }

    // Non-scoped packages - take up to first slash
    match specifier.find('/') {
        Some(slash_idx) => &specifier[..slash_idx],
        None => specifier,
    }
}

/// Package name for a resolved path inside `node_modules/`.
///
/// Uses the segment after the last `node_modules/` so nested installs
/// resolve to the innermost package.
pub fn package_name_from_path(path: &str) -> Option<&str> {
    let marker = "node_modules/";
    let start = path.rfind(marker)? + marker.len();
    let name = extract_package_name(&path[start..]);
    (!name.is_empty()).then_some(name)
}

/// True for Node.js builtins (`fs`, `node:fs`, `fs/promises`).
pub fn is_node_builtin(specifier: &str) -> bool {
    if specifier.starts_with("node:") {
        return true;
    }
    let head = specifier.split('/').next().unwrap_or(specifier);
    NODE_BUILTINS.binary_search(&head).is_ok()
}
