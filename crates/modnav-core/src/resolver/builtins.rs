//! Node.js core module names.

/// Core modules that resolve with or without the `node:` prefix. Sorted.
const CORE_MODULES: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Core modules only reachable through the `node:` scheme. Sorted.
const NODE_SCHEME_ONLY: &[&str] = &["sea", "sqlite", "test", "test/reporters"];

/// Prefix for explicitly-scoped core modules.
pub const NODE_SCHEME: &str = "node:";

/// Whether `name` names a Node.js core module.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    match name.strip_prefix(NODE_SCHEME) {
        Some(bare) => {
            CORE_MODULES.binary_search(&bare).is_ok()
                || NODE_SCHEME_ONLY.binary_search(&bare).is_ok()
        }
        None => CORE_MODULES.binary_search(&name).is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_sorted() {
        assert!(CORE_MODULES.windows(2).all(|w| w[0] < w[1]));
        assert!(NODE_SCHEME_ONLY.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_core_modules() {
        assert!(is_builtin("fs"));
        assert!(is_builtin("fs/promises"));
        assert!(is_builtin("worker_threads"));
        assert!(is_builtin("node:path"));
    }

    #[test]
    fn test_node_scheme_only() {
        assert!(is_builtin("node:test"));
        assert!(!is_builtin("test"));
    }

    #[test]
    fn test_not_builtin() {
        assert!(!is_builtin("lodash"));
        assert!(!is_builtin("./fs"));
        assert!(!is_builtin("fs/extra"));
        assert!(!is_builtin("node:lodash"));
        assert!(!is_builtin(""));
    }
}
