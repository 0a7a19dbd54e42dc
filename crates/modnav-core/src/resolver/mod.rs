//! Module resolution strategies.
//!
//! `node` is the standard Node lookup. `roots` and `alias` retry it with
//! project-specific overrides. `trace` records what each strategy did.

mod alias;
pub mod builtins;
mod node;
mod roots;
pub mod trace;

pub use alias::{
    alias_matches, load_bundler_config, resolve_with_webpack_alias, AliasMatch, BundlerAliasMap,
};
pub use node::{
    resolve_node, ResolveContext, ResolveReasonCode, ResolveResult, ResolveStatus, ResolverConfig,
    DEFAULT_EXTENSIONS,
};
pub use roots::{
    load_module_roots, resolve_with_custom_roots, ModuleRootsConfig, MODULE_ROOTS_FIELD,
};
pub use trace::{
    steps as trace_steps, warning_codes as trace_warning_codes, ResolveTrace, ResolveTraceStep,
    TraceWarning,
};
