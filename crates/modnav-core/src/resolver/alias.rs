//! Webpack `resolve.alias` support.
//!
//! The alias map is read from a JSON bundler config at the project root. It is
//! opportunistic: a missing or broken config only disables this strategy.

use super::node::{resolve_node, ResolveContext};
use super::trace::{steps, warning_codes, ResolveTrace, ResolveTraceStep, TraceWarning};
use crate::config::{ProjectContext, Settings};
use crate::error::{Error, Result};
use modnav_util::{normalize, FileSystem};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Ordered alias -> target mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundlerAliasMap {
    entries: Vec<(String, String)>,
}

/// An alias that applies to a module name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasMatch<'a> {
    pub alias: &'a str,
    pub target: &'a str,
    /// The module name is the alias itself rather than a path below it.
    pub exact: bool,
}

impl BundlerAliasMap {
    /// Extract the alias object found at `pointer` (RFC 6901) inside `config`.
    ///
    /// Any shape mismatch yields an empty map. Non-string targets are skipped.
    #[must_use]
    pub fn from_config(config: &Value, pointer: &str) -> Self {
        let Some(Value::Object(aliases)) = config.pointer(pointer) else {
            return Self::default();
        };

        let entries = aliases
            .iter()
            .filter_map(|(alias, target)| {
                target
                    .as_str()
                    .map(|target| (alias.clone(), target.to_string()))
            })
            .collect();
        Self { entries }
    }

    /// Build a map from literal pairs, keeping their order.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The first alias, in config order, that `module_name` equals or lives under.
    #[must_use]
    pub fn find_match(&self, module_name: &str) -> Option<AliasMatch<'_>> {
        self.entries
            .iter()
            .find(|(alias, _)| alias_matches(alias, module_name))
            .map(|(alias, target)| AliasMatch {
                alias,
                target,
                exact: alias == module_name,
            })
    }
}

impl AliasMatch<'_> {
    /// Rewrite `module_name` through this alias.
    ///
    /// An exact match yields the target verbatim. Otherwise the result is
    /// `project_root/target/rest`, where `rest` is everything after the first
    /// `/` of the module name.
    #[must_use]
    pub fn rewrite(&self, module_name: &str, project_root: &Path) -> String {
        if self.exact {
            return self.target.to_string();
        }

        let rest = module_name.split_once('/').map_or("", |(_, rest)| rest);
        let target = self.target.trim_start_matches(['/', '\\']);
        let joined = normalize(&project_root.join(target).join(rest));
        joined.to_string_lossy().into_owned()
    }
}

/// `name` matches `alias` when equal to it or prefixed by `alias/`.
#[must_use]
pub fn alias_matches(alias: &str, name: &str) -> bool {
    name.strip_prefix(alias)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Read and parse the bundler config.
pub fn load_bundler_config(fs: &dyn FileSystem, path: &Path) -> Result<Value> {
    let content = fs.read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve `module_name` through the first matching bundler alias.
///
/// Does nothing unless `settings.webpack` is set. Config problems are logged
/// and treated as an empty alias map.
pub fn resolve_with_webpack_alias(
    ctx: &ResolveContext<'_>,
    project: &dyn ProjectContext,
    settings: &Settings,
    module_name: &str,
    trace: &mut ResolveTrace,
) -> Option<PathBuf> {
    if !settings.webpack {
        return None;
    }

    let Some(project_root) = project.project_root(&ctx.basedir) else {
        debug!(basedir = %ctx.basedir.display(), "No project root, skipping webpack aliases");
        trace.add_warning(TraceWarning::new(
            warning_codes::NO_PROJECT_ROOT,
            format!("No project root contains {}", ctx.basedir.display()),
        ));
        return None;
    };

    let config_path = project_root.join(&settings.webpack_config_filename);
    let aliases = match load_bundler_config(ctx.fs, &config_path) {
        Ok(config) => {
            let aliases = BundlerAliasMap::from_config(&config, &settings.webpack_alias_pointer);
            trace.add_step(
                ResolveTraceStep::new(
                    steps::LOAD_BUNDLER_CONFIG,
                    true,
                    format!("{} alias(es) loaded", aliases.len()),
                )
                .with_path(&config_path),
            );
            aliases
        }
        Err(e) => {
            warn!(error = %e, "Failed to load webpack config");
            trace.add_warning(TraceWarning::new(
                warning_codes::BUNDLER_CONFIG_UNREADABLE,
                e.to_string(),
            ));
            trace.add_step(
                ResolveTraceStep::new(steps::LOAD_BUNDLER_CONFIG, false, e.to_string())
                    .with_path(&config_path),
            );
            BundlerAliasMap::default()
        }
    };

    let Some(matched) = aliases.find_match(module_name) else {
        trace.failure(steps::MATCH_ALIAS, format!("No alias matches {module_name}"));
        return None;
    };
    let rewritten = matched.rewrite(module_name, &project_root);
    debug!(
        module = %module_name,
        alias = %matched.alias,
        rewritten = %rewritten,
        "Applied webpack alias"
    );
    trace.success(
        steps::MATCH_ALIAS,
        format!("{} -> {rewritten}", matched.alias),
    );

    let result = resolve_node(ctx, &rewritten);
    match result.resolved {
        Some(path) => {
            trace.add_step(
                ResolveTraceStep::new(steps::RESOLVE_ALIAS, true, "Alias target resolved")
                    .with_path(&path),
            );
            Some(path)
        }
        None => {
            trace.failure(
                steps::RESOLVE_ALIAS,
                format!("Alias target {rewritten} not found"),
            );
            None
        }
    }
}
