//! Node-style module resolution.
//!
//! Supports:
//! - Core modules (echoed back unchanged)
//! - Relative specifiers: `./`, `../`, `.`, `..`
//! - Absolute filesystem specifiers
//! - Bare specifiers with `node_modules` lookup
//! - Extension probing (appended, in configured order)
//! - Directory resolution (`package.json` main, `index.*`)

use super::builtins::is_builtin;
use modnav_util::{normalize, FileSystem};
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default extensions for probing, in Node's `require.extensions` order.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".json", ".node"];

/// Maximum number of tried paths to record.
const MAX_TRIED_PATHS: usize = 20;

/// Resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    extensions: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl ResolverConfig {
    /// Create a config probing the given extensions.
    ///
    /// An empty list falls back to [`DEFAULT_EXTENSIONS`].
    #[must_use]
    pub fn new(extensions: Vec<String>) -> Self {
        if extensions.is_empty() {
            return Self::default();
        }
        Self { extensions }
    }

    /// Extensions to probe, in order. Never empty.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

/// Context for resolution.
#[derive(Clone)]
pub struct ResolveContext<'a> {
    /// Filesystem to probe.
    pub fs: &'a dyn FileSystem,
    /// Directory that relative specifiers resolve against.
    pub basedir: PathBuf,
    /// Resolver configuration.
    pub config: &'a ResolverConfig,
}

impl std::fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveContext")
            .field("basedir", &self.basedir)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> ResolveContext<'a> {
    /// Create a context.
    pub fn new(
        fs: &'a dyn FileSystem,
        basedir: impl Into<PathBuf>,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            fs,
            basedir: basedir.into(),
            config,
        }
    }

    /// Same filesystem and config, different base directory.
    #[must_use]
    pub fn with_basedir(&self, basedir: impl Into<PathBuf>) -> Self {
        Self {
            fs: self.fs,
            basedir: basedir.into(),
            config: self.config,
        }
    }
}

/// Resolution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStatus {
    Resolved,
    Unresolved,
}

/// Reason codes for unresolved specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveReasonCode {
    SpecifierInvalid,
    NotFound,
    IsDirectory,
    NodeModulesNotFound,
}

impl std::fmt::Display for ResolveReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SpecifierInvalid => "SPECIFIER_INVALID",
            Self::NotFound => "NOT_FOUND",
            Self::IsDirectory => "IS_DIRECTORY",
            Self::NodeModulesNotFound => "NODE_MODULES_NOT_FOUND",
        };
        write!(f, "{s}")
    }
}

/// Resolution result.
///
/// For core modules `resolved` holds the specifier itself, unchanged.
#[derive(Debug, Clone)]
pub struct ResolveResult {
    /// Resolved path (if successful).
    pub resolved: Option<PathBuf>,
    /// Status.
    pub status: ResolveStatus,
    /// Reason code if unresolved.
    pub reason: Option<ResolveReasonCode>,
    /// Candidate paths tried (capped).
    pub tried: Vec<PathBuf>,
}

impl ResolveResult {
    fn resolved(path: PathBuf, tried: Vec<PathBuf>) -> Self {
        Self {
            resolved: Some(path),
            status: ResolveStatus::Resolved,
            reason: None,
            tried,
        }
    }

    fn unresolved(reason: ResolveReasonCode, tried: Vec<PathBuf>) -> Self {
        Self {
            resolved: None,
            status: ResolveStatus::Unresolved,
            reason: Some(reason),
            tried,
        }
    }
}

/// Resolve a specifier the way Node's `require.resolve` does.
#[must_use]
pub fn resolve_node(ctx: &ResolveContext<'_>, spec: &str) -> ResolveResult {
    let mut tried = Vec::new();

    if spec.is_empty() {
        return ResolveResult::unresolved(ResolveReasonCode::SpecifierInvalid, tried);
    }

    if is_builtin(spec) {
        return ResolveResult::resolved(PathBuf::from(spec), tried);
    }

    if is_path_specifier(spec) {
        let base = normalize(&ctx.basedir.join(spec));
        let directory_only = spec == "." || spec == ".." || spec.ends_with('/');
        return resolve_path(ctx, &base, directory_only, &mut tried);
    }

    resolve_bare(ctx, spec, &mut tried)
}

/// Whether a specifier is resolved against the filesystem rather than `node_modules`.
fn is_path_specifier(spec: &str) -> bool {
    spec == "."
        || spec == ".."
        || spec.starts_with("./")
        || spec.starts_with("../")
        || is_absolute_path(spec)
}

/// Check if a specifier is an absolute path.
fn is_absolute_path(spec: &str) -> bool {
    // Unix absolute
    if spec.starts_with('/') {
        return true;
    }

    // Windows absolute: C:\, D:\, etc.
    let bytes = spec.as_bytes();
    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        return true;
    }

    // UNC path: \\server\share
    spec.starts_with("\\\\")
}

/// Resolve a path as a file, then as a directory.
fn resolve_path(
    ctx: &ResolveContext<'_>,
    base: &Path,
    directory_only: bool,
    tried: &mut Vec<PathBuf>,
) -> ResolveResult {
    if !directory_only {
        if let Some(file) = load_as_file(ctx, base, tried) {
            return ResolveResult::resolved(file, tried.clone());
        }
    }

    if let Some(file) = load_as_directory(ctx, base, tried) {
        return ResolveResult::resolved(file, tried.clone());
    }

    if ctx.fs.is_dir(base) {
        return ResolveResult::unresolved(ResolveReasonCode::IsDirectory, tried.clone());
    }

    ResolveResult::unresolved(ResolveReasonCode::NotFound, tried.clone())
}

/// Try `base` exactly, then `base` with each extension appended.
fn load_as_file(
    ctx: &ResolveContext<'_>,
    base: &Path,
    tried: &mut Vec<PathBuf>,
) -> Option<PathBuf> {
    add_tried(tried, base);
    if ctx.fs.is_file(base) {
        return Some(base.to_path_buf());
    }

    for ext in ctx.config.extensions() {
        let with_ext = append_extension(base, ext);
        add_tried(tried, &with_ext);

        if ctx.fs.is_file(&with_ext) {
            return Some(with_ext);
        }
    }

    None
}

/// Resolve a directory (package.json main > index.*).
fn load_as_directory(
    ctx: &ResolveContext<'_>,
    dir: &Path,
    tried: &mut Vec<PathBuf>,
) -> Option<PathBuf> {
    if let Some(main) = read_main_field(ctx, dir, tried) {
        let main_path = normalize(&dir.join(main));

        if let Some(file) = load_as_file(ctx, &main_path, tried) {
            return Some(file);
        }
        if let Some(index) = load_index(ctx, &main_path, tried) {
            return Some(index);
        }
    }

    load_index(ctx, dir, tried)
}

fn load_index(
    ctx: &ResolveContext<'_>,
    dir: &Path,
    tried: &mut Vec<PathBuf>,
) -> Option<PathBuf> {
    for ext in ctx.config.extensions() {
        let index = dir.join(format!("index{ext}"));
        add_tried(tried, &index);

        if ctx.fs.is_file(&index) {
            return Some(index);
        }
    }
    None
}

/// Read `main` from `dir/package.json`. Unreadable or invalid manifests are ignored.
fn read_main_field(
    ctx: &ResolveContext<'_>,
    dir: &Path,
    tried: &mut Vec<PathBuf>,
) -> Option<String> {
    let pkg_json_path = dir.join("package.json");
    if !ctx.fs.is_file(&pkg_json_path) {
        return None;
    }
    add_tried(tried, &pkg_json_path);

    let content = ctx.fs.read_to_string(&pkg_json_path).ok()?;
    let pkg_json: Value = serde_json::from_str(&content).ok()?;
    let main = pkg_json.get("main")?.as_str()?;

    match main {
        "" => None,
        "." | "./" => Some("index".to_string()),
        other => Some(other.to_string()),
    }
}

/// Resolve a bare specifier via `node_modules`.
fn resolve_bare(
    ctx: &ResolveContext<'_>,
    spec: &str,
    tried: &mut Vec<PathBuf>,
) -> ResolveResult {
    let mut found_node_modules = false;

    for dir in ctx.basedir.ancestors() {
        // Never look for node_modules/node_modules.
        if dir.file_name().is_some_and(|name| name == "node_modules") {
            continue;
        }

        let node_modules = dir.join("node_modules");
        if !ctx.fs.is_dir(&node_modules) {
            continue;
        }
        found_node_modules = true;

        let candidate = normalize(&node_modules.join(spec));
        if let Some(file) = load_as_file(ctx, &candidate, tried) {
            return ResolveResult::resolved(file, tried.clone());
        }
        if let Some(file) = load_as_directory(ctx, &candidate, tried) {
            return ResolveResult::resolved(file, tried.clone());
        }
    }

    if found_node_modules {
        ResolveResult::unresolved(ResolveReasonCode::NotFound, tried.clone())
    } else {
        ResolveResult::unresolved(ResolveReasonCode::NodeModulesNotFound, tried.clone())
    }
}

/// `foo/bar` + `.js` -> `foo/bar.js`, keeping any existing extension.
fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(ext);
    PathBuf::from(s)
}

/// Add a path to tried list (with cap).
fn add_tried(tried: &mut Vec<PathBuf>, path: &Path) {
    if tried.len() < MAX_TRIED_PATHS {
        tried.push(path.to_path_buf());
    }
}
