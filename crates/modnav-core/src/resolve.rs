//! Jump-to-definition entry point.
//!
//! Strategies are tried in a fixed order and the first hit wins:
//!
//! 1. Node resolution (a core module becomes a documentation URL)
//! 2. Guessed path for relative names, even if the file does not exist yet
//! 3. `moduleRoots` from the nearest `package.json`
//! 4. Webpack aliases, when enabled
//!
//! A broken manifest fails the request. A broken webpack config does not.

use crate::config::{ProjectContext, Settings};
use crate::error::Result;
use crate::resolver::builtins::{is_builtin, NODE_SCHEME};
use crate::resolver::{
    resolve_node, resolve_with_custom_roots, resolve_with_webpack_alias, trace_steps as steps,
    ResolveContext, ResolveTrace, ResolveTraceStep, ResolverConfig, DEFAULT_EXTENSIONS,
};
use modnav_util::{normalize, FileSystem};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Base URL for core module documentation.
pub const BUILTIN_DOCS_BASE_URL: &str = "http://nodejs.org/api";

/// Extension appended to guessed relative paths that have none.
pub const GUESS_EXTENSION: &str = ".js";

/// A module reference to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// File containing the reference.
    pub source_file: PathBuf,
    /// The module string as written.
    pub module_name: String,
    /// Extensions to probe, in order.
    pub extensions: Vec<String>,
}

impl ResolutionRequest {
    /// Create a request probing [`DEFAULT_EXTENSIONS`].
    pub fn new(source_file: impl Into<PathBuf>, module_name: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            module_name: module_name.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }

    /// Probe these extensions instead. An empty list keeps the defaults.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Absolute, normalized directory containing the source file.
    ///
    /// A relative source file is taken relative to the current directory, so
    /// upward walks from here always end at the filesystem root.
    #[must_use]
    pub fn basedir(&self) -> PathBuf {
        let dir = match self.source_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if dir.is_absolute() {
            return normalize(dir);
        }
        match std::env::current_dir() {
            Ok(cwd) => normalize(&cwd.join(dir)),
            Err(_) => normalize(dir),
        }
    }
}

/// Where a module reference leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Resolution {
    /// A file on disk. Guessed relative paths may not exist yet.
    File { filename: PathBuf },
    /// Documentation for a core module.
    Url { url: String },
    /// No strategy produced a target.
    NotFound,
}

impl Resolution {
    /// The target file, if any.
    #[must_use]
    pub fn filename(&self) -> Option<&Path> {
        match self {
            Self::File { filename } => Some(filename.as_path()),
            _ => None,
        }
    }

    /// The documentation URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url { url } => Some(url.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Resolution together with the steps that produced it.
#[derive(Debug, Clone)]
pub struct ResolutionWithTrace {
    pub resolution: Resolution,
    pub trace: ResolveTrace,
}

/// Documentation URL for a core module. A `node:` prefix is dropped.
#[must_use]
pub fn builtin_docs_url(module_name: &str) -> String {
    let name = module_name.strip_prefix(NODE_SCHEME).unwrap_or(module_name);
    format!("{BUILTIN_DOCS_BASE_URL}/{name}.html")
}

/// Resolves module references against a filesystem and a project context.
pub struct ModuleResolver<'a> {
    fs: &'a dyn FileSystem,
    project: &'a dyn ProjectContext,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, project: &'a dyn ProjectContext) -> Self {
        Self { fs, project }
    }

    /// Resolve a request.
    ///
    /// # Errors
    /// Returns an error if the nearest `package.json` is unreadable, is not
    /// valid JSON, or declares a malformed `moduleRoots`.
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<Resolution> {
        self.resolve_inner(request, &mut ResolveTrace::new())
    }

    /// Resolve a request and record every strategy attempted.
    ///
    /// # Errors
    /// Same as [`ModuleResolver::resolve`].
    pub fn resolve_with_trace(&self, request: &ResolutionRequest) -> Result<ResolutionWithTrace> {
        let mut trace = ResolveTrace::new();
        let resolution = self.resolve_inner(request, &mut trace)?;
        Ok(ResolutionWithTrace { resolution, trace })
    }

    fn resolve_inner(
        &self,
        request: &ResolutionRequest,
        trace: &mut ResolveTrace,
    ) -> Result<Resolution> {
        let module_name = request.module_name.as_str();
        let basedir = request.basedir();
        let config = ResolverConfig::new(request.extensions.clone());
        let ctx = ResolveContext::new(self.fs, basedir.clone(), &config);

        let standard = resolve_node(&ctx, module_name);
        if let Some(resolved) = standard.resolved {
            // Node hands core modules back unchanged.
            if is_builtin(module_name) && resolved.as_os_str() == OsStr::new(module_name) {
                let url = builtin_docs_url(module_name);
                debug!(module = %module_name, url = %url, "Core module");
                trace.success(steps::BUILTIN, format!("Core module: {url}"));
                return Ok(Resolution::Url { url });
            }

            debug!(module = %module_name, path = %resolved.display(), "Resolved");
            trace.add_step(
                ResolveTraceStep::new(steps::STANDARD, true, "Node resolution")
                    .with_path(&resolved),
            );
            return Ok(Resolution::File { filename: resolved });
        }

        let reason = standard
            .reason
            .map_or_else(|| "unresolved".to_string(), |r| r.to_string());
        trace.failure(steps::STANDARD, format!("Node resolution failed: {reason}"));

        if module_name.starts_with('.') {
            let filename = guess_relative(&basedir, module_name);
            debug!(module = %module_name, path = %filename.display(), "Guessed relative path");
            trace.add_step(
                ResolveTraceStep::new(steps::GUESS_RELATIVE, true, "Guessed relative path")
                    .with_path(&filename),
            );
            return Ok(Resolution::File { filename });
        }

        if let Some(filename) = resolve_with_custom_roots(&ctx, module_name, trace)? {
            return Ok(Resolution::File { filename });
        }

        let settings = Settings::from_context(self.project);
        if let Some(filename) =
            resolve_with_webpack_alias(&ctx, self.project, &settings, module_name, trace)
        {
            return Ok(Resolution::File { filename });
        }

        debug!(module = %module_name, basedir = %basedir.display(), "No target found");
        trace.failure(steps::NOT_FOUND, format!("No target for {module_name}"));
        Ok(Resolution::NotFound)
    }
}

/// Resolve `request` with a one-off [`ModuleResolver`].
///
/// # Errors
/// See [`ModuleResolver::resolve`].
pub fn resolve_module(
    fs: &dyn FileSystem,
    project: &dyn ProjectContext,
    request: &ResolutionRequest,
) -> Result<Resolution> {
    ModuleResolver::new(fs, project).resolve(request)
}

/// `basedir/name`, with `.js` appended when the name has no extension.
fn guess_relative(basedir: &Path, module_name: &str) -> PathBuf {
    let mut guessed = module_name.to_string();
    if Path::new(module_name).extension().is_none() {
        guessed.push_str(GUESS_EXTENSION);
    }
    normalize(&basedir.join(guessed))
}
