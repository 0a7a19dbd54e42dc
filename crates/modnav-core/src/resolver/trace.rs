//! Resolution tracing.
//!
//! Records which strategies were attempted for a module reference and why
//! each one succeeded or fell through.

use std::path::PathBuf;

/// A single step in the resolution trace.
#[derive(Debug, Clone)]
pub struct ResolveTraceStep {
    /// Step name (one of the constants in [`steps`])
    pub step: &'static str,
    /// Whether this step succeeded
    pub ok: bool,
    /// Human-readable description of what happened
    pub detail: String,
    /// File path involved in this step, if any
    pub path: Option<PathBuf>,
}

impl ResolveTraceStep {
    /// Create a new trace step.
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            path: None,
        }
    }

    /// Set the path for this step.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Warning generated during resolution.
#[derive(Debug, Clone)]
pub struct TraceWarning {
    /// Warning code (one of the constants in [`warning_codes`])
    pub code: &'static str,
    /// Human-readable warning message
    pub message: String,
}

impl TraceWarning {
    /// Create a new warning.
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Complete resolution trace.
#[derive(Debug, Clone, Default)]
pub struct ResolveTrace {
    /// Ordered list of resolution steps
    pub steps: Vec<ResolveTraceStep>,
    /// Warnings generated during resolution
    pub warnings: Vec<TraceWarning>,
}

impl ResolveTrace {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to the trace.
    pub fn add_step(&mut self, step: ResolveTraceStep) {
        self.steps.push(step);
    }

    /// Add a warning to the trace.
    pub fn add_warning(&mut self, warning: TraceWarning) {
        self.warnings.push(warning);
    }

    /// Add a simple success step.
    pub fn success(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, true, detail));
    }

    /// Add a simple failure step.
    pub fn failure(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, false, detail));
    }

    /// Names of the steps recorded so far, in order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step).collect()
    }

    /// The last successful step, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&ResolveTraceStep> {
        self.steps.iter().rev().find(|s| s.ok)
    }
}

/// Step names used in resolution tracing.
pub mod steps {
    pub const STANDARD: &str = "standard";
    pub const BUILTIN: &str = "builtin";
    pub const GUESS_RELATIVE: &str = "guess_relative";
    pub const FIND_MANIFEST: &str = "find_manifest";
    pub const MODULE_ROOT: &str = "module_root";
    pub const LOAD_BUNDLER_CONFIG: &str = "load_bundler_config";
    pub const MATCH_ALIAS: &str = "match_alias";
    pub const RESOLVE_ALIAS: &str = "resolve_alias";
    pub const NOT_FOUND: &str = "not_found";
}

/// Warning codes used in resolution tracing.
pub mod warning_codes {
    pub const BUNDLER_CONFIG_UNREADABLE: &str = "bundler_config_unreadable";
    pub const NO_PROJECT_ROOT: &str = "no_project_root";
}
