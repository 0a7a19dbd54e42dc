//! Editor-facing configuration: project roots and resolver settings.

use crate::paths;
use modnav_util::FileSystem;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Setting keys understood by the resolver.
pub mod keys {
    /// Enables bundler alias resolution (bool).
    pub const WEBPACK: &str = "webpack";
    /// Bundler config filename, relative to the project root (string).
    pub const WEBPACK_CONFIG_FILENAME: &str = "webpackConfigFilename";
    /// JSON pointer to the alias object inside the bundler config (string).
    pub const WEBPACK_ALIAS_POINTER: &str = "webpackAliasPointer";
}

/// Default bundler config filename.
pub const DEFAULT_WEBPACK_CONFIG_FILENAME: &str = "webpack.config.json";

/// Default location of the alias map: `plugins[2][1].alias`.
pub const DEFAULT_WEBPACK_ALIAS_POINTER: &str = "/plugins/2/1/alias";

/// Capabilities the resolver needs from its host editor.
pub trait ProjectContext {
    /// The project root directory that contains `path`, if any.
    fn project_root(&self, path: &Path) -> Option<PathBuf>;

    /// Look up a setting by key.
    fn setting(&self, key: &str) -> Option<Value>;
}

/// Typed view of the resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Whether bundler aliases are consulted.
    pub webpack: bool,
    /// Bundler config filename, relative to the project root.
    pub webpack_config_filename: String,
    /// JSON pointer to the alias object inside the bundler config.
    pub webpack_alias_pointer: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webpack: false,
            webpack_config_filename: DEFAULT_WEBPACK_CONFIG_FILENAME.to_string(),
            webpack_alias_pointer: DEFAULT_WEBPACK_ALIAS_POINTER.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from a project context.
    ///
    /// Missing keys and values of the wrong type fall back to the defaults.
    #[must_use]
    pub fn from_context(ctx: &dyn ProjectContext) -> Self {
        let defaults = Self::default();
        let string_setting = |key: &str, default: String| {
            ctx.setting(key)
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or(default)
        };

        Self {
            webpack: ctx
                .setting(keys::WEBPACK)
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.webpack),
            webpack_config_filename: string_setting(
                keys::WEBPACK_CONFIG_FILENAME,
                defaults.webpack_config_filename,
            ),
            webpack_alias_pointer: string_setting(
                keys::WEBPACK_ALIAS_POINTER,
                defaults.webpack_alias_pointer,
            ),
        }
    }

    /// Enable or disable bundler aliases.
    #[must_use]
    pub fn with_webpack(mut self, enabled: bool) -> Self {
        self.webpack = enabled;
        self
    }

    /// Set the bundler config filename.
    #[must_use]
    pub fn with_webpack_config_filename(mut self, filename: impl Into<String>) -> Self {
        self.webpack_config_filename = filename.into();
        self
    }
}

/// A project context backed by a list of roots and a settings map.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    roots: Vec<PathBuf>,
    settings: Map<String, Value>,
}

impl Workspace {
    /// Create a workspace with the given project roots.
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            settings: Map::new(),
        }
    }

    /// Create a workspace whose single root is discovered by walking up from `start`.
    ///
    /// See [`paths::project_root`]. No root is registered when nothing is found.
    #[must_use]
    pub fn discover(fs: &dyn FileSystem, start: &Path) -> Self {
        Self::new(paths::project_root(fs, start))
    }

    /// Set a single setting.
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Set every key of `settings`.
    #[must_use]
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if let Ok(Value::Object(map)) = serde_json::to_value(settings) {
            self.settings.extend(map);
        }
        self
    }

    /// Registered project roots.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ProjectContext for Workspace {
    fn project_root(&self, path: &Path) -> Option<PathBuf> {
        // Nested roots: the innermost one wins.
        self.roots
            .iter()
            .filter(|root| path.starts_with(root))
            .max_by_key(|root| root.components().count())
            .cloned()
    }

    fn setting(&self, key: &str) -> Option<Value> {
        self.settings.get(key).cloned()
    }
}
