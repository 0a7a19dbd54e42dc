#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

//! Resolve module references to a file or documentation URL for editor
//! jump-to-definition.

pub mod config;
pub mod error;
pub mod paths;
pub mod resolve;
pub mod resolver;

pub use config::{ProjectContext, Settings, Workspace};
pub use error::{Error, Result};
pub use modnav_util::{FileSystem, MemoryFs, RealFs};
pub use resolve::{
    builtin_docs_url, resolve_module, ModuleResolver, Resolution, ResolutionRequest,
    ResolutionWithTrace,
};
pub use resolver::{
    resolve_node, BundlerAliasMap, ModuleRootsConfig, ResolveContext, ResolveResult,
    ResolveStatus, ResolveTrace, ResolverConfig,
};
