//! Custom module roots declared in `package.json`.
//!
//! A project can list extra base directories under `moduleRoots`, either as a
//! single string or an array of strings. Bare module names that Node cannot
//! find are retried against each root in declared order.

use super::node::{resolve_node, ResolveContext};
use super::trace::{steps, ResolveTrace, ResolveTraceStep};
use crate::error::{Error, Result};
use crate::paths::find_manifest;
use modnav_util::{normalize, FileSystem};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Manifest field holding the custom roots.
pub const MODULE_ROOTS_FIELD: &str = "moduleRoots";

/// Module roots declared by the nearest manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRootsConfig {
    /// Manifest that declared the roots.
    pub manifest: PathBuf,
    /// Absolute roots, in declared order.
    pub roots: Vec<PathBuf>,
}

/// Load `moduleRoots` from the nearest `package.json` at or above `basedir`.
///
/// Returns `Ok(None)` when there is no manifest or it declares no roots.
/// A manifest that cannot be read or parsed is an error.
pub fn load_module_roots(
    fs: &dyn FileSystem,
    basedir: &Path,
) -> Result<Option<ModuleRootsConfig>> {
    let Some(manifest) = find_manifest(fs, basedir) else {
        return Ok(None);
    };

    let content = fs
        .read_to_string(&manifest)
        .map_err(|source| Error::ManifestRead {
            path: manifest.clone(),
            source,
        })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| Error::ManifestParse {
        path: manifest.clone(),
        source,
    })?;

    let Some(field) = value.get(MODULE_ROOTS_FIELD) else {
        return Ok(None);
    };
    let declared = declared_roots(field).map_err(|message| Error::ManifestInvalid {
        path: manifest.clone(),
        message,
    })?;
    let Some(declared) = declared else {
        return Ok(None);
    };

    let manifest_dir = manifest.parent().unwrap_or_else(|| Path::new("."));
    let roots = declared
        .iter()
        .map(|root| normalize(&manifest_dir.join(root)))
        .collect();

    Ok(Some(ModuleRootsConfig { manifest, roots }))
}

/// Interpret the raw `moduleRoots` value. Falsy values declare nothing.
fn declared_roots(field: &Value) -> std::result::Result<Option<Vec<String>>, String> {
    match field {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(root) if root.is_empty() => Ok(None),
        Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0) => Ok(None),
        Value::String(root) => Ok(Some(vec![root.clone()])),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    format!("`{MODULE_ROOTS_FIELD}` entries must be strings, found {item}")
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Some),
        other => Err(format!(
            "`{MODULE_ROOTS_FIELD}` must be a string or an array of strings, found {other}"
        )),
    }
}

/// Resolve `module_name` against each declared module root in order.
///
/// The name is forced relative (`./name`) so it is looked up inside each root
/// instead of through `node_modules`. Misses under a root are skipped.
pub fn resolve_with_custom_roots(
    ctx: &ResolveContext<'_>,
    module_name: &str,
    trace: &mut ResolveTrace,
) -> Result<Option<PathBuf>> {
    let Some(config) = load_module_roots(ctx.fs, &ctx.basedir)? else {
        trace.failure(steps::FIND_MANIFEST, "No module roots declared");
        return Ok(None);
    };
    trace.add_step(
        ResolveTraceStep::new(
            steps::FIND_MANIFEST,
            true,
            format!("{} module root(s) declared", config.roots.len()),
        )
        .with_path(&config.manifest),
    );

    let spec = format!("./{module_name}");
    for root in &config.roots {
        let result = resolve_node(&ctx.with_basedir(root), &spec);
        if let Some(path) = result.resolved {
            debug!(
                module = %module_name,
                root = %root.display(),
                path = %path.display(),
                "Resolved under module root"
            );
            trace.add_step(
                ResolveTraceStep::new(
                    steps::MODULE_ROOT,
                    true,
                    format!("Found under {}", root.display()),
                )
                .with_path(&path),
            );
            return Ok(Some(path));
        }

        debug!(module = %module_name, root = %root.display(), "Not under module root");
        trace.add_step(
            ResolveTraceStep::new(
                steps::MODULE_ROOT,
                false,
                format!("Not found under {}", root.display()),
            )
            .with_path(root),
        );
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::node::ResolverConfig;
    use modnav_util::MemoryFs;

    fn resolve(fs: &MemoryFs, basedir: &str, name: &str) -> Result<Option<PathBuf>> {
        let config = ResolverConfig::default();
        let ctx = ResolveContext::new(fs, basedir, &config);
        resolve_with_custom_roots(&ctx, name, &mut ResolveTrace::new())
    }

    #[test]
    fn test_load_roots_array() {
        let fs = MemoryFs::new()
            .with_file(
                "/proj/package.json",
                r#"{"moduleRoots": ["src", "../shared"]}"#,
            )
            .with_dir("/proj/src/app");

        let config = load_module_roots(&fs, Path::new("/proj/src/app"))
            .unwrap()
            .unwrap();
        assert_eq!(config.manifest, PathBuf::from("/proj/package.json"));
        assert_eq!(
            config.roots,
            vec![PathBuf::from("/proj/src"), PathBuf::from("/shared")]
        );
    }

    #[test]
    fn test_load_roots_scalar() {
        let fs =
            MemoryFs::new().with_file("/proj/package.json", r#"{"moduleRoots": "shared"}"#);

        let config = load_module_roots(&fs, Path::new("/proj")).unwrap().unwrap();
        assert_eq!(config.roots, vec![PathBuf::from("/proj/shared")]);
    }

    #[test]
    fn test_load_roots_absolute_entry() {
        let fs =
            MemoryFs::new().with_file("/proj/package.json", r#"{"moduleRoots": ["/opt/js"]}"#);

        let config = load_module_roots(&fs, Path::new("/proj")).unwrap().unwrap();
        assert_eq!(config.roots, vec![PathBuf::from("/opt/js")]);
    }

    #[test]
    fn test_load_roots_absent() {
        let fs = MemoryFs::new()
            .with_file("/proj/package.json", r#"{"name": "app"}"#)
            .with_dir("/other");

        assert_eq!(load_module_roots(&fs, Path::new("/proj")).unwrap(), None);
        assert_eq!(load_module_roots(&fs, Path::new("/other")).unwrap(), None);
    }

    #[test]
    fn test_load_roots_falsy_values() {
        for raw in [
            r#"{"moduleRoots": ""}"#,
            r#"{"moduleRoots": null}"#,
            r#"{"moduleRoots": false}"#,
            r#"{"moduleRoots": 0}"#,
            r#"{"moduleRoots": -0.0}"#,
        ] {
            let fs = MemoryFs::new().with_file("/proj/package.json", raw);
            assert_eq!(
                load_module_roots(&fs, Path::new("/proj")).unwrap(),
                None,
                "{raw}"
            );
        }
    }

    #[test]
    fn test_load_roots_nearest_manifest_only() {
        let fs = MemoryFs::new()
            .with_file("/proj/package.json", r#"{"moduleRoots": ["src"]}"#)
            .with_file("/proj/packages/a/package.json", r#"{"name": "a"}"#);

        assert_eq!(
            load_module_roots(&fs, Path::new("/proj/packages/a")).unwrap(),
            None
        );
    }

    #[test]
    fn test_load_roots_invalid_json() {
        let fs = MemoryFs::new().with_file("/proj/package.json", "{ moduleRoots: [");

        let err = load_module_roots(&fs, Path::new("/proj")).unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
    }

    #[test]
    fn test_load_roots_wrong_type() {
        let fs =
            MemoryFs::new().with_file("/proj/package.json", r#"{"moduleRoots": ["src", 3]}"#);

        let err = load_module_roots(&fs, Path::new("/proj")).unwrap_err();
        assert!(matches!(err, Error::ManifestInvalid { .. }));
        assert!(err.is_manifest_error());
    }

    #[test]
    fn test_load_roots_nonzero_number() {
        let fs = MemoryFs::new().with_file("/proj/package.json", r#"{"moduleRoots": 1}"#);

        let err = load_module_roots(&fs, Path::new("/proj")).unwrap_err();
        assert!(matches!(err, Error::ManifestInvalid { .. }));
    }

    #[test]
    fn test_resolve_first_root_wins() {
        let fs = MemoryFs::new()
            .with_file("/proj/package.json", r#"{"moduleRoots": ["src", "lib"]}"#)
            .with_file("/proj/src/util.js", "")
            .with_file("/proj/lib/util.js", "");

        assert_eq!(
            resolve(&fs, "/proj", "util").unwrap(),
            Some(PathBuf::from("/proj/src/util.js"))
        );
    }

    #[test]
    fn test_resolve_falls_through_roots() {
        let fs = MemoryFs::new()
            .with_file("/proj/package.json", r#"{"moduleRoots": ["src", "lib"]}"#)
            .with_dir("/proj/src")
            .with_file("/proj/lib/helpers/index.js", "");

        let config = ResolverConfig::default();
        let ctx = ResolveContext::new(&fs, "/proj/app", &config);
        let mut trace = ResolveTrace::new();
        let found = resolve_with_custom_roots(&ctx, "helpers", &mut trace).unwrap();

        assert_eq!(found, Some(PathBuf::from("/proj/lib/helpers/index.js")));
        let roots: Vec<_> = trace
            .steps
            .iter()
            .filter(|s| s.step == steps::MODULE_ROOT)
            .map(|s| s.ok)
            .collect();
        assert_eq!(roots, vec![false, true]);
    }

    #[test]
    fn test_resolve_no_root_matches() {
        let fs = MemoryFs::new()
            .with_file("/proj/package.json", r#"{"moduleRoots": "src"}"#)
            .with_dir("/proj/src");

        assert_eq!(resolve(&fs, "/proj", "missing").unwrap(), None);
    }

    #[test]
    fn test_resolve_without_manifest() {
        let fs = MemoryFs::new().with_file("/proj/src/util.js", "");

        assert_eq!(resolve(&fs, "/proj", "util").unwrap(), None);
    }
}
