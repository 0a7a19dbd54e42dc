//! Source paths given relative to the current directory.
//!
//! Kept in its own test binary since it changes the process working directory.

use modnav_core::{resolve_module, RealFs, Resolution, ResolutionRequest, Workspace};
use std::env;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_relative_source_walks_above_current_dir() {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::create_dir_all(root.join("shared")).unwrap();
    fs::write(root.join("package.json"), r#"{"moduleRoots": "shared"}"#).unwrap();
    fs::write(root.join("shared/theme.js"), "").unwrap();
    let ws = Workspace::new([&root]);

    let previous = env::current_dir().unwrap();
    env::set_current_dir(root.join("sub")).unwrap();
    let relative = resolve_module(&RealFs, &ws, &ResolutionRequest::new("app.js", "theme"));
    let guessed = resolve_module(&RealFs, &ws, &ResolutionRequest::new("app.js", "./new"));
    env::set_current_dir(previous).unwrap();

    let expected = root.join("shared/theme.js");
    assert_eq!(relative.unwrap().filename(), Some(expected.as_path()));
    assert_eq!(
        guessed.unwrap(),
        Resolution::File {
            filename: root.join("sub/new.js")
        }
    );
}
