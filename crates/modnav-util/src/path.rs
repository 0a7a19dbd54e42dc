use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` segments and fold `..` into its parent.
///
/// The filesystem is not consulted, so symlinks are preserved. A `..` at the
/// root of an absolute path is discarded; leading `..` segments of a relative
/// path are kept. An empty result becomes `.`.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }

    out.iter().map(|c| c.as_os_str()).collect()
}
