use modnav_util::FileSystem;
use std::path::{Path, PathBuf};

/// Name of the project manifest.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Find the project root by walking up from `cwd` looking for `package.json` or `.git`.
///
/// Returns the first directory containing either marker, or `None` if neither is found.
#[must_use]
pub fn project_root(fs: &dyn FileSystem, cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors()
        .find(|dir| {
            let git = dir.join(".git");
            fs.is_file(&dir.join(MANIFEST_FILENAME)) || fs.is_dir(&git) || fs.is_file(&git)
        })
        .map(Path::to_path_buf)
}

/// Find the nearest `package.json`, starting at `basedir` itself and walking up.
///
/// The walk stops at the filesystem root.
#[must_use]
pub fn find_manifest(fs: &dyn FileSystem, basedir: &Path) -> Option<PathBuf> {
    basedir
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILENAME))
        .find(|candidate| fs.is_file(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modnav_util::{MemoryFs, RealFs};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_project_root_with_package_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let sub = dir.path().join("src").join("lib");
        fs::create_dir_all(&sub).unwrap();

        let root = project_root(&RealFs, &sub);
        assert_eq!(root, Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_project_root_with_git() {
        let fs = MemoryFs::new().with_dir("/repo/.git").with_dir("/repo/a/b");

        assert_eq!(
            project_root(&fs, Path::new("/repo/a/b")),
            Some(PathBuf::from("/repo"))
        );
    }

    #[test]
    fn test_project_root_not_found() {
        let fs = MemoryFs::new().with_dir("/a/b/c");
        assert_eq!(project_root(&fs, Path::new("/a/b/c")), None);
    }

    #[test]
    fn test_find_manifest_inclusive() {
        let fs = MemoryFs::new()
            .with_file("/proj/package.json", "{}")
            .with_file("/proj/src/package.json", "{}");

        assert_eq!(
            find_manifest(&fs, Path::new("/proj/src")),
            Some(PathBuf::from("/proj/src/package.json"))
        );
    }

    #[test]
    fn test_find_manifest_walks_up() {
        let fs = MemoryFs::new()
            .with_file("/proj/package.json", "{}")
            .with_dir("/proj/src/deep/er");

        assert_eq!(
            find_manifest(&fs, Path::new("/proj/src/deep/er")),
            Some(PathBuf::from("/proj/package.json"))
        );
    }

    #[test]
    fn test_find_manifest_terminates_at_root() {
        let fs = MemoryFs::new().with_dir("/x/y");
        assert_eq!(find_manifest(&fs, Path::new("/x/y")), None);
    }

    #[test]
    fn test_find_manifest_ignores_directory_named_package_json() {
        let fs = MemoryFs::new()
            .with_dir("/proj/src/package.json")
            .with_file("/proj/package.json", "{}");

        assert_eq!(
            find_manifest(&fs, Path::new("/proj/src")),
            Some(PathBuf::from("/proj/package.json"))
        );
    }
}
