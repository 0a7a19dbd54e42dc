use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only filesystem access used by the resolver.
///
/// Every lookup the resolver performs goes through this trait so that callers
/// can swap in an in-memory tree for tests or wrap the real disk with a cache.
pub trait FileSystem {
    /// Whether `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a file to a string.
    ///
    /// # Errors
    /// Returns an error if the file is missing or cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        read_to_string_lossy(path)
    }
}

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// In-memory filesystem tree.
///
/// Adding a file implicitly creates all of its ancestor directories.
/// Reads are recorded and can be inspected with [`MemoryFs::reads`].
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    reads: RefCell<Vec<PathBuf>>,
}

impl MemoryFs {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Add an empty directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_dir(path);
        self
    }

    /// Add a file with the given contents.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, contents.into());
    }

    /// Add a directory and all of its ancestors.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        let mut current = Some(path.into());
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            current = dir.parent().map(Path::to_path_buf);
            self.dirs.insert(dir);
        }
    }

    /// Paths passed to `read_to_string`, in call order.
    #[must_use]
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.borrow().clone()
    }
}

impl FileSystem for MemoryFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.reads.borrow_mut().push(path.to_path_buf());
        if let Some(contents) = self.files.get(path) {
            return Ok(contents.clone());
        }
        if self.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is a directory", path.display()),
            ));
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        ))
    }
}
