use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem operations the fixer needs, rooted at the project directory.
pub trait Workspace {
    fn root(&self) -> &Path;

    fn exists(&self, relative: &Path) -> bool {
        self.root().join(relative).exists()
    }

    fn remove_dir_all(&self, relative: &Path) -> io::Result<()>;

    fn remove_file(&self, relative: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
}

impl LocalWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Workspace for LocalWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    fn remove_dir_all(&self, relative: &Path) -> io::Result<()> {
        fs::remove_dir_all(self.root.join(relative))
    }

    fn remove_file(&self, relative: &Path) -> io::Result<()> {
        fs::remove_file(self.root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists_is_relative_to_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").unwrap();

        let ws = LocalWorkspace::new(temp.path());
        assert!(ws.exists(Path::new("package.json")));
        assert!(!ws.exists(Path::new("package-lock.json")));
    }

    #[test]
    fn test_remove_dir_all_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("node_modules/expo/build");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("index.js"), "module.exports = {}").unwrap();

        let ws = LocalWorkspace::new(temp.path());
        ws.remove_dir_all(Path::new("node_modules")).unwrap();
        assert!(!temp.path().join("node_modules").exists());
    }

    #[test]
    fn test_remove_missing_file_errors() {
        let temp = TempDir::new().unwrap();
        let ws = LocalWorkspace::new(temp.path());
        let err = ws.remove_file(Path::new("package-lock.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
