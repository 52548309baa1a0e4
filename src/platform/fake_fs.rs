//! In-memory filesystem fake for testing.
//!
//! Stores file contents in a `HashMap` with interior mutability via
//! `RefCell`, so configuration files can be added after construction.

use anyhow::{Result, bail};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::Fs;

/// In-memory filesystem for testing, no real I/O.
pub struct FakeFs {
    files: RefCell<HashMap<PathBuf, String>>,
    home: Option<PathBuf>,
    cwd: PathBuf,
}

impl FakeFs {
    /// Create a new fake filesystem with the given home directory, which is
    /// also the working directory.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            files: RefCell::new(HashMap::new()),
            cwd: home.clone(),
            home: Some(home),
        }
    }

    /// Create a filesystem where the home directory cannot be determined.
    pub fn without_home(cwd: impl Into<PathBuf>) -> Self {
        Self {
            files: RefCell::new(HashMap::new()),
            home: None,
            cwd: cwd.into(),
        }
    }

    /// Change the working directory reported by [`Fs::current_dir`].
    pub fn set_current_dir(&mut self, cwd: impl Into<PathBuf>) {
        self.cwd = cwd.into();
    }

    /// Add a file with content. Returns the previous content if one existed.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) -> Option<String> {
        self.files.borrow_mut().insert(path.into(), content.into())
    }
}

impl Fs for FakeFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        match self.files.borrow().get(path) {
            Some(content) => Ok(content.clone()),
            None => bail!("file not found: {}", path.display()),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.cwd.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_roundtrip() {
        let fs = FakeFs::new("/home/test");
        fs.add_file("/tmp/hello.txt", "hello world");
        assert_eq!(
            fs.read_to_string(Path::new("/tmp/hello.txt")).unwrap(),
            "hello world"
        );
        assert!(fs.is_file(Path::new("/tmp/hello.txt")));
    }

    #[test]
    fn test_missing_file_fails() {
        let fs = FakeFs::new("/home/test");
        assert!(fs.read_to_string(Path::new("/nope")).is_err());
        assert!(!fs.is_file(Path::new("/nope")));
    }

    #[test]
    fn test_home_and_cwd() {
        let mut fs = FakeFs::new("/home/test");
        assert_eq!(fs.home_dir(), Some(PathBuf::from("/home/test")));
        assert_eq!(fs.current_dir().unwrap(), PathBuf::from("/home/test"));
        fs.set_current_dir("/srv/project");
        assert_eq!(fs.current_dir().unwrap(), PathBuf::from("/srv/project"));
        assert_eq!(FakeFs::without_home("/").home_dir(), None);
    }
}
