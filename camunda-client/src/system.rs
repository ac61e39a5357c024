//! Access to the host: environment variables and local files.

use std::io;
use std::path::Path;

pub trait System: Send + Sync {
    fn get_environment_variable(&self, name: &str) -> Option<String>;

    fn is_file(&self, path: &Path) -> bool;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// The real process environment and filesystem. Relative paths resolve against the current
/// working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSystem;

impl System for OsSystem {
    fn get_environment_variable(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
