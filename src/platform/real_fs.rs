//! Real filesystem implementation delegating to `std::fs` and `dirs`.
//!
//! Methods return bare errors without added context, callers add their own
//! `.with_context()` messages for domain-specific error descriptions.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::Fs;

/// Real filesystem: delegates every operation to the OS.
pub struct RealFs;

impl Fs for RealFs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }
}
