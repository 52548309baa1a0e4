//! Abstracted external dependencies for testability.
//!
//! Four traits cover all side effects: [`Fs`] for reading configuration files,
//! [`SecretStore`] for the OS keyring, [`ProcessRunner`] for launching client
//! executables, and [`Prompter`] for interactive confirmation.
//!
//! Production code uses the real implementations ([`RealFs`],
//! [`KeyringStore`], [`RealProcessRunner`], [`RealPrompter`]). Tests
//! substitute fakes via generics; no trait objects needed.

mod real_fs;
mod real_process;
mod real_prompt;
mod real_secret;

pub use real_fs::RealFs;
pub use real_process::RealProcessRunner;
pub use real_prompt::RealPrompter;
pub use real_secret::KeyringStore;

#[cfg(test)]
mod fake_fs;
#[cfg(test)]
mod fake_process;
#[cfg(test)]
mod fake_prompt;
#[cfg(test)]
mod fake_secret;

#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_fs::FakeFs;
#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_process::{FakeProcessRunner, SpawnRecord};
#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_prompt::FakePrompter;
#[cfg(test)]
#[allow(unused_imports)]
pub use self::fake_secret::FakeSecretStore;

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Read-only view of the filesystem used for configuration discovery.
pub trait Fs {
    /// Read the entire contents of a file as a UTF-8 string.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Check if a path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Return the user's home directory, if it can be determined.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Return the process's working directory.
    fn current_dir(&self) -> Result<PathBuf>;
}

// ---------------------------------------------------------------------------
// Secret store
// ---------------------------------------------------------------------------

/// Key/value secret backend addressed by `"<scope>:<PARAM>"` keys.
///
/// `get` separates a missing key (`Ok(None)`) from a backend that could not be
/// reached (`Err`).
pub trait SecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a secret. Returns `false` if there was nothing to delete.
    fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

// ---------------------------------------------------------------------------
// Process runner
// ---------------------------------------------------------------------------

/// Launches a client executable and blocks until it exits.
pub trait ProcessRunner {
    /// Run `program` with `args` and exactly the variables in `env`.
    ///
    /// Standard streams are inherited, not captured. Returns the exit code;
    /// errors mean the process could not be started at all.
    fn run(&self, program: &str, args: &[String], env: &BTreeMap<String, String>) -> Result<i32>;
}

// ---------------------------------------------------------------------------
// Prompter
// ---------------------------------------------------------------------------

/// Abstraction over interactive user prompts.
///
/// In production, delegates to `dialoguer`. In tests, returns predetermined answers.
pub trait Prompter {
    /// Ask the user to type `yes`. Anything else, including an aborted
    /// prompt, is `false`.
    fn confirm_yes(&self, prompt: &str) -> Result<bool>;

    /// Read a secret without echoing it. `None` if the prompt was aborted or
    /// left empty.
    fn secret(&self, prompt: &str) -> Result<Option<String>>;
}
