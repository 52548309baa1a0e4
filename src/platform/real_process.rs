//! Real process runner using `std::process::Command`.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::process::{Command, ExitStatus};

use super::ProcessRunner;

/// Real process runner: spawns the client with inherited stdio and waits.
pub struct RealProcessRunner;

impl ProcessRunner for RealProcessRunner {
    fn run(&self, program: &str, args: &[String], env: &BTreeMap<String, String>) -> Result<i32> {
        let status = Command::new(program)
            .args(args)
            .env_clear()
            .envs(env)
            .status()
            .with_context(|| format!("Failed to run `{program}`"))?;
        Ok(exit_code(status))
    }
}

/// Exit code of a finished child; a signal-terminated child maps to
/// `128 + signal` like a shell reports it.
#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match status.code() {
        Some(code) => code,
        None => 128 + status.signal().unwrap_or(0),
    }
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
