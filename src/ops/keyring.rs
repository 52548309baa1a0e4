//! Get, set, or delete a parameter's secret for one or more environments.
//!
//! Secrets live under `"<env>:<PARAM>"`, the same keys a bare `USE_KEYRING`
//! reads. Reading or deleting asks the operator to type `yes` first; setting
//! prompts once for the value and stores it for every listed environment.
//! A failure for one environment is reported and the rest still run.

use anyhow::Result;
use tracing::debug;

use crate::credentials::{GLOBAL_SCOPE, store_key};
use crate::error::DispatchError;
use crate::notice;
use crate::platform::{Prompter, SecretStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyringOp {
    Get,
    Set,
    Delete,
}

/// Per-environment outcome counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyringReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl KeyringReport {
    fn record(&mut self, ok: bool, env: &str, parameter: &str) {
        let label = format!("{env}->{parameter}");
        if ok {
            self.succeeded += 1;
            notice::notice("Success", &label);
        } else {
            self.failed += 1;
            notice::error("Failed", &label);
        }
    }
}

/// Store key for `parameter` in `env`. Environment-scoped parameters are
/// upper-cased to match resolved credential names; `global` identifiers are
/// used as written.
pub fn keyring_key(env: &str, parameter: &str) -> String {
    if env == GLOBAL_SCOPE {
        store_key(env, parameter)
    } else {
        store_key(env, &parameter.to_ascii_uppercase())
    }
}

pub fn run(
    op: KeyringOp,
    envs: &[String],
    parameter: &str,
    store: &impl SecretStore,
    prompter: &impl Prompter,
) -> Result<KeyringReport> {
    let mut envs = envs.to_vec();
    envs.sort();

    let report = match op {
        KeyringOp::Get => get(&envs, parameter, store, prompter)?,
        KeyringOp::Set => set(&envs, parameter, store, prompter)?,
        KeyringOp::Delete => delete(&envs, parameter, store, prompter)?,
    };

    println!();
    let closing = match op {
        KeyringOp::Get => {
            "If you encountered a failure retrieving the credentials then there\n\
             are likely no credentials stored for that environment/parameter combination."
        }
        KeyringOp::Set => {
            "If you encountered a failure storing any of the credentials then you\n\
             should check your keyring configuration."
        }
        KeyringOp::Delete => {
            "If you encountered a failure deleting any of the credentials then you\n\
             should check your keyring configuration."
        }
    };
    notice::notice("Complete", closing);
    Ok(report)
}

fn get(
    envs: &[String],
    parameter: &str,
    store: &impl SecretStore,
    prompter: &impl Prompter,
) -> Result<KeyringReport> {
    notice::error(
        "Warning",
        &format!(
            "If this operation is successful, the '{parameter}' credentials stored\n\
             for the following environments will be displayed in your terminal as plain text."
        ),
    );
    print_targets(envs, parameter);
    confirm(prompter)?;

    let mut report = KeyringReport::default();
    for env in envs {
        let key = keyring_key(env, parameter);
        match store.get(&key) {
            Ok(Some(value)) => {
                report.succeeded += 1;
                notice::notice("Success", &format!("{env}->{parameter}: {value}"));
            }
            Ok(None) => report.record(false, env, parameter),
            Err(e) => {
                debug!("Reading {key} failed: {e}");
                report.record(false, env, parameter);
            }
        }
    }
    Ok(report)
}

fn set(
    envs: &[String],
    parameter: &str,
    store: &impl SecretStore,
    prompter: &impl Prompter,
) -> Result<KeyringReport> {
    notice::notice(
        "Keyring operation",
        "Preparing to set a password in the keyring for:",
    );
    print_targets(envs, parameter);
    let Some(secret) = prompter.secret(
        "If this is correct, enter the corresponding credential to store in your keyring \
         or press CTRL-D to abort",
    )?
    else {
        return Err(DispatchError::Canceled.into());
    };

    let mut report = KeyringReport::default();
    for env in envs {
        let key = keyring_key(env, parameter);
        let ok = match store.set(&key, &secret) {
            Ok(()) => true,
            Err(e) => {
                debug!("Storing {key} failed: {e}");
                false
            }
        };
        report.record(ok, env, parameter);
    }
    Ok(report)
}

fn delete(
    envs: &[String],
    parameter: &str,
    store: &impl SecretStore,
    prompter: &impl Prompter,
) -> Result<KeyringReport> {
    notice::notice(
        "Keyring operation",
        "Preparing to delete a password in the keyring for:",
    );
    print_targets(envs, parameter);
    confirm(prompter)?;

    let mut report = KeyringReport::default();
    for env in envs {
        let key = keyring_key(env, parameter);
        let ok = match store.delete(&key) {
            Ok(removed) => removed,
            Err(e) => {
                debug!("Deleting {key} failed: {e}");
                false
            }
        };
        report.record(ok, env, parameter);
    }
    Ok(report)
}

fn confirm(prompter: &impl Prompter) -> Result<()> {
    if !prompter.confirm_yes("If you really want to proceed, type yes and press enter")? {
        return Err(DispatchError::Canceled.into());
    }
    Ok(())
}

fn print_targets(envs: &[String], parameter: &str) {
    println!(
        "  - Environments : {}",
        envs.join("\n                   ")
    );
    println!("  - Parameter    : {parameter}");
    println!();
}
