//! Run a client against an environment or group.

use anyhow::Result;
use tracing::debug;

use crate::client::{ClientProfile, PrefixMatch};
use crate::config::Config;
use crate::environ::BaseEnv;
use crate::error::DispatchError;
use crate::executor::{self, ExecOptions};
use crate::plan::PlanContext;
use crate::platform::{ProcessRunner, SecretStore};

/// Everything the operator asked for on the command line.
pub struct RunRequest<'a> {
    pub environment: &'a str,
    pub client_args: &'a [String],
    pub prefix_match: PrefixMatch,
    pub exec: ExecOptions,
}

/// Reject invocations with nothing to forward. Checked before the
/// configuration is read.
pub fn check_client_args(client_args: &[String]) -> Result<(), DispatchError> {
    if client_args.is_empty() {
        return Err(DispatchError::MissingClientArgs);
    }
    Ok(())
}

/// Build the full run plan, then execute it. Returns the exit code of the
/// last target; nothing is spawned if validation or resolution fails.
pub fn run(
    config: &Config,
    profile: &ClientProfile,
    request: &RunRequest,
    base_env: &BaseEnv,
    store: &impl SecretStore,
    runner: &impl ProcessRunner,
) -> Result<i32> {
    check_client_args(request.client_args)?;

    let plan = PlanContext {
        config,
        profile,
        prefix_match: request.prefix_match,
        base_env,
        store,
    }
    .build(request.environment)?;
    debug!(
        "Run plan for {}: {} target(s)",
        request.environment,
        plan.len()
    );

    Ok(executor::run(&plan, request.client_args, &request.exec, runner))
}
