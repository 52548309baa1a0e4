mod cli;
mod client;
mod config;
mod credentials;
mod environ;
mod error;
mod executor;
mod groups;
mod notice;
mod ops;
mod paths;
mod plan;
mod platform;

#[cfg(test)]
mod test_helpers;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{ClientCli, CommonArgs, KeyringCli};
use client::{ClientProfile, DEFAULT_CLIENT, Invocation, PrefixMatch};
use config::Config;
use environ::BaseEnv;
use error::DispatchError;
use executor::ExecOptions;
use ops::keyring::KeyringOp;
use ops::run::RunRequest;
use platform::{KeyringStore, RealFs, RealProcessRunner, RealPrompter};

fn main() -> ExitCode {
    let argv0 = std::env::args_os()
        .next()
        .map(|a| a.to_string_lossy().into_owned())
        .unwrap_or_default();

    let result = match Invocation::from_program(&argv0) {
        Invocation::Keyring => run_keyring(KeyringCli::parse()),
        Invocation::Client(detected) => run_client(ClientCli::parse(), detected),
    };

    match result {
        Ok(code) => ExitCode::from(exit_byte(code)),
        Err(e) => match e.downcast_ref::<DispatchError>() {
            Some(dispatch) => {
                notice::error(dispatch.title(), &format!("{e:#}"));
                ExitCode::from(dispatch.exit_code())
            }
            None => {
                notice::error("Something broke", &format!("{e:#}"));
                ExitCode::FAILURE
            }
        },
    }
}

/// Process exit statuses are a single byte; wrap like the OS would.
fn exit_byte(code: i32) -> u8 {
    (code & 0xff) as u8
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "multistack=warn",
        1 => "multistack=info",
        2 => "multistack=debug",
        _ => "multistack=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load_config(common: &CommonArgs, base_env: &BaseEnv) -> Result<Config> {
    match &common.config {
        Some(path) => {
            let path = paths::expand_tilde(&path.to_string_lossy(), &RealFs);
            Config::load_file(Path::new(&path), &RealFs)
        }
        None => Config::discover(&RealFs, base_env),
    }
}

fn run_client(cli: ClientCli, detected: Option<String>) -> Result<i32> {
    init_tracing(cli.common.verbose);

    let client = cli
        .client
        .as_deref()
        .or(detected.as_deref())
        .unwrap_or(DEFAULT_CLIENT);
    let profile = ClientProfile::for_client(client);
    tracing::debug!("Using client profile {}", profile.name);

    let base_env = BaseEnv::capture();

    if cli.list {
        let config = load_config(&cli.common, &base_env)?;
        ops::list::run(&config);
        return Ok(0);
    }

    ops::run::check_client_args(&cli.client_args)?;
    let Some(environment) = cli.environment.as_deref() else {
        bail!("An environment is required");
    };

    let config = load_config(&cli.common, &base_env)?;
    let request = RunRequest {
        environment,
        client_args: &cli.client_args,
        prefix_match: if cli.case_sensitive_prefixes {
            PrefixMatch::Sensitive
        } else {
            PrefixMatch::Insensitive
        },
        exec: ExecOptions {
            executable_override: cli.executable.clone(),
            debug: cli.debug,
        },
    };

    ops::run::run(
        &config,
        &profile,
        &request,
        &base_env,
        &KeyringStore::new(),
        &RealProcessRunner,
    )
    .with_context(|| format!("Could not run {} against '{environment}'", profile.default_executable))
}

fn run_keyring(cli: KeyringCli) -> Result<i32> {
    init_tracing(cli.verbose);

    let op = if cli.action.get {
        KeyringOp::Get
    } else if cli.action.set {
        KeyringOp::Set
    } else {
        KeyringOp::Delete
    };
    let (envs, parameter) = cli.environments_and_parameter();

    let report = ops::keyring::run(op, envs, parameter, &KeyringStore::new(), &RealPrompter)?;
    Ok(if report.failed > 0 { 1 } else { 0 })
}
