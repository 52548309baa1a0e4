use clap::{Args, Parser};
use std::path::PathBuf;

/// Run an OpenStack client against a configured environment or group.
///
/// Everything after the environment name is passed to the client untouched.
#[derive(Parser, Debug)]
#[command(name = "multistack", trailing_var_arg = true)]
pub struct ClientCli {
    /// Command to run instead of the client's default executable
    #[arg(short = 'x', long)]
    pub executable: Option<String>,

    /// Show the client's debug output
    #[arg(short, long)]
    pub debug: bool,

    /// List all configured environments and exit
    #[arg(short, long)]
    pub list: bool,

    /// Client profile to use (default: from the invoked name, else openstack)
    #[arg(long)]
    pub client: Option<String>,

    /// Match credential prefixes against config keys exactly as written
    #[arg(long)]
    pub case_sensitive_prefixes: bool,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Environment (or group) to run the client against
    #[arg(required_unless_present = "list")]
    pub environment: Option<String>,

    /// Arguments for the client
    #[arg(allow_hyphen_values = true)]
    pub client_args: Vec<String>,
}

/// Manage multistack secrets in the OS keyring.
#[derive(Parser, Debug)]
#[command(name = "multistack-keyring")]
pub struct KeyringCli {
    #[command(flatten)]
    pub action: KeyringAction,

    /// Increase verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// One or more environments (or `global`), followed by the parameter
    #[arg(value_name = "ENV... PARAMETER", num_args = 2.., required = true)]
    pub targets: Vec<String>,
}

impl KeyringCli {
    /// Split the positional list into its environments and trailing parameter.
    pub fn environments_and_parameter(&self) -> (&[String], &str) {
        match self.targets.split_last() {
            Some((parameter, envs)) => (envs, parameter.as_str()),
            None => (&[], ""),
        }
    }
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct KeyringAction {
    /// Retrieve credentials from keychain storage
    #[arg(short, long)]
    pub get: bool,

    /// Store credentials in keychain storage
    #[arg(short, long)]
    pub set: bool,

    /// Delete credentials from keychain storage
    #[arg(short, long)]
    pub delete: bool,
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Read only this config file instead of the standard locations
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
