//! Error taxonomy for environment resolution and dispatch.
//!
//! Operations return `anyhow::Result`; these typed errors sit underneath so
//! `main` can downcast to pick a notice title and exit status, and so tests
//! can match on the exact failure.

use thiserror::Error;

/// Exit status for usage errors, matching clap's own.
pub const USAGE_EXIT_CODE: u8 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// Requested environment, or a group member, is not a configured section.
    #[error("{}", unknown_message(.env, .group.as_deref(), .suggestion.as_deref()))]
    UnknownEnvironment {
        env: String,
        group: Option<String>,
        suggestion: Option<String>,
    },

    #[error("Group '{group}' lists '{member}', which is itself a group. Nested groups are not supported.")]
    NestedGroupUnsupported { group: String, member: String },

    #[error("Could not resolve a non-empty value for {env}:{param}.")]
    CredentialResolution { env: String, param: String },

    #[error("No arguments were provided to pass along to the client.")]
    MissingClientArgs,

    #[error("Your keyring was not read or altered.")]
    Canceled,
}

impl DispatchError {
    /// Short label printed in front of the message.
    pub fn title(&self) -> &'static str {
        match self {
            DispatchError::UnknownEnvironment { .. } => "Missing environment",
            DispatchError::NestedGroupUnsupported { .. } => "Invalid group",
            DispatchError::CredentialResolution { .. } => "Missing credential",
            DispatchError::MissingClientArgs => "Missing client arguments",
            DispatchError::Canceled => "Canceled",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            DispatchError::MissingClientArgs => USAGE_EXIT_CODE,
            _ => 1,
        }
    }
}

fn unknown_message(env: &str, group: Option<&str>, suggestion: Option<&str>) -> String {
    let mut msg = match group {
        Some(group) => format!(
            "Group '{group}' lists environment '{env}', which is not in the multistack configuration file"
        ),
        None => format!("Environment '{env}' not in multistack configuration file"),
    };
    if let Some(suggestion) = suggestion {
        msg.push_str(&format!(" (did you mean '{suggestion}'?)"));
    }
    msg
}

/// Failure talking to the secret store backend itself.
///
/// A missing key is not an error at this level: [`SecretStore::get`] returns
/// `Ok(None)` for it.
///
/// [`SecretStore::get`]: crate::platform::SecretStore::get
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}
