//! Environment groups: a section carrying `MULTISTACK_GROUP = a,b,c` is an
//! alias that fans out to those environments, in that order.

use crate::config::{Config, Pairs};
use crate::error::DispatchError;

/// Reserved key marking a section as a group.
pub const GROUP_KEY: &str = "MULTISTACK_GROUP";

/// A configured environment, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Simple { name: String, pairs: Pairs },
    Group { name: String, members: Vec<String> },
}

impl Environment {
    /// Classify `env`; `None` if it is not configured.
    pub fn lookup(config: &Config, env: &str) -> Option<Self> {
        let pairs = config.pairs(env)?;
        if is_group(config, env) {
            Some(Environment::Group {
                name: env.to_string(),
                members: expand_group(config, env),
            })
        } else {
            Some(Environment::Simple {
                name: env.to_string(),
                pairs,
            })
        }
    }
}

/// True iff the section for `env` contains the group key.
pub fn is_group(config: &Config, env: &str) -> bool {
    config.value(env, GROUP_KEY).is_some()
}

/// Split the group key's value on `,`. Members are taken verbatim (no
/// trimming) and not checked against the config.
pub fn expand_group(config: &Config, env: &str) -> Vec<String> {
    config
        .value(env, GROUP_KEY)
        .map(|members| members.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

/// Check every member of `group`, in declared order: each must be a
/// configured environment and must not itself be a group.
pub fn validate_members(config: &Config, group: &str, members: &[String]) -> Result<(), DispatchError> {
    for member in members {
        if !config.contains(member) {
            return Err(config.unknown_environment(member, Some(group)));
        }
        if is_group(config, member) {
            return Err(DispatchError::NestedGroupUnsupported {
                group: group.to_string(),
                member: member.clone(),
            });
        }
    }
    Ok(())
}
