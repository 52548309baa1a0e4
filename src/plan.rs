//! Builds the ordered run plan for one dispatcher invocation.
//!
//! All validation happens here, before anything is spawned: the environment
//! must exist, a group's members must all be simple environments, and every
//! member's credentials must resolve. Any failure aborts the whole plan.

use std::collections::BTreeMap;
use tracing::debug;

use crate::client::{ClientProfile, PrefixMatch};
use crate::config::Config;
use crate::credentials::{CredentialResolver, Credentials};
use crate::environ::BaseEnv;
use crate::error::DispatchError;
use crate::groups::{Environment, validate_members};
use crate::platform::SecretStore;

/// One resolved environment, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTarget {
    pub environment: String,
    pub executable: String,
    pub env: BTreeMap<String, String>,
}

/// Inputs shared by every target of a plan.
pub struct PlanContext<'a, S: SecretStore> {
    pub config: &'a Config,
    pub profile: &'a ClientProfile,
    pub prefix_match: PrefixMatch,
    pub base_env: &'a BaseEnv,
    pub store: &'a S,
}

impl<S: SecretStore> PlanContext<'_, S> {
    /// Build the run plan for `env`: one target for a simple environment, or
    /// one per member (in declared order) for a group.
    pub fn build(&self, env: &str) -> Result<Vec<RunTarget>, DispatchError> {
        let members = match Environment::lookup(self.config, env) {
            None => return Err(self.config.unknown_environment(env, None)),
            Some(Environment::Simple { name, .. }) => vec![name],
            Some(Environment::Group { name, members }) => {
                validate_members(self.config, &name, &members)?;
                debug!("Group {name} expands to {}", members.join(", "));
                members
            }
        };

        let matcher = self.profile.matcher(self.prefix_match);
        let resolver = CredentialResolver::new(&matcher, self.store);
        members
            .iter()
            .map(|member| {
                let pairs = match Environment::lookup(self.config, member) {
                    Some(Environment::Simple { pairs, .. }) => pairs,
                    Some(Environment::Group { .. }) => {
                        return Err(DispatchError::NestedGroupUnsupported {
                            group: env.to_string(),
                            member: member.clone(),
                        });
                    }
                    None => return Err(self.config.unknown_environment(member, Some(env))),
                };
                let credentials =
                    resolver.resolve(member, pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
                Ok(self.target(member, &credentials))
            })
            .collect()
    }

    fn target(&self, environment: &str, credentials: &Credentials) -> RunTarget {
        let executable = credentials
            .get(&self.profile.executable_override_key())
            .filter(|exe| !exe.is_empty())
            .unwrap_or(&self.profile.default_executable)
            .to_string();
        debug!(
            "{environment}: {} credential(s), executable {executable}",
            credentials.len()
        );
        RunTarget {
            environment: environment.to_string(),
            executable,
            env: self.base_env.overlay(credentials.iter()),
        }
    }
}
