//! Client profiles and invocation-name detection.
//!
//! Each supported OpenStack client differs only by its default executable and
//! the config-key prefixes it claims, so a profile is plain data selected at
//! startup from the name the binary was invoked as (`multinova`,
//! `multiheat-keyring`, ...).

use std::path::Path;

/// Prefixes every client recognizes.
pub const BASE_PREFIXES: &[&str] = &["os_", "multistack_"];

/// Clients with a `multi<client>` entry point.
pub const KNOWN_CLIENTS: &[&str] = &[
    "ceilometer",
    "cinder",
    "glance",
    "heat",
    "keystone",
    "neutron",
    "nova",
    "openstack",
    "solum",
    "swift",
    "trove",
];

/// Client used when neither the invocation name nor `--client` picks one.
pub const DEFAULT_CLIENT: &str = "openstack";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    pub name: String,
    pub default_executable: String,
    pub extra_prefixes: Vec<String>,
}

impl ClientProfile {
    /// Profile for `name`: runs `name`, and claims `name_` and
    /// `nameclient_` keys on top of the base prefixes.
    pub fn for_client(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        Self {
            default_executable: name.clone(),
            extra_prefixes: vec![format!("{name}_"), format!("{name}client_")],
            name,
        }
    }

    /// All prefixes this client claims, lower-case, base prefixes first.
    pub fn prefixes(&self) -> Vec<String> {
        BASE_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .chain(self.extra_prefixes.iter().cloned())
            .collect()
    }

    /// Overlay key that overrides the executable per environment, e.g.
    /// `MULTISTACK_NOVA_EXECUTABLE`.
    pub fn executable_override_key(&self) -> String {
        format!(
            "MULTISTACK_{}_EXECUTABLE",
            self.default_executable.to_ascii_uppercase()
        )
    }

    pub fn matcher(&self, mode: PrefixMatch) -> PrefixMatcher {
        PrefixMatcher::new(self.prefixes(), mode)
    }
}

/// How config keys are compared against the (lower-case) prefixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrefixMatch {
    /// Lower-case the key before testing, so `OS_USERNAME` and `os_username`
    /// both match `os_`.
    #[default]
    Insensitive,
    /// Test the key exactly as written.
    Sensitive,
}

/// A single combined "starts with any of" test over a prefix set.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefixes: Vec<String>,
    mode: PrefixMatch,
}

impl PrefixMatcher {
    pub fn new(prefixes: Vec<String>, mode: PrefixMatch) -> Self {
        Self { prefixes, mode }
    }

    /// The first prefix `key` starts with, if any.
    fn matching_prefix(&self, key: &str) -> Option<&str> {
        let folded;
        let key = match self.mode {
            PrefixMatch::Insensitive => {
                folded = key.to_ascii_lowercase();
                folded.as_str()
            }
            PrefixMatch::Sensitive => key,
        };
        self.prefixes
            .iter()
            .find(|p| key.starts_with(p.as_str()))
            .map(String::as_str)
    }

    pub fn matches(&self, key: &str) -> bool {
        self.matching_prefix(key).is_some()
    }

    /// Lower-case, prefix-stripped name as a client library would take it
    /// (`OS_USERNAME` -> `username`). Keys that match no prefix are returned
    /// lower-cased but otherwise unchanged.
    pub fn native_name(&self, key: &str) -> String {
        let lower = key.to_ascii_lowercase();
        match self.matching_prefix(key) {
            Some(prefix) => lower[prefix.len()..].to_string(),
            None => lower,
        }
    }
}

/// Which entry point the binary was invoked as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run a client; `None` when the name did not identify one.
    Client(Option<String>),
    /// Manage keyring secrets.
    Keyring,
}

impl Invocation {
    /// Classify `argv[0]`: `multi<client>`, `multi<client>-keyring`,
    /// `multistack-keyring`, or anything else.
    pub fn from_program(argv0: &str) -> Self {
        let name = Path::new(argv0)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(argv0);
        let name = name.strip_suffix(".exe").unwrap_or(name);

        if name.ends_with("-keyring") {
            return Invocation::Keyring;
        }
        let client = name
            .strip_prefix("multi")
            .filter(|c| KNOWN_CLIENTS.contains(c))
            .map(str::to_string);
        Invocation::Client(client)
    }
}
