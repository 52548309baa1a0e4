//! Credential extraction for one environment.
//!
//! Walks an environment's raw pairs in file order, keeps the ones whose key
//! carries one of the client's prefixes, upper-cases the key, and resolves
//! the value: a literal (one surrounding quote pair stripped), a bare
//! `USE_KEYRING` scoped to the environment, or `USE_KEYRING['id']` shared
//! through the `global` scope.
//!
//! Resolution stops at the first credential that cannot be given a non-empty
//! value; partial credential sets are never returned.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace, warn};

use crate::client::PrefixMatcher;
use crate::error::DispatchError;
use crate::platform::SecretStore;

/// Marker value that defers a credential to the secret store.
pub const KEYRING_MARKER: &str = "USE_KEYRING";

/// Store scope shared by every environment.
pub const GLOBAL_SCOPE: &str = "global";

static GLOBAL_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^USE_KEYRING\[(?:'([^']*)'|"([^"]*)")\]$"#).expect("valid keyring regex")
});

/// Where a credential's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    Literal(String),
    /// Bare `USE_KEYRING`: key `<env>:<PARAM>`.
    EnvKeyring,
    /// `USE_KEYRING['id']`: key `global:<id>`.
    GlobalKeyring(String),
    /// Starts with `USE_KEYRING` but is neither form above.
    Malformed,
}

impl ValueSource {
    pub fn parse(raw: &str) -> Self {
        if raw == KEYRING_MARKER {
            return ValueSource::EnvKeyring;
        }
        if raw.starts_with(KEYRING_MARKER) {
            return match GLOBAL_REF.captures(raw) {
                Some(caps) => {
                    let id = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                    ValueSource::GlobalKeyring(id.to_string())
                }
                None => ValueSource::Malformed,
            };
        }
        ValueSource::Literal(strip_quotes(raw).to_string())
    }
}

/// Strip one pair of matching `'` or `"` surrounding `raw`, if present.
pub fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2
            && let Some(inner) = raw.strip_prefix(quote).and_then(|r| r.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

/// Secret store key for `param` in `scope` (an environment name or `global`).
pub fn store_key(scope: &str, param: &str) -> String {
    format!("{scope}:{param}")
}

/// Resolved credentials for one environment, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    params: Vec<(String, String)>,
}

impl Credentials {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// `(PARAM, value)` pairs in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Value of `param`; the last one wins if the config repeated it.
    pub fn get(&self, param: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k == param)
            .map(|(_, v)| v.as_str())
    }
}

/// Resolves raw config pairs into [`Credentials`] for one client.
pub struct CredentialResolver<'a, S: SecretStore> {
    matcher: &'a PrefixMatcher,
    store: &'a S,
}

impl<'a, S: SecretStore> CredentialResolver<'a, S> {
    pub fn new(matcher: &'a PrefixMatcher, store: &'a S) -> Self {
        Self { matcher, store }
    }

    /// Resolve every prefixed pair of `env`. Pairs without a known prefix are
    /// skipped.
    pub fn resolve<'p, I>(&self, env: &str, pairs: I) -> Result<Credentials, DispatchError>
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let mut params = Vec::new();
        for (key, raw) in pairs {
            if !self.matcher.matches(key) {
                trace!("{env}: skipping unrecognized key {key}");
                continue;
            }
            let param = key.to_ascii_uppercase();
            let value = self.resolve_value(env, &param, raw);
            match value {
                Some(value) if !value.is_empty() => {
                    debug!("{env}: resolved {}", self.matcher.native_name(&param));
                    params.push((param, value));
                }
                _ => {
                    return Err(DispatchError::CredentialResolution {
                        env: env.to_string(),
                        param,
                    });
                }
            }
        }
        Ok(Credentials { params })
    }

    fn resolve_value(&self, env: &str, param: &str, raw: &str) -> Option<String> {
        match ValueSource::parse(raw) {
            ValueSource::Literal(value) => Some(value),
            ValueSource::EnvKeyring => self.fetch(&store_key(env, param)),
            ValueSource::GlobalKeyring(id) => self.fetch(&store_key(GLOBAL_SCOPE, &id)),
            ValueSource::Malformed => {
                warn!("{env}: {param} has a malformed {KEYRING_MARKER} reference: {raw}");
                None
            }
        }
    }

    /// Store misses and store failures are treated alike.
    fn fetch(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                debug!("Secret lookup for {key} failed: {e}");
                None
            }
        }
    }
}
