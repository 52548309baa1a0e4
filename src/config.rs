//! Layered INI configuration: one section per environment.
//!
//! Every existing file in the search path is read and merged in order, so a
//! project-local `.multistack` can override keys from `~/.multistack`. Values
//! are kept raw (quotes included); interpreting them is the credential
//! resolver's job.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use ini::{Ini, ParseOption};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::environ::BaseEnv;
use crate::error::DispatchError;
use crate::paths::{collapse_tilde, config_search_paths};
use crate::platform::Fs;

/// Section whose pairs every environment inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Ordered `(key, value)` pairs of one section, as written.
pub type Pairs = Vec<(String, String)>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    sections: IndexMap<String, Pairs>,
    defaults: Pairs,
}

impl Config {
    /// Parse one INI document. Quote and escape processing is disabled so
    /// values reach the resolver exactly as written.
    pub fn parse(contents: &str) -> Result<Self> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(contents, opt).context("Failed to parse INI")?;

        let mut config = Config::default();
        for (section, props) in ini.iter() {
            let Some(section) = section else {
                if !props.is_empty() {
                    warn!("Ignoring {} key(s) outside of any section", props.len());
                }
                continue;
            };
            let pairs = if section == DEFAULT_SECTION {
                &mut config.defaults
            } else {
                config.sections.entry(section.to_string()).or_default()
            };
            for (key, value) in props.iter() {
                upsert(pairs, key, value);
            }
        }
        Ok(config)
    }

    /// Load and merge every existing file in `paths`, lowest precedence first.
    /// Missing files are silently skipped; no files at all is an empty config.
    pub fn load(paths: &[PathBuf], fs: &impl Fs) -> Result<Self> {
        let mut config = Config::default();
        for path in paths {
            if !fs.is_file(path) {
                debug!("Config file not found, skipping: {}", path.display());
                continue;
            }
            config.merge(Self::read(path, fs)?);
        }
        if config.sections.is_empty() {
            warn!("No environments configured (looked in {})", describe(paths, fs));
        }
        Ok(config)
    }

    /// Load a single, explicitly chosen config file, which must exist.
    pub fn load_file(path: &Path, fs: &impl Fs) -> Result<Self> {
        if !fs.is_file(path) {
            bail!("Config file not found: {}", path.display());
        }
        Self::read(path, fs)
    }

    /// Load from the standard search locations.
    pub fn discover(fs: &impl Fs, env: &BaseEnv) -> Result<Self> {
        Self::load(&config_search_paths(fs, env), fs)
    }

    fn read(path: &Path, fs: &impl Fs) -> Result<Self> {
        debug!("Loading config from {}", collapse_tilde(path, fs));
        let contents = fs
            .read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Merge `other` over `self`: sections are unioned, keys in `other` win.
    pub fn merge(&mut self, other: Config) {
        for (key, value) in other.defaults {
            upsert(&mut self.defaults, &key, &value);
        }
        for (name, pairs) in other.sections {
            let existing = self.sections.entry(name).or_default();
            for (key, value) in pairs {
                upsert(existing, &key, &value);
            }
        }
    }

    /// Environment (section) names in file order.
    pub fn environment_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn contains(&self, env: &str) -> bool {
        self.sections.contains_key(env)
    }

    /// Raw pairs for `env` with `[DEFAULT]` pairs inherited: defaults come
    /// first, and a key the section overrides keeps its default position.
    pub fn pairs(&self, env: &str) -> Option<Pairs> {
        let own = self.sections.get(env)?;
        let mut pairs = self.defaults.clone();
        for (key, value) in own {
            upsert(&mut pairs, key, value);
        }
        Some(pairs)
    }

    /// Look up a single raw value in `env`, comparing keys case-insensitively.
    pub fn value(&self, env: &str, key: &str) -> Option<String> {
        self.pairs(env)?
            .into_iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Build the error for an environment that is not configured, with the
    /// closest configured name as a suggestion.
    pub fn unknown_environment(&self, env: &str, group: Option<&str>) -> DispatchError {
        DispatchError::UnknownEnvironment {
            env: env.to_string(),
            group: group.map(str::to_string),
            suggestion: self.suggest(env),
        }
    }

    fn suggest(&self, env: &str) -> Option<String> {
        self.environment_names()
            .map(|name| (strsim::jaro_winkler(env, name), name))
            .filter(|(score, _)| *score >= 0.8)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, name)| name.to_string())
    }
}

/// Replace the value of a key already present (ignoring ASCII case) in place,
/// or append a new pair.
fn upsert(pairs: &mut Pairs, key: &str, value: &str) {
    match pairs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
        Some(pair) => *pair = (key.to_string(), value.to_string()),
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

fn describe(paths: &[PathBuf], fs: &impl Fs) -> String {
    paths
        .iter()
        .map(|p| collapse_tilde(p, fs))
        .collect::<Vec<_>>()
        .join(", ")
}
