//! Snapshot of the dispatcher's own process environment.

use std::collections::BTreeMap;

/// Inherited environment variables, captured once per invocation.
///
/// Never mutated after capture; every run target derives its own copy via
/// [`BaseEnv::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEnv {
    vars: BTreeMap<String, String>,
}

impl BaseEnv {
    /// Capture the current process environment. Non-UTF-8 names or values
    /// are converted lossily.
    pub fn capture() -> Self {
        std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// A copy of the snapshot with `overrides` applied on top; later pairs
    /// win over earlier ones and over inherited values.
    pub fn overlay<'a, I>(&self, overrides: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut vars = self.vars.clone();
        for (name, value) in overrides {
            vars.insert(name.to_string(), value.to_string());
        }
        vars
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BaseEnv {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
