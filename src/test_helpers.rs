//! Shared test helpers for setting up in-memory test environments.

use crate::client::ClientProfile;
use crate::config::Config;
use crate::environ::BaseEnv;
use crate::platform::FakeSecretStore;

pub const HOME: &str = "/home/test";

/// A typical three-environment setup plus an `all` group over them.
pub const SAMPLE_CONFIG: &str = "\
[dev]
os_username = \"alice\"
os_password = USE_KEYRING
os_auth_url = https://dev.example/v3

[qa]
os_username = 'carol'
os_password = USE_KEYRING['shared']
os_auth_url = https://qa.example/v3

[prod]
os_username = bob
os_password = USE_KEYRING['shared']
multistack_nova_executable = /opt/nova-prod/bin/nova

[all]
MULTISTACK_GROUP = dev,qa,prod
";

/// Parse a config document, panicking on malformed test input.
pub fn config(contents: &str) -> Config {
    Config::parse(contents).expect("test config should parse")
}

/// A small, fixed inherited environment.
pub fn base_env() -> BaseEnv {
    [("PATH", "/usr/bin:/bin"), ("HOME", HOME), ("OS_REGION_NAME", "inherited")]
        .into_iter()
        .collect()
}

/// Secret store holding the secrets referenced by [`SAMPLE_CONFIG`].
pub fn sample_store() -> FakeSecretStore {
    let store = FakeSecretStore::new();
    store.add_secret("dev:OS_PASSWORD", "dev-secret");
    store.add_secret("global:shared", "shared-secret");
    store
}

pub fn nova() -> ClientProfile {
    ClientProfile::for_client("nova")
}
