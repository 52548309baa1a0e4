//! Print every configured environment and its raw settings.
//!
//! Values are shown as written; `USE_KEYRING` references are not resolved.

use std::io::IsTerminal;

use crate::config::Config;
use crate::notice;

/// Visible width of each environment header line.
const HEADER_WIDTH: usize = 86;
/// Column width for parameter names.
const PARAM_WIDTH: usize = 21;

pub fn run(config: &Config) {
    print!("{}", render(config, std::io::stdout().is_terminal()));
}

/// Render the listing; `color` highlights environment names.
pub fn render(config: &Config, color: bool) -> String {
    let mut out = String::new();
    for env in config.environment_names() {
        let plain = format!("-- {env} ");
        let fill = "-".repeat(HEADER_WIDTH.saturating_sub(plain.chars().count()));
        let name = notice::green(env, color);
        out.push_str(&format!("-- {name} {fill}\n"));

        let mut pairs = config.pairs(env).unwrap_or_default();
        pairs.sort();
        for (key, value) in pairs {
            out.push_str(&format!(
                "  {:<width$}: {}\n",
                key.to_ascii_uppercase(),
                value,
                width = PARAM_WIDTH
            ));
        }
    }
    out
}
