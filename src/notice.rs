//! Labeled terminal notices: `[Title] message`.
//!
//! Errors go to stderr with a red title, notices to stdout with a green one.
//! Status lines use the green title but are written wherever the caller says.
//! Color is only emitted when the stream is a terminal.

use std::io::IsTerminal;

const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const RESET: &str = "\x1b[0m";

/// Wrap `text` in `color` when `enabled`.
fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn green(text: &str, enabled: bool) -> String {
    paint(text, GREEN, enabled)
}

fn format_line(title: &str, msg: &str, color: &str, enabled: bool) -> String {
    format!("[{}] {msg}", paint(title, color, enabled))
}

/// A green-titled line for progress output that must stay off stdout.
pub fn status_line(title: &str, msg: &str, enabled: bool) -> String {
    format_line(title, msg, GREEN, enabled)
}

pub fn notice(title: &str, msg: &str) {
    println!(
        "{}",
        format_line(title, msg, GREEN, std::io::stdout().is_terminal())
    );
}

pub fn error(title: &str, msg: &str) {
    eprintln!(
        "{}",
        format_line(title, msg, RED, std::io::stderr().is_terminal())
    );
}
