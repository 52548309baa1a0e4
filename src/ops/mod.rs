//! Operations that implement multistack commands.
//!
//! `run` dispatches a client against an environment or group, `list` prints
//! the configured environments, and `keyring` manages stored secrets.

pub mod keyring;
pub mod list;
pub mod run;
