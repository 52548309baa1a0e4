//! Sequential execution of a run plan.
//!
//! Targets run one at a time in plan order so client output never
//! interleaves. A non-zero exit does not stop the loop, and only the last
//! target's exit code is returned: earlier failures are visible solely
//! through the client's own output.

use std::io::{IsTerminal, Write};
use tracing::{info, warn};

use crate::notice;
use crate::plan::RunTarget;
use crate::platform::ProcessRunner;

/// Exit code recorded for a target whose executable could not be started.
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// Options that apply uniformly to every target.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// Run this instead of each target's resolved executable.
    pub executable_override: Option<String>,
    /// Prepend `--debug` to the client arguments.
    pub debug: bool,
}

/// Run every target and return the exit code of the last one.
pub fn run(
    plan: &[RunTarget],
    client_args: &[String],
    opts: &ExecOptions,
    runner: &impl ProcessRunner,
) -> i32 {
    let mut args = client_args.to_vec();
    if opts.debug {
        args.insert(0, "--debug".to_string());
    }

    let stderr = std::io::stderr();
    let color = stderr.is_terminal();
    let mut last = 0;
    for target in plan {
        let program = opts
            .executable_override
            .as_deref()
            .unwrap_or(&target.executable);
        if plan.len() > 1 {
            announce(&mut stderr.lock(), &target.environment, color);
        }
        info!("Running {program} against {}", target.environment);

        last = match runner.run(program, &args, &target.env) {
            Ok(code) => {
                if code != 0 {
                    warn!("{program} exited with {code} for {}", target.environment);
                }
                code
            }
            Err(e) => {
                notice::error("Failed to launch", &format!("{}: {e:#}", target.environment));
                SPAWN_FAILURE_CODE
            }
        };
    }
    last
}

/// Write the per-target header of a group run. Client output owns stdout, so
/// callers pass stderr.
fn announce(out: &mut impl Write, environment: &str, color: bool) {
    if let Err(e) = writeln!(out, "{}", notice::status_line("Environment", environment, color)) {
        warn!("Could not write header for {environment}: {e}");
    }
}
