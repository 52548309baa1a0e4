//! Fake process runner for testing.
//!
//! Pre-loaded with a queue of exit codes. Each `run()` call records what
//! would have been spawned and pops the next code from the front. Programs
//! registered with `fail_to_spawn()` error as if the executable was missing.

use anyhow::{Result, bail};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet, VecDeque};

use super::ProcessRunner;

/// One recorded `run()` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRecord {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

/// Mock process runner: returns pre-configured exit codes in order.
pub struct FakeProcessRunner {
    codes: RefCell<VecDeque<i32>>,
    spawned: RefCell<Vec<SpawnRecord>>,
    missing: HashSet<String>,
}

impl FakeProcessRunner {
    /// Create a runner that will return the given exit codes in order.
    /// Once the queue is exhausted every run exits 0.
    pub fn new(codes: Vec<i32>) -> Self {
        Self {
            codes: RefCell::new(codes.into()),
            spawned: RefCell::new(Vec::new()),
            missing: HashSet::new(),
        }
    }

    /// Make `run()` fail for `program` as if it was not installed.
    pub fn fail_to_spawn(mut self, program: &str) -> Self {
        self.missing.insert(program.to_string());
        self
    }

    pub fn spawned(&self) -> Vec<SpawnRecord> {
        self.spawned.borrow().clone()
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run(&self, program: &str, args: &[String], env: &BTreeMap<String, String>) -> Result<i32> {
        if self.missing.contains(program) {
            bail!("FakeProcessRunner: no such executable: {program}");
        }
        self.spawned.borrow_mut().push(SpawnRecord {
            program: program.to_string(),
            args: args.to_vec(),
            env: env.clone(),
        });
        Ok(self.codes.borrow_mut().pop_front().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_codes_in_order() {
        let runner = FakeProcessRunner::new(vec![3, 0]);
        let env = BTreeMap::new();
        assert_eq!(runner.run("nova", &[], &env).unwrap(), 3);
        assert_eq!(runner.run("nova", &[], &env).unwrap(), 0);
        assert_eq!(runner.run("nova", &[], &env).unwrap(), 0);
        assert_eq!(runner.spawned().len(), 3);
    }

    #[test]
    fn test_missing_program_fails_without_record() {
        let runner = FakeProcessRunner::new(vec![]).fail_to_spawn("nova");
        assert!(runner.run("nova", &[], &BTreeMap::new()).is_err());
        assert!(runner.spawned().is_empty());
    }
}
