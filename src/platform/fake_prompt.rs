//! Fake prompter for testing.
//!
//! Pre-loaded with queues of responses. Each `confirm_yes()` call pops the
//! next confirmation and each `secret()` call pops the next secret. Errors if
//! the relevant queue is exhausted.

use anyhow::{Result, bail};
use std::cell::RefCell;
use std::collections::VecDeque;

use super::Prompter;

/// Mock prompter: returns pre-configured responses in order.
pub struct FakePrompter {
    confirmations: RefCell<VecDeque<bool>>,
    secrets: RefCell<VecDeque<Option<String>>>,
}

impl FakePrompter {
    pub fn new() -> Self {
        Self {
            confirmations: RefCell::new(VecDeque::new()),
            secrets: RefCell::new(VecDeque::new()),
        }
    }

    /// Queue confirmations returned by `confirm_yes()`.
    pub fn with_confirmations(self, answers: Vec<bool>) -> Self {
        self.confirmations.borrow_mut().extend(answers);
        self
    }

    /// Queue values returned by `secret()`; `None` simulates CTRL-D.
    pub fn with_secrets(self, secrets: Vec<Option<&str>>) -> Self {
        self.secrets
            .borrow_mut()
            .extend(secrets.into_iter().map(|s| s.map(str::to_string)));
        self
    }

    /// How many unconsumed responses remain across both queues.
    pub fn remaining(&self) -> usize {
        self.confirmations.borrow().len() + self.secrets.borrow().len()
    }
}

impl Prompter for FakePrompter {
    fn confirm_yes(&self, prompt: &str) -> Result<bool> {
        match self.confirmations.borrow_mut().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!(
                "FakePrompter: no more confirmations queued (prompt: \"{}\")",
                prompt
            ),
        }
    }

    fn secret(&self, prompt: &str) -> Result<Option<String>> {
        match self.secrets.borrow_mut().pop_front() {
            Some(secret) => Ok(secret),
            None => bail!(
                "FakePrompter: no more secrets queued (prompt: \"{}\")",
                prompt
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_responses_in_order() {
        let prompter = FakePrompter::new()
            .with_confirmations(vec![true, false])
            .with_secrets(vec![Some("pw"), None]);
        assert!(prompter.confirm_yes("q1").unwrap());
        assert!(!prompter.confirm_yes("q2").unwrap());
        assert_eq!(prompter.secret("s1").unwrap(), Some("pw".to_string()));
        assert_eq!(prompter.secret("s2").unwrap(), None);
    }

    #[test]
    fn test_exhausted_queue_fails() {
        let prompter = FakePrompter::new().with_confirmations(vec![true]);
        prompter.confirm_yes("q1").unwrap();
        assert!(prompter.confirm_yes("q2").is_err());
        assert!(prompter.secret("s").is_err());
    }

    #[test]
    fn test_remaining() {
        let prompter = FakePrompter::new()
            .with_confirmations(vec![true])
            .with_secrets(vec![Some("x")]);
        assert_eq!(prompter.remaining(), 2);
        prompter.confirm_yes("q").unwrap();
        assert_eq!(prompter.remaining(), 1);
    }
}
