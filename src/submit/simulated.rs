//! Simulated submit: wait, then acknowledge

use super::effect::{Submission, SubmissionReceipt, SubmitEffect, SubmitError};
use async_trait::async_trait;
use std::time::Duration;

/// Default delay before a simulated submission completes
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Stand-in for a real backend. Sleeps for `delay`, then succeeds, or fails
/// when `fail` is set.
#[derive(Debug, Clone)]
pub struct SimulatedSubmit {
    delay: Duration,
    fail: bool,
}

impl SimulatedSubmit {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    pub fn failing(mut self, fail: bool) -> Self {
        self.fail = fail;
        self
    }
}

impl Default for SimulatedSubmit {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl SubmitEffect for SimulatedSubmit {
    async fn submit(&self, submission: Submission) -> Result<SubmissionReceipt, SubmitError> {
        tracing::debug!(
            form = submission.form_name(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating submit"
        );
        tokio::time::sleep(self.delay).await;

        if self.fail {
            tracing::warn!(form = submission.form_name(), "simulated submit failure");
            return Err(SubmitError::Rejected("simulated failure".to_string()));
        }

        let receipt = SubmissionReceipt::new();
        match serde_json::to_string(&submission) {
            Ok(payload) => tracing::info!(id = %receipt.id, %payload, "submission accepted"),
            Err(err) => {
                tracing::info!(id = %receipt.id, %err, "submission accepted without payload dump")
            }
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::Signup;

    fn submission() -> Submission {
        Submission::Signup(Signup {
            email: "a@b.com".to_string(),
            password: "abcdefghij".to_string(),
        })
    }

    #[tokio::test]
    async fn test_waits_for_delay_then_succeeds() {
        let effect = SimulatedSubmit::new(Duration::from_millis(20));
        let start = tokio::time::Instant::now();
        let receipt = effect.submit(submission()).await;
        assert!(receipt.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_failing_returns_rejected() {
        let effect = SimulatedSubmit::new(Duration::ZERO).failing(true);
        let result = tokio_test::block_on(effect.submit(submission()));
        assert!(matches!(result, Err(SubmitError::Rejected(_))));
    }

    #[test]
    fn test_default_delay() {
        let effect = SimulatedSubmit::default();
        assert_eq!(effect.delay, DEFAULT_DELAY);
        assert!(!effect.fail);
    }
}
