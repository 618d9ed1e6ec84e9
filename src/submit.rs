use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::DEFAULT_SUBMIT_DELAY_MS;
use crate::error::SubmitFailure;
use crate::model::RegistrationSubmission;

/// Delivers a validated registration somewhere.
///
/// A failure is reported back to the form as a form-level error; it never
/// resets the entered values.
pub trait Submitter {
    fn submit(
        &self,
        submission: &RegistrationSubmission,
    ) -> impl Future<Output = Result<(), SubmitFailure>> + Send;
}

/// Pretends to talk to a server: waits for a fixed delay and always succeeds.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS))
    }
}

impl Submitter for SimulatedSubmitter {
    async fn submit(&self, submission: &RegistrationSubmission) -> Result<(), SubmitFailure> {
        debug!(
            delay = ?self.delay,
            registration_type = %submission.registration_type,
            "simulating submission"
        );
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_waits_and_succeeds() {
        let submitter = SimulatedSubmitter::default();
        let start = Instant::now();
        let result = submitter.submit(&RegistrationSubmission::default()).await;
        assert!(result.is_ok());
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
