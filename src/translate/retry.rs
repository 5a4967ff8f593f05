use std::time::Duration;

/// Status codes worth retrying: rate limiting and transient upstream trouble.
pub const TRANSIENT_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Idle,
    Sending { attempt: u32 },
    Retrying { failed_attempt: u32 },
    Succeeded,
    Failed,
}

/// What the caller should do after reporting an attempt's outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 200 received; unwrap the body.
    Deliver,
    /// Sleep for the given backoff, then send again.
    Backoff(Duration),
    /// Non-transient failure or attempt ceiling reached.
    GiveUp,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_factor_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_factor_secs: 1,
        }
    }
}

impl RetryPolicy {
    pub fn is_transient(status: u16) -> bool {
        TRANSIENT_STATUSES.contains(&status)
    }

    /// Backoff before the n-th retry: immediate for the first, then
    /// `factor * 2^(n-2)` seconds, doubling each time (0s, 1s, 2s, 4s, ...).
    pub fn backoff_delay(&self, retry_number: u32) -> Duration {
        if retry_number <= 1 {
            Duration::ZERO
        } else {
            Duration::from_secs(self.backoff_factor_secs << (retry_number - 2))
        }
    }
}

/// Explicit per-call retry state machine:
/// `Idle -> Sending -> {Retrying -> Sending}* -> Succeeded | Failed`.
/// `Retrying` is entered only for transient failures while attempts remain.
pub struct RetryMachine {
    policy: RetryPolicy,
    attempt: u32,
    state: RetryState,
}

impl RetryMachine {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempt: 0,
            state: RetryState::Idle,
        }
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempt
    }

    /// Move into `Sending`, returning the attempt number (1-based).
    pub fn begin_attempt(&mut self) -> u32 {
        self.attempt += 1;
        self.state = RetryState::Sending {
            attempt: self.attempt,
        };
        self.attempt
    }

    /// Report the HTTP status of the attempt in flight.
    pub fn on_status(&mut self, status: u16) -> Step {
        if status == 200 {
            self.state = RetryState::Succeeded;
            Step::Deliver
        } else if RetryPolicy::is_transient(status) {
            self.retry_or_fail()
        } else {
            self.state = RetryState::Failed;
            Step::GiveUp
        }
    }

    /// Report a network-level failure; retried like a transient status.
    pub fn on_transport_error(&mut self) -> Step {
        self.retry_or_fail()
    }

    fn retry_or_fail(&mut self) -> Step {
        if self.attempt < self.policy.max_attempts {
            self.state = RetryState::Retrying {
                failed_attempt: self.attempt,
            };
            Step::Backoff(self.policy.backoff_delay(self.attempt))
        } else {
            self.state = RetryState::Failed;
            Step::GiveUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_then_success_uses_three_attempts() {
        let mut machine = RetryMachine::new(RetryPolicy::default());
        assert_eq!(machine.state(), RetryState::Idle);

        assert_eq!(machine.begin_attempt(), 1);
        assert_eq!(machine.on_status(503), Step::Backoff(Duration::ZERO));
        assert_eq!(machine.state(), RetryState::Retrying { failed_attempt: 1 });

        assert_eq!(machine.begin_attempt(), 2);
        assert_eq!(
            machine.on_status(503),
            Step::Backoff(Duration::from_secs(1))
        );

        assert_eq!(machine.begin_attempt(), 3);
        assert_eq!(machine.on_status(200), Step::Deliver);
        assert_eq!(machine.state(), RetryState::Succeeded);
        assert_eq!(machine.attempts_used(), 3);
    }

    #[test]
    fn non_transient_status_fails_on_first_attempt() {
        let mut machine = RetryMachine::new(RetryPolicy::default());
        machine.begin_attempt();
        assert_eq!(machine.on_status(401), Step::GiveUp);
        assert_eq!(machine.state(), RetryState::Failed);
        assert_eq!(machine.attempts_used(), 1);
    }

    #[test]
    fn transient_status_exhausts_at_attempt_ceiling() {
        let mut machine = RetryMachine::new(RetryPolicy::default());
        machine.begin_attempt();
        assert!(matches!(machine.on_status(429), Step::Backoff(_)));
        machine.begin_attempt();
        assert!(matches!(machine.on_status(429), Step::Backoff(_)));
        machine.begin_attempt();
        assert_eq!(machine.on_status(429), Step::GiveUp);
        assert_eq!(machine.state(), RetryState::Failed);
    }

    #[test]
    fn transport_errors_follow_the_same_ceiling() {
        let mut machine = RetryMachine::new(RetryPolicy::default());
        machine.begin_attempt();
        assert_eq!(machine.on_transport_error(), Step::Backoff(Duration::ZERO));
        machine.begin_attempt();
        assert_eq!(
            machine.on_transport_error(),
            Step::Backoff(Duration::from_secs(1))
        );
        machine.begin_attempt();
        assert_eq!(machine.on_transport_error(), Step::GiveUp);
    }

    #[test]
    fn backoff_doubles_after_the_immediate_first_retry() {
        let policy = RetryPolicy {
            max_attempts: 5,
            backoff_factor_secs: 1,
        };
        assert_eq!(policy.backoff_delay(1), Duration::ZERO);
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(4), Duration::from_secs(4));
    }

    #[test]
    fn transient_status_set_matches_retry_policy() {
        for status in [429, 500, 502, 503, 504] {
            assert!(RetryPolicy::is_transient(status));
        }
        for status in [400, 401, 403, 404, 418] {
            assert!(!RetryPolicy::is_transient(status));
        }
    }
}
