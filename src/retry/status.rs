use std::time::Duration;

use super::RetryPolicy;

/// Where a retry loop currently stands.
///
/// The retried action receives the status of its attempt, and the policy uses
/// it to pick the next delay. [`RetryStatus::default`] describes the first
/// attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryStatus {
    /// Number of retries made so far. Zero for the first attempt.
    pub iter_number: u32,
    /// Sum of all delays waited so far.
    pub cumulative_delay: Duration,
    /// The delay waited before the current attempt, if any.
    pub previous_delay: Option<Duration>,
}

impl RetryStatus {
    /// The status after waiting `delay` and retrying.
    pub fn next(&self, delay: Duration) -> Self {
        RetryStatus {
            iter_number: self.iter_number.saturating_add(1),
            cumulative_delay: self.cumulative_delay.saturating_add(delay),
            previous_delay: Some(delay),
        }
    }

    /// Whether this is the first attempt.
    pub fn is_first_attempt(&self) -> bool {
        self.iter_number == 0
    }
}

/// Ask `policy` whether to retry after `status`.
///
/// Returns the status for the next attempt, with the chosen delay in
/// `previous_delay`, or `None` when the policy gives up.
///
/// ```
/// use std::time::Duration;
/// use weir::retry::apply_policy;
/// use weir::{RetryPolicy, RetryStatus};
///
/// let policy = RetryPolicy::linear(Duration::from_millis(5)).with_max_retries(1);
///
/// let next = apply_policy(&policy, &RetryStatus::default()).unwrap();
/// assert_eq!(next.iter_number, 1);
/// assert_eq!(next.previous_delay, Some(Duration::from_millis(5)));
/// assert_eq!(apply_policy(&policy, &next), None);
/// ```
pub fn apply_policy(policy: &RetryPolicy, status: &RetryStatus) -> Option<RetryStatus> {
    policy.apply(status).map(|delay| status.next(delay))
}
