//! Retry policies as plain data.

use std::time::Duration;

use super::RetryStatus;

/// How long to wait before each retry, and when to stop.
///
/// A policy is data: it computes delays from a [`RetryStatus`] and never sleeps
/// or runs anything itself. The retry loop lives in
/// [`io_result::retrying`](crate::io_result::retrying).
///
/// A policy without `max_retries` keeps producing delays forever. Give every
/// policy a bound unless the checked action is known to settle.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use weir::{RetryPolicy, RetryStatus};
///
/// let policy = RetryPolicy::exponential(Duration::from_millis(10))
///     .with_max_retries(2)
///     .with_max_delay(Duration::from_millis(15));
///
/// let first = RetryStatus::default();
/// assert_eq!(policy.apply(&first), Some(Duration::from_millis(10)));
///
/// let second = first.next(Duration::from_millis(10));
/// assert_eq!(policy.apply(&second), Some(Duration::from_millis(15)));
///
/// let third = second.next(Duration::from_millis(15));
/// assert_eq!(policy.apply(&third), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    strategy: RetryStrategy,
    max_retries: Option<u32>,
    max_delay: Option<Duration>,
    max_total_delay: Option<Duration>,
    jitter: JitterStrategy,
}

/// The shape of the backoff curve.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryStrategy {
    /// Retry immediately.
    Immediate,
    /// The same delay every time.
    Constant(Duration),
    /// `base * (n + 1)` before retry `n`.
    Linear {
        /// Delay unit.
        base: Duration,
    },
    /// `base * 2^n` before retry `n`.
    Exponential {
        /// Delay before the first retry.
        base: Duration,
    },
    /// `base * fib(n + 1)` before retry `n`.
    Fibonacci {
        /// Delay unit.
        base: Duration,
    },
}

/// Randomization applied on top of the strategy's delay.
///
/// Every variant other than `None` needs the `jitter` feature. Without it the
/// strategy's delay is used unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JitterStrategy {
    /// Use the computed delay as is.
    #[default]
    None,
    /// Pick uniformly within `delay * (1 ± factor)`.
    Proportional(f64),
    /// Pick uniformly within `0..=delay`.
    Full,
    /// Pick uniformly between the computed delay and three times the previous
    /// delay.
    Decorrelated,
}

impl RetryPolicy {
    fn with_strategy(strategy: RetryStrategy) -> Self {
        RetryPolicy {
            strategy,
            max_retries: None,
            max_delay: None,
            max_total_delay: None,
            jitter: JitterStrategy::None,
        }
    }

    /// Retry without waiting.
    pub fn immediate() -> Self {
        Self::with_strategy(RetryStrategy::Immediate)
    }

    /// Wait `delay` before every retry.
    ///
    /// ```
    /// use std::time::Duration;
    /// use weir::RetryPolicy;
    ///
    /// let policy = RetryPolicy::constant(Duration::from_millis(500)).with_max_retries(3);
    /// assert_eq!(policy.delay_for_retry(0), Some(Duration::from_millis(500)));
    /// assert_eq!(policy.delay_for_retry(2), Some(Duration::from_millis(500)));
    /// assert_eq!(policy.delay_for_retry(3), None);
    /// ```
    pub fn constant(delay: Duration) -> Self {
        Self::with_strategy(RetryStrategy::Constant(delay))
    }

    /// Wait `base`, `2 * base`, `3 * base`, ...
    pub fn linear(base: Duration) -> Self {
        Self::with_strategy(RetryStrategy::Linear { base })
    }

    /// Wait `base`, `2 * base`, `4 * base`, ...
    pub fn exponential(base: Duration) -> Self {
        Self::with_strategy(RetryStrategy::Exponential { base })
    }

    /// Wait `base`, `base`, `2 * base`, `3 * base`, `5 * base`, ...
    pub fn fibonacci(base: Duration) -> Self {
        Self::with_strategy(RetryStrategy::Fibonacci { base })
    }

    /// Stop after `n` retries, so at most `n + 1` attempts run.
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }

    /// Cap each individual delay at `cap`.
    pub fn with_max_delay(mut self, cap: Duration) -> Self {
        self.max_delay = Some(cap);
        self
    }

    /// Stop once the sum of all delays so far, plus the next one, would exceed
    /// `limit`.
    pub fn with_max_total_delay(mut self, limit: Duration) -> Self {
        self.max_total_delay = Some(limit);
        self
    }

    /// Randomize each delay by up to `factor` in either direction.
    ///
    /// `factor` is clamped to `0.0..=1.0`.
    pub fn with_jitter(mut self, factor: f64) -> Self {
        self.jitter = JitterStrategy::Proportional(factor.clamp(0.0, 1.0));
        self
    }

    /// Pick each delay uniformly between zero and the computed delay.
    pub fn with_full_jitter(mut self) -> Self {
        self.jitter = JitterStrategy::Full;
        self
    }

    /// Pick each delay between the computed delay and three times the previous
    /// one.
    pub fn with_decorrelated_jitter(mut self) -> Self {
        self.jitter = JitterStrategy::Decorrelated;
        self
    }

    /// Maximum number of retries, if bounded.
    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// Cap on a single delay, if any.
    pub fn max_delay(&self) -> Option<Duration> {
        self.max_delay
    }

    /// Cap on the cumulative delay, if any.
    pub fn max_total_delay(&self) -> Option<Duration> {
        self.max_total_delay
    }

    /// The jitter strategy.
    pub fn jitter(&self) -> &JitterStrategy {
        &self.jitter
    }

    /// The backoff strategy.
    pub fn strategy(&self) -> &RetryStrategy {
        &self.strategy
    }

    /// Whether the policy is guaranteed to stop.
    pub fn is_bounded(&self) -> bool {
        self.max_retries.is_some() || self.max_total_delay.is_some()
    }

    /// The delay before retry `n` (zero-based), without jitter.
    ///
    /// Returns `None` once `max_retries` is reached.
    pub fn delay_for_retry(&self, n: u32) -> Option<Duration> {
        if self.max_retries.is_some_and(|max| n >= max) {
            return None;
        }

        let delay = match &self.strategy {
            RetryStrategy::Immediate => Duration::ZERO,
            RetryStrategy::Constant(d) => *d,
            RetryStrategy::Linear { base } => base.saturating_mul(n.saturating_add(1)),
            RetryStrategy::Exponential { base } => base.saturating_mul(2u32.saturating_pow(n)),
            RetryStrategy::Fibonacci { base } => {
                base.saturating_mul(fibonacci(n.saturating_add(1)))
            }
        };

        Some(self.cap(delay))
    }

    /// Decide the delay before the next attempt, or `None` to give up.
    ///
    /// `status` describes the retries made so far. Jitter is applied when the
    /// `jitter` feature is enabled.
    pub fn apply(&self, status: &RetryStatus) -> Option<Duration> {
        let delay = self.delay_for_retry(status.iter_number)?;
        let delay = self.cap(self.jitter.apply(delay, status.previous_delay));

        match self.max_total_delay {
            Some(limit) if status.cumulative_delay.saturating_add(delay) > limit => None,
            _ => Some(delay),
        }
    }

    fn cap(&self, delay: Duration) -> Duration {
        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}

impl JitterStrategy {
    /// Randomize `delay`.
    ///
    /// `previous` is the delay used before the last retry, if there was one.
    pub fn apply(
        &self,
        delay: Duration,
        #[cfg_attr(not(feature = "jitter"), allow(unused_variables))] previous: Option<Duration>,
    ) -> Duration {
        match self {
            JitterStrategy::None => delay,
            #[cfg(feature = "jitter")]
            JitterStrategy::Proportional(factor) => {
                use rand::Rng;
                let millis = delay.as_millis() as f64;
                let spread = millis * factor;
                let low = (millis - spread).max(0.0);
                let high = millis + spread;
                if high <= low {
                    delay
                } else {
                    Duration::from_millis(rand::rng().random_range(low..=high) as u64)
                }
            }
            #[cfg(feature = "jitter")]
            JitterStrategy::Full => {
                use rand::Rng;
                let millis = delay.as_millis() as u64;
                Duration::from_millis(rand::rng().random_range(0..=millis))
            }
            #[cfg(feature = "jitter")]
            JitterStrategy::Decorrelated => {
                use rand::Rng;
                let low = delay.as_millis() as u64;
                let high = previous.unwrap_or(delay).as_millis().saturating_mul(3) as u64;
                if high <= low {
                    delay
                } else {
                    Duration::from_millis(rand::rng().random_range(low..=high))
                }
            }
            #[cfg(not(feature = "jitter"))]
            JitterStrategy::Proportional(_)
            | JitterStrategy::Full
            | JitterStrategy::Decorrelated => delay,
        }
    }
}

fn fibonacci(n: u32) -> u32 {
    let (mut a, mut b) = (0u32, 1u32);
    for _ in 0..n {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a
}
