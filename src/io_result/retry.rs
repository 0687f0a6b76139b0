use std::thread;

use super::IOResult;
use crate::retry::{apply_policy, RetryPolicy, RetryStatus};

/// Run `action` until `check` is satisfied or `policy` gives up.
///
/// Each attempt gets the current [`RetryStatus`]. After the attempt,
/// `check` looks at the outcome and returns `true` to ask for another try.
/// If the policy then yields a delay, the running thread sleeps and the next
/// attempt starts. Otherwise the latest outcome is returned as is.
///
/// `check` decides on the whole outcome, so a success can be retried too
/// (e.g. polling until a value is ready).
///
/// ```
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use weir::io_result::retrying;
/// use weir::{IOResult, RetryPolicy};
///
/// let attempts = Arc::new(AtomicU32::new(0));
/// let io = {
///     let attempts = attempts.clone();
///     retrying(
///         RetryPolicy::constant(Duration::from_millis(1)).with_max_retries(5),
///         move |status| {
///             let attempts = attempts.clone();
///             let iter = status.iter_number;
///             IOResult::from_fn(move || {
///                 attempts.fetch_add(1, Ordering::SeqCst);
///                 if iter < 2 { Err("flaky") } else { Ok(iter) }
///             })
///         },
///         |outcome| outcome.is_err(),
///     )
/// };
///
/// assert_eq!(io.run(), Ok(2));
/// assert_eq!(attempts.load(Ordering::SeqCst), 3);
/// ```
pub fn retrying<T, E, A, C>(policy: RetryPolicy, action: A, check: C) -> IOResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    A: Fn(&RetryStatus) -> IOResult<T, E> + Send + Sync + 'static,
    C: Fn(&Result<T, E>) -> bool + Send + Sync + 'static,
{
    IOResult::from_fn(move || {
        let mut status = RetryStatus::default();
        loop {
            let outcome = action(&status).run();
            if !check(&outcome) {
                return outcome;
            }

            match apply_policy(&policy, &status) {
                Some(next) => {
                    let delay = next.previous_delay.unwrap_or_default();
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        attempt = next.iter_number,
                        delay_ms = delay.as_millis() as u64,
                        "retrying"
                    );
                    thread::sleep(delay);
                    status = next;
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        attempts = status.iter_number + 1,
                        total_delay_ms = status.cumulative_delay.as_millis() as u64,
                        "retry policy exhausted"
                    );
                    return outcome;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn fast(retries: u32) -> RetryPolicy {
        RetryPolicy::constant(Duration::from_millis(1)).with_max_retries(retries)
    }

    #[test]
    fn test_exhausted_returns_last_outcome() {
        let attempts = Arc::new(AtomicU32::new(0));
        let io = {
            let attempts = attempts.clone();
            retrying(
                fast(3),
                move |_| {
                    let attempts = attempts.clone();
                    IOResult::<(), _>::from_fn(move || {
                        Err(attempts.fetch_add(1, Ordering::SeqCst))
                    })
                },
                |outcome| outcome.is_err(),
            )
        };

        assert_eq!(io.run(), Err(3));
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_check_false_stops_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let io = {
            let attempts = attempts.clone();
            retrying(
                fast(5),
                move |_| {
                    let attempts = attempts.clone();
                    IOResult::<(), _>::from_fn(move || {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        Err("permanent")
                    })
                },
                |outcome| matches!(outcome, Err(e) if *e == "transient"),
            )
        };

        assert_eq!(io.run(), Err("permanent"));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_action_sees_status_progression() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let io = {
            let seen = seen.clone();
            retrying(
                RetryPolicy::linear(Duration::from_millis(1)).with_max_retries(2),
                move |status| {
                    seen.lock().unwrap().push(*status);
                    IOResult::<(), &str>::fail("again")
                },
                |_| true,
            )
        };

        assert_eq!(io.run(), Err("again"));
        let seen = seen.lock().unwrap();
        let iters: Vec<u32> = seen.iter().map(|s| s.iter_number).collect();
        assert_eq!(iters, vec![0, 1, 2]);
        assert_eq!(seen[2].cumulative_delay, Duration::from_millis(3));
        assert_eq!(seen[2].previous_delay, Some(Duration::from_millis(2)));
    }

    #[test]
    fn test_retries_on_success_until_ready() {
        let polls = Arc::new(AtomicU32::new(0));
        let io = {
            let polls = polls.clone();
            retrying(
                fast(10),
                move |_| {
                    let polls = polls.clone();
                    IOResult::<u32, ()>::from_fn(move || Ok(polls.fetch_add(1, Ordering::SeqCst)))
                },
                |outcome| matches!(outcome, Ok(n) if *n < 4),
            )
        };

        assert_eq!(io.run(), Ok(4));
    }

    #[cfg(feature = "tracing")]
    #[tracing_test::traced_test]
    #[test]
    fn test_logs_retries_and_exhaustion() {
        let io = retrying(
            RetryPolicy::immediate().with_max_retries(2),
            |_| IOResult::<(), &str>::fail("down"),
            |outcome| outcome.is_err(),
        );

        assert_eq!(io.run(), Err("down"));
        assert!(logs_contain("retrying"));
        assert!(logs_contain("retry policy exhausted"));
    }

    #[test]
    fn test_each_run_starts_fresh() {
        let attempts = Arc::new(AtomicU32::new(0));
        let io = {
            let attempts = attempts.clone();
            retrying(
                fast(1),
                move |_| {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    IOResult::<(), &str>::fail("x")
                },
                |outcome| outcome.is_err(),
            )
        };

        let _ = io.run();
        let _ = io.run();
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }
}
