use std::thread;

use super::ReaderIOResult;
use crate::retry::{apply_policy, RetryPolicy, RetryStatus};

impl<R, T, E> ReaderIOResult<R, T, E>
where
    R: Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Run `action` against the environment until `check` is satisfied or
    /// `policy` gives up.
    ///
    /// Every attempt reads the same environment. Otherwise this behaves like
    /// [`io_result::retrying`](crate::io_result::retrying).
    ///
    /// ```
    /// use std::time::Duration;
    /// use weir::{ReaderIOResult, RetryPolicy};
    ///
    /// struct Replica {
    ///     ready_after: u32,
    /// }
    ///
    /// let probe = ReaderIOResult::retrying(
    ///     RetryPolicy::immediate().with_max_retries(5),
    ///     |status| {
    ///         let iter = status.iter_number;
    ///         ReaderIOResult::from_fn(move |replica: &Replica| {
    ///             if iter < replica.ready_after { Err("not ready") } else { Ok(iter) }
    ///         })
    ///     },
    ///     |outcome| outcome.is_err(),
    /// );
    ///
    /// assert_eq!(probe.run(&Replica { ready_after: 3 }), Ok(3));
    /// assert_eq!(probe.run(&Replica { ready_after: 9 }), Err("not ready"));
    /// ```
    pub fn retrying<A, C>(policy: RetryPolicy, action: A, check: C) -> Self
    where
        A: Fn(&RetryStatus) -> ReaderIOResult<R, T, E> + Send + Sync + 'static,
        C: Fn(&Result<T, E>) -> bool + Send + Sync + 'static,
    {
        ReaderIOResult::from_fn(move |env: &R| {
            let mut status = RetryStatus::default();
            loop {
                let outcome = action(&status).run(env);
                if !check(&outcome) {
                    return outcome;
                }

                let Some(next) = apply_policy(&policy, &status) else {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        attempts = status.iter_number + 1,
                        "retry policy exhausted"
                    );
                    return outcome;
                };
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
        })
    }
}
