//! Applicative joins for `IOResult`.
//!
//! [`apply_parallel`] and [`apply_sequential`] share a signature and differ
//! in how they run the two sides. The parallel join always runs both sides to
//! completion. The sequential join skips the value side once the function side
//! has failed. Callers pick one by name. Methods without a suffix (`ap`,
//! `zip`, `map2`, ...) use the parallel join.

use std::panic;
use std::thread;

use super::IOResult;

/// Run `left` on a scoped thread and `right` on the calling thread, then wait
/// for both.
///
/// Both outcomes are returned untouched; precedence is up to the caller. A
/// panic on the scoped thread is resumed here after `right` has finished.
pub(crate) fn join_both<L, R, E, FL, FR>(
    left: FL,
    right: FR,
) -> (Result<L, E>, Result<R, E>)
where
    L: Send,
    E: Send,
    FL: FnOnce() -> Result<L, E> + Send,
    FR: FnOnce() -> Result<R, E>,
{
    thread::scope(|scope| {
        let handle = scope.spawn(left);
        let right = right();
        match handle.join() {
            Ok(left) => (left, right),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

/// Run every job concurrently and collect the outcomes in input order.
///
/// All jobs but the last start on their own scoped thread; the last runs on
/// the calling thread. Every job runs to completion. The error of the
/// lowest-index failing job is returned. If any scoped thread panicked, the
/// first such panic is resumed once all jobs have finished.
pub(crate) fn join_all<J, T, E, F>(jobs: &[J], run: F) -> Result<Vec<T>, E>
where
    J: Sync,
    T: Send,
    E: Send,
    F: Fn(&J) -> Result<T, E> + Sync,
{
    let Some((last, rest)) = jobs.split_last() else {
        return Ok(Vec::new());
    };
    let run = &run;

    thread::scope(|scope| {
        let handles: Vec<_> = rest
            .iter()
            .map(|job| scope.spawn(move || run(job)))
            .collect();
        let last = run(last);

        let mut outcomes = Vec::with_capacity(jobs.len());
        let mut panicked = None;
        for handle in handles {
            match handle.join() {
                Ok(outcome) => outcomes.push(outcome),
                Err(payload) => {
                    if panicked.is_none() {
                        panicked = Some(payload);
                    }
                }
            }
        }
        if let Some(payload) = panicked {
            panic::resume_unwind(payload);
        }

        outcomes.push(last);
        outcomes.into_iter().collect()
    })
}

/// Combine a computation producing a function with one producing its argument,
/// running both concurrently.
///
/// On every run, `cf` starts on a scoped auxiliary thread and `ca` runs on the
/// calling thread. The join blocks until both finish. There is no timeout and
/// no cancellation.
///
/// Precedence:
/// 1. `cf` failed: its error, whatever `ca` did
/// 2. `ca` failed: its error
/// 3. both succeeded: `f(a)`
///
/// Both sides always run to completion, even when `cf` has already failed.
/// This differs from [`apply_sequential`] and from `Result`-style `ap`, which
/// stop at the first error.
///
/// ```
/// use weir::io_result::apply_parallel;
/// use weir::IOResult;
///
/// let double = IOResult::<_, &str>::from_fn(|| Ok(|x: i32| x * 2));
/// assert_eq!(apply_parallel(double, IOResult::pure(21)).run(), Ok(42));
///
/// let broken = IOResult::<fn(i32) -> i32, _>::fail("f failed");
/// let failing = IOResult::<i32, _>::fail("a failed");
/// assert_eq!(apply_parallel(broken, failing).run(), Err("f failed"));
/// ```
pub fn apply_parallel<F, A, B, E>(cf: IOResult<F, E>, ca: IOResult<A, E>) -> IOResult<B, E>
where
    F: FnOnce(A) -> B + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    IOResult::from_fn(move || {
        let (f, a) = join_both(|| cf.run(), || ca.run());
        let f = f?;
        let a = a?;
        Ok(f(a))
    })
}

/// Combine a computation producing a function with one producing its argument,
/// running them one after the other.
///
/// `cf` runs first. If it fails, its error is returned and `ca` never runs.
/// Otherwise `ca` runs and its error, if any, is returned.
///
/// ```
/// use weir::io_result::apply_sequential;
/// use weir::IOResult;
///
/// let add_one = IOResult::<_, String>::from_fn(|| Ok(|x: i32| x + 1));
/// assert_eq!(apply_sequential(add_one, IOResult::pure(41)).run(), Ok(42));
/// ```
pub fn apply_sequential<F, A, B, E>(cf: IOResult<F, E>, ca: IOResult<A, E>) -> IOResult<B, E>
where
    F: FnOnce(A) -> B + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    IOResult::from_fn(move || {
        let f = cf.run()?;
        let a = ca.run()?;
        Ok(f(a))
    })
}

impl<F, E> IOResult<F, E>
where
    F: Send + 'static,
    E: Send + 'static,
{
    /// Apply the produced function to the produced value with the parallel join.
    ///
    /// Same as [`apply_parallel`].
    pub fn ap<A, B>(self, ca: IOResult<A, E>) -> IOResult<B, E>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        apply_parallel(self, ca)
    }

    /// Same as [`apply_parallel`].
    pub fn ap_par<A, B>(self, ca: IOResult<A, E>) -> IOResult<B, E>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        apply_parallel(self, ca)
    }

    /// Same as [`apply_sequential`].
    pub fn ap_seq<A, B>(self, ca: IOResult<A, E>) -> IOResult<B, E>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        apply_sequential(self, ca)
    }
}

impl<T, E> IOResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Pair two values using the parallel join.
    pub fn zip<U>(self, other: IOResult<U, E>) -> IOResult<(T, U), E>
    where
        U: Send + 'static,
    {
        self.map2_par(other, |t, u| (t, u))
    }

    /// Pair two values using the sequential join.
    pub fn zip_seq<U>(self, other: IOResult<U, E>) -> IOResult<(T, U), E>
    where
        U: Send + 'static,
    {
        self.map2_seq(other, |t, u| (t, u))
    }

    /// Combine two values with `f` using the parallel join.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let sum = IOResult::<_, String>::pure(40).map2(IOResult::pure(2), |a, b| a + b);
    /// assert_eq!(sum.run(), Ok(42));
    /// ```
    pub fn map2<U, V, F>(self, other: IOResult<U, E>, f: F) -> IOResult<V, E>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        self.map2_par(other, f)
    }

    /// Combine two values with `f` using the parallel join.
    pub fn map2_par<U, V, F>(self, other: IOResult<U, E>, f: F) -> IOResult<V, E>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        IOResult::from_fn(move || {
            let (t, u) = join_both(|| self.run(), || other.run());
            let t = t?;
            let u = u?;
            Ok(f(t, u))
        })
    }

    /// Combine two values with `f` using the sequential join.
    pub fn map2_seq<U, V, F>(self, other: IOResult<U, E>, f: F) -> IOResult<V, E>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        IOResult::from_fn(move || {
            let t = self.run()?;
            let u = other.run()?;
            Ok(f(t, u))
        })
    }

    /// Run both in parallel and keep this value.
    pub fn ap_first<U>(self, other: IOResult<U, E>) -> Self
    where
        U: Send + 'static,
    {
        self.map2_par(other, |t, _| t)
    }

    /// Run both in sequence and keep this value.
    pub fn ap_first_seq<U>(self, other: IOResult<U, E>) -> Self
    where
        U: Send + 'static,
    {
        self.map2_seq(other, |t, _| t)
    }

    /// Run both in parallel and keep the other value.
    pub fn ap_second<U>(self, other: IOResult<U, E>) -> IOResult<U, E>
    where
        U: Send + 'static,
    {
        self.map2_par(other, |_, u| u)
    }

    /// Run both in sequence and keep the other value.
    pub fn ap_second_seq<U>(self, other: IOResult<U, E>) -> IOResult<U, E>
    where
        U: Send + 'static,
    {
        self.map2_seq(other, |_, u| u)
    }
}
