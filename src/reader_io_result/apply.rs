//! Applicative joins for `ReaderIOResult`.
//!
//! Same rules as the `IOResult` joins: the parallel join runs both sides to
//! completion and prefers the function side's error, the sequential join
//! skips the value side once the function side has failed. Both sides see the
//! same environment.

use super::ReaderIOResult;
use crate::io_result::join_both;

/// Combine a function and its argument, running both concurrently against the
/// same environment.
///
/// ```
/// use weir::reader_io_result::apply_parallel;
/// use weir::ReaderIOResult;
///
/// let scale = ReaderIOResult::<i32, _, String>::asks(|k: &i32| {
///     let k = *k;
///     move |x: i32| x * k
/// });
/// let base = ReaderIOResult::asks(|k: &i32| k + 1);
///
/// assert_eq!(apply_parallel(scale, base).run(&6), Ok(42));
/// ```
pub fn apply_parallel<R, F, A, B, E>(
    cf: ReaderIOResult<R, F, E>,
    ca: ReaderIOResult<R, A, E>,
) -> ReaderIOResult<R, B, E>
where
    R: Sync + 'static,
    F: FnOnce(A) -> B + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    ReaderIOResult::from_fn(move |env: &R| {
        let (f, a) = join_both(|| cf.run(env), || ca.run(env));
        let f = f?;
        let a = a?;
        Ok(f(a))
    })
}

/// Combine a function and its argument, running the function side first and
/// stopping at its error.
pub fn apply_sequential<R, F, A, B, E>(
    cf: ReaderIOResult<R, F, E>,
    ca: ReaderIOResult<R, A, E>,
) -> ReaderIOResult<R, B, E>
where
    R: Sync + 'static,
    F: FnOnce(A) -> B + Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    ReaderIOResult::from_fn(move |env: &R| {
        let f = cf.run(env)?;
        let a = ca.run(env)?;
        Ok(f(a))
    })
}

impl<R, F, E> ReaderIOResult<R, F, E>
where
    R: Sync + 'static,
    F: Send + 'static,
    E: Send + 'static,
{
    /// Same as [`apply_parallel`].
    pub fn ap<A, B>(self, ca: ReaderIOResult<R, A, E>) -> ReaderIOResult<R, B, E>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        apply_parallel(self, ca)
    }

    /// Same as [`apply_parallel`].
    pub fn ap_par<A, B>(self, ca: ReaderIOResult<R, A, E>) -> ReaderIOResult<R, B, E>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        apply_parallel(self, ca)
    }

    /// Same as [`apply_sequential`].
    pub fn ap_seq<A, B>(self, ca: ReaderIOResult<R, A, E>) -> ReaderIOResult<R, B, E>
    where
        F: FnOnce(A) -> B,
        A: Send + 'static,
        B: Send + 'static,
    {
        apply_sequential(self, ca)
    }
}

impl<R, T, E> ReaderIOResult<R, T, E>
where
    R: Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Combine two values with `f` using the parallel join.
    pub fn map2<U, V, F>(self, other: ReaderIOResult<R, U, E>, f: F) -> ReaderIOResult<R, V, E>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        self.map2_par(other, f)
    }

    /// Combine two values with `f` using the parallel join.
    pub fn map2_par<U, V, F>(self, other: ReaderIOResult<R, U, E>, f: F) -> ReaderIOResult<R, V, E>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        ReaderIOResult::from_fn(move |env: &R| {
            let (t, u) = join_both(|| self.run(env), || other.run(env));
            let t = t?;
            let u = u?;
            Ok(f(t, u))
        })
    }

    /// Combine two values with `f` using the sequential join.
    pub fn map2_seq<U, V, F>(self, other: ReaderIOResult<R, U, E>, f: F) -> ReaderIOResult<R, V, E>
    where
        U: Send + 'static,
        V: Send + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        ReaderIOResult::from_fn(move |env: &R| {
            let t = self.run(env)?;
            let u = other.run(env)?;
            Ok(f(t, u))
        })
    }

    /// Pair two values using the parallel join.
    pub fn zip<U>(self, other: ReaderIOResult<R, U, E>) -> ReaderIOResult<R, (T, U), E>
    where
        U: Send + 'static,
    {
        self.map2_par(other, |t, u| (t, u))
    }

    /// Pair two values using the sequential join.
    pub fn zip_seq<U>(self, other: ReaderIOResult<R, U, E>) -> ReaderIOResult<R, (T, U), E>
    where
        U: Send + 'static,
    {
        self.map2_seq(other, |t, u| (t, u))
    }
}
