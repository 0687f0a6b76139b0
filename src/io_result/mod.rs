//! Deferred fallible computations.
//!
//! An [`IOResult<T, E>`] describes work that, when run, produces `Ok(T)` or
//! `Err(E)`. Nothing happens until [`IOResult::run`] is called, and every call
//! runs the body again. Use [`IOResult::memoize`] to run it once and replay the
//! outcome.
//!
//! # Combining independent computations
//!
//! Two joins are available, with the same signature and different behaviour:
//!
//! | | [`apply_parallel`] | [`apply_sequential`] |
//! |---|---|---|
//! | execution | function side on a scoped thread, value side on the caller | function side, then value side |
//! | function side fails | value side still runs, function error is returned | value side never runs |
//! | value side fails | value error is returned | value error is returned |
//!
//! The parallel join never skips a side, even when the outcome is already
//! decided. Side effects of both computations are always observed.
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use weir::io_result::{apply_parallel, apply_sequential};
//! use weir::IOResult;
//!
//! let runs = Arc::new(AtomicUsize::new(0));
//! let value = {
//!     let runs = runs.clone();
//!     IOResult::<i32, &str>::from_fn(move || {
//!         runs.fetch_add(1, Ordering::SeqCst);
//!         Ok(21)
//!     })
//! };
//! let broken = IOResult::<fn(i32) -> i32, &str>::fail("no function");
//!
//! assert_eq!(apply_sequential(broken.clone(), value.clone()).run(), Err("no function"));
//! assert_eq!(runs.load(Ordering::SeqCst), 0);
//!
//! assert_eq!(apply_parallel(broken, value).run(), Err("no function"));
//! assert_eq!(runs.load(Ordering::SeqCst), 1);
//! ```

mod apply;
mod bracket;
mod combinators;
mod delay;
#[cfg(feature = "tracing")]
mod instrument;
mod memoize;
mod monoid;
mod retry;
#[cfg(feature = "async")]
mod task;
mod traverse;

use std::sync::Arc;

use crate::{Either, IO};

pub use apply::{apply_parallel, apply_sequential};
pub(crate) use apply::{join_all, join_both};
pub use bracket::{bracket, bracket_full, with_resource, BracketError};
pub use monoid::{concat_par, concat_seq};
pub use retry::retrying;
pub use traverse::{
    sequence_map, sequence_map_par, sequence_map_seq, sequence_vec, sequence_vec_par,
    sequence_vec_seq, traverse_map, traverse_map_par, traverse_map_seq, traverse_vec,
    traverse_vec_par, traverse_vec_seq, traverse_vec_with_index_par,
    traverse_vec_with_index_seq,
};

type RunFn<T, E> = Arc<dyn Fn() -> Result<T, E> + Send + Sync>;

/// A lazy, re-runnable computation that may fail.
///
/// `IOResult<T, E>` is a cheap handle: cloning it shares the body, and every
/// [`run`](IOResult::run) executes the body again.
///
/// # Examples
///
/// ```
/// use weir::IOResult;
///
/// let parsed = IOResult::<_, String>::pure("42")
///     .and_then_result(|s| s.parse::<i32>().map_err(|e| e.to_string()))
///     .map(|n| n * 2);
///
/// assert_eq!(parsed.run(), Ok(84));
/// ```
pub struct IOResult<T, E> {
    run_fn: RunFn<T, E>,
}

impl<T, E> Clone for IOResult<T, E> {
    fn clone(&self) -> Self {
        IOResult {
            run_fn: Arc::clone(&self.run_fn),
        }
    }
}

impl<T, E> std::fmt::Debug for IOResult<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IOResult")
            .field("run_fn", &"<function>")
            .finish()
    }
}

impl<T, E> IOResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a computation that always succeeds with `value`.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::<_, String>::pure(42);
    /// assert_eq!(io.run(), Ok(42));
    /// ```
    pub fn pure(value: T) -> Self
    where
        T: Clone + Sync,
    {
        IOResult::from_fn(move || Ok(value.clone()))
    }

    /// Create a computation that always fails with `error`.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::<i32, _>::fail("boom");
    /// assert_eq!(io.run(), Err("boom"));
    /// ```
    pub fn fail(error: E) -> Self
    where
        E: Clone + Sync,
    {
        IOResult::from_fn(move || Err(error.clone()))
    }

    /// Alias for [`pure`](IOResult::pure).
    pub fn of(value: T) -> Self
    where
        T: Clone + Sync,
    {
        IOResult::pure(value)
    }

    /// Alias for [`fail`](IOResult::fail).
    pub fn left(error: E) -> Self
    where
        E: Clone + Sync,
    {
        IOResult::fail(error)
    }

    /// Wrap a side-effecting callable.
    ///
    /// The callable runs on every [`run`](IOResult::run), never at construction.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        IOResult {
            run_fn: Arc::new(f),
        }
    }

    /// Lift an existing `Result`.
    pub fn from_result(result: Result<T, E>) -> Self
    where
        T: Clone + Sync,
        E: Clone + Sync,
    {
        IOResult::from_fn(move || result.clone())
    }

    /// Lift an `Either`, treating `Left` as the error.
    pub fn from_either(either: Either<E, T>) -> Self
    where
        T: Clone + Sync,
        E: Clone + Sync,
    {
        IOResult::from_result(either.into_result())
    }

    /// Lift an `Option`, producing the error from `on_none` when it is `None`.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let missing = IOResult::from_option(None::<i32>, || "missing");
    /// assert_eq!(missing.run(), Err("missing"));
    /// ```
    pub fn from_option<F>(option: Option<T>, on_none: F) -> Self
    where
        T: Clone + Sync,
        F: Fn() -> E + Send + Sync + 'static,
    {
        IOResult::from_fn(move || option.clone().ok_or_else(&on_none))
    }

    /// Lift an infallible computation.
    pub fn from_io(io: IO<T>) -> Self {
        IOResult::from_fn(move || Ok(io.run()))
    }

    /// Wrap a callable with a foreign error type, translating its errors.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::try_catch(|| "7".parse::<u8>(), |e| format!("bad input: {}", e));
    /// assert_eq!(io.run(), Ok(7));
    /// ```
    pub fn try_catch<X, F, H>(f: F, on_error: H) -> Self
    where
        F: Fn() -> Result<T, X> + Send + Sync + 'static,
        H: Fn(X) -> E + Send + Sync + 'static,
    {
        IOResult::from_fn(move || f().map_err(&on_error))
    }

    /// Run the computation.
    ///
    /// Every call executes the body again unless the computation was memoized.
    #[inline]
    pub fn run(&self) -> Result<T, E> {
        (self.run_fn)()
    }

    /// Run the computation and return the outcome as an `Either`.
    pub fn run_either(&self) -> Either<E, T> {
        self.run().into()
    }
}

#[cfg(test)]
mod tests;
