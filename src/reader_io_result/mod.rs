//! Fallible computations that read a shared environment.
//!
//! A [`ReaderIOResult<R, T, E>`] is an [`IOResult`] that needs an `&R` to run.
//! It is the usual shape for application code: the environment holds
//! configuration and clients, and each step borrows what it needs.
//!
//! Parallel joins share the environment by reference with a scoped thread, so
//! `R` must be `Sync`.
//!
//! ```
//! use weir::ReaderIOResult;
//!
//! struct Config {
//!     base_url: String,
//! }
//!
//! fn endpoint(path: &'static str) -> ReaderIOResult<Config, String, String> {
//!     ReaderIOResult::asks(move |cfg: &Config| format!("{}/{}", cfg.base_url, path))
//! }
//!
//! let users = endpoint("users").map(|url| url.len());
//! let cfg = Config { base_url: "http://api".into() };
//! assert_eq!(users.run(&cfg), Ok(16));
//! ```

mod apply;
mod bracket;
mod retry;
mod traverse;

use std::sync::Arc;

use crate::IOResult;

pub use apply::{apply_parallel, apply_sequential};
pub use bracket::with_resource;
pub use traverse::{
    sequence_vec, sequence_vec_par, sequence_vec_seq, traverse_vec, traverse_vec_par,
    traverse_vec_seq,
};

type ReaderFn<R, T, E> = Arc<dyn Fn(&R) -> Result<T, E> + Send + Sync>;

/// A lazy, re-runnable computation that reads an environment of type `R`.
pub struct ReaderIOResult<R, T, E> {
    run_fn: ReaderFn<R, T, E>,
}

impl<R, T, E> Clone for ReaderIOResult<R, T, E> {
    fn clone(&self) -> Self {
        ReaderIOResult {
            run_fn: Arc::clone(&self.run_fn),
        }
    }
}

impl<R, T, E> std::fmt::Debug for ReaderIOResult<R, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderIOResult")
            .field("run_fn", &"<function>")
            .finish()
    }
}

impl<R, T, E> ReaderIOResult<R, T, E>
where
    R: Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Succeed with `value`, ignoring the environment.
    pub fn pure(value: T) -> Self
    where
        T: Clone + Sync,
    {
        ReaderIOResult::from_fn(move |_| Ok(value.clone()))
    }

    /// Alias for [`pure`](ReaderIOResult::pure).
    pub fn of(value: T) -> Self
    where
        T: Clone + Sync,
    {
        ReaderIOResult::pure(value)
    }

    /// Fail with `error`, ignoring the environment.
    pub fn fail(error: E) -> Self
    where
        E: Clone + Sync,
    {
        ReaderIOResult::from_fn(move |_| Err(error.clone()))
    }

    /// Wrap a side-effecting callable that reads the environment.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&R) -> Result<T, E> + Send + Sync + 'static,
    {
        ReaderIOResult { run_fn: Arc::new(f) }
    }

    /// Project a value out of the environment.
    pub fn asks<F>(f: F) -> Self
    where
        F: Fn(&R) -> T + Send + Sync + 'static,
    {
        ReaderIOResult::from_fn(move |env| Ok(f(env)))
    }

    /// Lift a computation that does not need the environment.
    pub fn from_io_result(io: IOResult<T, E>) -> Self {
        ReaderIOResult::from_fn(move |_| io.run())
    }

    /// Lift an existing `Result`.
    pub fn from_result(result: Result<T, E>) -> Self
    where
        T: Clone + Sync,
        E: Clone + Sync,
    {
        ReaderIOResult::from_fn(move |_| result.clone())
    }

    /// Run with `env`.
    #[inline]
    pub fn run(&self, env: &R) -> Result<T, E> {
        (self.run_fn)(env)
    }

    /// Fix the environment, producing a plain [`IOResult`].
    ///
    /// ```
    /// use weir::ReaderIOResult;
    ///
    /// let io = ReaderIOResult::<u32, _, String>::asks(|n: &u32| n * 2).provide(21);
    /// assert_eq!(io.run(), Ok(42));
    /// ```
    pub fn provide(self, env: R) -> IOResult<T, E>
    where
        R: Send,
    {
        IOResult::from_fn(move || self.run(&env))
    }

    /// Transform the success value.
    pub fn map<U, F>(self, f: F) -> ReaderIOResult<R, U, E>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        ReaderIOResult::from_fn(move |env| self.run(env).map(&f))
    }

    /// Transform the error.
    pub fn map_err<E2, F>(self, f: F) -> ReaderIOResult<R, T, E2>
    where
        F: Fn(E) -> E2 + Send + Sync + 'static,
        E2: Send + 'static,
    {
        ReaderIOResult::from_fn(move |env| self.run(env).map_err(&f))
    }

    /// Chain a dependent step that reads the same environment.
    pub fn and_then<U, F>(self, f: F) -> ReaderIOResult<R, U, E>
    where
        F: Fn(T) -> ReaderIOResult<R, U, E> + Send + Sync + 'static,
        U: Send + 'static,
    {
        ReaderIOResult::from_fn(move |env| f(self.run(env)?).run(env))
    }

    /// Chain a dependent step that does not need the environment.
    pub fn and_then_io_result<U, F>(self, f: F) -> ReaderIOResult<R, U, E>
    where
        F: Fn(T) -> IOResult<U, E> + Send + Sync + 'static,
        U: Send + 'static,
    {
        ReaderIOResult::from_fn(move |env| f(self.run(env)?).run())
    }

    /// Recover from an error by chaining on it.
    pub fn or_else<E2, F>(self, f: F) -> ReaderIOResult<R, T, E2>
    where
        F: Fn(E) -> ReaderIOResult<R, T, E2> + Send + Sync + 'static,
        E2: Send + 'static,
    {
        ReaderIOResult::from_fn(move |env| match self.run(env) {
            Ok(value) => Ok(value),
            Err(error) => f(error).run(env),
        })
    }

    /// Fall back to `that` when this computation fails.
    pub fn alt(self, that: Self) -> Self {
        ReaderIOResult::from_fn(move |env| self.run(env).or_else(|_| that.run(env)))
    }

    /// Observe the success value without changing it.
    pub fn tap<F>(self, f: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        ReaderIOResult::from_fn(move |env| {
            let value = self.run(env)?;
            f(&value);
            Ok(value)
        })
    }

    /// Run against an environment derived from a larger one.
    ///
    /// `f` builds this computation's environment from the outer one on every
    /// run.
    ///
    /// ```
    /// use weir::ReaderIOResult;
    ///
    /// struct App {
    ///     port: u16,
    /// }
    ///
    /// let port = ReaderIOResult::<u16, _, String>::asks(|p: &u16| *p);
    /// let from_app = port.local(|app: &App| app.port);
    /// assert_eq!(from_app.run(&App { port: 8080 }), Ok(8080));
    /// ```
    pub fn local<R2, F>(self, f: F) -> ReaderIOResult<R2, T, E>
    where
        R2: Sync + 'static,
        F: Fn(&R2) -> R + Send + Sync + 'static,
    {
        ReaderIOResult::from_fn(move |outer| self.run(&f(outer)))
    }
}

impl<R, E> ReaderIOResult<R, R, E>
where
    R: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    /// Return a clone of the environment.
    pub fn ask() -> Self {
        ReaderIOResult::from_fn(|env: &R| Ok(env.clone()))
    }
}

impl<R, T, E> ReaderIOResult<R, ReaderIOResult<R, T, E>, E>
where
    R: Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Run the outer computation, then the one it produced, with the same
    /// environment.
    pub fn flatten(self) -> ReaderIOResult<R, T, E> {
        self.and_then(|inner| inner)
    }
}
