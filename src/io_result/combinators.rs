//! Functor, monad and recovery combinators for `IOResult`.
//!
//! Every combinator consumes the handle and returns a new lazy computation.
//! Errors short-circuit: once a step fails, later `map`/`and_then` functions
//! are not called.

use super::IOResult;
use crate::IO;

impl<T, E> IOResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Transform the success value.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::<_, String>::pure(5).map(|x| x * 2);
    /// assert_eq!(io.run(), Ok(10));
    /// ```
    pub fn map<U, F>(self, f: F) -> IOResult<U, E>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        IOResult::from_fn(move || self.run().map(&f))
    }

    /// Transform the error value.
    pub fn map_err<E2, F>(self, f: F) -> IOResult<T, E2>
    where
        F: Fn(E) -> E2 + Send + Sync + 'static,
        E2: Send + 'static,
    {
        IOResult::from_fn(move || self.run().map_err(&f))
    }

    /// Transform both the error and the success value.
    pub fn bimap<E2, U, F, G>(self, on_err: F, on_ok: G) -> IOResult<U, E2>
    where
        F: Fn(E) -> E2 + Send + Sync + 'static,
        G: Fn(T) -> U + Send + Sync + 'static,
        E2: Send + 'static,
        U: Send + 'static,
    {
        IOResult::from_fn(move || self.run().map(&on_ok).map_err(&on_err))
    }

    /// Chain a dependent fallible step.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::<_, String>::pure(5).and_then(|x| IOResult::pure(x + 1));
    /// assert_eq!(io.run(), Ok(6));
    ///
    /// let io = IOResult::<i32, _>::fail("stop".to_string())
    ///     .and_then(|x| IOResult::pure(x + 1));
    /// assert_eq!(io.run(), Err("stop".to_string()));
    /// ```
    pub fn and_then<U, F>(self, f: F) -> IOResult<U, E>
    where
        F: Fn(T) -> IOResult<U, E> + Send + Sync + 'static,
        U: Send + 'static,
    {
        IOResult::from_fn(move || f(self.run()?).run())
    }

    /// Chain a step that returns a plain `Result`.
    pub fn and_then_result<U, F>(self, f: F) -> IOResult<U, E>
    where
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
        U: Send + 'static,
    {
        IOResult::from_fn(move || self.run().and_then(&f))
    }

    /// Run a dependent step for its effect and keep the original value.
    ///
    /// A failure of the step fails the whole computation.
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use weir::IOResult;
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let io = {
    ///     let seen = seen.clone();
    ///     IOResult::<_, String>::pure(7).and_then_first(move |x| {
    ///         let seen = seen.clone();
    ///         let x = *x;
    ///         IOResult::from_fn(move || {
    ///             seen.lock().unwrap().push(x);
    ///             Ok(())
    ///         })
    ///     })
    /// };
    ///
    /// assert_eq!(io.run(), Ok(7));
    /// assert_eq!(*seen.lock().unwrap(), vec![7]);
    /// ```
    pub fn and_then_first<U, F>(self, f: F) -> IOResult<T, E>
    where
        F: Fn(&T) -> IOResult<U, E> + Send + Sync + 'static,
        U: Send + 'static,
    {
        IOResult::from_fn(move || {
            let value = self.run()?;
            f(&value).run()?;
            Ok(value)
        })
    }

    /// Observe the success value without changing it.
    pub fn tap<F>(self, f: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        IOResult::from_fn(move || {
            let value = self.run()?;
            f(&value);
            Ok(value)
        })
    }

    /// Observe the error without changing it.
    pub fn tap_err<F>(self, f: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        IOResult::from_fn(move || self.run().inspect_err(&f))
    }

    /// Recover from an error by chaining on it.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::<i32, _>::fail("missing")
    ///     .or_else(|e| IOResult::<_, String>::pure(e.len() as i32));
    /// assert_eq!(io.run(), Ok(7));
    /// ```
    pub fn or_else<E2, F>(self, f: F) -> IOResult<T, E2>
    where
        F: Fn(E) -> IOResult<T, E2> + Send + Sync + 'static,
        E2: Send + 'static,
    {
        IOResult::from_fn(move || match self.run() {
            Ok(value) => Ok(value),
            Err(error) => f(error).run(),
        })
    }

    /// Fall back to `that` when this computation fails.
    ///
    /// `that` runs only after a failure.
    pub fn alt(self, that: IOResult<T, E>) -> Self {
        IOResult::from_fn(move || self.run().or_else(|_| that.run()))
    }

    /// Handle both outcomes, producing an infallible computation.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::<i32, _>::fail("boom")
    ///     .fold(|e| format!("error: {}", e), |n| format!("value: {}", n));
    /// assert_eq!(io.run(), "error: boom");
    /// ```
    pub fn fold<U, F, G>(self, on_err: F, on_ok: G) -> IO<U>
    where
        F: Fn(E) -> U + Send + Sync + 'static,
        G: Fn(T) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        IO::from_fn(move || match self.run() {
            Ok(value) => on_ok(value),
            Err(error) => on_err(error),
        })
    }

    /// Replace an error with a value computed from it.
    pub fn get_or_else<F>(self, f: F) -> IO<T>
    where
        F: Fn(E) -> T + Send + Sync + 'static,
    {
        IO::from_fn(move || self.run().unwrap_or_else(&f))
    }

    /// Exchange the success and error channels.
    pub fn swap(self) -> IOResult<E, T> {
        IOResult::from_fn(move || match self.run() {
            Ok(value) => Err(value),
            Err(error) => Ok(error),
        })
    }

    /// Fail with `on_fail(&value)` when `predicate` rejects the success value.
    pub fn filter_or_else<P, F>(self, predicate: P, on_fail: F) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        F: Fn(&T) -> E + Send + Sync + 'static,
    {
        IOResult::from_fn(move || {
            let value = self.run()?;
            if predicate(&value) {
                Ok(value)
            } else {
                Err(on_fail(&value))
            }
        })
    }
}

impl<T, E> IOResult<IOResult<T, E>, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Run the outer computation, then the computation it produced.
    pub fn flatten(self) -> IOResult<T, E> {
        self.and_then(|inner| inner)
    }
}
