//! Infallible deferred computations.
//!
//! `IO<T>` is a re-runnable computation that always produces a `T`. It is the
//! result of handling both outcomes of an [`IOResult`](crate::IOResult)
//! (`fold`, `get_or_else`) and can be lifted back with
//! [`IOResult::from_io`](crate::IOResult::from_io).
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use weir::IO;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let tick = {
//!     let counter = counter.clone();
//!     IO::from_fn(move || counter.fetch_add(1, Ordering::SeqCst) + 1)
//! };
//!
//! // Nothing has run yet.
//! assert_eq!(counter.load(Ordering::SeqCst), 0);
//!
//! assert_eq!(tick.run(), 1);
//! assert_eq!(tick.run(), 2);
//! ```

use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

type IoFn<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A deferred computation that cannot fail.
///
/// Cloning is cheap and shares the underlying body.
pub struct IO<T> {
    run_fn: IoFn<T>,
}

impl<T> Clone for IO<T> {
    fn clone(&self) -> Self {
        IO {
            run_fn: Arc::clone(&self.run_fn),
        }
    }
}

impl<T> std::fmt::Debug for IO<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IO").field("run_fn", &"<function>").finish()
    }
}

impl<T> IO<T>
where
    T: Send + 'static,
{
    /// Create a computation that returns a clone of `value` on every run.
    pub fn of(value: T) -> Self
    where
        T: Clone + Sync,
    {
        IO::from_fn(move || value.clone())
    }

    /// Wrap a side-effecting callable.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        IO {
            run_fn: Arc::new(f),
        }
    }

    /// Run the computation.
    pub fn run(&self) -> T {
        (self.run_fn)()
    }

    /// Transform the produced value.
    pub fn map<U, F>(self, f: F) -> IO<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        IO::from_fn(move || f(self.run()))
    }

    /// Chain a dependent computation.
    pub fn and_then<U, F>(self, f: F) -> IO<U>
    where
        F: Fn(T) -> IO<U> + Send + Sync + 'static,
        U: Send + 'static,
    {
        IO::from_fn(move || f(self.run()).run())
    }

    /// Run both computations in order and pair their values.
    pub fn zip<U>(self, other: IO<U>) -> IO<(T, U)>
    where
        U: Send + 'static,
    {
        IO::from_fn(move || (self.run(), other.run()))
    }

    /// Sleep for `duration` before every run.
    pub fn delay(self, duration: Duration) -> Self {
        IO::from_fn(move || {
            thread::sleep(duration);
            self.run()
        })
    }

    /// Run the body at most once and replay its value afterwards.
    pub fn memoize(self) -> Self
    where
        T: Clone + Sync,
    {
        let cell: Arc<OnceLock<T>> = Arc::new(OnceLock::new());
        IO::from_fn(move || cell.get_or_init(|| self.run()).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_of_and_map() {
        let io = IO::of(20).map(|x| x + 1).map(|x| x * 2);
        assert_eq!(io.run(), 42);
    }

    #[test]
    fn test_and_then() {
        let io = IO::of(2).and_then(|x| IO::from_fn(move || x * 3));
        assert_eq!(io.run(), 6);
    }

    #[test]
    fn test_zip_runs_in_order() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let first = {
            let log = log.clone();
            IO::from_fn(move || log.lock().unwrap().push("first"))
        };
        let second = {
            let log = log.clone();
            IO::from_fn(move || log.lock().unwrap().push("second"))
        };

        first.zip(second).run();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_memoize_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let io = {
            let calls = calls.clone();
            IO::from_fn(move || calls.fetch_add(1, Ordering::SeqCst))
        }
        .memoize();

        assert_eq!(io.run(), 0);
        assert_eq!(io.clone().run(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delay_waits() {
        let start = std::time::Instant::now();
        IO::of(()).delay(Duration::from_millis(20)).run();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
