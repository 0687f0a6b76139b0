//! Caching the outcome of an `IOResult` after its first run.

use std::sync::{Arc, OnceLock};

use super::IOResult;

impl<T, E> IOResult<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Run the body at most once and replay its outcome on every later run.
    ///
    /// Failures are cached too. Clones of the returned handle share the cache.
    /// Concurrent first runs block until one of them has finished the body.
    ///
    /// ```
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    /// use weir::IOResult;
    ///
    /// let calls = Arc::new(AtomicUsize::new(0));
    /// let io = {
    ///     let calls = calls.clone();
    ///     IOResult::<_, String>::from_fn(move || Ok(calls.fetch_add(1, Ordering::SeqCst)))
    /// }
    /// .memoize();
    ///
    /// assert_eq!(io.run(), Ok(0));
    /// assert_eq!(io.run(), Ok(0));
    /// assert_eq!(calls.load(Ordering::SeqCst), 1);
    /// ```
    pub fn memoize(self) -> Self {
        let cell: Arc<OnceLock<Result<T, E>>> = Arc::new(OnceLock::new());
        IOResult::from_fn(move || cell.get_or_init(|| self.run()).clone())
    }
}
