//! Bridges between `IOResult` and async code. Requires the `async` feature.

use std::future::Future;
use std::panic;

use super::IOResult;

impl<T, E> IOResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wrap a future factory.
    ///
    /// Every run creates a fresh future and drives it to completion on the
    /// running thread with [`futures::executor::block_on`]. Do not run the
    /// result from inside an async runtime worker; use
    /// [`run_blocking`](IOResult::run_blocking) there.
    ///
    /// ```
    /// use weir::IOResult;
    ///
    /// let io = IOResult::from_future(|| async { Ok::<_, String>(40 + 2) });
    /// assert_eq!(io.run(), Ok(42));
    /// ```
    pub fn from_future<F, Fut>(make_future: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>>,
    {
        IOResult::from_fn(move || futures::executor::block_on(make_future()))
    }

    /// Run the body on tokio's blocking pool and await its outcome.
    ///
    /// A panic in the body is resumed in the awaiting task.
    pub async fn run_blocking(&self) -> Result<T, E> {
        let io = self.clone();
        match tokio::task::spawn_blocking(move || io.run()).await {
            Ok(outcome) => outcome,
            Err(join_error) => match join_error.try_into_panic() {
                Ok(payload) => panic::resume_unwind(payload),
                Err(join_error) => panic::panic_any(join_error.to_string()),
            },
        }
    }
}
