use std::panic::{self, AssertUnwindSafe};

use super::ReaderIOResult;

/// Acquire a resource from the environment, use it, and always release it.
///
/// Follows the same rules as
/// [`io_result::with_resource`](crate::io_result::with_resource): a failed
/// acquisition skips use and release, release runs even if use fails or
/// panics, and a use error wins over a release error. All three steps see the
/// same environment.
///
/// ```
/// use std::sync::Mutex;
/// use weir::reader_io_result::with_resource;
/// use weir::ReaderIOResult;
///
/// struct Pool {
///     leased: Mutex<u32>,
/// }
///
/// let lease = ReaderIOResult::<Pool, _, String>::from_fn(|pool: &Pool| {
///     *pool.leased.lock().unwrap() += 1;
///     Ok(7u32)
/// });
/// let query = with_resource(
///     lease,
///     |conn: &u32| ReaderIOResult::pure(format!("conn {}", conn)),
///     |_conn| {
///         ReaderIOResult::from_fn(|pool: &Pool| {
///             *pool.leased.lock().unwrap() -= 1;
///             Ok(())
///         })
///     },
/// );
///
/// let pool = Pool { leased: Mutex::new(0) };
/// assert_eq!(query.run(&pool), Ok("conn 7".to_string()));
/// assert_eq!(*pool.leased.lock().unwrap(), 0);
/// ```
pub fn with_resource<R, Res, T, X, E, U, Rel>(
    acquire: ReaderIOResult<R, Res, E>,
    use_fn: U,
    release: Rel,
) -> ReaderIOResult<R, T, E>
where
    R: Sync + 'static,
    Res: Send + 'static,
    T: Send + 'static,
    X: Send + 'static,
    E: Send + 'static,
    U: Fn(&Res) -> ReaderIOResult<R, T, E> + Send + Sync + 'static,
    Rel: Fn(Res) -> ReaderIOResult<R, X, E> + Send + Sync + 'static,
{
    ReaderIOResult::from_fn(move |env: &R| {
        let resource = acquire.run(env)?;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| use_fn(&resource).run(env)));
        let released = release(resource).run(env);

        match outcome {
            Ok(Ok(value)) => released.map(|_| value),
            Ok(Err(use_error)) => Err(use_error),
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}
