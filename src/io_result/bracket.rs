//! Acquire, use and release a resource.
//!
//! All three functions follow the same state machine:
//!
//! 1. Run `acquire`. If it fails, report its error. Neither use nor release runs.
//! 2. Run the use function with a borrow of the resource.
//! 3. Run the release function with the resource. This always happens once
//!    acquire has succeeded.
//! 4. Report the use error if there is one, else the release error, else the
//!    value.
//!
//! [`bracket_full`] keeps both errors instead of dropping the release error.
//!
//! # Example
//!
//! ```
//! use weir::io_result::with_resource;
//! use weir::IOResult;
//!
//! let acquire = IOResult::<i32, &str>::fail("boom");
//! let io = with_resource(
//!     acquire,
//!     |conn: &i32| IOResult::pure(*conn * 2),
//!     |_conn| IOResult::pure(()),
//! );
//! assert_eq!(io.run(), Err("boom"));
//! ```

use std::panic::{self, AssertUnwindSafe};

use super::IOResult;

// ========== BracketError ==========

/// Which phases of a [`bracket_full`] run failed.
///
/// - `Acquire`: acquisition failed, use and release never ran
/// - `Use`: the use function failed, release succeeded
/// - `Release`: the use function succeeded, release failed
/// - `Both`: use and release both failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketError<E> {
    /// Acquisition failed.
    Acquire(E),
    /// The use function failed and release succeeded.
    Use(E),
    /// The use function succeeded and release failed.
    Release(E),
    /// Use and release both failed.
    Both {
        /// Error from the use function.
        use_error: E,
        /// Error from the release function.
        release_error: E,
    },
}

impl<E> BracketError<E> {
    /// The acquisition error, if acquisition failed.
    pub fn acquire_error(&self) -> Option<&E> {
        match self {
            BracketError::Acquire(e) => Some(e),
            _ => None,
        }
    }

    /// The use error, if the use function failed.
    pub fn use_error(&self) -> Option<&E> {
        match self {
            BracketError::Use(e) | BracketError::Both { use_error: e, .. } => Some(e),
            _ => None,
        }
    }

    /// The release error, if release failed.
    pub fn release_error(&self) -> Option<&E> {
        match self {
            BracketError::Release(e)
            | BracketError::Both {
                release_error: e, ..
            } => Some(e),
            _ => None,
        }
    }

    /// Collapse to a single error, preferring the use error over the release
    /// error.
    pub fn into_primary(self) -> E {
        match self {
            BracketError::Acquire(e) | BracketError::Use(e) | BracketError::Release(e) => e,
            BracketError::Both { use_error, .. } => use_error,
        }
    }

    /// Transform every contained error.
    pub fn map<F, E2>(self, f: F) -> BracketError<E2>
    where
        F: Fn(E) -> E2,
    {
        match self {
            BracketError::Acquire(e) => BracketError::Acquire(f(e)),
            BracketError::Use(e) => BracketError::Use(f(e)),
            BracketError::Release(e) => BracketError::Release(f(e)),
            BracketError::Both {
                use_error,
                release_error,
            } => BracketError::Both {
                use_error: f(use_error),
                release_error: f(release_error),
            },
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for BracketError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::Acquire(e) => write!(f, "acquire failed: {}", e),
            BracketError::Use(e) => write!(f, "{}", e),
            BracketError::Release(e) => write!(f, "release failed: {}", e),
            BracketError::Both {
                use_error,
                release_error,
            } => write!(
                f,
                "use failed: {}; release also failed: {}",
                use_error, release_error
            ),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for BracketError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BracketError::Acquire(e)
            | BracketError::Use(e)
            | BracketError::Release(e)
            | BracketError::Both { use_error: e, .. } => Some(e),
        }
    }
}

// ========== Runners ==========

/// Run `use_fn` and then `release`, releasing even if `use_fn` panics.
///
/// A panic from the use function is resumed after release has run.
fn use_then_release<R, T, X, E, U, Rel>(
    resource: R,
    use_fn: &U,
    release: &Rel,
) -> (Result<T, E>, Result<X, E>)
where
    U: Fn(&R) -> IOResult<T, E>,
    Rel: Fn(R) -> IOResult<X, E>,
    T: Send + 'static,
    X: Send + 'static,
    E: Send + 'static,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| use_fn(&resource).run()));
    let released = release(resource).run();

    match outcome {
        Ok(outcome) => (outcome, released),
        Err(payload) => {
            #[cfg(feature = "tracing")]
            if released.is_err() {
                tracing::error!("resource release failed after a panic in use");
            }
            panic::resume_unwind(payload)
        }
    }
}

/// Use a resource and always release it.
///
/// The release function gets ownership of the resource once the use function
/// has finished, including when it failed or panicked. A use error takes
/// precedence over a release error.
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use weir::io_result::with_resource;
/// use weir::IOResult;
///
/// let released = Arc::new(AtomicUsize::new(0));
/// let io = {
///     let released = released.clone();
///     with_resource(
///         IOResult::<_, String>::pure(vec![1, 2, 3]),
///         |items: &Vec<i32>| IOResult::pure(items.iter().sum::<i32>()),
///         move |_items| {
///             released.fetch_add(1, Ordering::SeqCst);
///             IOResult::pure(())
///         },
///     )
/// };
///
/// assert_eq!(io.run(), Ok(6));
/// assert_eq!(released.load(Ordering::SeqCst), 1);
/// ```
pub fn with_resource<R, T, X, E, U, Rel>(
    acquire: IOResult<R, E>,
    use_fn: U,
    release: Rel,
) -> IOResult<T, E>
where
    R: Send + 'static,
    T: Send + 'static,
    X: Send + 'static,
    E: Send + 'static,
    U: Fn(&R) -> IOResult<T, E> + Send + Sync + 'static,
    Rel: Fn(R) -> IOResult<X, E> + Send + Sync + 'static,
{
    IOResult::from_fn(move || {
        let resource = acquire.run()?;
        let (outcome, released) = use_then_release(resource, &use_fn, &release);
        match outcome {
            Ok(value) => released.map(|_| value),
            Err(use_error) => {
                #[cfg(feature = "tracing")]
                if released.is_err() {
                    tracing::warn!("resource release failed after a use error");
                }
                Err(use_error)
            }
        }
    })
}

/// Like [`with_resource`], but the release function also sees the outcome
/// of the use function.
///
/// The outcome is only known when the use function returns, so a panic in the
/// use function propagates without running release. Use [`with_resource`] or
/// [`bracket_full`] when release must survive panics.
pub fn bracket<R, T, X, E, U, Rel>(
    acquire: IOResult<R, E>,
    use_fn: U,
    release: Rel,
) -> IOResult<T, E>
where
    R: Send + 'static,
    T: Send + 'static,
    X: Send + 'static,
    E: Send + 'static,
    U: Fn(&R) -> IOResult<T, E> + Send + Sync + 'static,
    Rel: Fn(R, &Result<T, E>) -> IOResult<X, E> + Send + Sync + 'static,
{
    IOResult::from_fn(move || {
        let resource = acquire.run()?;
        let outcome = use_fn(&resource).run();
        let released = release(resource, &outcome).run();
        let value = outcome?;
        released?;
        Ok(value)
    })
}

/// Like [`with_resource`], but reports every failed phase.
///
/// ```
/// use weir::io_result::{bracket_full, BracketError};
/// use weir::IOResult;
///
/// let io = bracket_full(
///     IOResult::<_, &str>::pure("handle"),
///     |_h: &&str| IOResult::<i32, _>::fail("read failed"),
///     |_h| IOResult::<(), _>::fail("close failed"),
/// );
///
/// assert_eq!(
///     io.run(),
///     Err(BracketError::Both {
///         use_error: "read failed",
///         release_error: "close failed",
///     })
/// );
/// ```
pub fn bracket_full<R, T, X, E, U, Rel>(
    acquire: IOResult<R, E>,
    use_fn: U,
    release: Rel,
) -> IOResult<T, BracketError<E>>
where
    R: Send + 'static,
    T: Send + 'static,
    X: Send + 'static,
    E: Send + 'static,
    U: Fn(&R) -> IOResult<T, E> + Send + Sync + 'static,
    Rel: Fn(R) -> IOResult<X, E> + Send + Sync + 'static,
{
    IOResult::from_fn(move || {
        let resource = acquire.run().map_err(BracketError::Acquire)?;
        match use_then_release(resource, &use_fn, &release) {
            (Ok(value), Ok(_)) => Ok(value),
            (Err(use_error), Ok(_)) => Err(BracketError::Use(use_error)),
            (Ok(_), Err(release_error)) => Err(BracketError::Release(release_error)),
            (Err(use_error), Err(release_error)) => Err(BracketError::Both {
                use_error,
                release_error,
            }),
        }
    })
}
