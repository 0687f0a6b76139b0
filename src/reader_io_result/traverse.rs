//! Traversals over collections of `ReaderIOResult`.
//!
//! Same behaviour as the `IOResult` traversals. Every element sees the same
//! environment.

use super::ReaderIOResult;
use crate::io_result::join_all;

/// Map each element to a computation and collect the results, running every
/// element. The lowest-index error is reported.
pub fn traverse_vec_par<R, A, B, E, F, I>(items: I, f: F) -> ReaderIOResult<R, Vec<B>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> ReaderIOResult<R, B, E>,
    R: Sync + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    let jobs: Vec<ReaderIOResult<R, B, E>> = items.into_iter().map(f).collect();
    ReaderIOResult::from_fn(move |env: &R| join_all(&jobs, |reader| reader.run(env)))
}

/// Map each element to a computation and collect the results in order,
/// stopping at the first error.
///
/// ```
/// use weir::reader_io_result::traverse_vec_seq;
/// use weir::ReaderIOResult;
///
/// let limit = 10;
/// let checked = traverse_vec_seq(vec![3, 7, 12], |n| {
///     ReaderIOResult::from_fn(move |max: &i32| {
///         if n <= *max { Ok(n) } else { Err(format!("{} over {}", n, max)) }
///     })
/// });
///
/// assert_eq!(checked.run(&limit), Err("12 over 10".to_string()));
/// assert_eq!(checked.run(&20), Ok(vec![3, 7, 12]));
/// ```
pub fn traverse_vec_seq<R, A, B, E, F, I>(items: I, f: F) -> ReaderIOResult<R, Vec<B>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> ReaderIOResult<R, B, E>,
    R: Sync + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    let jobs: Vec<ReaderIOResult<R, B, E>> = items.into_iter().map(f).collect();
    ReaderIOResult::from_fn(move |env: &R| jobs.iter().map(|reader| reader.run(env)).collect())
}

/// Same as [`traverse_vec_par`].
pub fn traverse_vec<R, A, B, E, F, I>(items: I, f: F) -> ReaderIOResult<R, Vec<B>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> ReaderIOResult<R, B, E>,
    R: Sync + 'static,
    B: Send + 'static,
    E: Send + 'static,
{
    traverse_vec_par(items, f)
}

/// Collect a sequence of computations, running every element.
pub fn sequence_vec_par<R, T, E, I>(items: I) -> ReaderIOResult<R, Vec<T>, E>
where
    I: IntoIterator<Item = ReaderIOResult<R, T, E>>,
    R: Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    traverse_vec_par(items, |reader| reader)
}

/// Collect a sequence of computations in order, stopping at the first error.
pub fn sequence_vec_seq<R, T, E, I>(items: I) -> ReaderIOResult<R, Vec<T>, E>
where
    I: IntoIterator<Item = ReaderIOResult<R, T, E>>,
    R: Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    traverse_vec_seq(items, |reader| reader)
}

/// Same as [`sequence_vec_par`].
pub fn sequence_vec<R, T, E, I>(items: I) -> ReaderIOResult<R, Vec<T>, E>
where
    I: IntoIterator<Item = ReaderIOResult<R, T, E>>,
    R: Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    sequence_vec_par(items)
}
