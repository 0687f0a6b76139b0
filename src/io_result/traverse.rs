//! Traversals over collections of `IOResult`.
//!
//! Each traversal maps the elements to computations up front and keeps them in
//! a flat `Vec`, so running or dropping the result never recurses per element.
//! The outcome matches a left fold through the joins:
//!
//! - `*_par`: every element runs. All elements but the last start on their own
//!   scoped thread and the last runs on the caller. The reported error belongs
//!   to the lowest-index failing element. The order of side effects is
//!   unspecified.
//! - `*_seq`: elements run strictly in order. The first error stops the
//!   traversal, and later elements never run.
//!
//! Unsuffixed names are the parallel versions.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use weir::io_result::traverse_vec_seq;
//! use weir::IOResult;
//!
//! let visited = Arc::new(Mutex::new(Vec::new()));
//! let io = traverse_vec_seq(vec!["a", "b", "c"], |name| {
//!     let visited = visited.clone();
//!     IOResult::<_, String>::from_fn(move || {
//!         visited.lock().unwrap().push(name);
//!         Ok(name)
//!     })
//! });
//!
//! assert_eq!(io.run(), Ok(vec!["a", "b", "c"]));
//! assert_eq!(*visited.lock().unwrap(), vec!["a", "b", "c"]);
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use super::{join_all, IOResult};

fn split_map<K, A, B, E, F>(map: HashMap<K, A>, mut f: F) -> (Arc<[K]>, Vec<IOResult<B, E>>)
where
    F: FnMut(A) -> IOResult<B, E>,
{
    let (keys, jobs): (Vec<K>, Vec<_>) = map.into_iter().map(|(k, v)| (k, f(v))).unzip();
    (keys.into(), jobs)
}

fn rebuild_map<K, B>(keys: &[K], values: Vec<B>) -> HashMap<K, B>
where
    K: Eq + Hash + Clone,
{
    keys.iter().cloned().zip(values).collect()
}

// ========== Vec ==========

/// Map each element to a computation and collect the results, running every
/// element.
pub fn traverse_vec_par<A, B, E, F, I>(items: I, f: F) -> IOResult<Vec<B>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> IOResult<B, E>,
    B: Send + 'static,
    E: Send + 'static,
{
    let jobs: Vec<IOResult<B, E>> = items.into_iter().map(f).collect();
    IOResult::from_fn(move || join_all(&jobs, IOResult::run))
}

/// Map each element to a computation and collect the results, in order,
/// stopping at the first error.
pub fn traverse_vec_seq<A, B, E, F, I>(items: I, f: F) -> IOResult<Vec<B>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> IOResult<B, E>,
    B: Send + 'static,
    E: Send + 'static,
{
    let jobs: Vec<IOResult<B, E>> = items.into_iter().map(f).collect();
    IOResult::from_fn(move || jobs.iter().map(IOResult::run).collect())
}

/// Same as [`traverse_vec_par`].
pub fn traverse_vec<A, B, E, F, I>(items: I, f: F) -> IOResult<Vec<B>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> IOResult<B, E>,
    B: Send + 'static,
    E: Send + 'static,
{
    traverse_vec_par(items, f)
}

/// Like [`traverse_vec_par`], passing each element's index to `f`.
pub fn traverse_vec_with_index_par<A, B, E, F, I>(items: I, mut f: F) -> IOResult<Vec<B>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(usize, A) -> IOResult<B, E>,
    B: Send + 'static,
    E: Send + 'static,
{
    traverse_vec_par(items.into_iter().enumerate(), |(index, item)| f(index, item))
}

/// Like [`traverse_vec_seq`], passing each element's index to `f`.
pub fn traverse_vec_with_index_seq<A, B, E, F, I>(items: I, mut f: F) -> IOResult<Vec<B>, E>
where
    I: IntoIterator<Item = A>,
    F: FnMut(usize, A) -> IOResult<B, E>,
    B: Send + 'static,
    E: Send + 'static,
{
    traverse_vec_seq(items.into_iter().enumerate(), |(index, item)| f(index, item))
}

/// Turn a collection of computations into a computation of a `Vec`, running
/// every element.
///
/// ```
/// use weir::io_result::sequence_vec_par;
/// use weir::IOResult;
///
/// let all = sequence_vec_par(vec![
///     IOResult::<_, &str>::pure(1),
///     IOResult::fail("second"),
///     IOResult::fail("third"),
/// ]);
/// assert_eq!(all.run(), Err("second"));
/// ```
pub fn sequence_vec_par<T, E, I>(items: I) -> IOResult<Vec<T>, E>
where
    I: IntoIterator<Item = IOResult<T, E>>,
    T: Send + 'static,
    E: Send + 'static,
{
    traverse_vec_par(items, |io| io)
}

/// Turn a collection of computations into a computation of a `Vec`, in order,
/// stopping at the first error.
pub fn sequence_vec_seq<T, E, I>(items: I) -> IOResult<Vec<T>, E>
where
    I: IntoIterator<Item = IOResult<T, E>>,
    T: Send + 'static,
    E: Send + 'static,
{
    traverse_vec_seq(items, |io| io)
}

/// Same as [`sequence_vec_par`].
pub fn sequence_vec<T, E, I>(items: I) -> IOResult<Vec<T>, E>
where
    I: IntoIterator<Item = IOResult<T, E>>,
    T: Send + 'static,
    E: Send + 'static,
{
    sequence_vec_par(items)
}

// ========== HashMap ==========

/// Map each value of a map to a computation and collect the results under the
/// same keys, running every entry. No ordering over keys is guaranteed.
pub fn traverse_map_par<K, A, B, E, F>(map: HashMap<K, A>, f: F) -> IOResult<HashMap<K, B>, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    F: FnMut(A) -> IOResult<B, E>,
    B: Send + 'static,
    E: Send + 'static,
{
    let (keys, jobs) = split_map(map, f);
    IOResult::from_fn(move || Ok(rebuild_map(&keys, join_all(&jobs, IOResult::run)?)))
}

/// Map each value of a map to a computation and collect the results under the
/// same keys, stopping at the first error. Entries run in the map's iteration
/// order.
pub fn traverse_map_seq<K, A, B, E, F>(map: HashMap<K, A>, f: F) -> IOResult<HashMap<K, B>, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    F: FnMut(A) -> IOResult<B, E>,
    B: Send + 'static,
    E: Send + 'static,
{
    let (keys, jobs) = split_map(map, f);
    IOResult::from_fn(move || {
        let values = jobs.iter().map(IOResult::run).collect::<Result<Vec<_>, _>>()?;
        Ok(rebuild_map(&keys, values))
    })
}

/// Same as [`traverse_map_par`].
pub fn traverse_map<K, A, B, E, F>(map: HashMap<K, A>, f: F) -> IOResult<HashMap<K, B>, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    F: FnMut(A) -> IOResult<B, E>,
    B: Send + 'static,
    E: Send + 'static,
{
    traverse_map_par(map, f)
}

/// Turn a map of computations into a computation of a map, running every entry.
pub fn sequence_map_par<K, T, E>(map: HashMap<K, IOResult<T, E>>) -> IOResult<HashMap<K, T>, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    traverse_map_par(map, |io| io)
}

/// Turn a map of computations into a computation of a map, stopping at the
/// first error.
pub fn sequence_map_seq<K, T, E>(map: HashMap<K, IOResult<T, E>>) -> IOResult<HashMap<K, T>, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    traverse_map_seq(map, |io| io)
}

/// Same as [`sequence_map_par`].
pub fn sequence_map<K, T, E>(map: HashMap<K, IOResult<T, E>>) -> IOResult<HashMap<K, T>, E>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    sequence_map_par(map)
}
