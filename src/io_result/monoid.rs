//! The applicative monoid of `IOResult`.
//!
//! When `M` is a [`Semigroup`], two `IOResult<M, E>` combine by running both
//! through the parallel join and combining their values. The identity is a
//! computation that succeeds with `M::empty()`.
//!
//! ```
//! use weir::io_result::concat_seq;
//! use weir::{IOResult, Monoid, Semigroup};
//!
//! let greeting = IOResult::<_, String>::pure("hello ".to_string())
//!     .combine(IOResult::pure("world".to_string()));
//! assert_eq!(greeting.run(), Ok("hello world".to_string()));
//!
//! let joined = concat_seq(vec![
//!     IOResult::<_, String>::pure(vec![1]),
//!     IOResult::pure(vec![2, 3]),
//! ]);
//! assert_eq!(joined.run(), Ok(vec![1, 2, 3]));
//! assert_eq!(IOResult::<Vec<i32>, String>::empty().run(), Ok(vec![]));
//! ```

use super::{traverse_vec_par, traverse_vec_seq, IOResult};
use crate::monoid::fold_all;
use crate::{Monoid, Semigroup};

impl<M, E> Semigroup for IOResult<M, E>
where
    M: Semigroup + Send + 'static,
    E: Send + 'static,
{
    fn combine(self, other: Self) -> Self {
        self.map2_par(other, M::combine)
    }
}

impl<M, E> Monoid for IOResult<M, E>
where
    M: Monoid + Send + 'static,
    E: Send + 'static,
{
    fn empty() -> Self {
        IOResult::from_fn(|| Ok(M::empty()))
    }
}

/// Combine every computation's value, running all of them.
///
/// The error of the leftmost failing computation is reported.
pub fn concat_par<M, E, I>(items: I) -> IOResult<M, E>
where
    I: IntoIterator<Item = IOResult<M, E>>,
    M: Monoid + Send + 'static,
    E: Send + 'static,
{
    traverse_vec_par(items, |io| io).map(fold_all::<M, Vec<M>>)
}

/// Combine every computation's value in order, stopping at the first error.
pub fn concat_seq<M, E, I>(items: I) -> IOResult<M, E>
where
    I: IntoIterator<Item = IOResult<M, E>>,
    M: Monoid + Send + 'static,
    E: Send + 'static,
{
    traverse_vec_seq(items, |io| io).map(fold_all::<M, Vec<M>>)
}
