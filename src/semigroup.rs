//! Semigroup trait for associative operations
//!
//! A Semigroup is a type with an associative binary operation. Semigroups are
//! how results are merged when computations are combined applicatively: the
//! applicative monoid on [`IOResult`](crate::IOResult) runs two computations
//! through the parallel join and combines their values with `combine`.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use weir::Semigroup;
//!
//! assert_eq!(vec![1, 2].combine(vec![3]), vec![1, 2, 3]);
//! assert_eq!("ab".to_string().combine("c".to_string()), "abc");
//! assert_eq!(Some(vec![1]).combine(None), Some(vec![1]));
//! ```

use std::collections::HashMap;
use std::hash::Hash;

/// A type that supports an associative binary operation
///
/// `combine` takes both operands by value; clone first if you need to keep them.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl Semigroup for () {
    #[inline]
    fn combine(self, _other: Self) -> Self {}
}

/// `None` is absorbed; two `Some` values combine their contents.
impl<T: Semigroup> Semigroup for Option<T> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.combine(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }
}

/// Union of both maps; values present under the same key are combined.
impl<K, V> Semigroup for HashMap<K, V>
where
    K: Eq + Hash,
    V: Semigroup,
{
    fn combine(mut self, other: Self) -> Self {
        for (key, value) in other {
            let merged = match self.remove(&key) {
                Some(existing) => existing.combine(value),
                None => value,
            };
            self.insert(key, merged);
        }
        self
    }
}

macro_rules! impl_semigroup_tuple {
    ($($idx:tt $T:ident),+) => {
        impl<$($T: Semigroup),+> Semigroup for ($($T,)+) {
            #[inline]
            fn combine(self, other: Self) -> Self {
                (
                    $(self.$idx.combine(other.$idx)),+
                )
            }
        }
    };
}

impl_semigroup_tuple!(0 T1, 1 T2);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3, 3 T4);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3, 3 T4, 4 T5);
impl_semigroup_tuple!(0 T1, 1 T2, 2 T3, 3 T4, 4 T5, 5 T6);

/// Keeps the leftmost value.
///
/// ```
/// use weir::semigroup::First;
/// use weir::Semigroup;
///
/// assert_eq!(First(1).combine(First(2)), First(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct First<T>(pub T);

impl<T> Semigroup for First<T> {
    #[inline]
    fn combine(self, _other: Self) -> Self {
        self
    }
}

/// Keeps the rightmost value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Last<T>(pub T);

impl<T> Semigroup for Last<T> {
    #[inline]
    fn combine(self, other: Self) -> Self {
        other
    }
}
