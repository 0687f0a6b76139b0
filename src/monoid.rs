//! Monoid trait for types with identity elements
//!
//! A `Monoid` extends [`Semigroup`] with an identity element, which makes
//! folding possible without a starting value. The traversals in
//! [`io_result`](crate::io_result) use the same idea: they start from an empty
//! success and append each result.
//!
//! # Laws
//!
//! ```text
//! a.combine(M::empty()) == a           (right identity)
//! M::empty().combine(a) == a           (left identity)
//! ```
//!
//! # Numeric monoids
//!
//! Numbers have more than one monoid, so they go through wrappers:
//!
//! ```
//! use weir::monoid::{fold_all, Sum, Product};
//!
//! assert_eq!(fold_all(vec![Sum(1), Sum(2), Sum(3)]), Sum(6));
//! assert_eq!(fold_all(vec![Product(2), Product(3)]), Product(6));
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Add, Mul};

use crate::Semigroup;

/// A `Semigroup` with an identity element.
pub trait Monoid: Semigroup {
    /// The identity element for this monoid.
    fn empty() -> Self;
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
}

impl Monoid for String {
    fn empty() -> Self {
        String::new()
    }
}

impl Monoid for () {
    fn empty() -> Self {}
}

impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl<K, V> Monoid for HashMap<K, V>
where
    K: Eq + Hash,
    V: Semigroup,
{
    fn empty() -> Self {
        HashMap::new()
    }
}

macro_rules! impl_monoid_tuple {
    ($($idx:tt $T:ident),+) => {
        impl<$($T: Monoid),+> Monoid for ($($T,)+) {
            fn empty() -> Self {
                ($($T::empty(),)+)
            }
        }
    };
}

impl_monoid_tuple!(0 T1, 1 T2);
impl_monoid_tuple!(0 T1, 1 T2, 2 T3);
impl_monoid_tuple!(0 T1, 1 T2, 2 T3, 3 T4);
impl_monoid_tuple!(0 T1, 1 T2, 2 T3, 3 T4, 4 T5);
impl_monoid_tuple!(0 T1, 1 T2, 2 T3, 3 T4, 4 T5, 5 T6);

/// Monoid for numeric types under addition. Identity: `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sum<T>(pub T);

impl<T: Add<Output = T>> Semigroup for Sum<T> {
    fn combine(self, other: Self) -> Self {
        Sum(self.0 + other.0)
    }
}

impl<T: Add<Output = T> + Default> Monoid for Sum<T> {
    fn empty() -> Self {
        Sum(T::default())
    }
}

/// Monoid for numeric types under multiplication. Identity: `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Product<T>(pub T);

/// Types with a multiplicative identity.
pub trait One {
    /// Returns `1`.
    fn one() -> Self;
}

macro_rules! impl_one {
    ($($t:ty => $one:expr),+ $(,)?) => {
        $(impl One for $t {
            fn one() -> Self {
                $one
            }
        })+
    };
}

impl_one!(
    i8 => 1, i16 => 1, i32 => 1, i64 => 1, i128 => 1, isize => 1,
    u8 => 1, u16 => 1, u32 => 1, u64 => 1, u128 => 1, usize => 1,
    f32 => 1.0, f64 => 1.0,
);

impl<T: Mul<Output = T>> Semigroup for Product<T> {
    fn combine(self, other: Self) -> Self {
        Product(self.0 * other.0)
    }
}

impl<T: Mul<Output = T> + One> Monoid for Product<T> {
    fn empty() -> Self {
        Product(T::one())
    }
}

/// Fold all values, starting from the identity.
///
/// ```
/// use weir::monoid::fold_all;
///
/// let words = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(fold_all(words), "ab");
/// assert_eq!(fold_all(Vec::<String>::new()), "");
/// ```
pub fn fold_all<M, I>(iter: I) -> M
where
    M: Monoid,
    I: IntoIterator<Item = M>,
{
    iter.into_iter().fold(M::empty(), M::combine)
}

/// Combine all values of a non-empty sequence with their semigroup.
///
/// Returns `None` for an empty sequence, so no identity is needed.
///
/// ```
/// use weir::monoid::reduce;
/// use weir::semigroup::First;
///
/// assert_eq!(reduce(vec![First(1), First(2)]), Some(First(1)));
/// assert_eq!(reduce(Vec::<First<i32>>::new()), None);
/// ```
pub fn reduce<S, I>(iter: I) -> Option<S>
where
    S: Semigroup,
    I: IntoIterator<Item = S>,
{
    iter.into_iter().reduce(S::combine)
}

/// Map every value into a monoid and fold the results.
pub fn fold_map<A, M, I, F>(iter: I, f: F) -> M
where
    M: Monoid,
    I: IntoIterator<Item = A>,
    F: FnMut(A) -> M,
{
    fold_all(iter.into_iter().map(f))
}

/// A functor that carries a value of type `E` while pretending to hold an `A`.
///
/// `map` changes only the phantom type, and `ap` combines the carried values
/// with their semigroup. This lets a fold over a structure reuse the same
/// traversal code as an update, as
/// [`Traversal::fold_map`](crate::optics::Traversal::fold_map) does.
///
/// ```
/// use weir::Const;
///
/// let left: Const<Vec<i32>, fn(u8) -> u8> = Const::new(vec![1]);
/// let right: Const<Vec<i32>, u8> = Const::new(vec![2]);
/// assert_eq!(left.ap(right).into_inner(), vec![1, 2]);
/// ```
pub struct Const<E, A> {
    value: E,
    _marker: PhantomData<fn() -> A>,
}

impl<E, A> Const<E, A> {
    /// Wrap a value.
    pub fn new(value: E) -> Self {
        Const {
            value,
            _marker: PhantomData,
        }
    }

    /// Borrow the carried value.
    pub fn get(&self) -> &E {
        &self.value
    }

    /// Unwrap the carried value.
    pub fn into_inner(self) -> E {
        self.value
    }

    /// Change the phantom type; the carried value is untouched.
    pub fn map<B, F>(self, _f: F) -> Const<E, B>
    where
        F: FnOnce(A) -> B,
    {
        Const::new(self.value)
    }
}

impl<E: Semigroup, F> Const<E, F> {
    /// Combine the carried values of both sides.
    pub fn ap<A, B>(self, other: Const<E, A>) -> Const<E, B>
    where
        F: FnOnce(A) -> B,
    {
        Const::new(self.value.combine(other.value))
    }
}

impl<E: Clone, A> Clone for Const<E, A> {
    fn clone(&self) -> Self {
        Const::new(self.value.clone())
    }
}

impl<E: PartialEq, A> PartialEq for Const<E, A> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<E: std::fmt::Debug, A> std::fmt::Debug for Const<E, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Const").field(&self.value).finish()
    }
}

impl<E: Semigroup, A> Semigroup for Const<E, A> {
    fn combine(self, other: Self) -> Self {
        Const::new(self.value.combine(other.value))
    }
}

impl<E: Monoid, A> Monoid for Const<E, A> {
    fn empty() -> Self {
        Const::new(E::empty())
    }
}
