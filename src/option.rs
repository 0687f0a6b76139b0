//! Extra combinators for `Option`.
//!
//! `Option` already covers most of what an optional-value type needs. The
//! [`OptionExt`] trait adds the few operations that line it up with
//! [`Either`] and [`IOResult`](crate::IOResult).
//!
//! ```
//! use weir::OptionExt;
//!
//! let add = Some(|x: i32| x + 1);
//! assert_eq!(add.ap(Some(41)), Some(42));
//! assert_eq!(None::<i32>.fold(|| 0, |x| x * 2), 0);
//! ```

use crate::Either;

/// Functional helpers for `Option<T>`.
pub trait OptionExt<T>: Sized {
    /// Handle both cases, producing a plain value.
    fn fold<U, N, S>(self, on_none: N, on_some: S) -> U
    where
        N: FnOnce() -> U,
        S: FnOnce(T) -> U;

    /// Apply a wrapped function to a wrapped value.
    ///
    /// `None` on either side gives `None`.
    fn ap<A, B>(self, value: Option<A>) -> Option<B>
    where
        T: FnOnce(A) -> B;

    /// Fall back to the option produced by `that` when this one is `None`.
    ///
    /// `that` is only called on `None`.
    fn alt<F>(self, that: F) -> Option<T>
    where
        F: FnOnce() -> Option<T>;

    /// Convert to an `Either`, using `on_none` for the left side.
    ///
    /// ```
    /// use weir::{Either, OptionExt};
    ///
    /// assert_eq!(Some(1).to_either(|| "missing"), Either::right(1));
    /// assert_eq!(None::<i32>.to_either(|| "missing"), Either::left("missing"));
    /// ```
    fn to_either<L, F>(self, on_none: F) -> Either<L, T>
    where
        F: FnOnce() -> L;
}

impl<T> OptionExt<T> for Option<T> {
    fn fold<U, N, S>(self, on_none: N, on_some: S) -> U
    where
        N: FnOnce() -> U,
        S: FnOnce(T) -> U,
    {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }

    fn ap<A, B>(self, value: Option<A>) -> Option<B>
    where
        T: FnOnce(A) -> B,
    {
        let f = self?;
        value.map(f)
    }

    fn alt<F>(self, that: F) -> Option<T>
    where
        F: FnOnce() -> Option<T>,
    {
        self.or_else(that)
    }

    fn to_either<L, F>(self, on_none: F) -> Either<L, T>
    where
        F: FnOnce() -> L,
    {
        match self {
            Some(value) => Either::right(value),
            None => Either::left(on_none()),
        }
    }
}
