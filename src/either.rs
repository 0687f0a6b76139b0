//! A right-biased sum type.
//!
//! `Either<L, R>` holds one of two values. By convention `Right` is the
//! "happy path": `map`, `and_then` and `ap` operate on it and pass `Left`
//! through untouched. That makes `Either` the pure counterpart of
//! [`IOResult`](crate::IOResult), where the left side plays the role of the
//! error.
//!
//! # Examples
//!
//! ```rust
//! use weir::Either;
//!
//! fn parse(input: &str) -> Either<String, i32> {
//!     input
//!         .parse::<i32>()
//!         .map_err(|_| format!("not a number: {}", input))
//!         .into()
//! }
//!
//! assert_eq!(parse("21").map(|n| n * 2), Either::right(42));
//! assert_eq!(
//!     parse("x").fold(|err| err, |n| n.to_string()),
//!     "not a number: x"
//! );
//! ```

/// A value that is either `Left(L)` or `Right(R)`.
///
/// Right-biased: `map`, `and_then`, `ap` and `alt` treat `Right` as success
/// and short-circuit on `Left`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left variant
    Left(L),
    /// The right variant
    Right(R),
}

impl<L, R> Either<L, R> {
    // ========== Constructors ==========

    /// Create a `Left` value.
    ///
    /// ```rust
    /// use weir::Either;
    ///
    /// let e: Either<&str, i32> = Either::left("boom");
    /// assert!(e.is_left());
    /// ```
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a `Right` value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Alias for [`Either::right`], the applicative `of`.
    #[inline]
    pub fn of(value: R) -> Self {
        Either::Right(value)
    }

    // ========== Predicates ==========

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    // ========== Extractors ==========

    /// Returns the left value if present.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value if present.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Convert to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Returns the right value, or computes one from the left value.
    ///
    /// ```rust
    /// use weir::Either;
    ///
    /// let e: Either<&str, usize> = Either::left("four");
    /// assert_eq!(e.get_or_else(|s| s.len()), 4);
    /// ```
    #[inline]
    pub fn get_or_else<F>(self, f: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => r,
        }
    }

    // ========== Functor ==========

    /// Transform the right value, passing `Left` through unchanged.
    ///
    /// ```rust
    /// use weir::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(21);
    /// assert_eq!(e.map(|x| x * 2), Either::right(42));
    /// ```
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform the left value, passing `Right` through unchanged.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform both variants.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, f: F, g: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(g(r)),
        }
    }

    /// Swap `Left` and `Right`.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    // ========== Monad ==========

    /// Chain a dependent computation on the right value.
    ///
    /// ```rust
    /// use weir::Either;
    ///
    /// let half = |x: i32| {
    ///     if x % 2 == 0 { Either::right(x / 2) } else { Either::left("odd") }
    /// };
    ///
    /// assert_eq!(Either::right(84).and_then(half), Either::right(42));
    /// assert_eq!(Either::right(7).and_then(half), Either::left("odd"));
    /// ```
    #[inline]
    pub fn and_then<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    /// Recover from a left value by chaining on it.
    #[inline]
    pub fn or_else<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> Either<L2, R>,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Fall back to a lazily computed alternative when this is `Left`.
    ///
    /// ```rust
    /// use weir::Either;
    ///
    /// let primary: Either<&str, i32> = Either::left("miss");
    /// assert_eq!(primary.alt(|| Either::right(7)), Either::right(7));
    /// ```
    #[inline]
    pub fn alt<F>(self, that: F) -> Self
    where
        F: FnOnce() -> Either<L, R>,
    {
        match self {
            Either::Left(_) => that(),
            right => right,
        }
    }

    // ========== Folding ==========

    /// Fold both variants into a single value.
    #[inline]
    pub fn fold<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    // ========== Conversions ==========

    /// Convert into a `Result`, with `Right` as `Ok`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }

    /// Iterate over the right value, if any.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.as_ref().into_right().into_iter()
    }
}

impl<L, F> Either<L, F> {
    /// Apply a wrapped function to a wrapped value.
    ///
    /// The function side is inspected first: if it is `Left`, that value is
    /// returned and `value` is ignored.
    ///
    /// ```rust
    /// use weir::Either;
    ///
    /// let f: Either<&str, fn(i32) -> i32> = Either::right(|x| x * 2);
    /// assert_eq!(f.ap(Either::right(21)), Either::right(42));
    ///
    /// let f: Either<&str, fn(i32) -> i32> = Either::left("no function");
    /// assert_eq!(f.ap(Either::left("no value")), Either::left("no function"));
    /// ```
    #[inline]
    pub fn ap<A, B>(self, value: Either<L, A>) -> Either<L, B>
    where
        F: FnOnce(A) -> B,
    {
        match (self, value) {
            (Either::Left(l), _) => Either::Left(l),
            (Either::Right(_), Either::Left(l)) => Either::Left(l),
            (Either::Right(f), Either::Right(a)) => Either::Right(f(a)),
        }
    }
}

impl<L, R> Either<L, Either<L, R>> {
    /// Remove one level of nesting.
    #[inline]
    pub fn flatten(self) -> Either<L, R> {
        self.and_then(|inner| inner)
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}

/// Split an iterator of `Either` into its left and right values.
///
/// ```rust
/// use weir::either::partition;
/// use weir::Either;
///
/// let values = vec![Either::left("a"), Either::right(1), Either::right(2)];
/// assert_eq!(partition(values), (vec!["a"], vec![1, 2]));
/// ```
pub fn partition<L, R, I>(iter: I) -> (Vec<L>, Vec<R>)
where
    I: IntoIterator<Item = Either<L, R>>,
{
    let mut lefts = Vec::new();
    let mut rights = Vec::new();
    for item in iter {
        match item {
            Either::Left(l) => lefts.push(l),
            Either::Right(r) => rights.push(r),
        }
    }
    (lefts, rights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let left: Either<i32, &str> = Either::left(1);
        let right: Either<i32, &str> = Either::right("x");
        assert!(left.is_left() && !left.is_right());
        assert!(right.is_right() && !right.is_left());
    }

    #[test]
    fn test_map_passes_left_through() {
        let left: Either<&str, i32> = Either::left("err");
        assert_eq!(left.map(|x| x + 1), Either::left("err"));
    }

    #[test]
    fn test_map_left_and_bimap() {
        let left: Either<i32, &str> = Either::left(1);
        assert_eq!(left.map_left(|x| x + 1), Either::left(2));
        assert_eq!(left.bimap(|x| x * 10, |s| s.len()), Either::left(10));
        let right: Either<i32, &str> = Either::right("abc");
        assert_eq!(right.bimap(|x| x * 10, |s| s.len()), Either::right(3));
    }

    #[test]
    fn test_ap_prefers_function_error() {
        let f: Either<&str, fn(i32) -> i32> = Either::left("f");
        assert_eq!(f.ap(Either::<&str, i32>::left("a")), Either::left("f"));

        let f: Either<&str, fn(i32) -> i32> = Either::right(|x| x + 1);
        assert_eq!(f.ap(Either::<&str, i32>::left("a")), Either::left("a"));
    }

    #[test]
    fn test_or_else_recovers() {
        let left: Either<&str, i32> = Either::left("err");
        assert_eq!(
            left.or_else(|e| Either::<(), _>::right(e.len() as i32)),
            Either::right(3)
        );
    }

    #[test]
    fn test_alt_is_lazy_for_right() {
        let right: Either<&str, i32> = Either::right(1);
        let result = right.alt(|| panic!("alternative must not be evaluated"));
        assert_eq!(result, Either::right(1));
    }

    #[test]
    fn test_result_round_trip() {
        let ok: Result<i32, &str> = Ok(1);
        let either: Either<&str, i32> = ok.into();
        assert_eq!(either, Either::right(1));
        let back: Result<i32, &str> = Either::left("e").into();
        assert_eq!(back, Err("e"));
    }

    #[test]
    fn test_flatten() {
        let nested: Either<&str, Either<&str, i32>> = Either::right(Either::left("inner"));
        assert_eq!(nested.flatten(), Either::left("inner"));
    }

    #[test]
    fn test_iter() {
        let right: Either<&str, i32> = Either::right(5);
        assert_eq!(right.iter().copied().collect::<Vec<_>>(), vec![5]);
        let left: Either<&str, i32> = Either::left("e");
        assert_eq!(left.iter().count(), 0);
    }
}
