//! Helpers for testing code built on weir.
//!
//! - [`MockEnv`] builds nested-tuple environments for
//!   [`ReaderIOResult`](crate::ReaderIOResult)
//! - [`CallCounter`] counts how often a side effect ran
//! - [`assert_ok!`](crate::assert_ok) and [`assert_err!`](crate::assert_err)
//!   run a computation and check its outcome
//! - with the `proptest` feature, `Either` implements `Arbitrary`
//!
//! # Examples
//!
//! ```
//! use weir::testing::CallCounter;
//! use weir::{assert_ok, IOResult};
//!
//! let calls = CallCounter::new();
//! let io = {
//!     let calls = calls.clone();
//!     IOResult::<_, String>::from_fn(move || {
//!         calls.hit();
//!         Ok(7)
//!     })
//! };
//!
//! assert_ok!(io, 7);
//! assert_eq!(calls.count(), 1);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Builder for test environments.
///
/// Each call to [`with`](MockEnv::with) nests one more component, giving a
/// tuple like `(((), Config), Database)`.
///
/// ```
/// use weir::testing::MockEnv;
/// use weir::ReaderIOResult;
///
/// struct Config {
///     retries: u32,
/// }
///
/// let env = MockEnv::new()
///     .with(|| Config { retries: 3 })
///     .with(|| "postgres://test".to_string())
///     .build();
///
/// let url_len = ReaderIOResult::<_, _, String>::asks(|((_, cfg), url): &(((), Config), String)| {
///     url.len() + cfg.retries as usize
/// });
/// assert_eq!(url_len.run(&env), Ok(18));
/// ```
#[derive(Debug)]
pub struct MockEnv<Env> {
    env: Env,
}

impl MockEnv<()> {
    /// An empty environment.
    pub fn new() -> Self {
        MockEnv { env: () }
    }
}

impl Default for MockEnv<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Env> MockEnv<Env> {
    /// Add a component created by `f`.
    pub fn with<F, T>(self, f: F) -> MockEnv<(Env, T)>
    where
        F: FnOnce() -> T,
    {
        MockEnv {
            env: (self.env, f()),
        }
    }

    /// Finish and return the environment.
    pub fn build(self) -> Env {
        self.env
    }
}

/// A shared counter for observing side effects from inside computations.
///
/// Clones share the same count.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicUsize>,
}

impl CallCounter {
    /// A counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call.
    pub fn hit(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    /// Calls recorded so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset to zero.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

/// Run a computation and assert that it succeeds.
///
/// With a second argument, also assert the value. Evaluates to the value.
///
/// ```
/// use weir::{assert_ok, IOResult};
///
/// let value = assert_ok!(IOResult::<_, String>::pure(1));
/// assert_eq!(value, 1);
/// assert_ok!(IOResult::<_, String>::pure(2), 2);
/// ```
#[macro_export]
macro_rules! assert_ok {
    ($io:expr) => {
        match $io.run() {
            ::std::result::Result::Ok(value) => value,
            ::std::result::Result::Err(error) => {
                panic!("Expected Ok, got Err: {:?}", error);
            }
        }
    };
    ($io:expr, $expected:expr) => {
        match $io.run() {
            ::std::result::Result::Ok(value) => {
                assert_eq!(value, $expected);
                value
            }
            ::std::result::Result::Err(error) => {
                panic!("Expected Ok({:?}), got Err: {:?}", $expected, error);
            }
        }
    };
}

/// Run a computation and assert that it fails.
///
/// With a second argument, also assert the error. Evaluates to the error.
///
/// ```
/// use weir::{assert_err, IOResult};
///
/// assert_err!(IOResult::<i32, _>::fail("boom"), "boom");
/// ```
#[macro_export]
macro_rules! assert_err {
    ($io:expr) => {
        match $io.run() {
            ::std::result::Result::Err(error) => error,
            ::std::result::Result::Ok(value) => {
                panic!("Expected Err, got Ok: {:?}", value);
            }
        }
    };
    ($io:expr, $expected:expr) => {
        match $io.run() {
            ::std::result::Result::Err(error) => {
                assert_eq!(error, $expected);
                error
            }
            ::std::result::Result::Ok(value) => {
                panic!("Expected Err({:?}), got Ok: {:?}", $expected, value);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<L, R> Arbitrary for crate::Either<L, R>
where
    L: Arbitrary + 'static,
    R: Arbitrary + 'static,
{
    type Parameters = (L::Parameters, R::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (left_params, right_params) = args;
        prop_oneof![
            any_with::<L>(left_params).prop_map(crate::Either::left),
            any_with::<R>(right_params).prop_map(crate::Either::right),
        ]
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IOResult;

    #[test]
    fn mock_env_nests_components() {
        let env = MockEnv::new().with(|| "hello").with(|| 42).build();
        assert_eq!(env, (((), "hello"), 42));
    }

    #[test]
    fn call_counter_shares_count() {
        let counter = CallCounter::new();
        let clone = counter.clone();
        clone.hit();
        clone.hit();
        assert_eq!(counter.count(), 2);
        counter.reset();
        assert_eq!(clone.count(), 0);
    }

    #[test]
    fn assert_ok_returns_value() {
        let value = assert_ok!(IOResult::<_, String>::pure(vec![1]));
        assert_eq!(value, vec![1]);
    }

    #[test]
    fn assert_err_returns_error() {
        let error = assert_err!(IOResult::<i32, _>::fail("boom".to_string()));
        assert_eq!(error, "boom");
    }

    #[test]
    #[should_panic(expected = "Expected Ok, got Err")]
    fn assert_ok_panics_on_error() {
        assert_ok!(IOResult::<i32, _>::fail("boom"));
    }

    #[test]
    #[should_panic(expected = "Expected Err, got Ok")]
    fn assert_err_panics_on_success() {
        assert_err!(IOResult::<_, String>::pure(1));
    }

    #[test]
    #[should_panic]
    fn assert_ok_checks_expected_value() {
        assert_ok!(IOResult::<_, String>::pure(1), 2);
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use crate::Either;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn either_arbitrary_covers_both_sides(value in any::<Either<u8, bool>>()) {
                prop_assert_ne!(value.is_left(), value.is_right());
            }
        }
    }
}
