//! # Weir
//!
//! Deferred fallible computations for Rust.
//!
//! The centre of the crate is [`IOResult<T, E>`](IOResult): a lazy,
//! re-runnable computation that produces `Ok(T)` or `Err(E)` each time it is
//! run. Around it sit the containers it is built from ([`Either`], [`IO`],
//! [`OptionExt`]), an environment-reading variant ([`ReaderIOResult`]),
//! resource brackets, a status-driven retry driver, and small optics.
//!
//! ## Parallel and sequential apply
//!
//! Two independent computations can be combined with either join:
//!
//! - [`io_result::apply_parallel`] runs the function side on a scoped thread
//!   and the value side on the caller. Both sides always run to completion;
//!   the function side's error wins over the value side's.
//! - [`io_result::apply_sequential`] runs the function side first and never
//!   runs the value side if it failed.
//!
//! ```rust
//! use weir::IOResult;
//!
//! let double = IOResult::<_, String>::from_fn(|| Ok(|x: i32| x * 2));
//! let value = IOResult::<_, String>::pure(21);
//!
//! assert_eq!(double.ap(value).run(), Ok(42));
//! ```
//!
//! ## Traversals
//!
//! ```rust
//! use weir::io_result::traverse_vec_seq;
//! use weir::IOResult;
//!
//! let parsed = traverse_vec_seq(vec!["1", "2", "3"], |s| {
//!     let s = s.to_string();
//!     IOResult::from_fn(move || s.parse::<i32>().map_err(|e| e.to_string()))
//! });
//! assert_eq!(parsed.run(), Ok(vec![1, 2, 3]));
//! ```
//!
//! ## Features
//!
//! - `async`: bridge to and from futures (tokio + futures)
//! - `tracing`: span instrumentation and retry logging
//! - `serde`: serde derives and the JSON logging step
//! - `jitter`: randomised retry delays
//! - `http`: blocking HTTP requests as computations
//! - `proptest`: `Arbitrary` instances

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod either;
#[cfg(feature = "http")]
pub mod http;
pub mod io;
pub mod io_result;
pub mod monoid;
pub mod optics;
pub mod option;
pub mod reader_io_result;
pub mod retry;
pub mod semigroup;
pub mod testing;

// Re-exports
pub use either::Either;
pub use io::IO;
pub use io_result::{BracketError, IOResult};
pub use monoid::{Const, Monoid};
pub use optics::{Lens, Optional, Prism, Traversal};
pub use option::OptionExt;
pub use reader_io_result::ReaderIOResult;
pub use retry::{JitterStrategy, RetryPolicy, RetryStatus, RetryStrategy};
pub use semigroup::Semigroup;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::either::Either;
    pub use crate::io::IO;
    pub use crate::io_result::{
        apply_parallel, apply_sequential, bracket, retrying, sequence_vec, traverse_vec,
        with_resource, IOResult,
    };
    pub use crate::monoid::Monoid;
    pub use crate::optics::{Lens, Prism};
    pub use crate::option::OptionExt;
    pub use crate::reader_io_result::ReaderIOResult;
    pub use crate::retry::{RetryPolicy, RetryStatus};
    pub use crate::semigroup::Semigroup;
}
