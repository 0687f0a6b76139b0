//! Retry policies.
//!
//! A [`RetryPolicy`] is pure data. Given a [`RetryStatus`] it says how long to
//! wait before the next attempt, or that it is time to stop. Running the
//! attempts is the job of [`io_result::retrying`](crate::io_result::retrying)
//! and [`ReaderIOResult::retrying`](crate::ReaderIOResult::retrying).
//!
//! # Strategies
//!
//! - **Immediate**: no delay
//! - **Constant**: the same delay every time
//! - **Linear**: 100ms, 200ms, 300ms, ...
//! - **Exponential**: 100ms, 200ms, 400ms, ...
//! - **Fibonacci**: 100ms, 100ms, 200ms, 300ms, 500ms, ...
//!
//! # Jitter
//!
//! With the `jitter` feature, delays can be randomized to spread out clients
//! that fail together:
//!
//! ```toml
//! weir = { version = "0.1", features = ["jitter"] }
//! ```
//!
//! ```
//! use std::time::Duration;
//! use weir::RetryPolicy;
//!
//! let policy = RetryPolicy::exponential(Duration::from_millis(100))
//!     .with_jitter(0.25)
//!     .with_max_retries(5);
//! assert_eq!(policy.max_retries(), Some(5));
//! ```

mod policy;
mod status;

pub use policy::{JitterStrategy, RetryPolicy, RetryStrategy};
pub use status::{apply_policy, RetryStatus};
