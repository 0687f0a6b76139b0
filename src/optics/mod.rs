//! Composable accessors for parts of immutable data.
//!
//! Each optic is a pair of shared closures, so optics are cheap to clone and
//! can be stored in statics or passed across threads.
//!
//! - [`Lens`] focuses on a part that is always present (a struct field)
//! - [`Prism`] focuses on one case of a sum type
//! - [`Optional`] focuses on a part that may be absent, typically a lens
//!   composed with a prism
//! - [`Traversal`] focuses on zero or more parts at once
//!
//! ```
//! use weir::optics::{Lens, Prism};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Contact {
//!     Email(String),
//!     Phone(u64),
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     name: String,
//!     contact: Contact,
//! }
//!
//! let contact = Lens::new(
//!     |u: &User| u.contact.clone(),
//!     |u: User, contact| User { contact, ..u },
//! );
//! let email = Prism::new(
//!     |c: &Contact| match c {
//!         Contact::Email(addr) => Some(addr.clone()),
//!         _ => None,
//!     },
//!     Contact::Email,
//! );
//! let user_email = contact.compose_prism(email);
//!
//! let ada = User { name: "ada".into(), contact: Contact::Email("ada@x".into()) };
//! assert_eq!(user_email.get_option(&ada), Some("ada@x".to_string()));
//!
//! let upper = user_email.modify(ada, |addr| addr.to_uppercase());
//! assert_eq!(upper.contact, Contact::Email("ADA@X".into()));
//! ```

mod lens;
mod optional;
mod prism;
mod traversal;

pub use lens::Lens;
pub use optional::Optional;
pub use prism::Prism;
pub use traversal::Traversal;
