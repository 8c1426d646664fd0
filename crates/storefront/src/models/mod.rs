//! Domain models for storefront.
//!
//! - [`identity`] - The authenticated caller attached by the auth gate
//! - [`session`] - Keys for values stored in the visitor's session

pub mod identity;
pub mod session;

pub use identity::AuthenticatedIdentity;
pub use session::session_keys;
