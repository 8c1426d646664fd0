//! Business logic services for storefront.
//!
//! - `auth` - Bearer token verification for protected routes

pub mod auth;
