//! Authentication for the operations API.
//!
//! # Purpose
//! Resolves bearer credentials to [`encore_rbac::Identity`] values and mints
//! development tokens. Authorization decisions live in `encore-rbac`; this
//! module only establishes who is asking.
pub mod dev;
pub mod token;

pub use token::{AuthError, Claims, TokenIssuer, TokenVerifier};
