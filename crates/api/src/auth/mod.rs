//! Authentication primitives.
//!
//! - [`password`] -- the injected password hashing capability (Argon2id by default).
//! - [`jwt`] -- bearer token issuance and verification.

pub mod jwt;
pub mod password;
