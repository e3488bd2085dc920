//! Access decisions for protected operations.
//!
//! The HTTP guard walks a fixed sequence (bearer credential, token
//! verification, user resolution, ownership) and stops at the first
//! [`Denial`]. This module holds the parts of that sequence that need no
//! I/O so they can be tested on their own.

use crate::types::DbId;

/// Why a protected request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No bearer credential in the `Authorization` header.
    MissingToken,
    /// The credential failed verification, or names a user that no longer exists.
    InvalidToken,
    /// The credential is valid but the requester does not own the resource.
    Forbidden,
}

impl Denial {
    /// Short machine-friendly reason, also used as the client-facing message.
    pub fn reason(self) -> &'static str {
        match self {
            Denial::MissingToken => "token missing",
            Denial::InvalidToken => "token invalid",
            Denial::Forbidden => "only the owner may modify this blog",
        }
    }
}

/// What to do with resources that were created without an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnownedPolicy {
    /// Any authenticated user may mutate an owner-less resource.
    #[default]
    PubliclyMutable,
    /// Owner-less resources cannot be mutated by anyone.
    OwnerRequired,
}

impl UnownedPolicy {
    /// Map the boolean `UNOWNED_BLOGS_MUTABLE` setting onto a policy.
    pub fn from_flag(publicly_mutable: bool) -> Self {
        if publicly_mutable {
            UnownedPolicy::PubliclyMutable
        } else {
            UnownedPolicy::OwnerRequired
        }
    }
}

/// Decide whether `requester` may mutate a resource owned by `owner`.
pub fn check_owner(
    owner: Option<DbId>,
    requester: DbId,
    policy: UnownedPolicy,
) -> Result<(), Denial> {
    match (owner, policy) {
        (Some(owner_id), _) if owner_id == requester => Ok(()),
        (Some(_), _) => Err(Denial::Forbidden),
        (None, UnownedPolicy::PubliclyMutable) => Ok(()),
        (None, UnownedPolicy::OwnerRequired) => Err(Denial::Forbidden),
    }
}

/// Extract the credential from an `Authorization` header value.
///
/// The scheme is matched case-insensitively. Returns `None` when the value
/// does not carry a non-empty bearer credential.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
