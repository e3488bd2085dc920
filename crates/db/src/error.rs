use bloglist_core::types::DbId;
use bloglist_core::validation::MIN_USERNAME_LENGTH;

/// Errors surfaced by the storage layer.
///
/// Constraint violations the API must report as client errors get their own
/// variants so callers never need to inspect driver error codes.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("username must be at least {MIN_USERNAME_LENGTH} characters long")]
    InvalidUsername,

    #[error("owner {0} does not exist")]
    MissingOwner(DbId),
}

/// PostgreSQL error codes checked when classifying driver errors.
pub(crate) mod pg_codes {
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const CHECK_VIOLATION: &str = "23514";
}
