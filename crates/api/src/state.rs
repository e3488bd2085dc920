use std::sync::Arc;

use bloglist_db::Store;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::auth::jwt::TokenService;
use crate::auth::password::{hash_blocking, CredentialHasher};
use crate::config::ServerConfig;
use crate::error::AppResult;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// User, blog, and comment repositories.
    pub store: Store,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Token issuance and verification, keyed from `config.jwt`.
    pub tokens: Arc<TokenService>,
    /// Password hashing capability.
    pub hasher: Arc<dyn CredentialHasher>,
    /// Hash of a random secret, verified against when a login names an
    /// unknown user so both paths cost one Argon2 run.
    decoy_hash: Arc<OnceCell<String>>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig, hasher: Arc<dyn CredentialHasher>) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));
        Self {
            store,
            config: Arc::new(config),
            tokens,
            hasher,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// The decoy hash, computed on first use with the configured hasher.
    pub async fn decoy_hash(&self) -> AppResult<String> {
        self.decoy_hash
            .get_or_try_init(|| hash_blocking(Arc::clone(&self.hasher), Uuid::new_v4().to_string()))
            .await
            .cloned()
    }
}
