use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::store::Store;

/// Dependencies shared by every handler, injected through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(store: Store, config: &Config) -> Self {
        Self {
            store,
            tokens: TokenIssuer::new(&config.jwt_secret, config.jwt_ttl),
        }
    }
}
