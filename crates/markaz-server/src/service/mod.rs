//! Application state and dependency injection.

pub mod auth;
mod config;
mod error;

use markaz_postgres::PgClient;

pub use crate::service::auth::{AuthClaims, AuthHasher, TokenKeys, TokenKeysConfig, TokenUse};
pub use crate::service::config::ServiceConfig;
pub use crate::service::error::{Result, ServiceError};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,

    // Internal services:
    pub auth_hasher: AuthHasher,
    pub token_keys: TokenKeys,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Builds the connection pool and loads the signing keys. Connections
    /// are established lazily on first use.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let service_state = Self {
            postgres: config.connect_postgres()?,
            auth_hasher: config.create_password_hasher()?,
            token_keys: config.load_token_keys()?,
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);

// Internal services:
impl_di!(auth_hasher: AuthHasher);
impl_di!(token_keys: TokenKeys);
