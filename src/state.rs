use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{
    jwt::JwtKeys,
    password::Hasher,
    repo::{InMemoryUserStore, UserStore},
};
use crate::cards::repo::CardStore;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub cards: Arc<CardStore>,
    pub jwt: JwtKeys,
    pub hasher: Hasher,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Self::from_parts(config, Arc::new(InMemoryUserStore::new()))
    }

    pub fn from_parts(config: AppConfig, users: Arc<dyn UserStore>) -> anyhow::Result<Self> {
        let jwt = JwtKeys::new(&config.jwt)?;
        let hasher = Hasher::new(config.password)?;
        Ok(Self {
            config: Arc::new(config),
            users,
            cards: Arc::new(CardStore::new()),
            jwt,
            hasher,
        })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::{JwtConfig, PasswordConfig, ServerConfig};

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            jwt: JwtConfig {
                secret: "test".into(),
                ttl_minutes: 60,
            },
            password: PasswordConfig {
                memory_kib: 64,
                iterations: 1,
            },
        };
        Self::from_parts(config, Arc::new(InMemoryUserStore::new())).expect("fake state")
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
