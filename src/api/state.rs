//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, InMemoryUserStore, UserRepository, UserStore};
use crate::services::{AuthService, Authenticator, JwtTokenProvider};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration and login
    pub auth_service: Arc<dyn AuthService>,
    /// Database connection, absent when running on the in-memory store
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state with a manually injected service.
    pub fn new(auth_service: Arc<dyn AuthService>, database: Option<Arc<Database>>) -> Self {
        Self {
            auth_service,
            database,
        }
    }

    /// State backed by PostgreSQL.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let mut state = Self::with_store(users, config);
        state.database = Some(database);
        state
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(config: &Config) -> Self {
        Self::with_store(Arc::new(InMemoryUserStore::new()), config)
    }

    /// State over any identity store, with JWTs signed per `config`.
    pub fn with_store(users: Arc<dyn UserRepository>, config: &Config) -> Self {
        let tokens = Arc::new(JwtTokenProvider::from_config(config));
        Self::new(Arc::new(Authenticator::new(users, tokens)), None)
    }
}
