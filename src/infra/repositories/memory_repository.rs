//! In-process identity store.
//!
//! Backs `serve --in-memory` and the router-level tests. Records live only
//! as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// UserRepository keeping users in a map keyed by username.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Toggle whether a user may authenticate. Returns false for unknown users.
    pub async fn set_active(&self, username: &str, active: bool) -> bool {
        match self.users.write().await.get_mut(username) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        Ok(self.users.read().await.contains_key(username))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        use std::collections::hash_map::Entry;

        // Check and insert under one write lock
        match self.users.write().await.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AppError::username_taken()),
            Entry::Vacant(slot) => Ok(slot.insert(user).clone()),
        }
    }
}
