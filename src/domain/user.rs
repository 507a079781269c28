//! User domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Password;

/// A registered account as held by the identity store.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user from an already hashed password
    pub fn new(username: String, password: Password) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash: password.into_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// The stored credential as a verifiable value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.as_str())
    }

    /// Whether the user may authenticate.
    pub fn can_authenticate(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active() {
        let user = User::new("alice".to_string(), Password::from_hash("hash"));

        assert!(user.can_authenticate());
        assert_eq!(user.password_hash, "hash");
    }

    #[test]
    fn test_serialization_skips_hash() {
        let user = User::new("alice".to_string(), Password::from_hash("secret-hash"));
        let json = serde_json::to_string(&user).unwrap();

        assert!(json.contains("alice"));
        assert!(!json.contains("secret-hash"));
    }
}
