//! Registration validator - field checks, username uniqueness, user creation.

use std::sync::Arc;

use crate::config::{FIELD_USERNAME, MSG_USERNAME_TAKEN};
use crate::domain::{Credentials, Password, RegisterRequest, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Validates registration requests against the identity store and
/// creates the resulting user.
pub struct RegistrationValidator {
    users: Arc<dyn UserRepository>,
}

impl RegistrationValidator {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Run every field check and report all failures together.
    ///
    /// The uniqueness query only runs for a well-formed username. It is
    /// advisory: `save` still fails if the name is taken by then.
    pub async fn validate(&self, request: RegisterRequest) -> AppResult<Credentials> {
        let request = request.trimmed();
        let mut errors = request.field_errors();

        if !errors.contains(FIELD_USERNAME) {
            if let Some(username) = request.username() {
                if self.users.exists_by_username(username).await? {
                    errors.add(FIELD_USERNAME, MSG_USERNAME_TAKEN);
                }
            }
        }

        if !errors.is_empty() {
            return Err(AppError::validation(errors));
        }

        request.into_credentials().map_err(AppError::validation)
    }

    /// Hash the password and persist the user.
    pub async fn save(&self, credentials: Credentials) -> AppResult<User> {
        let Credentials { username, password } = credentials;

        let password = tokio::task::spawn_blocking(move || Password::hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))??;

        let user = self.users.create(User::new(username, password)).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;

    #[tokio::test]
    async fn test_validate_reports_all_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_username()
            .times(1)
            .returning(|_| Ok(true));

        let validator = RegistrationValidator::new(Arc::new(repo));
        let result = validator
            .validate(RegisterRequest::new("alice", "short"))
            .await;

        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.get("username").unwrap(), [MSG_USERNAME_TAKEN]);
                assert!(errors.contains("password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_username_skips_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_username().never();

        let validator = RegistrationValidator::new(Arc::new(repo));
        let result = validator
            .validate(RegisterRequest::new("not valid!", "12345678"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_validate_trims_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_username().times(1).returning(|username| {
            assert_eq!(username, "alice");
            Ok(false)
        });

        let validator = RegistrationValidator::new(Arc::new(repo));
        let credentials = validator
            .validate(RegisterRequest::new("  alice  ", "12345678"))
            .await
            .unwrap();

        assert_eq!(credentials.username, "alice");
    }

    #[tokio::test]
    async fn test_save_stores_hash_not_plaintext() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().times(1).returning(Ok);

        let validator = RegistrationValidator::new(Arc::new(repo));
        let user = validator
            .save(Credentials {
                username: "alice".to_string(),
                password: "12345678".to_string(),
            })
            .await
            .unwrap();

        assert_ne!(user.password_hash, "12345678");
        assert!(user.password().verify("12345678"));
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn test_save_propagates_constraint_violation() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::username_taken()));

        let validator = RegistrationValidator::new(Arc::new(repo));
        let result = validator
            .save(Credentials {
                username: "alice".to_string(),
                password: "12345678".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(ref e)) if e.contains("username")));
    }
}
