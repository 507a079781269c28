//! Authentication service - registration and password login.

use std::sync::Arc;

use async_trait::async_trait;

use super::registration::RegistrationValidator;
use super::token_service::{TokenPair, TokenProvider};
use crate::domain::{LoginRequest, Password, RegisterRequest, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate and create a new user
    async fn register(&self, request: RegisterRequest) -> AppResult<User>;

    /// Verify credentials. `None` for an unknown user, a wrong password
    /// or an inactive account.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>>;

    /// Authenticate and issue a token pair
    async fn login(&self, request: LoginRequest) -> AppResult<TokenPair>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenProvider>,
    registration: RegistrationValidator,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            registration: RegistrationValidator::new(users.clone()),
            users,
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let credentials = self.registration.validate(request).await?;
        self.registration.save(credentials).await
    }

    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let user = self.users.find_by_username(username).await?;
        let password = password.to_string();

        // Unknown users still cost one hash verification so timing does not
        // reveal which usernames exist.
        let verified = tokio::task::spawn_blocking(move || match user {
            Some(user) if user.password().verify(&password) => Some(user),
            Some(_) => None,
            None => {
                Password::verify_dummy(&password);
                None
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))?;

        Ok(verified.filter(User::can_authenticate))
    }

    async fn login(&self, request: LoginRequest) -> AppResult<TokenPair> {
        let credentials = request
            .into_credentials()
            .ok_or(AppError::MissingCredentials)?;

        match self
            .authenticate(&credentials.username, &credentials.password)
            .await?
        {
            Some(user) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                self.tokens.issue_pair(&user)
            }
            None => {
                tracing::warn!(username = %credentials.username, "Login failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}
