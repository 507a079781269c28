//! Token provider - issues and checks signed access/refresh tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Which half of a token pair a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    /// Unique token id
    pub jti: Uuid,
    pub user_id: Uuid,
}

/// Tokens returned after successful login
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenPair {
    /// Short-lived access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access: String,
    /// Longer-lived refresh token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh: String,
}

/// Token provider trait for dependency injection.
pub trait TokenProvider: Send + Sync {
    /// Issue an access token and a refresh token bound to `user`
    fn issue_pair(&self, user: &User) -> AppResult<TokenPair>;

    /// Check signature, expiry and type, returning the claims.
    ///
    /// No route here consumes tokens. This is the check a resource server
    /// sharing `JWT_SECRET` runs on the tokens `/login` hands out.
    fn verify(&self, token: &str, expected: TokenType) -> AppResult<Claims>;
}

/// HS256 JWT implementation of TokenProvider.
pub struct JwtTokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl JwtTokenProvider {
    pub fn new(secret: &[u8], access_lifetime: Duration, refresh_lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_lifetime,
            refresh_lifetime,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret_bytes(),
            config.access_token_lifetime(),
            config.refresh_token_lifetime(),
        )
    }

    fn sign(&self, user: &User, token_type: TokenType) -> AppResult<String> {
        let lifetime = match token_type {
            TokenType::Access => self.access_lifetime,
            TokenType::Refresh => self.refresh_lifetime,
        };
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("Token lifetime overflows the clock"))?;

        let claims = Claims {
            token_type,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4(),
            user_id: user.id,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))
    }
}

impl TokenProvider for JwtTokenProvider {
    fn issue_pair(&self, user: &User) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access: self.sign(user, TokenType::Access)?,
            refresh: self.sign(user, TokenType::Refresh)?,
        })
    }

    fn verify(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))?;

        if data.claims.token_type != expected {
            return Err(AppError::WrongTokenType);
        }

        Ok(data.claims)
    }
}
