//! Application services layer - Use cases and business logic.
//!
//! Services depend on the identity store and token provider through
//! traits, so either can be swapped for tests.

mod auth_service;
mod registration;
mod token_service;

pub use auth_service::{AuthService, Authenticator};
pub use registration::RegistrationValidator;
pub use token_service::{Claims, JwtTokenProvider, TokenPair, TokenProvider, TokenType};
