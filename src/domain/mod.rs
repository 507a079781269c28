//! Domain layer - Core business entities and logic
//!
//! Accounts, their stored credential, and the request payloads that
//! create or authenticate them. No infrastructure dependencies.

pub mod credentials;
pub mod password;
pub mod user;

pub use credentials::{Credentials, LoginRequest, RegisterRequest};
pub use password::Password;
pub use user::User;
