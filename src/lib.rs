//! Accounts API - user registration and password login issuing JWTs.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, passwords and credential payloads
//! - **services**: Registration, authentication and token issuance
//! - **infra**: Database, migrations and identity store implementations
//! - **api**: HTTP handlers and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server against PostgreSQL
//! cargo run -- serve
//!
//! # Start without a database
//! cargo run -- serve --in-memory
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Password, User};
pub use errors::{AppError, AppResult, FieldErrors};
