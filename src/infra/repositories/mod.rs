//! Repository layer - Data access abstraction
//!
//! The identity store sits behind `UserRepository` so services never
//! depend on a concrete backend.

pub(crate) mod entities;
mod memory_repository;
mod user_repository;

pub use memory_repository::InMemoryUserStore;
pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
