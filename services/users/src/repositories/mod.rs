//! Repositories for user persistence
//!
//! The service only talks to [`UserRepository`]; [`PgUserRepository`] backs it
//! with PostgreSQL and [`InMemoryUserRepository`] keeps everything in process.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{NewUser, User, UserId};

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::{MIGRATOR, PgUserRepository};

/// Repository trait for User persistence
///
/// A missing row is reported as `Ok(None)`, never as an error, so transient
/// failures cannot be mistaken for an absent user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the id assigned by storage
    async fn create(&self, user: NewUser) -> DatabaseResult<UserId>;

    /// Get a user by ID
    async fn get_by_id(&self, id: UserId) -> DatabaseResult<Option<User>>;

    /// Get a user by normalized email
    async fn get_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// List users, newest id first
    async fn list(&self, limit: i64, offset: i64) -> DatabaseResult<Vec<User>>;

    /// Persist the mutable fields of an existing user
    async fn update(&self, user: User) -> DatabaseResult<()>;

    /// Mark a user inactive, stamping the time and reason
    async fn deactivate(&self, id: UserId, reason: &str) -> DatabaseResult<()>;

    /// Check that the backing store answers
    async fn health_check(&self) -> DatabaseResult<bool>;
}
