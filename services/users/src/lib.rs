//! Users service for the Joy Kunga application
//!
//! Creates, reads, lists, updates and deactivates user accounts.
//!
//! ```text
//! routes ──▶ service ──▶ UserRepository ──▶ PostgreSQL / in-memory
//! ```
//!
//! ```rust,no_run
//! use users::{
//!     repositories::InMemoryUserRepository, routes::create_router, service::UserService,
//!     state::AppState,
//! };
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = create_router(AppState::new(service));
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod service;
pub mod state;
pub mod validation;

pub use error::{UserError, UserResult};
pub use models::{CreateUser, DocumentType, UpdateUser, User, UserId, UserResponse};
pub use repositories::{InMemoryUserRepository, PgUserRepository, UserRepository};
pub use service::UserService;
