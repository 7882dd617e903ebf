//! Users service models

pub mod document;
pub mod user;

// Re-export for convenience
pub use document::DocumentType;
pub use user::{
    CUSTOMER_ROLE_ID, CreateUser, DEFAULT_INACTIVATION_REASON, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
    NewUser, Pagination, UpdateUser, User, UserId, UserResponse,
};
