//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DocumentType;

/// Storage-assigned user identifier
pub type UserId = i64;

/// Role given to users created without an explicit role
pub const CUSTOMER_ROLE_ID: u8 = 1;

/// Reason recorded when a user is deactivated without one
pub const DEFAULT_INACTIVATION_REASON: &str = "INACTIVITY";

/// Default page size for listings
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Largest page size a listing will return
pub const MAX_PAGE_LIMIT: i64 = 200;

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub role_id: u8,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub inactivated_at: Option<DateTime<Utc>>,
    pub inactivated_reason: Option<String>,
}

/// A validated user ready to be persisted.
///
/// Every field is already normalized; storage assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub role_id: u8,
    pub active: bool,
}

/// User creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    #[serde(default)]
    pub surname: Option<String>,
    pub email: String,
    pub password: String,
    /// `0` selects the customer role
    #[serde(default)]
    pub role_id: u8,
    #[serde(default)]
    pub document_type: Option<String>,
    pub document_number: String,
}

/// User update payload
///
/// Email, password and document fields cannot be changed through an update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub name: String,
    #[serde(default)]
    pub surname: Option<String>,
    /// `0` keeps the current role
    #[serde(default)]
    pub role_id: u8,
    pub active: bool,
}

/// User response DTO (without password_hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub surname: Option<String>,
    pub email: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub role_id: u8,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub inactivated_at: Option<DateTime<Utc>>,
    pub inactivated_reason: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            document_type: user.document_type,
            document_number: user.document_number,
            role_id: user.role_id,
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_login_at: user.last_login_at,
            inactivated_at: user.inactivated_at,
            inactivated_reason: user.inactivated_reason,
        }
    }
}

/// Normalized paging window for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Clamp raw paging input; out-of-range values never fail.
    ///
    /// A limit outside `(0, MAX_PAGE_LIMIT]` falls back to the default and a
    /// negative offset becomes zero.
    pub fn new(limit: i64, offset: i64) -> Self {
        let limit = if limit <= 0 || limit > MAX_PAGE_LIMIT {
            DEFAULT_PAGE_LIMIT
        } else {
            limit
        };

        Self {
            limit,
            offset: offset.max(0),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT, 0)
    }
}
