//! User lifecycle service
//!
//! Owns validation and state transitions for user records. Every operation
//! runs under a deadline measured from its start; when it expires the pending
//! storage call is dropped and [`UserError::Timeout`] is returned.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use chrono::Utc;
use std::{future::Future, sync::Arc, time::Duration};
use tracing::{info, warn};

use crate::error::{UserError, UserResult};
use crate::models::{
    CUSTOMER_ROLE_ID, CreateUser, DEFAULT_INACTIVATION_REASON, NewUser, Pagination, UpdateUser,
    User, UserId,
};
use crate::repositories::UserRepository;
use crate::validation::{
    normalize_email, normalize_optional, normalize_reason, parse_document_type,
    validate_document_number, validate_email, validate_password,
};

/// Deadline for operations touching a single user
pub const SINGLE_RECORD_TIMEOUT: Duration = Duration::from_secs(4);

/// Deadline for listings
pub const LIST_TIMEOUT: Duration = Duration::from_secs(6);

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate, hash and persist a new user, returning its id
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserId> {
        let user = self.prepare_new_user(input).inspect_err(|e| {
            warn!(error = %e, "Rejected user creation");
        })?;

        let id = with_deadline(SINGLE_RECORD_TIMEOUT, async {
            self.repository.create(user).await.map_err(UserError::from)
        })
        .await?;

        info!(user_id = id, "Created user");
        Ok(id)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: UserId) -> UserResult<User> {
        with_deadline(SINGLE_RECORD_TIMEOUT, self.find_existing(id)).await
    }

    /// Get a user by email; the lookup key is normalized first
    pub async fn get_user_by_email(&self, email: &str) -> UserResult<User> {
        let email = normalize_email(email);

        with_deadline(SINGLE_RECORD_TIMEOUT, async {
            self.repository
                .get_by_email(&email)
                .await?
                .ok_or(UserError::NotFound)
        })
        .await
    }

    /// List users newest first; paging input is clamped, never rejected
    pub async fn list_users(&self, limit: i64, offset: i64) -> UserResult<Vec<User>> {
        let page = Pagination::new(limit, offset);

        with_deadline(LIST_TIMEOUT, async {
            self.repository
                .list(page.limit, page.offset)
                .await
                .map_err(UserError::from)
        })
        .await
    }

    /// Update profile, role and active flag of an existing user
    pub async fn update_user(&self, id: UserId, input: UpdateUser) -> UserResult<()> {
        with_deadline(SINGLE_RECORD_TIMEOUT, async {
            let mut user = self.find_existing(id).await?;
            apply_update(&mut user, input);
            self.repository.update(user).await.map_err(UserError::from)
        })
        .await?;

        info!(user_id = id, "Updated user");
        Ok(())
    }

    /// Deactivate a user; repeating it refreshes the reason and timestamp
    pub async fn deactivate_user(&self, id: UserId, reason: Option<&str>) -> UserResult<()> {
        let reason = normalize_reason(reason);

        with_deadline(SINGLE_RECORD_TIMEOUT, async {
            self.find_existing(id).await?;
            self.repository
                .deactivate(id, &reason)
                .await
                .map_err(UserError::from)
        })
        .await?;

        info!(user_id = id, reason = %reason, "Deactivated user");
        Ok(())
    }

    /// Whether the backing store answers within the single-record deadline
    pub async fn health_check(&self) -> UserResult<bool> {
        with_deadline(SINGLE_RECORD_TIMEOUT, async {
            self.repository.health_check().await.map_err(UserError::from)
        })
        .await
    }

    async fn find_existing(&self, id: UserId) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound)
    }

    fn prepare_new_user(&self, input: CreateUser) -> UserResult<NewUser> {
        let email = validate_email(&input.email)?;
        validate_password(&input.password)?;
        let document_type = parse_document_type(input.document_type.as_deref())?;
        let document_number = validate_document_number(&input.document_number)?;

        let role_id = if input.role_id == 0 {
            CUSTOMER_ROLE_ID
        } else {
            input.role_id
        };

        Ok(NewUser {
            name: input.name.trim().to_string(),
            surname: normalize_optional(input.surname.as_deref()),
            email,
            password_hash: hash_password(&input.password)?,
            document_type,
            document_number,
            role_id,
            active: true,
        })
    }
}

/// Merge an update into the stored record.
///
/// `active` is overwritten as given. Turning a user off this way records the
/// default inactivation reason so an inactive row always carries a timestamp;
/// turning one back on keeps the previous inactivation details.
fn apply_update(user: &mut User, input: UpdateUser) {
    user.name = input.name.trim().to_string();
    user.surname = normalize_optional(input.surname.as_deref());
    if input.role_id != 0 {
        user.role_id = input.role_id;
    }

    match (user.active, input.active) {
        (true, false) => {
            user.inactivated_at = Some(Utc::now());
            user.inactivated_reason = Some(DEFAULT_INACTIVATION_REASON.to_string());
        }
        (false, true) => {
            warn!(user_id = user.id, "Reactivating user through update");
        }
        _ => {}
    }
    user.active = input.active;
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

async fn with_deadline<T, F>(limit: Duration, operation: F) -> UserResult<T>
where
    F: Future<Output = UserResult<T>>,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| {
            warn!(timeout = ?limit, "User operation timed out");
            UserError::Timeout(limit)
        })?
}
