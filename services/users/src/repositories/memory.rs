use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::models::{NewUser, Pagination, User, UserId};

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<UserId, User>,
    last_id: UserId,
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Mirrors the SQL schema: ids come from a counter that never repeats and
/// emails are unique.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> DatabaseResult<UserId> {
        let mut store = self.store.write().await;

        if store.users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        store.last_id += 1;
        let id = store.last_id;
        let now = Utc::now();

        store.users.insert(
            id,
            User {
                id,
                name: user.name,
                surname: user.surname,
                email: user.email,
                password_hash: user.password_hash,
                document_type: user.document_type,
                document_number: user.document_number,
                role_id: user.role_id,
                active: user.active,
                created_at: now,
                updated_at: now,
                last_login_at: None,
                inactivated_at: None,
                inactivated_reason: None,
            },
        );

        tracing::debug!(user_id = id, "Created user");
        Ok(id)
    }

    async fn get_by_id(&self, id: UserId) -> DatabaseResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> DatabaseResult<Vec<User>> {
        let page = Pagination::new(limit, offset);
        let store = self.store.read().await;

        let users = store
            .users
            .values()
            .rev()
            .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit).unwrap_or(0))
            .cloned()
            .collect();

        Ok(users)
    }

    async fn update(&self, user: User) -> DatabaseResult<()> {
        let mut store = self.store.write().await;

        // Same columns as the SQL UPDATE; email, hash and documents stay put.
        if let Some(current) = store.users.get_mut(&user.id) {
            current.name = user.name;
            current.surname = user.surname;
            current.role_id = user.role_id;
            current.active = user.active;
            current.inactivated_at = user.inactivated_at;
            current.inactivated_reason = user.inactivated_reason;
            current.updated_at = Utc::now();
            tracing::debug!(user_id = user.id, "Updated user");
        }

        Ok(())
    }

    async fn deactivate(&self, id: UserId, reason: &str) -> DatabaseResult<()> {
        let mut store = self.store.write().await;

        if let Some(current) = store.users.get_mut(&id) {
            let now = Utc::now();
            current.active = false;
            current.inactivated_at = Some(now);
            current.inactivated_reason = Some(reason.to_string());
            current.updated_at = now;
            tracing::debug!(user_id = id, "Deactivated user");
        }

        Ok(())
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        Ok(true)
    }
}
