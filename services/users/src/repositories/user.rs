//! PostgreSQL user repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{FromRow, PgPool, migrate::Migrator};
use tracing::{debug, info};

use super::UserRepository;
use crate::models::{NewUser, Pagination, User, UserId};

/// Schema migrations for the users table
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const USER_COLUMNS: &str = r#"
    id, name, surname, email, password_hash, document_type, document_number,
    role_id, active, created_at, updated_at, last_login_at, inactivated_at,
    inactivated_reason
"#;

/// User repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    surname: Option<String>,
    email: String,
    password_hash: String,
    document_type: String,
    document_number: String,
    role_id: i16,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
    inactivated_at: Option<DateTime<Utc>>,
    inactivated_reason: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let document_type = row
            .document_type
            .parse()
            .map_err(|e: String| DatabaseError::Query(sqlx::Error::Decode(e.into())))?;
        let role_id = u8::try_from(row.role_id)
            .map_err(|e| DatabaseError::Query(sqlx::Error::Decode(Box::new(e))))?;

        Ok(User {
            id: row.id,
            name: row.name,
            surname: row.surname,
            email: row.email,
            password_hash: row.password_hash,
            document_type,
            document_number: row.document_number,
            role_id,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_login_at: row.last_login_at,
            inactivated_at: row.inactivated_at,
            inactivated_reason: row.inactivated_reason,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> DatabaseResult<UserId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, surname, email, password_hash, document_type,
                               document_number, role_id, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.document_type.code())
        .bind(&user.document_number)
        .bind(i16::from(user.role_id))
        .bind(user.active)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        info!(user_id = id, "Inserted user row");
        Ok(id)
    }

    async fn get_by_id(&self, id: UserId) -> DatabaseResult<Option<User>> {
        debug!(user_id = id, "Finding user by ID");

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        row.map(User::try_from).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        debug!("Finding user by email");

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        row.map(User::try_from).transpose()
    }

    async fn list(&self, limit: i64, offset: i64) -> DatabaseResult<Vec<User>> {
        let page = Pagination::new(limit, offset);

        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id DESC LIMIT $1 OFFSET $2");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: User) -> DatabaseResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, surname = $3, role_id = $4, active = $5,
                inactivated_at = $6, inactivated_reason = $7, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(i16::from(user.role_id))
        .bind(user.active)
        .bind(user.inactivated_at)
        .bind(&user.inactivated_reason)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        debug!(user_id = user.id, rows = result.rows_affected(), "Updated user row");
        Ok(())
    }

    async fn deactivate(&self, id: UserId, reason: &str) -> DatabaseResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET active = FALSE, inactivated_at = NOW(), inactivated_reason = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(reason)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        debug!(user_id = id, rows = result.rows_affected(), "Deactivated user row");
        Ok(())
    }

    async fn health_check(&self) -> DatabaseResult<bool> {
        common::database::health_check(&self.pool).await
    }
}
