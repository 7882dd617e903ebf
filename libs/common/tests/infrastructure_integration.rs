//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database is properly configured
//! and accessible from the application. They need a running instance
//! reachable through `DATABASE_URL`, so they are ignored by default.

use common::{
    database::{DatabaseConfig, health_check, init_pool},
    error::DatabaseError,
};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_database_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_unique_violation_is_classified() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    // Temporary tables live on a single connection.
    let mut conn = pool.acquire().await?;

    sqlx::query("CREATE TEMPORARY TABLE unique_emails (email TEXT UNIQUE)")
        .execute(&mut *conn)
        .await?;
    sqlx::query("INSERT INTO unique_emails (email) VALUES ('a@b.c')")
        .execute(&mut *conn)
        .await?;

    let err = sqlx::query("INSERT INTO unique_emails (email) VALUES ('a@b.c')")
        .execute(&mut *conn)
        .await
        .map_err(DatabaseError::from_query)
        .expect_err("duplicate insert must fail");

    assert!(matches!(err, DatabaseError::UniqueViolation(_)));
    Ok(())
}
