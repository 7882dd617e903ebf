//! PostgreSQL repository tests
//!
//! These run the migrations and exercise `PgUserRepository` against a live
//! database reachable through `DATABASE_URL`, so they are ignored by default.

use chrono::Utc;
use common::database::{DatabaseConfig, init_pool, run_migrations};
use common::error::DatabaseError;
use serial_test::serial;
use users::{
    DocumentType, PgUserRepository, UserRepository,
    models::NewUser,
    repositories::MIGRATOR,
};

async fn repository() -> Result<PgUserRepository, Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;
    run_migrations(&pool, &MIGRATOR).await?;
    Ok(PgUserRepository::new(pool))
}

fn new_user(tag: &str) -> NewUser {
    let stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    NewUser {
        name: "Ana".to_string(),
        surname: None,
        email: format!("{tag}-{stamp}@example.com"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        document_type: DocumentType::Passport,
        document_number: "AB12345".to_string(),
        role_id: 1,
        active: true,
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
#[serial]
async fn test_create_and_fetch_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let repo = repository().await?;
    let input = new_user("roundtrip");

    let id = repo.create(input.clone()).await?;

    let by_id = repo.get_by_id(id).await?.expect("user was just created");
    assert_eq!(by_id.email, input.email);
    assert_eq!(by_id.surname, None);
    assert_eq!(by_id.document_type, DocumentType::Passport);
    assert_eq!(by_id.document_number, "AB12345");
    assert_eq!(by_id.role_id, 1);
    assert!(by_id.active);
    assert_eq!(by_id.inactivated_at, None);

    let by_email = repo.get_by_email(&input.email).await?.expect("lookup by email");
    assert_eq!(by_email.id, id);

    assert!(repo.get_by_id(-1).await?.is_none());
    assert!(repo.get_by_email("nobody@nowhere.invalid").await?.is_none());
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
#[serial]
async fn test_duplicate_email_is_unique_violation() -> Result<(), Box<dyn std::error::Error>> {
    let repo = repository().await?;
    let input = new_user("dup");

    repo.create(input.clone()).await?;
    let err = repo.create(input).await.expect_err("second insert must fail");

    assert!(matches!(err, DatabaseError::UniqueViolation(_)));
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
#[serial]
async fn test_list_is_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let repo = repository().await?;
    let older = repo.create(new_user("older")).await?;
    let newer = repo.create(new_user("newer")).await?;

    let page: Vec<i64> = repo.list(2, 0).await?.into_iter().map(|u| u.id).collect();
    assert_eq!(page, vec![newer, older]);

    let next = repo.list(1, 1).await?;
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].id, older);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
#[serial]
async fn test_update_writes_only_mutable_columns() -> Result<(), Box<dyn std::error::Error>> {
    let repo = repository().await?;
    let id = repo.create(new_user("update")).await?;
    let before = repo.get_by_id(id).await?.expect("created");

    let mut changed = before.clone();
    changed.name = "Eva".to_string();
    changed.surname = Some("Ruiz".to_string());
    changed.role_id = 2;
    changed.email = "ignored@example.com".to_string();
    changed.password_hash = "ignored".to_string();
    repo.update(changed).await?;

    let after = repo.get_by_id(id).await?.expect("still there");
    assert_eq!(after.name, "Eva");
    assert_eq!(after.surname.as_deref(), Some("Ruiz"));
    assert_eq!(after.role_id, 2);
    assert_eq!(after.email, before.email);
    assert_eq!(after.password_hash, before.password_hash);
    assert!(after.updated_at >= before.updated_at);

    let mut cleared = after.clone();
    cleared.surname = None;
    repo.update(cleared).await?;
    assert_eq!(repo.get_by_id(id).await?.expect("still there").surname, None);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
#[serial]
async fn test_deactivate_accepts_long_reason() -> Result<(), Box<dyn std::error::Error>> {
    let repo = repository().await?;
    let id = repo.create(new_user("deactivate")).await?;
    let reason = "r".repeat(300);

    repo.deactivate(id, &reason).await?;

    let user = repo.get_by_id(id).await?.expect("rows are never removed");
    assert!(!user.active);
    assert!(user.inactivated_at.is_some());
    assert_eq!(user.inactivated_reason.as_deref(), Some(reason.as_str()));
    Ok(())
}
