//! Postgres-backed store tests. Skipped unless DATABASE_URL is set.

mod common;

use clinic_auth::auth::password;
use clinic_auth::db::{PgUserStore, StoreError, UserStore};
use clinic_auth::models::{NewUser, Role};

fn ann() -> NewUser {
    NewUser {
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "ann@example.com".to_string(),
        password_hash: password::hash("Secret1!").unwrap(),
        role: Role::Patient,
    }
}

#[tokio::test]
async fn create_then_lookup_round_trips() {
    let Some(db) = common::create_test_db().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let store = PgUserStore::new(db.pool.clone());
    let input = ann();

    let id = store.create_user(&input).await.unwrap();

    let by_id = store.get_user_by_id(id).await.unwrap().unwrap();
    assert_eq!(by_id, input.clone().into_user(id));

    let by_email = store.get_user_by_email("ann@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.role, Role::Patient);
    assert!(password::verify("Secret1!", &by_email.password_hash).unwrap());
    assert!(!password::verify("wrong", &by_email.password_hash).unwrap());

    common::cleanup_db(db).await;
}

#[tokio::test]
async fn missing_rows_are_none() {
    let Some(db) = common::create_test_db().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let store = PgUserStore::new(db.pool.clone());

    assert!(store.get_user_by_email("nobody@example.com").await.unwrap().is_none());
    assert!(store.get_user_by_id(12345).await.unwrap().is_none());

    common::cleanup_db(db).await;
}

#[tokio::test]
async fn duplicate_email_is_duplicate_key() {
    let Some(db) = common::create_test_db().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let store = PgUserStore::new(db.pool.clone());
    let id = store.create_user(&ann()).await.unwrap();

    let mut again = ann();
    again.first_name = "Other".to_string();
    let err = store.create_user(&again).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(_)), "{err}");

    let kept = store.get_user_by_id(id).await.unwrap().unwrap();
    assert_eq!(kept.first_name, "Ann");

    common::cleanup_db(db).await;
}

#[tokio::test]
async fn empty_name_is_constraint_violation() {
    let Some(db) = common::create_test_db().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let store = PgUserStore::new(db.pool.clone());

    let mut nameless = ann();
    nameless.first_name.clear();
    let err = store.create_user(&nameless).await.unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)), "{err}");
    assert!(store.get_user_by_email("ann@example.com").await.unwrap().is_none());

    common::cleanup_db(db).await;
}

#[tokio::test]
async fn unknown_role_in_row_is_rejected() {
    let Some(db) = common::create_test_db().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    // Bypass the CHECK constraint to simulate a drifted row
    sqlx::query("ALTER TABLE users DROP CONSTRAINT users_role_check")
        .execute(&db.pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO users (first_name, last_name, email, password_hash, role)
         VALUES ('X', 'Y', 'x@example.com', 'h', 'janitor')",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let store = PgUserStore::new(db.pool.clone());
    let err = store.get_user_by_email("x@example.com").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidRole(ref r) if r == "janitor"));

    common::cleanup_db(db).await;
}

#[tokio::test]
async fn closed_pool_is_connection_error() {
    let Some(db) = common::create_test_db().await else {
        eprintln!("DATABASE_URL not set; skipping");
        return;
    };
    let store = PgUserStore::new(db.pool.clone());
    db.pool.close().await;

    let err = store.get_user_by_id(1).await.unwrap_err();
    assert!(matches!(err, StoreError::Connection(_)), "{err}");

    common::cleanup_db(db).await;
}
