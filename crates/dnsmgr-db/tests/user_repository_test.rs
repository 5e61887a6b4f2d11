//! Integration tests for User repository using in-memory SurrealDB.

use dnsmgr_core::error::DnsMgrError;
use dnsmgr_core::models::user::{CreateUser, UpdateUser};
use dnsmgr_core::repository::{Pagination, UserRepository};
use dnsmgr_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    dnsmgr_db::run_migrations(&db).await.unwrap();
    db
}

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.into(),
        password: "SuperSecret123!".into(),
        is_active: None,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let repo = SurrealUserRepository::new(setup().await);

    let user = repo.create(new_user("a@x.com")).await.unwrap();

    assert_eq!(user.email, "a@x.com");
    assert!(!user.is_active, "new users start inactive");

    // Password should be hashed, not stored in plaintext.
    assert_ne!(user.password_hash, "SuperSecret123!");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.email, "a@x.com");
    assert_eq!(fetched.password_hash, user.password_hash);
}

#[tokio::test]
async fn create_active_user() {
    let repo = SurrealUserRepository::new(setup().await);

    let user = repo
        .create(CreateUser {
            is_active: Some(true),
            ..new_user("active@x.com")
        })
        .await
        .unwrap();

    assert!(user.is_active);
}

#[tokio::test]
async fn duplicate_email_is_a_constraint_violation() {
    let repo = SurrealUserRepository::new(setup().await);

    repo.create(new_user("a@x.com")).await.unwrap();
    let err = repo.create(new_user("a@x.com")).await.unwrap_err();

    assert!(
        matches!(err, DnsMgrError::ConstraintViolation { ref entity, .. } if entity == "user"),
        "unexpected error: {err:?}"
    );

    let page = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn empty_email_is_rejected() {
    let repo = SurrealUserRepository::new(setup().await);

    let err = repo.create(new_user("")).await.unwrap_err();
    assert!(matches!(err, DnsMgrError::ConstraintViolation { .. }));
}

#[tokio::test]
async fn get_user_by_email() {
    let repo = SurrealUserRepository::new(setup().await);

    let user = repo.create(new_user("eve@example.com")).await.unwrap();

    let fetched = repo.get_by_email("eve@example.com").await.unwrap();
    assert_eq!(fetched.id, user.id);

    let err = repo.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, DnsMgrError::NotFound { .. }));
}

#[tokio::test]
async fn update_user() {
    let repo = SurrealUserRepository::new(setup().await);

    let user = repo.create(new_user("frank@example.com")).await.unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.is_active);
    assert_eq!(updated.email, "frank@example.com"); // unchanged
    assert_eq!(updated.password_hash, user.password_hash); // unchanged
    assert_eq!(updated.created_at, user.created_at);
    assert!(updated.updated_at >= user.updated_at);
}

#[tokio::test]
async fn update_password_rehashes() {
    let repo = SurrealUserRepository::new(setup().await);

    let user = repo.create(new_user("pw@example.com")).await.unwrap();
    let updated = repo
        .update(
            user.id,
            UpdateUser {
                password: Some("AnotherSecret456!".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_ne!(updated.password_hash, user.password_hash);
    assert!(updated.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn update_to_taken_email_is_a_constraint_violation() {
    let repo = SurrealUserRepository::new(setup().await);

    repo.create(new_user("taken@x.com")).await.unwrap();
    let other = repo.create(new_user("other@x.com")).await.unwrap();

    let err = repo
        .update(
            other.id,
            UpdateUser {
                email: Some("taken@x.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DnsMgrError::ConstraintViolation { .. }));

    let unchanged = repo.get_by_id(other.id).await.unwrap();
    assert_eq!(unchanged.email, "other@x.com");
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let repo = SurrealUserRepository::new(setup().await);
    let id = Uuid::now_v7();

    let err = repo.get_by_id(id).await.unwrap_err();
    assert!(matches!(err, DnsMgrError::NotFound { .. }));

    let err = repo
        .update(
            id,
            UpdateUser {
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DnsMgrError::NotFound { .. }));

    let err = repo.delete(id).await.unwrap_err();
    assert!(matches!(err, DnsMgrError::NotFound { .. }));
}

#[tokio::test]
async fn delete_user() {
    let repo = SurrealUserRepository::new(setup().await);

    let user = repo.create(new_user("gone@example.com")).await.unwrap();
    repo.delete(user.id).await.unwrap();

    let err = repo.get_by_id(user.id).await.unwrap_err();
    assert!(matches!(err, DnsMgrError::NotFound { .. }));

    // The email is free again.
    repo.create(new_user("gone@example.com")).await.unwrap();
}

#[tokio::test]
async fn list_users_in_creation_order_with_pagination() {
    let repo = SurrealUserRepository::new(setup().await);

    let mut ids = Vec::new();
    for i in 0..5 {
        let user = repo.create(new_user(&format!("user-{i}@example.com"))).await.unwrap();
        ids.push(user.id);
    }

    let page1 = repo
        .list(Pagination {
            offset: 0,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page1.items.len(), 3);
    assert_eq!(page1.total, 5);

    let page2 = repo
        .list(Pagination {
            offset: 3,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page2.items.len(), 2);
    assert_eq!(page2.total, 5);

    let listed: Vec<Uuid> = page1
        .items
        .iter()
        .chain(page2.items.iter())
        .map(|u| u.id)
        .collect();
    assert_eq!(listed, ids);
}
