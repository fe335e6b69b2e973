mod common;

use chrono::Duration;
use chrono::Utc;
use common::test_pool;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::IdNumber;
use user_service::domain::user::models::Name;
use user_service::domain::user::models::NewUser;
use user_service::domain::user::models::UserId;
use user_service::domain::user::ports::UserRepository;
use user_service::outbound::repositories::SqliteUserRepository;
use user_service::user::errors::UserError;

fn new_user(email: &str) -> NewUser {
    let now = Utc::now();
    NewUser {
        name: Name::new("Ana Perez".to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        id_number: IdNumber::new("12345678".to_string()).unwrap(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_create_assigns_increasing_ids() {
    let repository = SqliteUserRepository::new(test_pool().await);

    let first = repository.create(new_user("a@x.com")).await.unwrap();
    let second = repository.create(new_user("b@x.com")).await.unwrap();

    assert!(first.id.0 > 0);
    assert!(second.id.0 > first.id.0);
}

#[tokio::test]
async fn test_find_round_trips_all_fields() {
    let repository = SqliteUserRepository::new(test_pool().await);
    let created = repository.create(new_user("a@x.com")).await.unwrap();

    let by_id = repository.find_by_id(&created.id).await.unwrap();
    let by_email = repository.find_by_email("a@x.com").await.unwrap();

    assert_eq!(by_id.as_ref(), Some(&created));
    assert_eq!(by_email, Some(created));
}

#[tokio::test]
async fn test_find_absent_is_none() {
    let repository = SqliteUserRepository::new(test_pool().await);

    assert_eq!(repository.find_by_id(&UserId(42)).await, Ok(None));
    assert_eq!(repository.find_by_email("nobody@x.com").await, Ok(None));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_by_the_store() {
    let repository = SqliteUserRepository::new(test_pool().await);
    repository.create(new_user("a@x.com")).await.unwrap();

    let result = repository.create(new_user("a@x.com")).await;

    assert_eq!(
        result,
        Err(UserError::EmailAlreadyExists("a@x.com".to_string()))
    );
}

#[tokio::test]
async fn test_update_persists_changes() {
    let repository = SqliteUserRepository::new(test_pool().await);
    let mut user = repository.create(new_user("a@x.com")).await.unwrap();

    user.name = Name::new("Ana Maria".to_string()).unwrap();
    user.email = EmailAddress::new("ana@x.com".to_string()).unwrap();
    user.updated_at = user.created_at + Duration::minutes(5);

    let updated = repository.update(user.clone()).await.unwrap();
    assert_eq!(updated, user);

    let stored = repository.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.name.as_str(), "Ana Maria");
    assert_eq!(stored.email.as_str(), "ana@x.com");
    assert_eq!(stored.updated_at, user.updated_at);
    assert_eq!(stored.created_at, user.created_at);
    assert_eq!(repository.find_by_email("a@x.com").await, Ok(None));
}

#[tokio::test]
async fn test_update_to_taken_email_is_rejected() {
    let repository = SqliteUserRepository::new(test_pool().await);
    repository.create(new_user("a@x.com")).await.unwrap();
    let mut other = repository.create(new_user("b@x.com")).await.unwrap();

    other.email = EmailAddress::new("a@x.com".to_string()).unwrap();

    assert_eq!(
        repository.update(other).await,
        Err(UserError::EmailAlreadyExists("a@x.com".to_string()))
    );
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let repository = SqliteUserRepository::new(test_pool().await);

    let ghost = new_user("ghost@x.com").with_id(UserId(99));

    assert_eq!(
        repository.update(ghost).await,
        Err(UserError::NotFound("99".to_string()))
    );
}

#[tokio::test]
async fn test_delete() {
    let repository = SqliteUserRepository::new(test_pool().await);
    let user = repository.create(new_user("a@x.com")).await.unwrap();

    repository.delete(&user.id).await.unwrap();

    assert_eq!(repository.find_by_id(&user.id).await, Ok(None));
    assert_eq!(
        repository.delete(&user.id).await,
        Err(UserError::NotFound(user.id.to_string()))
    );
}
