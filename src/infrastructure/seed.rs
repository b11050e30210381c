//! Out-of-band user creation: the `create-user` subcommand and the demo seed

use crate::domain::{DomainError, UserRepository};
use crate::infrastructure::auth::hash_password;
use crate::models::user;

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo";

pub async fn create_user(
    users: &dyn UserRepository,
    username: &str,
    password: &str,
) -> Result<user::Model, DomainError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(DomainError::Validation(
            "username and password must not be empty".to_string(),
        ));
    }
    if users.find_by_username(username).await?.is_some() {
        return Err(DomainError::Validation(format!(
            "user '{}' already exists",
            username
        )));
    }

    let hash = hash_password(password).map_err(hashing_failed)?;
    let created = users.create(username, &hash).await?;
    tracing::info!(user_id = created.id, username = %created.username, "User created");
    Ok(created)
}

fn hashing_failed(reason: String) -> DomainError {
    DomainError::Validation(format!("could not hash password: {}", reason))
}

/// Create the demo account unless it already exists
pub async fn seed_demo_user(users: &dyn UserRepository) -> Result<(), DomainError> {
    if users.find_by_username(DEMO_USERNAME).await?.is_some() {
        tracing::debug!("Demo user already present");
        return Ok(());
    }
    create_user(users, DEMO_USERNAME, DEMO_PASSWORD).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{SeaOrmUserRepository, auth::verify_password, db::init_db};

    #[tokio::test]
    async fn test_create_user_hashes_and_rejects_duplicates() {
        let db = init_db("sqlite::memory:").await.unwrap();
        let users = SeaOrmUserRepository::new(db);

        let user = create_user(&users, " alice ", "wonderland").await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(verify_password("wonderland", &user.password_hash).unwrap());

        assert!(create_user(&users, "alice", "again").await.is_err());
        assert!(create_user(&users, "", "pw").await.is_err());
    }

    #[test]
    fn test_hashing_failure_is_not_a_database_error() {
        let err = hashing_failed("output too short".to_string());
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "could not hash password: output too short"
        );
    }

    #[tokio::test]
    async fn test_seed_demo_user_is_idempotent() {
        let db = init_db("sqlite::memory:").await.unwrap();
        let users = SeaOrmUserRepository::new(db);

        seed_demo_user(&users).await.unwrap();
        seed_demo_user(&users).await.unwrap();
        assert!(users.find_by_username(DEMO_USERNAME).await.unwrap().is_some());
    }
}
