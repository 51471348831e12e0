use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::user::User;

pub struct UserRepository;

impl UserRepository {
    pub async fn insert(pool: &Pool, user: &User) -> Result<(), ApiError> {
        let client = pool.get().await?;
        client
            .execute(
                "INSERT INTO users (id, name, email, password_hash, bio)
                 VALUES ($1, $2, $3, $4, $5)",
                &[
                    &user.id,
                    &user.name,
                    &user.email,
                    &user.password_hash,
                    &user.bio,
                ],
            )
            .await
            .map_err(|e| {
                // two signups racing past the pre-check land here
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    ApiError::DuplicateEmail
                } else {
                    e.into()
                }
            })?;
        Ok(())
    }

    pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<User>, ApiError> {
        let client = pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, name, email, password_hash, bio FROM users WHERE email = $1",
                &[&email],
            )
            .await?;
        Ok(row.map(user_from_row))
    }

    pub async fn find_by_id(pool: &Pool, id: Uuid) -> Result<Option<User>, ApiError> {
        let client = pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, name, email, password_hash, bio FROM users WHERE id = $1",
                &[&id],
            )
            .await?;
        Ok(row.map(user_from_row))
    }

    pub async fn update_profile(
        pool: &Pool,
        id: Uuid,
        name: &str,
        bio: &str,
    ) -> Result<Option<User>, ApiError> {
        let client = pool.get().await?;
        let row = client
            .query_opt(
                "UPDATE users SET name = $2, bio = $3 WHERE id = $1
                 RETURNING id, name, email, password_hash, bio",
                &[&id, &name, &bio],
            )
            .await?;
        Ok(row.map(user_from_row))
    }
}

fn user_from_row(row: Row) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        bio: row.get("bio"),
    }
}
