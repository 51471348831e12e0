use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::post::Post;

pub struct PostRepository;

impl PostRepository {
    pub async fn insert(pool: &Pool, post: &Post) -> Result<(), ApiError> {
        let likes = serde_json::to_value(&post.likes)?;
        let comments = serde_json::to_value(&post.comments)?;
        let client = pool.get().await?;
        client
            .execute(
                "INSERT INTO posts (id, text, image, user_id, user_name, created_at, likes, comments)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                &[
                    &post.id,
                    &post.text,
                    &post.image,
                    &post.user_id,
                    &post.user_name,
                    &post.created_at,
                    &likes,
                    &comments,
                ],
            )
            .await?;
        Ok(())
    }

    /// The whole feed, newest first. No pagination.
    pub async fn list_newest_first(pool: &Pool) -> Result<Vec<Post>, ApiError> {
        let client = pool.get().await?;
        let rows = client
            .query(
                "SELECT id, text, image, user_id, user_name, created_at, likes, comments
                 FROM posts ORDER BY created_at DESC",
                &[],
            )
            .await?;
        rows.into_iter().map(post_from_row).collect()
    }

    pub async fn find_by_id(pool: &Pool, id: Uuid) -> Result<Option<Post>, ApiError> {
        let client = pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, text, image, user_id, user_name, created_at, likes, comments
                 FROM posts WHERE id = $1",
                &[&id],
            )
            .await?;
        row.map(post_from_row).transpose()
    }

    /// Writes back every mutable field in one statement; concurrent saves
    /// of the same post are last-write-wins.
    pub async fn save(pool: &Pool, post: &Post) -> Result<(), ApiError> {
        let likes = serde_json::to_value(&post.likes)?;
        let comments = serde_json::to_value(&post.comments)?;
        let client = pool.get().await?;
        client
            .execute(
                "UPDATE posts SET text = $2, image = $3, likes = $4, comments = $5 WHERE id = $1",
                &[&post.id, &post.text, &post.image, &likes, &comments],
            )
            .await?;
        Ok(())
    }

    /// Deletes the row; the embedded likes and comments go with it.
    pub async fn delete(pool: &Pool, id: Uuid) -> Result<bool, ApiError> {
        let client = pool.get().await?;
        let affected = client
            .execute("DELETE FROM posts WHERE id = $1", &[&id])
            .await?;
        Ok(affected > 0)
    }
}

fn post_from_row(row: Row) -> Result<Post, ApiError> {
    Ok(Post {
        id: row.get("id"),
        text: row.get("text"),
        image: row.get("image"),
        user_id: row.get("user_id"),
        user_name: row.get("user_name"),
        created_at: row.get("created_at"),
        likes: serde_json::from_value(row.get("likes"))?,
        comments: serde_json::from_value(row.get("comments"))?,
    })
}
