use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;

/// One like per user per post; liking again removes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub user_id: Uuid,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A feed post. The author's name is denormalized at creation time and not
/// rewritten when the user later renames themselves. Likes and comments are
/// embedded and live and die with the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub image: Option<String>,
    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
}

impl Post {
    /// A post needs text or an image; an all-blank post is rejected.
    pub fn new(
        user_id: Uuid,
        user_name: String,
        text: Option<String>,
        image: Option<String>,
    ) -> Result<Self, ApiError> {
        let text = text.unwrap_or_default();
        let image = image.filter(|i| !i.trim().is_empty());
        if text.trim().is_empty() && image.is_none() {
            return Err(ApiError::Validation(
                "Please provide text or an image".into(),
            ));
        }
        if let Some(ref img) = image {
            validate_image_data_url(img)?;
        }
        Ok(Self {
            id: Uuid::new_v4(),
            text,
            image,
            user_id,
            user_name,
            created_at: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
        })
    }

    /// Adds the caller's like, or removes it if already present.
    pub fn toggle_like(&mut self, user_id: Uuid, user_name: &str) {
        match self.likes.iter().position(|l| l.user_id == user_id) {
            Some(i) => {
                self.likes.remove(i);
            }
            None => self.likes.push(Like {
                user_id,
                user_name: user_name.to_string(),
            }),
        }
    }

    /// Appends a comment and returns its freshly generated id.
    pub fn add_comment(
        &mut self,
        user_id: Uuid,
        user_name: &str,
        text: String,
    ) -> Result<Uuid, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::Validation("Comment text is required".into()));
        }
        let comment = Comment {
            id: Uuid::new_v4(),
            user_id,
            user_name: user_name.to_string(),
            text,
            created_at: Utc::now(),
        };
        let id = comment.id;
        self.comments.push(comment);
        Ok(id)
    }

    /// Only the comment's author may remove it.
    pub fn remove_comment(&mut self, comment_id: Uuid, caller: Uuid) -> Result<(), ApiError> {
        let comment = self
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .ok_or(ApiError::NotFound("Comment"))?;
        if comment.user_id != caller {
            return Err(ApiError::Unauthorized(
                "Not authorized to delete this comment",
            ));
        }
        self.comments.retain(|c| c.id != comment_id);
        Ok(())
    }

    /// Applies an edit. Absent fields are untouched; a present-but-empty
    /// (or null) image clears the image. The result must still have text
    /// or an image.
    pub fn apply_edit(
        &mut self,
        text: Option<String>,
        image: Option<Option<String>>,
    ) -> Result<(), ApiError> {
        if let Some(text) = text {
            self.text = text;
        }
        if let Some(image) = image {
            self.image = image.filter(|i| !i.trim().is_empty());
            if let Some(ref img) = self.image {
                validate_image_data_url(img)?;
            }
        }
        if self.text.trim().is_empty() && self.image.is_none() {
            return Err(ApiError::Validation(
                "Post cannot be empty. Provide text or image.".into(),
            ));
        }
        Ok(())
    }
}

/// Images are embedded as `data:<mime>;base64,<data>` strings and must
/// carry an image/* media type.
pub fn validate_image_data_url(value: &str) -> Result<(), ApiError> {
    let invalid = || ApiError::Validation("Image must be a base64 data URL".into());
    let rest = value.strip_prefix("data:").ok_or_else(invalid)?;
    let (mime_part, data) = rest.split_once(";base64,").ok_or_else(invalid)?;
    let mime: mime::Mime = mime_part.parse().map_err(|_| invalid())?;
    if mime.type_() != mime::IMAGE {
        return Err(ApiError::Validation(
            "Image data must have an image/* media type".into(),
        ));
    }
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|_| ApiError::Validation("Image data is not valid base64".into()))?;
    Ok(())
}
