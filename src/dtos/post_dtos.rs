use serde::{Deserialize, Deserializer, Serialize};

use crate::models::post::Post;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostIn {
    pub text: Option<String>,
    pub image: Option<String>,
}

/// Edit payload. Fields left out of the JSON stay untouched, so `image`
/// is doubly optional: absent = keep, null or "" = clear, value = replace.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EditPostIn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "some",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
}

fn some<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentIn {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MsgOut {
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MsgPostOut {
    pub msg: String,
    pub post: Post,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_image_means_keep() {
        let edit: EditPostIn = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(edit.text.as_deref(), Some("hi"));
        assert!(edit.image.is_none());
    }

    #[test]
    fn null_image_means_clear() {
        let edit: EditPostIn = serde_json::from_str(r#"{"image":null}"#).unwrap();
        assert_eq!(edit.image, Some(None));
    }

    #[test]
    fn empty_image_is_present_and_empty() {
        let edit: EditPostIn = serde_json::from_str(r#"{"image":""}"#).unwrap();
        assert_eq!(edit.image, Some(Some(String::new())));
    }

    #[test]
    fn serialization_round_trips_the_three_image_states() {
        let keep = EditPostIn { text: Some("t".into()), image: None };
        assert_eq!(serde_json::to_string(&keep).unwrap(), r#"{"text":"t"}"#);

        let clear = EditPostIn { text: None, image: Some(None) };
        assert_eq!(serde_json::to_string(&clear).unwrap(), r#"{"image":null}"#);

        let replace = EditPostIn { text: None, image: Some(Some("data".into())) };
        assert_eq!(serde_json::to_string(&replace).unwrap(), r#"{"image":"data"}"#);
    }
}
