use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserPublic;

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupIn {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginIn {
    pub email: String,
    pub password: String,
}

/// Session handed out by signup and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthOut {
    pub token: String,
    pub name: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileIn {
    pub name: Option<String>,
    /// Absent leaves the stored bio untouched.
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MsgUserOut {
    pub msg: String,
    pub user: UserPublic,
}
