use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BIO_MAX_LEN: usize = 500;
pub const PASSWORD_MIN_LEN: usize = 6;

/// A user row. The bcrypt hash never leaves the process; responses go
/// through [`UserPublic`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: String,
}

/// Redacted view sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: String,
}

impl User {
    pub fn public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            bio: self.bio.clone(),
        }
    }
}
