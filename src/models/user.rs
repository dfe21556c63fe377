use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role given to every self-registered account
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)] // Never expose password hash
    pub password_hash: String,
    pub role: String,
}

/// User creation DTO; the password arrives already hashed
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub role: String,
}

/// Public user response (safe to return via API)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}
