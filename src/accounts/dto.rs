use serde::{Deserialize, Serialize};

use super::repo_types::User;
use crate::response::Envelope;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub username: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query string of `GET /user`.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(flatten)]
    pub response: Envelope,
    pub user_id: i64,
}

/// Returned by login and by single-user lookup.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(flatten)]
    pub response: Envelope,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    #[serde(flatten)]
    pub response: Envelope,
    pub users: Vec<User>,
}
