use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

/// Row of the `users` table, password hash included. Stays inside the store.
#[derive(Clone, FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub username: String,
    pub balance: i64,
    pub demo_balance: i64,
    pub address: String,
    pub access_token: String,
    pub roles: String,
    pub avatar: String,
    pub game_started: bool,
    pub switch_account: bool,
}

impl fmt::Debug for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// User record as seen by everything outside the store. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub balance: i64,
    #[serde(rename = "demoBalance")]
    pub demo_balance: i64,
    pub address: String,
    pub access_token: String,
    pub roles: String,
    pub avatar: String,
    #[serde(rename = "gameStarted")]
    pub game_started: bool,
    #[serde(rename = "switchAccount")]
    pub switch_account: bool,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            email: r.email,
            username: r.username,
            balance: r.balance,
            demo_balance: r.demo_balance,
            address: r.address,
            access_token: r.access_token,
            roles: r.roles,
            avatar: r.avatar,
            game_started: r.game_started,
            switch_account: r.switch_account,
        }
    }
}
