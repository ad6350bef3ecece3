use serde::Serialize;
use sqlx::FromRow;

/// A registered account. `password_hash` is an Argon2 PHC string and is
/// never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Public shape of a user as returned by `GET /usuarios`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}
