use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stored account row. The hash never leaves the cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

// Fields are optional so a missing JSON key surfaces as the friendly
// validation failure instead of a deserialize rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// What login echoes back: name and email only.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0}")]
    Validation(String),

    #[error("Email already exists.")]
    EmailTaken,

    // Deliberately identical for unknown email and wrong password.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Credential store error: {0}")]
    Store(String),
}
