//! Error types for wsn-security.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("cipher key must not be empty")]
    EmptyKey,

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decrypted bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SecurityResult<T> = Result<T, SecurityError>;
