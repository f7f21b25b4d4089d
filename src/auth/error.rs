use thiserror::Error;

pub type CryptResult<T> = std::result::Result<T, CryptError>;

#[derive(Debug, Error)]
pub enum CryptError {
    #[error("password hash error: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
    #[error("session token error: {0}")]
    SessionToken(#[from] jsonwebtoken::errors::Error),
    #[error("session subject `{0}` is not a user id")]
    SessionSubject(String),
}

impl CryptError {
    /// Token problems a client can cause: bad signature, expiry, garbage.
    /// Everything else is a server fault.
    pub fn is_rejected_session(&self) -> bool {
        matches!(self, Self::SessionToken(_) | Self::SessionSubject(_))
    }
}
