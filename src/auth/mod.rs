//! Password hashing and the signed session carried in the `SID` cookie.

mod error;
mod password;
mod session;

pub use error::{CryptError, CryptResult};
pub use password::{hash_password, verify_password};
pub use session::{SessionClaims, issue_session, read_session};
