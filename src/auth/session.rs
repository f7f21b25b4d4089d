use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{CryptError, CryptResult};

/// HS256 claims of a signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(user_id: Uuid, ttl: chrono::Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: (chrono::Utc::now() + ttl).timestamp(),
        }
    }

    pub fn user_id(&self) -> CryptResult<Uuid> {
        self.sub
            .parse()
            .map_err(|_| CryptError::SessionSubject(self.sub.clone()))
    }
}

/// Signs a session for `user_id` that expires after `ttl`.
pub fn issue_session<K: AsRef<[u8]>>(user_id: Uuid, ttl: chrono::Duration, key: K) -> CryptResult<String> {
    let claims = SessionClaims::new(user_id, ttl);
    let key = EncodingKey::from_secret(key.as_ref());

    let token = jsonwebtoken::encode(&Header::default(), &claims, &key)?;
    Ok(token)
}

/// Checks signature and expiry, then returns the user the session belongs to.
pub fn read_session<K: AsRef<[u8]>>(token: &str, key: K) -> CryptResult<Uuid> {
    let key = DecodingKey::from_secret(key.as_ref());

    let data = jsonwebtoken::decode::<SessionClaims>(token, &key, &Validation::default())?;
    data.claims.user_id()
}

#[cfg(test)]
mod test {
    use super::*;

    const KEY: &str = "session-key";

    #[test]
    fn session_round_trip_yields_user() {
        let id = Uuid::new_v4();
        let token = issue_session(id, chrono::Duration::hours(1), KEY).unwrap();

        assert_eq!(read_session(&token, KEY).unwrap(), id);
    }

    #[test]
    fn session_signed_with_other_key_is_rejected() {
        let token = issue_session(Uuid::new_v4(), chrono::Duration::hours(1), KEY).unwrap();

        let err = read_session(&token, "other").unwrap_err();
        assert!(err.is_rejected_session());
    }

    #[test]
    fn expired_session_is_rejected() {
        let token = issue_session(Uuid::new_v4(), chrono::Duration::hours(-2), KEY).unwrap();
        assert!(matches!(read_session(&token, KEY), Err(CryptError::SessionToken(_))));
    }

    #[test]
    fn foreign_subject_is_rejected() {
        let claims = SessionClaims {
            sub: "admin".into(),
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(KEY.as_bytes()),
        )
        .unwrap();

        assert!(matches!(read_session(&token, KEY), Err(CryptError::SessionSubject(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(read_session("not-a-token", KEY).unwrap_err().is_rejected_session());
    }
}
