//! Password hashing (argon2, PHC strings) and login token issuing (HS256 JWT).

use crate::error::{AppError, ConfigError};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// True only when `password` matches the stored hash exactly. A malformed stored hash never matches.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            false
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Signs login tokens. Verification belongs to whichever service consumes them.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// `ttl_secs` must be positive and representable as a duration.
    pub fn new(secret: &str, ttl_secs: i64) -> Result<Self, ConfigError> {
        let ttl = Duration::try_seconds(ttl_secs)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| ConfigError::Invalid {
                key: "TOKEN_TTL_SECS",
                value: ttl_secs.to_string(),
            })?;
        Ok(TokenIssuer {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }
}
