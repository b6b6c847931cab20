use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;

/// Bearer token claims; `sub` is the id every ownership check compares against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid) -> Self {
        let expiry_hours = config::config().security.jwt_expiry_hours;
        Self::with_expiry(user_id, Duration::hours(expiry_hours as i64))
    }

    pub fn with_expiry(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

fn secret() -> Result<&'static str, JwtError> {
    let secret = config::config().security.jwt_secret.as_str();
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }
    Ok(secret)
}

/// Signs claims with the configured HS256 secret. Used by tooling and tests;
/// the API itself never issues tokens.
pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    let key = EncodingKey::from_secret(secret()?.as_bytes());
    encode(&Header::default(), claims, &key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret()?.as_bytes());
    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}
