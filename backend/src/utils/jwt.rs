use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub fp: String, // device fingerprint at issuance
    pub exp: i64,   // expiration time
    pub iat: i64,   // issued at
}

impl Claims {
    pub fn new(user_id: String, username: String, fingerprint: String, ttl_days: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(ttl_days);

        Self {
            sub: user_id,
            username,
            fp: fingerprint,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn create_session_token(
    user_id: String,
    username: String,
    fingerprint: String,
    secret: &str,
    ttl_days: i64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, username, fingerprint, ttl_days);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

pub fn verify_session_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}
