use crate::config::Config;
use crate::error::AppError;
use crate::services::session_store::{SessionRecord, SessionStore};
use crate::utils::fingerprint::Fingerprint;
use crate::utils::jwt::{create_session_token, verify_session_token};
use crate::validation::rules::validate_display_name;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Issues fingerprint-bound bearer sessions and verifies them on every
/// gated request, sliding the server-side expiry forward on success.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    jwt_secret: String,
    ttl_days: i64,
}

#[derive(Debug)]
pub struct IssuedSession {
    pub user_id: String,
    pub token: String,
    pub expires_in_days: i64,
}

/// Identity attached to the request once the session checks pass.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, config: &Config) -> Self {
        Self {
            store,
            jwt_secret: config.user_jwt_secret.clone(),
            ttl_days: config.session_ttl_days,
        }
    }

    pub async fn issue(
        &self,
        username: &str,
        fingerprint: &Fingerprint,
    ) -> Result<IssuedSession, AppError> {
        validate_display_name(username)
            .map_err(|_| AppError::BadRequest("Usuario inválido".to_string()))?;

        if fingerprint.is_empty() {
            return Err(AppError::Unauthorized(
                "Dispositivo no autorizado".to_string(),
            ));
        }

        let username = username.trim().to_string();
        let user_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let token = create_session_token(
            user_id.clone(),
            username.clone(),
            fingerprint.as_str().to_string(),
            &self.jwt_secret,
            self.ttl_days,
        )?;

        self.store
            .set(
                &user_id,
                SessionRecord {
                    username,
                    fingerprint: fingerprint.clone(),
                    created_at: now,
                    expires_at: now + Duration::days(self.ttl_days),
                },
            )
            .await;

        tracing::info!(user_id = %user_id, "session issued");

        Ok(IssuedSession {
            user_id,
            token,
            expires_in_days: self.ttl_days,
        })
    }

    pub async fn verify(
        &self,
        token: &str,
        claimed_user_id: &str,
        fingerprint: &Fingerprint,
    ) -> Result<AuthenticatedUser, AppError> {
        let claims = verify_session_token(token, &self.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Sesión inválida".to_string()))?;

        if claims.sub != claimed_user_id {
            return Err(AppError::Unauthorized("Token inválido".to_string()));
        }

        let token_fp = Fingerprint::from_raw(claims.fp);
        if !token_fp.matches(fingerprint) {
            return Err(AppError::Unauthorized(
                "Dispositivo no autorizado".to_string(),
            ));
        }

        let refreshed = self
            .store
            .refresh_if(
                claimed_user_id,
                &claims.username,
                fingerprint,
                Utc::now(),
                Duration::days(self.ttl_days),
            )
            .await
            .ok_or_else(|| AppError::Unauthorized("Sesión expirada o inválida".to_string()))?;

        Ok(AuthenticatedUser {
            user_id: claimed_user_id.to_string(),
            username: refreshed.username,
        })
    }

    pub async fn sweep_expired(&self) -> usize {
        self.store.sweep_expired(Utc::now()).await
    }

    /// Direct store access, used by tests to stage records.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }
}
