use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header, jwk::JwkSet};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, Result},
    models::VerifiedUser,
};

const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Turns a bearer token into a verified identity.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedUser>;
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
}

#[derive(Default)]
struct KeyCache {
    set: Option<JwkSet>,
    fetched_at: Option<Instant>,
}

impl KeyCache {
    fn find(&self, kid: &str) -> Option<Result<DecodingKey>> {
        self.set
            .as_ref()
            .and_then(|set| set.find(kid))
            .map(|jwk| DecodingKey::from_jwk(jwk).map_err(|_| unauthorized()))
    }

    fn refresh_due(&self, now: Instant) -> bool {
        self.fetched_at
            .is_none_or(|at| now.saturating_duration_since(at) >= MIN_REFRESH_INTERVAL)
    }
}

/// Verifies Firebase ID tokens against Google's published signing keys.
///
/// Keys are cached. A token naming a key id the cache does not know triggers
/// a refetch, which covers Google's key rotation, but at most once per
/// `MIN_REFRESH_INTERVAL`.
pub struct FirebaseVerifier {
    project_id: String,
    http: reqwest::Client,
    jwks_url: String,
    keys: RwLock<KeyCache>,
}

impl FirebaseVerifier {
    pub fn new(project_id: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            project_id: project_id.into(),
            http,
            jwks_url: FIREBASE_JWKS_URL.to_string(),
            keys: RwLock::new(KeyCache::default()),
        }
    }

    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    async fn fetch_keys(&self) -> Result<JwkSet> {
        let keys = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| AppError::AuthProviderError(format!("Failed to fetch signing keys: {}", e)))?
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::AuthProviderError(format!("Invalid signing key set: {}", e)))?;

        tracing::info!("Loaded {} Firebase signing keys", keys.keys.len());
        Ok(keys)
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey> {
        if let Some(key) = self.keys.read().await.find(kid) {
            return key;
        }

        // Writers queue here, so concurrent misses share one fetch.
        let mut cache = self.keys.write().await;
        if let Some(key) = cache.find(kid) {
            return key;
        }

        let now = Instant::now();
        if !cache.refresh_due(now) {
            tracing::debug!(kid, "Unknown signing key, refetch throttled");
            return Err(match cache.set {
                Some(_) => unauthorized(),
                None => AppError::AuthProviderError("Signing keys unavailable".to_string()),
            });
        }

        // Stamped before the fetch so failed fetches are throttled too.
        cache.fetched_at = Some(now);
        let set = self.fetch_keys().await?;
        cache.set = Some(set);
        cache.find(kid).unwrap_or_else(|| Err(unauthorized()))
    }
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedUser> {
        let header = decode_header(token).map_err(|_| unauthorized())?;
        let kid = header.kid.ok_or_else(unauthorized)?;
        let key = self.key_for(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("https://securetoken.google.com/{}", self.project_id)]);

        let claims = decode::<FirebaseClaims>(token, &key, &validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                unauthorized()
            })?
            .claims;

        let email = claims.email.ok_or_else(unauthorized)?;

        Ok(VerifiedUser {
            uid: claims.sub,
            email,
        })
    }
}

fn unauthorized() -> AppError {
    AppError::Unauthorized("unauthorized access".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so any fetch fails fast.
    fn offline_verifier() -> FirebaseVerifier {
        FirebaseVerifier::new("garments", reqwest::Client::new())
            .with_jwks_url("http://127.0.0.1:9/jwks")
    }

    #[tokio::test]
    async fn malformed_token_is_unauthorized_without_fetching_keys() {
        let verifier = offline_verifier();

        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(verifier.keys.read().await.fetched_at.is_none());
    }

    #[tokio::test]
    async fn unknown_kid_inside_refresh_window_is_rejected_without_fetch() {
        let verifier = offline_verifier();
        let stamped = Instant::now();
        *verifier.keys.write().await = KeyCache {
            set: Some(JwkSet { keys: Vec::new() }),
            fetched_at: Some(stamped),
        };

        for _ in 0..3 {
            let err = verifier.key_for("rotated-away").await.err().unwrap();
            assert!(matches!(err, AppError::Unauthorized(_)));
        }
        assert_eq!(verifier.keys.read().await.fetched_at, Some(stamped));
    }

    #[tokio::test]
    async fn failed_fetch_is_provider_unavailable_and_throttled() {
        let verifier = offline_verifier();

        let err = verifier.key_for("any").await.err().unwrap();
        assert!(matches!(err, AppError::AuthProviderError(_)));
        assert_eq!(err.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);

        let stamped = verifier.keys.read().await.fetched_at;
        assert!(stamped.is_some());

        let err = verifier.key_for("any").await.err().unwrap();
        assert!(matches!(err, AppError::AuthProviderError(_)));
        assert_eq!(verifier.keys.read().await.fetched_at, stamped);
    }

    #[test]
    fn refresh_is_due_once_the_interval_passes() {
        let now = Instant::now();
        let cache = KeyCache {
            set: None,
            fetched_at: Some(now),
        };

        assert!(KeyCache::default().refresh_due(now));
        assert!(!cache.refresh_due(now + Duration::from_secs(59)));
        assert!(cache.refresh_due(now + MIN_REFRESH_INTERVAL));
    }
}
