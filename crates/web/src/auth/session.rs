//! Session encoding and decoding.
//!
//! A session is an HS256-signed JWT carrying the signed-in [`Identity`],
//! including the backend access token. Nothing is stored server-side: the
//! token in the cookie is the whole session. Decoding is a local signature
//! and expiry check, cheap enough to run on every request.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use quickdeck_core::identity::Identity;
use quickdeck_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::parse_env;

/// Default session lifetime in minutes (30 days).
const DEFAULT_MAX_AGE_MINS: i64 = 43_200;

/// Longest accepted session lifetime in minutes (10 years).
pub const MAX_SESSION_AGE_MINS: i64 = 5_256_000;

/// Session signing and cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 signing secret. `None` disables sign-in.
    pub secret: Option<String>,
    /// Session lifetime in minutes.
    pub max_age_mins: i64,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session settings from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `SESSION_SECRET`        | no       | --      |
    /// | `SESSION_MAX_AGE_MINS`  | no       | `43200` |
    /// | `SESSION_COOKIE_SECURE` | no       | `false` |
    ///
    /// A missing secret is not fatal; see [`SessionCodec::new`].
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let max_age_mins = checked_max_age_mins(parse_env(
            "SESSION_MAX_AGE_MINS",
            DEFAULT_MAX_AGE_MINS,
        ))
        .unwrap_or_else(|| {
            panic!("SESSION_MAX_AGE_MINS must be between 1 and {MAX_SESSION_AGE_MINS}")
        });

        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            secret,
            max_age_mins,
            cookie_secure,
        }
    }
}

/// `mins` when it is a usable session lifetime, `None` when it is zero,
/// negative, or longer than [`MAX_SESSION_AGE_MINS`].
pub fn checked_max_age_mins(mins: i64) -> Option<i64> {
    (1..=MAX_SESSION_AGE_MINS).contains(&mins).then_some(mins)
}

/// Errors raised while issuing a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session signing secret is not configured")]
    MissingSecret,

    #[error("Session token could not be signed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Subject -- the backend user id.
    sub: DbId,
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Display name.
    name: String,
    is_admin: bool,
    /// Backend bearer token.
    access_token: String,
    /// Issued-at time (UTC Unix timestamp).
    iat: i64,
    /// Expiration time (UTC Unix timestamp).
    exp: i64,
    /// Unique token identifier.
    jti: String,
}

/// A signed session token, as stored in the cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A decoded, verified session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Identity,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Issues and verifies session tokens.
pub struct SessionCodec {
    keys: Option<(EncodingKey, DecodingKey)>,
    validation: Validation,
    max_age_secs: i64,
}

impl SessionCodec {
    /// Build a codec from configuration.
    ///
    /// Without a secret the codec still works but cannot issue sessions
    /// and treats every token as invalid. A warning is logged once here.
    pub fn new(config: &SessionConfig) -> Self {
        let keys = match config.secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => Some((
                EncodingKey::from_secret(secret.as_bytes()),
                DecodingKey::from_secret(secret.as_bytes()),
            )),
            None => {
                tracing::warn!(
                    "SESSION_SECRET is not set; sign-in is disabled and every request is treated as signed out"
                );
                None
            }
        };

        // An expired session is dead at `exp`, with no grace period.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys,
            validation,
            max_age_secs: config.max_age_mins.saturating_mul(60),
        }
    }

    /// Whether sessions can be issued and verified.
    pub fn is_enabled(&self) -> bool {
        self.keys.is_some()
    }

    /// Session lifetime in seconds, used for the cookie `Max-Age`.
    pub fn max_age_secs(&self) -> i64 {
        self.max_age_secs
    }

    /// Sign a new session for `identity`.
    pub fn encode(&self, identity: &Identity) -> Result<SessionToken, SessionError> {
        let (encoding_key, _) = self.keys.as_ref().ok_or(SessionError::MissingSecret)?;

        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            name: identity.display_name.clone(),
            is_admin: identity.is_admin,
            access_token: identity.access_token.clone(),
            iat: now,
            exp: now.saturating_add(self.max_age_secs),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, encoding_key)?;
        Ok(SessionToken(token))
    }

    /// Verify `token` and return its identity, or `None` for anything that
    /// is not a valid, unexpired session signed with our secret.
    pub fn decode(&self, token: &str) -> Option<Identity> {
        self.decode_session(token).map(|s| s.identity)
    }

    /// Like [`decode`](Self::decode), keeping the issue and expiry times.
    pub fn decode_session(&self, token: &str) -> Option<Session> {
        let (_, decoding_key) = self.keys.as_ref()?;
        let claims = decode::<SessionClaims>(token, decoding_key, &self.validation)
            .ok()?
            .claims;

        if claims.username.is_empty() || claims.access_token.is_empty() {
            return None;
        }

        Some(Session {
            identity: Identity {
                id: claims.sub,
                username: claims.username,
                email: claims.email,
                display_name: claims.name,
                is_admin: claims.is_admin,
                access_token: claims.access_token,
            },
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}
