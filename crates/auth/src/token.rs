//! Signed access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use agora_config::AuthConfig;

use crate::{AuthError, Principal, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub role: Role,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Issues and validates HS256 tokens for a single issuer.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenManager {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        let seconds = i64::try_from(config.token_ttl_seconds).unwrap_or(i64::MAX);
        let ttl = Duration::try_seconds(seconds).unwrap_or(Duration::MAX);
        Self::new(&config.jwt_secret, config.issuer.clone(), ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, AuthError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .map(|at| at.timestamp())
            .unwrap_or(i64::MAX);

        let claims = Claims {
            sub: principal.id.to_string(),
            name: principal.name.clone(),
            role: principal.role,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::TokenCreation(err.to_string()))?;

        debug!(user_id = principal.id, role = %principal.role, "issued access token");
        Ok(token)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))?;

        Ok(data.claims)
    }

    /// Validate a token and turn its claims into a principal.
    pub fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.validate(token)?;
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken(format!("non-numeric subject {}", claims.sub)))?;

        Ok(Principal::new(id, claims.role, claims.name))
    }
}
