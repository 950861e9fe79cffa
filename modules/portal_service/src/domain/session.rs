//! Access-code login and signed session credentials
//!
//! A successful login yields an HS256 JWT naming the resolved tenant scope.
//! Verification is stateless: no server-side session store exists, so logout
//! only discards the client-held credential.

use crate::config::Config;
use crate::contract::{AuthError, Principal, TenantScope};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Cookie carrying the session credential
pub const SESSION_COOKIE: &str = "dreem_admin_session";

const ISSUER: &str = "dreem-portal";

/// Claims embedded in every session credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Tenant scope literal
    pub tenant: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub tenant: TenantScope,
    /// Signed credential to hand to the client
    pub token: String,
    /// Credential lifetime in seconds
    pub max_age_secs: i64,
}

/// Resolves access codes into tenant scopes and verifies credentials
pub struct SessionResolver {
    codes: Vec<(TenantScope, String)>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionResolver {
    pub fn new(config: &Config) -> Self {
        let codes = [
            (TenantScope::Kenya, &config.access_codes.kenya),
            (TenantScope::Uganda, &config.access_codes.uganda),
            (TenantScope::Tanzania, &config.access_codes.tanzania),
            (TenantScope::Global, &config.access_codes.global),
        ]
        .into_iter()
        .filter_map(|(tenant, code)| {
            code.as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(|c| (tenant, c.to_string()))
        })
        .collect::<Vec<_>>();

        if codes.is_empty() {
            tracing::warn!("no admin access codes configured; every login will be rejected");
        }
        if config.session_secret.is_empty() {
            tracing::warn!("session_secret is empty; session credentials are trivially forgeable");
        }

        let secret = config.session_secret.as_bytes();
        Self {
            codes,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::days(i64::from(config.session_ttl_days)),
        }
    }

    /// Exchange an access code for a signed credential
    pub fn login(&self, code: &str) -> Result<SessionGrant, AuthError> {
        // Every configured code is compared so timing does not reveal which one matched
        let tenant = self
            .codes
            .iter()
            .fold(None, |found, (tenant, expected)| {
                let hit: bool = expected.as_bytes().ct_eq(code.as_bytes()).into();
                if hit && found.is_none() {
                    Some(*tenant)
                } else {
                    found
                }
            })
            .ok_or(AuthError::InvalidCode)?;

        let now = Utc::now();
        let claims = SessionClaims {
            tenant: tenant.as_str().to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Token(e.to_string()))?;

        tracing::info!(tenant = %tenant, "admin session issued");
        Ok(SessionGrant {
            tenant,
            token,
            max_age_secs: self.ttl.num_seconds(),
        })
    }

    /// Verify a credential; `None` if absent, tampered, expired or naming an unknown tenant
    pub fn current_session(&self, token: Option<&str>) -> Option<Principal> {
        let token = token?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);
        validation.leeway = 0;

        match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => data
                .claims
                .tenant
                .parse::<TenantScope>()
                .ok()
                .map(|tenant| Principal { tenant }),
            Err(e) => {
                tracing::debug!(error = %e, "rejected session credential");
                None
            }
        }
    }
}
