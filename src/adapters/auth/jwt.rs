//! HS256 JWT session validator.
//!
//! Tokens are signed with a shared secret and must carry `sub`, `email` and
//! `exp`. Issuer and audience are checked when configured.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, SubjectId};
use crate::ports::SessionValidator;

/// Claims we read from the token.
#[derive(Debug, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Validates HS256 bearer tokens.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(secret: &Secret<String>, issuer: Option<&str>, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                    tracing::warn!(error = %e, "Token issued for another party");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!(error = %e, "Token validation failed");
                    AuthError::InvalidToken
                }
            }
        })?;
        let claims = data.claims;

        let email = claims.email.filter(|e| !e.trim().is_empty()).ok_or_else(|| {
            tracing::warn!("Token missing email claim");
            AuthError::InvalidToken
        })?;
        let subject = SubjectId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser::new(subject, email, claims.name))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator").finish_non_exhaustive()
    }
}
