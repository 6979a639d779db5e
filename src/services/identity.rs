use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while resolving the caller's identity
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token has an empty subject")]
    EmptySubject,
}

/// Source of the current user's id
pub trait IdentityProvider: Send + Sync {
    /// `None` when nobody is signed in
    fn current_user_id(&self) -> Option<String>;
}

/// Fixed identity, for background jobs and tests
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<String>);

impl StaticIdentity {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self(Some(user_id.into()))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.0.clone()
    }
}

/// JWT claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// HS256 bearer token verifier
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        if data.claims.sub.is_empty() {
            return Err(AuthError::EmptySubject);
        }
        Ok(data.claims)
    }

    /// Verify an `Authorization` header value of the form `Bearer <token>`
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.verify(token)
    }
}

/// Identity resolved from a request's bearer token
#[derive(Debug, Clone, Default)]
pub struct BearerIdentity {
    user_id: Option<String>,
}

impl BearerIdentity {
    /// Resolve from an `Authorization` header; invalid tokens are anonymous
    pub fn from_header(header: Option<&str>, verifier: &TokenVerifier) -> Self {
        match verifier.verify_header(header) {
            Ok(claims) => Self {
                user_id: Some(claims.sub),
            },
            Err(AuthError::MissingToken) => Self::default(),
            Err(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                Self::default()
            }
        }
    }
}

impl IdentityProvider for BearerIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}
