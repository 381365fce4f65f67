use crate::error::{AuthError, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const DEFAULT_TOKEN_TTL: i64 = 3600; // 1 hour
const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration
}

impl Claims {
    pub fn new(email: String, ttl_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            email,
            iat: now,
            exp: now + ttl_seconds,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.exp < chrono::Utc::now().timestamp()
    }
}

/// Resolves a bearer token to the caller's email
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<String>;
}

/// JWT manager using HS256 (shared secret)
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl JwtManager {
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Result<Self> {
        if secret.is_empty() {
            return Err(AuthError::Config("JWT secret must not be empty".to_string()));
        }
        if ttl_seconds <= 0 {
            return Err(AuthError::Config(
                "JWT token TTL must be positive".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_seconds,
        })
    }

    pub fn with_default_ttl(secret: &[u8]) -> Result<Self> {
        Self::new(secret, DEFAULT_TOKEN_TTL)
    }

    /// Issue a token for an authenticated email
    pub fn create_token(&self, email: &str) -> Result<String> {
        let claims = Claims::new(email.to_string(), self.ttl_seconds);
        self.encode_token(&claims)
    }

    fn encode_token(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to encode JWT: {}", e)))
    }

    /// Verify and decode JWT
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        if token_data.claims.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        Ok(token_data.claims)
    }

    /// Extract token from Authorization header
    pub fn extract_bearer_token(auth_header: &str) -> Result<&str> {
        match auth_header.strip_prefix(BEARER_PREFIX) {
            Some(token) if !token.is_empty() && !token.contains(char::is_whitespace) => Ok(token),
            _ => Err(AuthError::MissingToken),
        }
    }
}

impl TokenVerifier for JwtManager {
    fn verify(&self, token: &str) -> Result<String> {
        let claims = self.verify_token(token)?;
        if claims.email.is_empty() {
            return Err(AuthError::InvalidToken("token carries no email".to_string()));
        }
        Ok(claims.email)
    }
}
