//! Authentication configuration
//!
//! - `CAREMATCH_JWT_SECRET` (required): HS256 signing secret
//! - `CAREMATCH_JWT_TTL_SECONDS` (optional): token lifetime (default: 3600)

use carematch_core::{parse_env_var, ConfigLoader, CoreError};

#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

impl ConfigLoader for AuthConfig {
    fn from_env() -> Result<Self, CoreError> {
        let jwt_secret = std::env::var("CAREMATCH_JWT_SECRET")
            .map_err(|_| CoreError::config("JWT key not set", "CAREMATCH_JWT_SECRET"))?;
        let token_ttl_seconds = parse_env_var("CAREMATCH_JWT_TTL_SECONDS", 3600i64)?;

        Ok(Self {
            jwt_secret,
            token_ttl_seconds,
        })
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(CoreError::config(
                "JWT secret must not be empty",
                "CAREMATCH_JWT_SECRET",
            ));
        }
        if self.token_ttl_seconds <= 0 {
            return Err(CoreError::config(
                "token TTL must be greater than 0 seconds",
                "CAREMATCH_JWT_TTL_SECONDS",
            ));
        }
        Ok(())
    }
}
