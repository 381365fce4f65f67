use crate::error::{AuthError, Result};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Password hasher using Argon2id
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// Memory: 19456 KiB, iterations: 2, parallelism: 1
    pub fn new() -> Self {
        let params = Params::new(19456, 2, 1, None).unwrap_or_default();
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash a password into a PHC string (used when seeding credentials)
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(password_hash.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// A stored hash that is not an Argon2 PHC string (e.g. a legacy bcrypt
    /// row) never matches; the row has to be rehashed with [`Self::hash_password`].
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a PHC string; rehash required");
                return Ok(false);
            }
        };

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(argon2::password_hash::Error::Algorithm) => {
                tracing::warn!(
                    algorithm = %parsed_hash.algorithm,
                    "Stored password hash is not Argon2; rehash required"
                );
                Ok(false)
            }
            Err(e) => Err(AuthError::Internal(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}
