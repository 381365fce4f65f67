//! Identity for CareMatch: HS256 bearer tokens and credential login.

pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use config::AuthConfig;
pub use credentials::{
    CredentialStore, InMemoryCredentialStore, PostgresCredentialStore, UserCredentials,
};
pub use error::{AuthError, Result};
pub use handlers::{login, AuthState, LoginRequest, LoginResponse};
pub use jwt::{Claims, JwtManager, TokenVerifier};
pub use password::PasswordHasher;
