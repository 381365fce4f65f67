use actix_web::{http::StatusCode, HttpResponse, ResponseError};

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing or invalid token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Message safe to show to the caller
    pub fn detail(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "Invalid credentials".to_string(),
            AuthError::MissingToken => "Missing or invalid token".to_string(),
            AuthError::InvalidToken(_) | AuthError::TokenExpired => "Invalid token".to_string(),
            AuthError::ValidationError(msg) => msg.clone(),
            AuthError::Database(_) | AuthError::Config(_) | AuthError::Internal(_) => {
                "Internal Server Error".to_string()
            }
        }
    }

    /// True when the failure is about the caller's identity rather than the server
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::TokenExpired
        )
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::Database(_) | AuthError::Config(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = match self.status_code() {
            StatusCode::UNAUTHORIZED => "unauthorized",
            StatusCode::UNPROCESSABLE_ENTITY => "validation_error",
            _ => "internal_error",
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": code,
            "detail": self.detail()
        }))
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Database(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(err.to_string()),
        }
    }
}

impl From<carematch_core::CoreError> for AuthError {
    fn from(err: carematch_core::CoreError) -> Self {
        match err {
            carematch_core::CoreError::ValidationError { message, .. } => {
                AuthError::ValidationError(message)
            }
            carematch_core::CoreError::ConfigurationError { message, .. } => {
                AuthError::Config(message)
            }
            other => AuthError::Internal(other.to_string()),
        }
    }
}
