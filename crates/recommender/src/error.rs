use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use carematch_auth::AuthError;

pub type Result<T> = std::result::Result<T, RecommendError>;

/// Failure of a recommendation call. Only the classified variants carry a
/// caller-facing message; everything else collapses into `Internal`.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecommendError {
    pub fn detail(&self) -> &str {
        match self {
            RecommendError::Unauthorized(msg)
            | RecommendError::NotFound(msg)
            | RecommendError::InvalidArgument(msg)
            | RecommendError::Validation(msg) => msg,
            RecommendError::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<AuthError> for RecommendError {
    fn from(err: AuthError) -> Self {
        if err.is_unauthorized() {
            RecommendError::Unauthorized(err.detail())
        } else {
            RecommendError::Internal(err.to_string())
        }
    }
}

impl From<carematch_core::CoreError> for RecommendError {
    fn from(err: carematch_core::CoreError) -> Self {
        match err {
            carematch_core::CoreError::ValidationError { message, .. } => {
                RecommendError::Validation(message)
            }
            other => RecommendError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for RecommendError {
    fn from(err: sqlx::Error) -> Self {
        RecommendError::Internal(format!("storage: {}", err))
    }
}

impl ResponseError for RecommendError {
    fn status_code(&self) -> StatusCode {
        match self {
            RecommendError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RecommendError::NotFound(_) => StatusCode::NOT_FOUND,
            RecommendError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            RecommendError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RecommendError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = match self {
            RecommendError::Unauthorized(_) => "unauthorized",
            RecommendError::NotFound(_) => "not_found",
            RecommendError::InvalidArgument(_) => "invalid_argument",
            RecommendError::Validation(_) => "validation_error",
            RecommendError::Internal(_) => "internal_error",
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": code,
            "detail": self.detail()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_detail_never_leaks() {
        let err = RecommendError::Internal("scaler: rows have 3 columns".to_string());
        assert_eq!(err.detail(), "Internal Server Error");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_errors_keep_unauthorized_signal() {
        let err: RecommendError = AuthError::InvalidToken("bad signature".to_string()).into();
        assert!(matches!(err, RecommendError::Unauthorized(ref d) if d == "Invalid token"));

        let err: RecommendError = AuthError::Database("down".to_string()).into();
        assert!(matches!(err, RecommendError::Internal(_)));
    }
}
