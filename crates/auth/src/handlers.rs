use crate::{
    credentials::CredentialStore,
    error::{AuthError, Result},
    jwt::JwtManager,
    password::PasswordHasher,
};
use actix_web::{post, web, HttpResponse, Responder};
use carematch_core::{validate_email, validate_string_length};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for the login endpoint
pub struct AuthState {
    pub jwt_manager: Arc<JwtManager>,
    pub credentials: Arc<dyn CredentialStore>,
    pub password_hasher: Arc<PasswordHasher>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<()> {
        validate_string_length(&self.email, "email", 3, 100)?;
        validate_string_length(&self.password, "password", 6, 50)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[post("/v1/auth")]
pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AuthState>,
) -> Result<impl Responder> {
    req.validate()?;

    let user = state.credentials.find_by_email(&req.email).await?;

    let verified = match &user {
        Some(user) => state
            .password_hasher
            .verify_password(&req.password, &user.password)?,
        None => false,
    };

    if !verified {
        tracing::error!(email = %req.email, "Invalid credentials");
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.jwt_manager.create_token(&req.email)?;
    tracing::info!(email = %req.email, "Token generated");

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed or incomplete bodies are 422, matching field validation
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AuthError::ValidationError(err.to_string()).into()),
    )
    .service(login);
}
