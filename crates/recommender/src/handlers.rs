use crate::{
    error::{RecommendError, Result},
    service::RecommendationService,
    types::RecommendationQuery,
};
use actix_web::{get, http::header::AUTHORIZATION, web, HttpRequest, HttpResponse, Responder};
use carematch_core::validate_filter_id;
use serde::Deserialize;

/// Query string shared by both recommendation endpoints
#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub city: String,
    pub state: String,
    pub speciality: String,
    pub certificate: String,
}

impl RecommendationParams {
    fn validate(&self) -> Result<()> {
        validate_filter_id(&self.city, "city")?;
        validate_filter_id(&self.state, "state")?;
        validate_filter_id(&self.speciality, "speciality")?;
        validate_filter_id(&self.certificate, "certificate")?;
        Ok(())
    }

    fn into_query(self) -> RecommendationQuery {
        RecommendationQuery {
            city: self.city,
            state: self.state,
            speciality: self.speciality,
            certificate: self.certificate,
        }
    }
}

/// The header is required; an absent one is a request error, a present but
/// malformed one is an authentication error.
fn authorization_header(req: &HttpRequest) -> Result<&str> {
    let value = req.headers().get(AUTHORIZATION).ok_or_else(|| {
        RecommendError::Validation("Missing required header: Authorization".to_string())
    })?;
    value
        .to_str()
        .map_err(|_| RecommendError::Unauthorized("Missing or invalid token".to_string()))
}

/// GET /v1/recommend-temp - closest temps per badge
#[get("/v1/recommend-temp")]
pub async fn recommend_temp(
    req: HttpRequest,
    params: web::Query<RecommendationParams>,
    service: web::Data<RecommendationService>,
) -> Result<impl Responder> {
    let authorization = authorization_header(&req)?;
    params.validate()?;

    let response = service
        .recommend_temps(authorization, params.into_inner().into_query())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /v1/recommend-shifts - best matching open shifts
#[get("/v1/recommend-shifts")]
pub async fn recommend_shifts(
    req: HttpRequest,
    params: web::Query<RecommendationParams>,
    service: web::Data<RecommendationService>,
) -> Result<impl Responder> {
    let authorization = authorization_header(&req)?;
    params.validate()?;

    let response = service
        .recommend_shifts(authorization, params.into_inner().into_query())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "recommender-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        RecommendError::Validation(err.to_string()).into()
    }))
    .service(health_check)
    .service(recommend_temp)
    .service(recommend_shifts);
}
