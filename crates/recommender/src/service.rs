//! Public recommendation operations
//!
//! Each call authenticates the bearer token first, then fetches fresh
//! snapshots from the store, and finally scores them on the blocking pool with
//! a scaler or vectorizer built for that call alone.

use crate::assembler::{
    shifts_response, temps_response, ShiftRecommendationResponse, TempRecommendationResponse,
};
use crate::config::EngineConfig;
use crate::error::{RecommendError, Result};
use crate::shift::ShiftRecommender;
use crate::store::RecommendationStore;
use crate::temp::TempRecommender;
use crate::types::RecommendationQuery;
use actix_web::web;
use carematch_auth::{JwtManager, TokenVerifier};
use std::sync::Arc;

#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn RecommendationStore>,
    verifier: Arc<dyn TokenVerifier>,
    config: EngineConfig,
}

impl RecommendationService {
    pub fn new(
        store: Arc<dyn RecommendationStore>,
        verifier: Arc<dyn TokenVerifier>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            verifier,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve an `Authorization` header value to the caller's email
    pub fn authenticate(&self, authorization: &str) -> Result<String> {
        let token = JwtManager::extract_bearer_token(authorization).map_err(|e| {
            tracing::warn!("Missing or invalid token");
            e
        })?;
        let email = self.verifier.verify(token).map_err(|e| {
            tracing::warn!(error = %e, "Invalid token");
            e
        })?;
        tracing::info!(email = %email, "Validated user");
        Ok(email)
    }

    /// Closest temps for every badge. The filters are logged but do not narrow
    /// the temp pool.
    pub async fn recommend_temps(
        &self,
        authorization: &str,
        query: RecommendationQuery,
    ) -> Result<TempRecommendationResponse> {
        let email = self.authenticate(authorization)?;
        tracing::info!(
            email = %email,
            city = %query.city,
            state = %query.state,
            speciality = %query.speciality,
            certificate = %query.certificate,
            "Temp recommendation requested"
        );

        let outcome: Result<_> = async {
            let temps = self.store.fetch_temps().await?;
            let badges = self.store.fetch_badges().await?;

            let recommender = TempRecommender::new(self.config.metric, self.config.top_k);
            web::block(move || recommender.recommend(&temps, &badges))
                .await
                .map_err(|e| RecommendError::Internal(format!("scoring task: {}", e)))?
        }
        .await;

        let temps = report(&email, &query, outcome)?;
        tracing::info!(email = %email, recommendations = ?temps, "Recommended temps");
        Ok(temps_response(temps))
    }

    /// Shifts whose text best matches the caller's filters
    pub async fn recommend_shifts(
        &self,
        authorization: &str,
        query: RecommendationQuery,
    ) -> Result<ShiftRecommendationResponse> {
        let email = self.authenticate(authorization)?;
        tracing::info!(
            email = %email,
            city = %query.city,
            state = %query.state,
            speciality = %query.speciality,
            certificate = %query.certificate,
            "Shift recommendation requested"
        );

        let outcome: Result<_> = async {
            let shifts = self.store.fetch_shifts().await?;

            let recommender = ShiftRecommender::new(self.config.top_k);
            let scoring_query = query.clone();
            web::block(move || recommender.recommend(&shifts, &scoring_query))
                .await
                .map_err(|e| RecommendError::Internal(format!("scoring task: {}", e)))?
        }
        .await;

        let shifts = report(&email, &query, outcome)?;
        tracing::info!(email = %email, recommendations = ?shifts, "Recommended shifts");
        Ok(shifts_response(shifts))
    }
}

/// Log a failed call against the caller and its inputs
fn report<T>(email: &str, query: &RecommendationQuery, outcome: Result<T>) -> Result<T> {
    outcome.map_err(|err| {
        match &err {
            RecommendError::Internal(detail) => tracing::error!(
                email = %email,
                query = ?query,
                error = %detail,
                "Recommendation failed"
            ),
            other => tracing::warn!(
                email = %email,
                query = ?query,
                error = %other,
                "No recommendation returned"
            ),
        }
        err
    })
}
