use anyhow::Context;
use carematch_auth::{AuthConfig, AuthState, JwtManager, PasswordHasher, PostgresCredentialStore};
use carematch_core::{
    init_logging, load_dotenv, ConfigLoader, DatabaseConfig, DatabasePool, LogConfig,
    ServiceConfig,
};
use carematch_recommender::{
    EngineConfig, PostgresRecommendationStore, RecommendationService, RecommenderServer,
};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let service_config = ServiceConfig::from_env()?;
    service_config.validate()?;

    init_logging(&LogConfig::from_env(
        "recommender-service",
        &service_config.log_level,
    ))?;

    let db_config = DatabaseConfig::from_env()?;
    db_config.validate()?;
    let auth_config = AuthConfig::from_env()?;
    auth_config.validate()?;
    let engine_config = EngineConfig::from_env()?;
    engine_config.validate()?;

    let db = DatabasePool::new(&db_config)
        .await
        .context("Failed to create database connection pool")?;

    let jwt_manager = Arc::new(JwtManager::new(
        auth_config.jwt_secret.as_bytes(),
        auth_config.token_ttl_seconds,
    )?);

    let auth_state = AuthState {
        jwt_manager: jwt_manager.clone(),
        credentials: Arc::new(PostgresCredentialStore::new(db.pool().clone())),
        password_hasher: Arc::new(PasswordHasher::new()),
    };

    let service = RecommendationService::new(
        Arc::new(PostgresRecommendationStore::new(db.pool().clone())),
        jwt_manager,
        engine_config,
    );

    RecommenderServer::new(service_config, service, auth_state)
        .run()
        .await
        .context("HTTP server failed")?;

    Ok(())
}
