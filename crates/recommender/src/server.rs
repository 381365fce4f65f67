use crate::{handlers, service::RecommendationService};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use carematch_auth::AuthState;
use carematch_core::ServiceConfig;
use tracing::info;

/// HTTP front for login and both recommendation endpoints
pub struct RecommenderServer {
    config: ServiceConfig,
    service: web::Data<RecommendationService>,
    auth: web::Data<AuthState>,
}

impl RecommenderServer {
    pub fn new(config: ServiceConfig, service: RecommendationService, auth: AuthState) -> Self {
        Self {
            config,
            service: web::Data::new(service),
            auth: web::Data::new(auth),
        }
    }

    pub async fn run(self) -> std::io::Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        info!(
            bind_addr = %bind_addr,
            workers = self.config.workers,
            metric = %self.service.config().metric,
            "Starting recommender service"
        );

        let service = self.service.clone();
        let auth = self.auth.clone();

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .supports_credentials()
                .max_age(3600);

            App::new()
                .app_data(service.clone())
                .app_data(auth.clone())
                .wrap(cors)
                .wrap(Logger::default())
                .configure(carematch_auth::handlers::configure)
                .configure(handlers::configure)
        })
        .workers(self.config.workers)
        .client_request_timeout(self.config.request_timeout)
        .bind(&bind_addr)?
        .run()
        .await
    }
}
