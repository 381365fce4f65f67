//! # CareMatch Recommender
//!
//! Matches temps to badge tiers by attendance and punctuality, and open
//! shifts to a worker's speciality, certification and location.
//!
//! ## Modules
//!
//! - `scaler`: Min-max feature scaling fit per call
//! - `distance`: Cosine, Jaccard, Manhattan, Minkowski and Euclidean distances
//! - `temp`: Nearest temps per badge
//! - `tfidf`, `stopwords`: TF-IDF vectorizer with English stop words
//! - `shift`: Shift ranking by text similarity
//! - `assembler`: Response envelopes
//! - `store`: Pool snapshots (PostgreSQL, in-memory)
//! - `service`: Authenticated recommendation operations
//! - `handlers`, `server`: HTTP surface

pub mod assembler;
pub mod config;
pub mod distance;
pub mod error;
pub mod handlers;
pub mod scaler;
pub mod server;
pub mod service;
pub mod shift;
pub mod stopwords;
pub mod store;
pub mod temp;
pub mod tfidf;
pub mod types;

/// Default list length per badge and per shift query
pub const TOP_K: usize = 5;

pub use assembler::{ShiftRecommendationResponse, TempRecommendationResponse};
pub use config::EngineConfig;
pub use distance::DistanceMetric;
pub use error::{RecommendError, Result};
pub use scaler::MinMaxScaler;
pub use server::RecommenderServer;
pub use service::RecommendationService;
pub use shift::ShiftRecommender;
pub use store::{InMemoryRecommendationStore, PostgresRecommendationStore, RecommendationStore};
pub use temp::TempRecommender;
pub use tfidf::TfidfVectorizer;
pub use types::{BadgeThreshold, RecommendationQuery, ShiftRecord, TempRecord};
