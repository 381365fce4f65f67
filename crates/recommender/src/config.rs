//! Engine configuration
//!
//! - `CAREMATCH_DISTANCE_METRIC` (optional): cosine, jaccard, manhattan,
//!   minkowski or euclidean (default: minkowski)
//! - `CAREMATCH_MINKOWSKI_P` (optional): Minkowski order, >= 1 (default: 2.0)
//! - `CAREMATCH_TOP_K` (optional): list length per badge / shift query (default: 5)

use crate::distance::{DistanceMetric, DEFAULT_MINKOWSKI_P};
use crate::TOP_K;
use carematch_core::{parse_env_var, ConfigLoader, CoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub metric: DistanceMetric,
    pub top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::default(),
            top_k: TOP_K,
        }
    }
}

impl ConfigLoader for EngineConfig {
    fn from_env() -> Result<Self, CoreError> {
        let name = std::env::var("CAREMATCH_DISTANCE_METRIC")
            .unwrap_or_else(|_| "minkowski".to_string());
        let p = parse_env_var("CAREMATCH_MINKOWSKI_P", DEFAULT_MINKOWSKI_P)?;

        let metric = name
            .parse::<DistanceMetric>()
            .and_then(|metric| metric.with_minkowski_p(p))
            .map_err(|e| CoreError::config(e.detail(), "CAREMATCH_DISTANCE_METRIC"))?;

        Ok(Self {
            metric,
            top_k: parse_env_var("CAREMATCH_TOP_K", TOP_K)?,
        })
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.top_k == 0 {
            return Err(CoreError::config(
                "top_k must be greater than 0",
                "CAREMATCH_TOP_K",
            ));
        }
        Ok(())
    }
}
