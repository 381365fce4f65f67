//! Temp-to-badge nearest-neighbour matching
//!
//! Algorithm:
//! 1. Fit a min-max scaler over (attendance_score, on_time_rate) of the whole pool
//! 2. For each badge, scale its thresholds with the same scaler
//! 3. Rank pool rows by distance to that point, ascending, ties in pool order
//! 4. Keep the closest `top_k` temp ids under the badge name

use crate::distance::DistanceMetric;
use crate::error::{RecommendError, Result};
use crate::scaler::MinMaxScaler;
use crate::types::{BadgeThreshold, TempRecord};
use std::collections::BTreeMap;

pub const NO_TEMPS_MESSAGE: &str = "No recommendations available for the specified city and state";

/// Temp pool scaled with its own fitted range
#[derive(Debug, Clone)]
pub struct ScaledPool {
    scaler: MinMaxScaler,
    rows: Vec<Vec<f64>>,
}

impl ScaledPool {
    pub fn fit(temps: &[TempRecord]) -> Result<Self> {
        let features: Vec<[f64; 2]> = temps.iter().map(TempRecord::features).collect();
        let scaler = MinMaxScaler::fit(&features)
            .map_err(|e| RecommendError::Internal(format!("scaler fit: {}", e)))?;
        let rows = scaler
            .transform_all(&features)
            .map_err(|e| RecommendError::Internal(format!("scaler transform: {}", e)))?;
        Ok(Self { scaler, rows })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Indices and distances of the `k` rows closest to an unscaled point
    pub fn nearest(
        &self,
        point: &[f64],
        metric: &DistanceMetric,
        k: usize,
    ) -> Result<Vec<(usize, f64)>> {
        let query = self
            .scaler
            .transform(point)
            .map_err(|e| RecommendError::Internal(format!("query transform: {}", e)))?;
        let distances = metric.pairwise(&query, &self.rows)?;

        Ok(smallest_k(&distances, k)
            .into_iter()
            .map(|i| (i, distances[i]))
            .collect())
    }
}

/// Indices of the `k` smallest values; stable, so ties keep their original order
pub fn smallest_k(values: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    order.truncate(k);
    order
}

pub struct TempRecommender {
    metric: DistanceMetric,
    top_k: usize,
}

impl TempRecommender {
    pub fn new(metric: DistanceMetric, top_k: usize) -> Self {
        Self { metric, top_k }
    }

    /// Badge name -> closest temp ids, nearest first
    pub fn recommend(
        &self,
        temps: &[TempRecord],
        badges: &[BadgeThreshold],
    ) -> Result<BTreeMap<String, Vec<String>>> {
        if badges.is_empty() || temps.is_empty() {
            return Err(RecommendError::NotFound(NO_TEMPS_MESSAGE.to_string()));
        }

        let pool = ScaledPool::fit(temps)?;

        let mut recommendations = BTreeMap::new();
        for badge in badges {
            let ranked = pool.nearest(&badge.query_point(), &self.metric, self.top_k)?;
            let tempids = ranked
                .into_iter()
                .map(|(i, _)| temps[i].tempid.clone())
                .collect();
            recommendations.insert(badge.badge_name.clone(), tempids);
        }

        if recommendations.is_empty() {
            return Err(RecommendError::NotFound(NO_TEMPS_MESSAGE.to_string()));
        }
        Ok(recommendations)
    }
}
