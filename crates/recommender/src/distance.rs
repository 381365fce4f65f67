//! Distance metrics between a query vector and a candidate matrix
//!
//! All metrics return a distance: lower means more similar.

use crate::error::RecommendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MINKOWSKI_P: f64 = 2.0;

const ALLOWED_METRICS: &str = "'cosine', 'jaccard', 'manhattan', 'minkowski', 'euclidean'";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `1 - cosine similarity`
    Cosine,
    /// Boolean Jaccard over non-zero entries
    Jaccard,
    Manhattan,
    Minkowski { p: f64 },
    Euclidean,
}

impl Default for DistanceMetric {
    fn default() -> Self {
        DistanceMetric::Minkowski {
            p: DEFAULT_MINKOWSKI_P,
        }
    }
}

impl DistanceMetric {
    /// Replace the Minkowski order; other metrics are returned unchanged.
    pub fn with_minkowski_p(self, p: f64) -> Result<Self, RecommendError> {
        match self {
            DistanceMetric::Minkowski { .. } => {
                if !p.is_finite() || p < 1.0 {
                    return Err(RecommendError::InvalidArgument(format!(
                        "Invalid minkowski order {}. Must be a finite number >= 1.",
                        p
                    )));
                }
                Ok(DistanceMetric::Minkowski { p })
            }
            other => Ok(other),
        }
    }

    /// Distance between two vectors of equal length
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
            DistanceMetric::Jaccard => jaccard_distance(a, b),
            DistanceMetric::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            DistanceMetric::Minkowski { p } => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs().powf(*p))
                .sum::<f64>()
                .powf(1.0 / p),
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f64>()
                .sqrt(),
        }
    }

    /// Distance from `query` to every candidate row, in candidate order
    pub fn pairwise<R: AsRef<[f64]>>(
        &self,
        query: &[f64],
        candidates: &[R],
    ) -> Result<Vec<f64>, RecommendError> {
        candidates
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let row = row.as_ref();
                if row.len() != query.len() {
                    return Err(RecommendError::Internal(format!(
                        "candidate {} has {} features, query has {}",
                        i,
                        row.len(),
                        query.len()
                    )));
                }
                Ok(self.distance(query, row))
            })
            .collect()
    }
}

impl FromStr for DistanceMetric {
    type Err = RecommendError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(DistanceMetric::Cosine),
            "jaccard" => Ok(DistanceMetric::Jaccard),
            "manhattan" => Ok(DistanceMetric::Manhattan),
            "minkowski" => Ok(DistanceMetric::default()),
            "euclidean" => Ok(DistanceMetric::Euclidean),
            _ => Err(RecommendError::InvalidArgument(format!(
                "Invalid metric '{}'. Choose from {}.",
                name, ALLOWED_METRICS
            ))),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Cosine => write!(f, "cosine"),
            DistanceMetric::Jaccard => write!(f, "jaccard"),
            DistanceMetric::Manhattan => write!(f, "manhattan"),
            DistanceMetric::Minkowski { p } => write!(f, "minkowski(p={})", p),
            DistanceMetric::Euclidean => write!(f, "euclidean"),
        }
    }
}

/// Cosine similarity; a zero vector is similar to nothing.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn jaccard_distance(a: &[f64], b: &[f64]) -> f64 {
    let mut differing = 0usize;
    let mut present = 0usize;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x != 0.0, *y != 0.0);
        if x || y {
            present += 1;
            if x != y {
                differing += 1;
            }
        }
    }

    if present == 0 {
        0.0
    } else {
        differing as f64 / present as f64
    }
}
