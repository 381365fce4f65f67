//! Text similarity ranking of open shifts against a caller's filters

use crate::error::{RecommendError, Result};
use crate::tfidf::TfidfVectorizer;
use crate::types::{RecommendationQuery, ShiftRecord};

pub const NO_SHIFTS_MESSAGE: &str =
    "No recommendations available for the specified city, state, speciality or certification";

pub struct ShiftRecommender {
    top_k: usize,
}

impl ShiftRecommender {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Shift ids, most similar first
    pub fn recommend(
        &self,
        shifts: &[ShiftRecord],
        query: &RecommendationQuery,
    ) -> Result<Vec<String>> {
        if shifts.is_empty() {
            return Err(RecommendError::NotFound(NO_SHIFTS_MESSAGE.to_string()));
        }

        let scores = self.scores(shifts, query)?;
        let ids: Vec<String> = largest_k(&scores, self.top_k)
            .into_iter()
            .map(|i| shifts[i].id.clone())
            .collect();

        if ids.is_empty() {
            return Err(RecommendError::NotFound(NO_SHIFTS_MESSAGE.to_string()));
        }
        Ok(ids)
    }

    /// Cosine similarity of the query to every shift, in pool order
    pub fn scores(&self, shifts: &[ShiftRecord], query: &RecommendationQuery) -> Result<Vec<f64>> {
        let documents: Vec<String> = shifts.iter().map(ShiftRecord::text).collect();
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&documents)
            .map_err(|e| RecommendError::Internal(format!("vectorizer fit: {}", e)))?;

        let query_vector = vectorizer.transform(&query.shift_text());
        Ok(matrix.iter().map(|doc| query_vector.dot(doc)).collect())
    }
}

/// Indices of the `k` largest values, descending. Built from a stable
/// ascending sort read backwards, so equal scores come out in reverse pool order.
pub fn largest_k(values: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    order.into_iter().rev().take(k).collect()
}
