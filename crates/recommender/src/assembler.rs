//! Response envelopes for both recommendation kinds

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempsData {
    /// Badge name -> temp ids, nearest first
    pub temps: BTreeMap<String, Vec<String>>,
}

/// `{"data": {"temps": {...}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempRecommendationResponse {
    pub data: TempsData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftData {
    pub shift: Vec<String>,
}

/// `{"data": {"shift": [...]}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecommendationResponse {
    pub data: ShiftData,
}

pub fn temps_response(temps: BTreeMap<String, Vec<String>>) -> TempRecommendationResponse {
    TempRecommendationResponse {
        data: TempsData { temps },
    }
}

pub fn shifts_response(shift: Vec<String>) -> ShiftRecommendationResponse {
    ShiftRecommendationResponse {
        data: ShiftData { shift },
    }
}
