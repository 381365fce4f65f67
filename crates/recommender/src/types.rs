//! Records read from storage. Each call works on a fresh snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance history of one temp (table `csv_data`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TempRecord {
    pub tempid: String,
    pub total_shift: i32,
    pub shift_attended: i32,
    /// 0-100 expected
    pub attendance_score: i32,
    pub on_time_checkin: i32,
    /// 0-100 expected
    pub on_time_rate: i32,
}

impl TempRecord {
    /// Fixed-order feature vector: (attendance_score, on_time_rate)
    pub fn features(&self) -> [f64; 2] {
        [self.attendance_score as f64, self.on_time_rate as f64]
    }
}

/// Achievement tier whose thresholds act as a synthetic query point (table `badges`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BadgeThreshold {
    pub id: String,
    pub badge_name: String,
    pub attendance_score_threshold: i32,
    pub on_time_threshold: i32,
    /// Stored but not part of matching
    pub show_up_rate: i32,
}

impl BadgeThreshold {
    /// Query point in the same feature order as [`TempRecord::features`]
    pub fn query_point(&self) -> [f64; 2] {
        [
            self.attendance_score_threshold as f64,
            self.on_time_threshold as f64,
        ]
    }
}

/// Open shift (table `shifts_table`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShiftRecord {
    pub id: String,
    pub city: String,
    pub state: String,
    pub overall_rating: String,
    pub speciality: String,
    pub certification: String,
    pub date: NaiveDate,
    pub is_long_term: bool,
}

impl ShiftRecord {
    /// Document used for text matching
    pub fn text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.speciality, self.certification, self.city, self.state
        )
    }
}

/// Filters supplied by the caller of either recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub city: String,
    pub state: String,
    pub speciality: String,
    pub certificate: String,
}

impl RecommendationQuery {
    /// Query document matched against [`ShiftRecord::text`]
    pub fn shift_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.speciality, self.certificate, self.city, self.state
        )
    }
}
