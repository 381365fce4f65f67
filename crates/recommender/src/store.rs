//! Snapshot access to the candidate pools

use crate::error::Result;
use crate::types::{BadgeThreshold, ShiftRecord, TempRecord};
use async_trait::async_trait;
use sqlx::PgPool;

/// Full in-memory snapshots of the three pools; no paging
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn fetch_temps(&self) -> Result<Vec<TempRecord>>;
    async fn fetch_badges(&self) -> Result<Vec<BadgeThreshold>>;
    async fn fetch_shifts(&self) -> Result<Vec<ShiftRecord>>;
}

pub struct PostgresRecommendationStore {
    pool: PgPool,
}

impl PostgresRecommendationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationStore for PostgresRecommendationStore {
    async fn fetch_temps(&self) -> Result<Vec<TempRecord>> {
        let temps = sqlx::query_as::<_, TempRecord>(
            r#"
            SELECT tempid, total_shift, shift_attended, attendance_score,
                   on_time_checkin, on_time_rate
            FROM csv_data
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = temps.len(), "Fetched temp pool");
        Ok(temps)
    }

    async fn fetch_badges(&self) -> Result<Vec<BadgeThreshold>> {
        let badges = sqlx::query_as::<_, BadgeThreshold>(
            r#"
            SELECT id, badge_name, attendance_score_threshold, on_time_threshold, show_up_rate
            FROM badges
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = badges.len(), "Fetched badges");
        Ok(badges)
    }

    async fn fetch_shifts(&self) -> Result<Vec<ShiftRecord>> {
        let shifts = sqlx::query_as::<_, ShiftRecord>(
            r#"
            SELECT id, city, state, overall_rating, speciality, certification, date, is_long_term
            FROM shifts_table
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = shifts.len(), "Fetched shift pool");
        Ok(shifts)
    }
}

/// Fixed pools held in memory, for tests and local runs
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecommendationStore {
    temps: Vec<TempRecord>,
    badges: Vec<BadgeThreshold>,
    shifts: Vec<ShiftRecord>,
}

impl InMemoryRecommendationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temps(mut self, temps: Vec<TempRecord>) -> Self {
        self.temps = temps;
        self
    }

    pub fn with_badges(mut self, badges: Vec<BadgeThreshold>) -> Self {
        self.badges = badges;
        self
    }

    pub fn with_shifts(mut self, shifts: Vec<ShiftRecord>) -> Self {
        self.shifts = shifts;
        self
    }
}

#[async_trait]
impl RecommendationStore for InMemoryRecommendationStore {
    async fn fetch_temps(&self) -> Result<Vec<TempRecord>> {
        Ok(self.temps.clone())
    }

    async fn fetch_badges(&self) -> Result<Vec<BadgeThreshold>> {
        Ok(self.badges.clone())
    }

    async fn fetch_shifts(&self) -> Result<Vec<ShiftRecord>> {
        Ok(self.shifts.clone())
    }
}
