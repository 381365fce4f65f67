use async_trait::async_trait;
use carematch_auth::JwtManager;
use carematch_recommender::{
    BadgeThreshold, EngineConfig, InMemoryRecommendationStore, RecommendError,
    RecommendationQuery, RecommendationService, RecommendationStore, ShiftRecord, TempRecord,
};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Test Helpers
// ============================================================================

const SECRET: &[u8] = b"recommendation-test-secret";

const BOSTON: &str = "7c1f2a5e-0b1d-4f1e-9a35-3f0e6a2d1c01";
const MA: &str = "1a9e6c44-5d2b-47b3-8e51-2b7d9f0c3e02";
const DENVER: &str = "b3d8f1a0-6e2c-4c9d-a7f4-5e1b0c9d8a03";
const CO: &str = "f0e4b7c2-9a1d-4e6f-b3c8-7d2a5e1f0b04";
const ICU: &str = "5e7a0c3b-2f8d-4b1a-9c6e-0d3f7b2a5c05";
const ER: &str = "9d2c6f1e-4a7b-4e3c-8f0d-6b5a1e9c2d06";
const BLS: &str = "2b8f5d0a-7c3e-4a9b-b6d1-8e4c0f7a3b07";
const ACLS: &str = "6f1a9e3d-0c5b-4d8e-a2f7-9b3e6d0c1f08";

fn temp(id: &str, attendance: i32, on_time: i32) -> TempRecord {
    TempRecord {
        tempid: id.to_string(),
        total_shift: 20,
        shift_attended: 18,
        attendance_score: attendance,
        on_time_checkin: 15,
        on_time_rate: on_time,
    }
}

fn badge(name: &str, attendance: i32, on_time: i32) -> BadgeThreshold {
    BadgeThreshold {
        id: format!("{}-badge", name.to_lowercase().replace(' ', "-")),
        badge_name: name.to_string(),
        attendance_score_threshold: attendance,
        on_time_threshold: on_time,
        show_up_rate: 90,
    }
}

fn shift(id: &str, speciality: &str, certification: &str, city: &str, state: &str) -> ShiftRecord {
    ShiftRecord {
        id: id.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        overall_rating: "4.5".to_string(),
        speciality: speciality.to_string(),
        certification: certification.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        is_long_term: true,
    }
}

fn query(speciality: &str, certificate: &str, city: &str, state: &str) -> RecommendationQuery {
    RecommendationQuery {
        city: city.to_string(),
        state: state.to_string(),
        speciality: speciality.to_string(),
        certificate: certificate.to_string(),
    }
}

fn boston_icu() -> RecommendationQuery {
    query(ICU, BLS, BOSTON, MA)
}

fn jwt_manager() -> Arc<JwtManager> {
    Arc::new(JwtManager::with_default_ttl(SECRET).unwrap())
}

fn bearer(jwt: &JwtManager) -> String {
    format!("Bearer {}", jwt.create_token("admin@gmail.com").unwrap())
}

fn service_with(store: impl RecommendationStore + 'static) -> (RecommendationService, Arc<JwtManager>) {
    let jwt = jwt_manager();
    let service = RecommendationService::new(Arc::new(store), jwt.clone(), EngineConfig::default());
    (service, jwt)
}

/// Wraps a store and counts every fetch
struct CountingStore {
    inner: InMemoryRecommendationStore,
    fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl RecommendationStore for CountingStore {
    async fn fetch_temps(&self) -> carematch_recommender::Result<Vec<TempRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_temps().await
    }

    async fn fetch_badges(&self) -> carematch_recommender::Result<Vec<BadgeThreshold>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_badges().await
    }

    async fn fetch_shifts(&self) -> carematch_recommender::Result<Vec<ShiftRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_shifts().await
    }
}

/// Store whose backing database is unreachable
struct FailingStore;

#[async_trait]
impl RecommendationStore for FailingStore {
    async fn fetch_temps(&self) -> carematch_recommender::Result<Vec<TempRecord>> {
        Err(RecommendError::Internal("connection refused".to_string()))
    }

    async fn fetch_badges(&self) -> carematch_recommender::Result<Vec<BadgeThreshold>> {
        Err(RecommendError::Internal("connection refused".to_string()))
    }

    async fn fetch_shifts(&self) -> carematch_recommender::Result<Vec<ShiftRecord>> {
        Err(RecommendError::Internal("connection refused".to_string()))
    }
}

// ============================================================================
// Temp recommendations
// ============================================================================

#[actix_rt::test]
async fn test_closer_temp_ranks_first_for_badge() {
    let store = InMemoryRecommendationStore::new()
        .with_temps(vec![temp("A", 50, 50), temp("B", 90, 90)])
        .with_badges(vec![badge("Elite Care Partner", 90, 90)]);
    let (service, jwt) = service_with(store);

    let response = service
        .recommend_temps(&bearer(&jwt), boston_icu())
        .await
        .unwrap();
    assert_eq!(response.data.temps["Elite Care Partner"], vec!["B", "A"]);
}

#[actix_rt::test]
async fn test_lists_bounded_by_top_k_and_pool_size() {
    let pool: Vec<_> = (0..12)
        .map(|i| temp(&format!("T{:02}", i), (i * 37) % 100, (i * 53) % 100))
        .collect();
    let store = InMemoryRecommendationStore::new()
        .with_temps(pool)
        .with_badges(vec![
            badge("Care Specialist", 60, 60),
            badge("Reliable Partner", 80, 70),
            badge("Elite Care Partner", 95, 95),
        ]);
    let (service, jwt) = service_with(store);

    let response = service
        .recommend_temps(&bearer(&jwt), boston_icu())
        .await
        .unwrap();
    assert_eq!(response.data.temps.len(), 3);
    for ids in response.data.temps.values() {
        assert_eq!(ids.len(), 5);
    }
}

#[actix_rt::test]
async fn test_small_pool_returns_every_temp() {
    let store = InMemoryRecommendationStore::new()
        .with_temps(vec![temp("A", 10, 20), temp("B", 40, 80), temp("C", 70, 30)])
        .with_badges(vec![badge("Care Specialist", 50, 50)]);
    let (service, jwt) = service_with(store);

    let response = service
        .recommend_temps(&bearer(&jwt), boston_icu())
        .await
        .unwrap();

    let mut ids = response.data.temps["Care Specialist"].clone();
    ids.sort();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

#[actix_rt::test]
async fn test_identical_inputs_give_identical_outputs() {
    let store = InMemoryRecommendationStore::new()
        .with_temps(vec![
            temp("A", 80, 80),
            temp("B", 80, 80),
            temp("C", 20, 90),
            temp("D", 95, 40),
        ])
        .with_badges(vec![badge("Punctual", 50, 100), badge("Reliable", 100, 50)]);
    let (service, jwt) = service_with(store);
    let token = bearer(&jwt);

    let first = service.recommend_temps(&token, boston_icu()).await.unwrap();
    let second = service.recommend_temps(&token, boston_icu()).await.unwrap();
    assert_eq!(first, second);
}

#[actix_rt::test]
async fn test_filters_do_not_narrow_temp_pool() {
    let store = InMemoryRecommendationStore::new()
        .with_temps(vec![temp("A", 50, 50), temp("B", 90, 90)])
        .with_badges(vec![badge("Elite Care Partner", 90, 90)]);
    let (service, jwt) = service_with(store);
    let token = bearer(&jwt);

    let boston = service.recommend_temps(&token, boston_icu()).await.unwrap();
    let denver = service
        .recommend_temps(&token, query(ER, ACLS, DENVER, CO))
        .await
        .unwrap();
    assert_eq!(boston, denver);
}

#[actix_rt::test]
async fn test_no_badges_is_not_found() {
    let store = InMemoryRecommendationStore::new().with_temps(vec![temp("A", 50, 50)]);
    let (service, jwt) = service_with(store);

    let err = service
        .recommend_temps(&bearer(&jwt), boston_icu())
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::NotFound(_)));
}

// ============================================================================
// Shift recommendations
// ============================================================================

#[actix_rt::test]
async fn test_exact_shift_match_ranks_first() {
    let store = InMemoryRecommendationStore::new().with_shifts(vec![
        shift("s1", ER, ACLS, DENVER, CO),
        shift("s2", ICU, BLS, BOSTON, MA),
        shift("s3", ER, BLS, DENVER, MA),
    ]);
    let (service, jwt) = service_with(store);

    let response = service
        .recommend_shifts(&bearer(&jwt), boston_icu())
        .await
        .unwrap();
    assert_eq!(response.data.shift[0], "s2");
    assert_eq!(response.data.shift.len(), 3);
}

#[actix_rt::test]
async fn test_shift_list_capped_at_five() {
    let shifts: Vec<_> = (0..8)
        .map(|i| shift(&format!("s{}", i), ICU, BLS, BOSTON, MA))
        .collect();
    let store = InMemoryRecommendationStore::new().with_shifts(shifts);
    let (service, jwt) = service_with(store);

    let response = service
        .recommend_shifts(&bearer(&jwt), boston_icu())
        .await
        .unwrap();
    // All scores tie, so the tail of the pool comes first
    assert_eq!(response.data.shift, vec!["s7", "s6", "s5", "s4", "s3"]);
}

#[actix_rt::test]
async fn test_empty_shift_pool_is_not_found() {
    let (service, jwt) = service_with(InMemoryRecommendationStore::new());

    let err = service
        .recommend_shifts(&bearer(&jwt), boston_icu())
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::NotFound(_)));
}

// ============================================================================
// Authentication and failures
// ============================================================================

#[actix_rt::test]
async fn test_token_without_bearer_prefix_fails_before_fetch() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let store = CountingStore {
        inner: InMemoryRecommendationStore::new()
            .with_temps(vec![temp("A", 50, 50)])
            .with_badges(vec![badge("Care Specialist", 50, 50)]),
        fetches: fetches.clone(),
    };
    let (service, jwt) = service_with(store);
    let raw_token = jwt.create_token("admin@gmail.com").unwrap();

    let err = service
        .recommend_temps(&raw_token, boston_icu())
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Unauthorized(_)));

    let err = service
        .recommend_shifts(&raw_token, boston_icu())
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Unauthorized(_)));

    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}

#[actix_rt::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let store = CountingStore {
        inner: InMemoryRecommendationStore::new(),
        fetches: fetches.clone(),
    };
    let (service, _) = service_with(store);
    let foreign = JwtManager::with_default_ttl(b"some-other-secret").unwrap();

    let err = service
        .recommend_shifts(&bearer(&foreign), boston_icu())
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Unauthorized(ref d) if d == "Invalid token"));
    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}

#[actix_rt::test]
async fn test_storage_failure_is_opaque_internal_error() {
    let (service, jwt) = service_with(FailingStore);

    let err = service
        .recommend_temps(&bearer(&jwt), boston_icu())
        .await
        .unwrap_err();
    assert!(matches!(err, RecommendError::Internal(_)));
    assert_eq!(err.detail(), "Internal Server Error");
}
