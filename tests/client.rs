use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use calorie_dashboard::cache::ServingsCache;
use calorie_dashboard::client::CronometerClient;
use calorie_dashboard::config::Credentials;
use calorie_dashboard::errors::FetchError;
use calorie_dashboard::models::{CacheFile, Nutrient, Serving};
use chrono::{Duration, Local, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
struct StubState {
    logins: Arc<AtomicUsize>,
    fetches: Arc<AtomicUsize>,
    login_status: StatusCode,
    servings_status: StatusCode,
    servings: Vec<Serving>,
}

impl StubState {
    fn serving_ok(servings: Vec<Serving>) -> Self {
        Self {
            logins: Arc::new(AtomicUsize::new(0)),
            fetches: Arc::new(AtomicUsize::new(0)),
            login_status: StatusCode::OK,
            servings_status: StatusCode::OK,
            servings,
        }
    }
}

async fn stub_login(
    State(state): State<StubState>,
    Form(form): Form<HashMap<String, String>>,
) -> StatusCode {
    state.logins.fetch_add(1, Ordering::SeqCst);
    if !form.contains_key("username") || !form.contains_key("password") {
        return StatusCode::BAD_REQUEST;
    }
    state.login_status
}

async fn stub_servings(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Serving>>, StatusCode> {
    state.fetches.fetch_add(1, Ordering::SeqCst);
    if !params.contains_key("date_range") {
        return Err(StatusCode::BAD_REQUEST);
    }
    if state.servings_status != StatusCode::OK {
        return Err(state.servings_status);
    }
    Ok(Json(state.servings.clone()))
}

async fn spawn_stub(state: StubState) -> String {
    let app = Router::new()
        .route("/login", post(stub_login))
        .route("/api/v2/reports/servings", get(stub_servings))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn unique_cache_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "cronometer_cache_{tag}_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path
}

fn credentials() -> Credentials {
    Credentials {
        username: "diary@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

fn serving(date: NaiveDate, energy: f64) -> Serving {
    let mut nutrients = BTreeMap::new();
    nutrients.insert(
        "Energy".to_string(),
        Nutrient {
            amount: Some(energy),
            unit: Some("kcal".to_string()),
        },
    );
    Serving { date, nutrients }
}

fn sample_servings(energy: f64) -> Vec<Serving> {
    let today = Local::now().date_naive();
    vec![
        serving(today - Duration::days(1), energy),
        serving(today, energy + 250.0),
    ]
}

#[tokio::test]
async fn fetch_logs_in_once_and_writes_the_cache() {
    let servings = sample_servings(1500.0);
    let state = StubState::serving_ok(servings.clone());
    let base_url = spawn_stub(state.clone()).await;

    let cache_path = unique_cache_path("fetch");
    let client = CronometerClient::new(
        base_url,
        credentials(),
        ServingsCache::new(cache_path.clone()),
    )
    .unwrap();

    let today = Local::now().date_naive();
    let fetched = client
        .get_servings(today - Duration::days(6), today)
        .await
        .unwrap();

    assert_eq!(fetched, servings);
    assert_eq!(state.logins.load(Ordering::SeqCst), 1);
    assert_eq!(state.fetches.load(Ordering::SeqCst), 1);

    let cached: CacheFile =
        serde_json::from_slice(&std::fs::read(&cache_path).unwrap()).unwrap();
    assert_eq!(cached.date, today);
    assert_eq!(cached.servings, servings);
    let _ = std::fs::remove_file(&cache_path);
}

#[tokio::test]
async fn same_day_cache_hit_makes_no_network_calls() {
    let cached_servings = sample_servings(1200.0);
    // The stub would answer with different data; a hit must never reach it.
    let state = StubState::serving_ok(sample_servings(9999.0));
    let base_url = spawn_stub(state.clone()).await;

    let cache_path = unique_cache_path("hit");
    let cache = ServingsCache::new(cache_path.clone());
    let today = Local::now().date_naive();
    cache.store(today, &cached_servings).await.unwrap();

    let client = CronometerClient::new(base_url, credentials(), cache).unwrap();
    let fetched = client
        .get_servings(today - Duration::days(30), today)
        .await
        .unwrap();

    assert_eq!(fetched, cached_servings);
    assert_eq!(state.logins.load(Ordering::SeqCst), 0);
    assert_eq!(state.fetches.load(Ordering::SeqCst), 0);
    let _ = std::fs::remove_file(&cache_path);
}

#[tokio::test]
async fn stale_cache_refetches_and_is_overwritten() {
    let fresh_servings = sample_servings(1800.0);
    let state = StubState::serving_ok(fresh_servings.clone());
    let base_url = spawn_stub(state.clone()).await;

    let cache_path = unique_cache_path("stale");
    let cache = ServingsCache::new(cache_path.clone());
    let today = Local::now().date_naive();
    cache
        .store(today - Duration::days(1), &sample_servings(700.0))
        .await
        .unwrap();

    let client = CronometerClient::new(base_url, credentials(), cache).unwrap();
    let fetched = client
        .get_servings(today - Duration::days(6), today)
        .await
        .unwrap();

    assert_eq!(fetched, fresh_servings);
    assert_eq!(state.logins.load(Ordering::SeqCst), 1);

    let cached: CacheFile =
        serde_json::from_slice(&std::fs::read(&cache_path).unwrap()).unwrap();
    assert_eq!(cached.date, today);
    assert_eq!(cached.servings, fresh_servings);
    let _ = std::fs::remove_file(&cache_path);
}

#[tokio::test]
async fn rejected_login_surfaces_the_upstream_status() {
    let mut state = StubState::serving_ok(sample_servings(1500.0));
    state.login_status = StatusCode::UNAUTHORIZED;
    let base_url = spawn_stub(state.clone()).await;

    let cache_path = unique_cache_path("badlogin");
    let client = CronometerClient::new(
        base_url,
        credentials(),
        ServingsCache::new(cache_path.clone()),
    )
    .unwrap();

    let today = Local::now().date_naive();
    let result = client.get_servings(today - Duration::days(6), today).await;

    assert!(matches!(
        result,
        Err(FetchError::Upstream(status)) if status == StatusCode::UNAUTHORIZED
    ));
    assert_eq!(state.fetches.load(Ordering::SeqCst), 0);
    assert!(!cache_path.exists());
}

#[tokio::test]
async fn failed_report_fetch_leaves_no_cache_behind() {
    let mut state = StubState::serving_ok(sample_servings(1500.0));
    state.servings_status = StatusCode::INTERNAL_SERVER_ERROR;
    let base_url = spawn_stub(state.clone()).await;

    let cache_path = unique_cache_path("badfetch");
    let client = CronometerClient::new(
        base_url,
        credentials(),
        ServingsCache::new(cache_path.clone()),
    )
    .unwrap();

    let today = Local::now().date_naive();
    let result = client.get_servings(today - Duration::days(6), today).await;

    assert!(matches!(
        result,
        Err(FetchError::Upstream(status)) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
    assert_eq!(state.logins.load(Ordering::SeqCst), 1);
    assert!(!cache_path.exists());
}
