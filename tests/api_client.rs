//! HTTP client tests against an in-process fake of the museum API

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use muzeum::cli::CliState;
use muzeum::config::Config;
use muzeum::client::{ApiClient, ApiError};
use muzeum::models::{DonationStatus, ExhibitCategory, ExhibitSearchCriteria};
use muzeum::services::{AuthServiceError, BookingServiceError, CatalogQuery, SortOrder};
use muzeum::session::{MemoryTokenStore, SessionContext};

/// What the fake backend saw
#[derive(Default)]
struct Seen {
    authorization: Vec<Option<String>>,
    queries: Vec<HashMap<String, String>>,
    reservation: Option<Value>,
    status_update: Option<(i64, String)>,
}

#[derive(Clone)]
struct Backend {
    token: String,
    seen: Arc<Mutex<Seen>>,
}

impl Backend {
    fn record(&self, headers: &HeaderMap, query: Option<HashMap<String, String>>) {
        let mut seen = self.seen.lock().unwrap();
        seen.authorization.push(
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        );
        if let Some(query) = query {
            seen.queries.push(query);
        }
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers.get("authorization").and_then(|v| v.to_str().ok())
            == Some(format!("Bearer {}", self.token).as_str())
    }
}

fn sign_token(email: &str, role: &str) -> String {
    let claims = json!({
        "sub": email,
        "role": role,
        "firstName": "Jan",
        "lastName": "Kowalski",
        "userId": 12,
        "iat": Utc::now().timestamp(),
        "exp": Utc::now().timestamp() + 3600,
    });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

fn exhibits_json() -> Value {
    json!([
        {"id": 1, "name": "Hełm", "description": "Hełm wz. 31", "productionYear": "1939",
         "imageUrl": null, "category": "UNIFORMS"},
        {"id": 2, "name": "Bagnet", "description": null, "productionYear": "1940",
         "imageUrl": "", "category": "WEAPONRY"},
        {"id": 3, "name": "Łyżka", "description": "Niezbędnik", "productionYear": "",
         "imageUrl": "", "category": null}
    ])
}

async fn authenticate(State(backend): State<Backend>, Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "jan@kowalski.pl" && body["password"] == "tajne" {
        (StatusCode::OK, Json(json!({ "token": backend.token }))).into_response()
    } else {
        StatusCode::FORBIDDEN.into_response()
    }
}

async fn list_exhibits(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.record(&headers, Some(query));
    Json(exhibits_json())
}

async fn get_exhibit(Path(id): Path<i64>) -> impl IntoResponse {
    let exhibits = exhibits_json();
    match exhibits.as_array().and_then(|all| all.iter().find(|e| e["id"] == id)) {
        Some(exhibit) => Json(exhibit.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn available_slots(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.record(&headers, Some(query));
    Json(json!([
        {"time": "11:00:00", "isAvailable": false},
        {"time": "10:00:00", "isAvailable": true},
        {"time": "12:00:00", "isAvailable": true}
    ]))
}

async fn create_reservation(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    backend.record(&headers, None);
    if !backend.authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    backend.seen.lock().unwrap().reservation = Some(body);
    "Reservation confirmed!".into_response()
}

async fn update_donation_status(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    let status = query.get("status").cloned().unwrap_or_default();
    backend.seen.lock().unwrap().status_update = Some((id, status));
    StatusCode::OK
}

async fn failing() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
}

/// Start the fake API and return its base URL
async fn spawn_backend(backend: Backend) -> String {
    let app = Router::new()
        .route("/api/v1/auth/authenticate", post(authenticate))
        .route("/api/v1/exhibits", get(list_exhibits))
        .route("/api/v1/exhibits/{id}", get(get_exhibit))
        .route("/api/v1/reservations/available-slots", get(available_slots))
        .route("/api/v1/reservations", post(create_reservation))
        .route("/api/v1/donations/{id}/status", put(update_donation_status))
        .route("/api/v1/exhibitions", get(failing))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/v1/", addr)
}

async fn setup() -> (CliState, Arc<Mutex<Seen>>, String) {
    let token = sign_token("jan@kowalski.pl", "ROLE_USER");
    let seen = Arc::new(Mutex::new(Seen::default()));
    let base_url = spawn_backend(Backend {
        token: token.clone(),
        seen: seen.clone(),
    })
    .await;

    let mut config = Config::default();
    config.api.base_url = base_url;
    let session = Arc::new(SessionContext::init(Arc::new(MemoryTokenStore::new()), "token"));
    let client = ApiClient::new(&config.api, session).unwrap();
    (CliState::with_client(client, &config), seen, token)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

#[tokio::test]
async fn test_login_sends_bearer_afterwards() {
    let (state, seen, token) = setup().await;

    state.catalog.browse(&CatalogQuery::default()).await.unwrap();
    let user = state.auth.login("jan@kowalski.pl", "tajne").await.unwrap();
    state.catalog.browse(&CatalogQuery::default()).await.unwrap();

    assert_eq!(user.email, "jan@kowalski.pl");
    assert_eq!(user.first_name, "Jan");
    assert_eq!(user.id, 12);
    assert!(!user.is_admin());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.authorization[0], None);
    assert_eq!(seen.authorization[1], Some(format!("Bearer {}", token)));
}

#[tokio::test]
async fn test_forbidden_login_is_bad_credentials() {
    let (state, _, _) = setup().await;

    let err = state.auth.login("jan@kowalski.pl", "zle").await.unwrap_err();

    assert!(matches!(err, AuthServiceError::BadCredentials));
    assert!(state.session.current_user().is_none());
}

#[tokio::test]
async fn test_catalog_decodes_nulls_and_sorts_locally() {
    let (state, _, _) = setup().await;
    let query = CatalogQuery {
        sort: SortOrder::Alphabetical,
        ..Default::default()
    };

    let exhibits = state.catalog.browse(&query).await.unwrap();

    let names: Vec<&str> = exhibits.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bagnet", "Hełm", "Łyżka"]);
    assert_eq!(exhibits[0].description, "");
    assert_eq!(exhibits[2].category, ExhibitCategory::Other);
}

#[tokio::test]
async fn test_search_criteria_become_query_params() {
    let (state, seen, _) = setup().await;
    let criteria = ExhibitSearchCriteria {
        name: Some("hełm".to_string()),
        category: Some(ExhibitCategory::Uniforms),
        production_year: Some(1939),
    };

    state.catalog.search(&criteria).await.unwrap();

    let seen = seen.lock().unwrap();
    let query = &seen.queries[0];
    assert_eq!(query["name"], "hełm");
    assert_eq!(query["category"], "UNIFORMS");
    assert_eq!(query["productionYear"], "1939");
}

#[tokio::test]
async fn test_missing_exhibit_is_not_found() {
    let (state, _, _) = setup().await;

    assert_eq!(state.catalog.exhibit(2).await.unwrap().name, "Bagnet");
    assert!(state.catalog.exhibit(99).await.is_err());
}

#[tokio::test]
async fn test_slots_parse_seconds_and_availability() {
    let (state, seen, _) = setup().await;

    let slots = state.booking.available_slots(date(2025, 9, 1)).await.unwrap();

    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].time, time(10));
    assert!(slots[0].available);
    assert!(!slots[1].available);
    assert_eq!(seen.lock().unwrap().queries[0]["date"], "2025-09-01");
}

#[tokio::test]
async fn test_booking_returns_plain_text_confirmation() {
    let (state, seen, _) = setup().await;
    state.auth.login("jan@kowalski.pl", "tajne").await.unwrap();

    let confirmation = state.booking.book(date(2025, 9, 1), time(12), 3).await.unwrap();

    assert_eq!(confirmation, "Reservation confirmed!");
    let body = seen.lock().unwrap().reservation.clone().unwrap();
    assert_eq!(body["date"], "2025-09-01");
    assert_eq!(body["time"], "12:00");
    assert_eq!(body["numberOfGuests"], 3);
}

#[tokio::test]
async fn test_booking_taken_slot_is_refused_locally() {
    let (state, seen, _) = setup().await;
    state.auth.login("jan@kowalski.pl", "tajne").await.unwrap();

    let err = state.booking.book(date(2025, 9, 1), time(11), 1).await.unwrap_err();

    assert!(matches!(err, BookingServiceError::SlotUnavailable(_)));
    assert!(seen.lock().unwrap().reservation.is_none());
}

#[tokio::test]
async fn test_donation_decision_uses_status_query() {
    let (state, seen, _) = setup().await;
    let admin = sign_token("admin@muzeum.pl", "ROLE_ADMIN");
    state.session.login(&admin).unwrap();

    state.donations.accept(5).await.unwrap();

    assert_eq!(
        seen.lock().unwrap().status_update,
        Some((5, DonationStatus::Accepted.as_str().to_string()))
    );
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let (state, _, _) = setup().await;

    let err = state.exhibitions.list().await.unwrap_err();

    match err {
        muzeum::services::ExhibitionServiceError::Api(ApiError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
