//! Report and login clients against an in-process stub of the backend API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use advision_client::{AuthClient, ReportClient};
use advision_core::error::{AuthError, FetchError};
use advision_core::source::ReportSource;
use advision_reporting::classifier::IconId;
use advision_reporting::render::render_state;
use advision_reporting::view::TileKind;
use advision_reporting::{LoadOutcome, PageShell, ShellState};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Clone)]
struct Backend {
    hits: Arc<AtomicUsize>,
    status: StatusCode,
    body: String,
}

impl Backend {
    fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            status,
            body: body.into(),
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn weekly_report(State(backend): State<Backend>, headers: HeaderMap) -> impl IntoResponse {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer test-access");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, String::from("{}"));
    }
    (backend.status, backend.body.clone())
}

async fn google_login(Json(body): Json<Value>) -> impl IntoResponse {
    match body["code"].as_str() {
        Some("good-code") => (
            StatusCode::OK,
            Json(json!({
                "access": "jwt-access",
                "refresh": "jwt-refresh",
                "user": {"id": "42", "email": "ana@example.com", "role": "viewer"}
            })),
        ),
        Some("no-email") => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Email not provided by Google"})),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Invalid authorization code"]})),
        ),
    }
}

async fn spawn_backend(backend: Backend) -> String {
    let router = Router::new()
        .route("/api/reports/weekly/", get(weekly_report))
        .route("/api/auth/google/", post(google_login))
        .with_state(backend);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn report_client(base_url: &str) -> ReportClient {
    ReportClient::new(base_url, Duration::from_secs(5))
        .unwrap()
        .with_bearer("test-access")
}

fn sample_payload() -> Value {
    json!({
        "period": "Oct 6 - Oct 12, 2026",
        "summary": {
            "campaigns_created": 5,
            "ads_generated": 12,
            "images_generated": 7,
            "active_campaigns": 2,
            "total_engagement": 125000,
            "engagement_growth": "+8%"
        },
        "insights": {
            "top_performing_platform": "Instagram",
            "top_campaign_name": "N/A",
            "top_campaign_score": 0,
            "avg_ctr": 2.4,
            "total_impressions": null,
            "impression_growth": "",
            "total_conversions": 310,
            "conversion_growth": "+3% vs last week",
            "roas": 0
        },
        "recommendations": [
            {"priority": "high", "category": "Performance", "title": "Raise CTR",
             "description": "CTR is below 3%.", "metric": "CTR", "current": "2.4%",
             "target": "3.5%", "action": "Refresh ad copy"}
        ],
        "next_steps": ["Refresh ad copy", "Test a new audience"],
        "comparison_available": false
    })
}

#[tokio::test]
async fn test_fetch_returns_report_untransformed() {
    let backend = Backend::new(StatusCode::OK, sample_payload().to_string());
    let base = spawn_backend(backend.clone()).await;

    let report = report_client(&base).fetch_weekly_report().await.unwrap();
    assert_eq!(report.period, "Oct 6 - Oct 12, 2026");
    assert_eq!(report.insights.top_campaign_name.as_deref(), Some("N/A"));
    assert_eq!(report.insights.total_impressions, None);
    assert_eq!(report.recommendations[0].category.as_deref(), Some("Performance"));
    assert_eq!(report.comparison_available, Some(false));
    assert_eq!(backend.hits(), 1);
}

#[tokio::test]
async fn test_end_to_end_render() {
    let backend = Backend::new(StatusCode::OK, sample_payload().to_string());
    let base = spawn_backend(backend.clone()).await;
    let client = report_client(&base);

    let (mut shell, _mounted) = PageShell::mount();
    assert_eq!(shell.load(&client).await, LoadOutcome::Loaded);

    let view = shell.view().unwrap();
    assert_eq!(view.tile(TileKind::Engagement).unwrap().value, "125,000");
    assert_eq!(
        view.tile(TileKind::Growth).unwrap().trend.unwrap().icon,
        IconId::TrendUp
    );
    assert!(view.footer.is_some());

    let text = render_state(shell.state()).join("\n");
    assert!(text.contains("Needs work"));
    assert!(text.contains("  2. Test a new audience"));
    assert!(!text.contains("Top Campaign"));
    assert!(!text.contains("ROAS"));
}

#[tokio::test]
async fn test_server_error_fails_once() {
    let backend = Backend::new(StatusCode::INTERNAL_SERVER_ERROR, "{}");
    let base = spawn_backend(backend.clone()).await;
    let client = report_client(&base);

    let (mut shell, _mounted) = PageShell::mount();
    assert_eq!(shell.load(&client).await, LoadOutcome::Failed);
    assert_eq!(shell.state(), &ShellState::Failed(FetchError::Status(500)));
    assert_eq!(shell.load(&client).await, LoadOutcome::AlreadySettled);
    assert_eq!(backend.hits(), 1);

    let lines = render_state(shell.state());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "Weekly report could not be loaded");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let backend = Backend::new(StatusCode::OK, sample_payload().to_string());
    let base = spawn_backend(backend).await;
    let client = ReportClient::new(&base, Duration::from_secs(5)).unwrap();

    let err = client.fetch_weekly_report().await.unwrap_err();
    assert_eq!(err, FetchError::Status(401));
}

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let backend = Backend::new(StatusCode::OK, r#"{"period": "x"}"#);
    let base = spawn_backend(backend).await;

    let err = report_client(&base).fetch_weekly_report().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = report_client(&format!("http://{addr}/api"))
        .fetch_weekly_report()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn test_login_exchange() {
    let base = spawn_backend(Backend::new(StatusCode::OK, "{}")).await;
    let auth = AuthClient::new(&base, Duration::from_secs(5)).unwrap();

    let tokens = auth.exchange_code("good-code").await.unwrap();
    assert_eq!(tokens.access, "jwt-access");
    assert_eq!(tokens.refresh, "jwt-refresh");
    assert_eq!(tokens.user.unwrap().email, "ana@example.com");

    assert_eq!(
        auth.exchange_code("no-email").await,
        Err(AuthError::Rejected("Email not provided by Google".into()))
    );
    assert_eq!(
        auth.exchange_code("stale").await,
        Err(AuthError::Rejected("Invalid authorization code".into()))
    );
}
