//! Integration tests for the songpack-fs router
//!
//! Drives the full router (CORS, timeout, gatekeeper, static files) through
//! `tower::ServiceExt::oneshot`, no sockets involved.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use songpack_fs::{apply_layers, build_router, AppState, Credential, ServerConfig};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// `Basic base64("admin:password")`
const VALID_AUTH: &str = "Basic YWRtaW46cGFzc3dvcmQ=";

const CHART: &str = "#TITLE:Song1;\n#BPMS:0.000=120.000;\n";

/// Test helper: temp song tree plus a router serving it with default config
fn setup() -> (TempDir, Router) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("Pack1/Song1")).unwrap();
    fs::write(root.join("Pack1/Song1/steps.sm"), CHART).unwrap();
    fs::write(root.join("packs.json"), r#"[{"name":"Pack1"}]"#).unwrap();

    let config = ServerConfig {
        root: root.to_path_buf(),
        ..ServerConfig::default()
    };
    let app = build_router(&config).unwrap();
    (temp_dir, app)
}

async fn send(app: Router, method: Method, uri: &str, auth: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn header_str<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

fn assert_cors(response: &Response) {
    assert_eq!(
        header_str(response, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("http://localhost:8080")
    );
    assert_eq!(
        header_str(response, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some("true")
    );
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_missing_auth_header_is_401_with_challenge() {
    let (_temp, app) = setup();

    let response = send(app, Method::GET, "/packs.json", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        header_str(&response, header::WWW_AUTHENTICATE),
        Some("Basic realm=\"Test\"")
    );
    assert_cors(&response);
    assert_eq!(body_string(response).await, "No Auth Header received");
}

#[tokio::test]
async fn test_valid_auth_serves_file_with_cors() {
    let (_temp, app) = setup();

    let response = send(app, Method::GET, "/Pack1/Song1/steps.sm", Some(VALID_AUTH)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert_eq!(body_string(response).await, CHART);
}

#[tokio::test]
async fn test_json_index_served_with_content_type() {
    let (_temp, app) = setup();

    let response = send(app, Method::GET, "/packs.json", Some(VALID_AUTH)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, header::CONTENT_TYPE),
        Some("application/json")
    );
    assert_eq!(body_string(response).await, r#"[{"name":"Pack1"}]"#);
}

#[tokio::test]
async fn test_wrong_auth_is_401_without_echo() {
    let (_temp, app) = setup();
    let wrong = "Basic d3Jvbmc6d3Jvbmc=";

    let response = send(app, Method::GET, "/packs.json", Some(wrong)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        header_str(&response, header::WWW_AUTHENTICATE),
        Some("Basic realm=\"Test\"")
    );
    assert_cors(&response);

    let body = body_string(response).await;
    assert_eq!(body, "Bad Auth");
    assert!(!body.contains("d3Jvbmc6d3Jvbmc="));
}

#[tokio::test]
async fn test_auth_scheme_is_case_sensitive_exact_match() {
    let (_temp, app) = setup();

    let response = send(app, Method::GET, "/packs.json", Some("basic YWRtaW46cGFzc3dvcmQ=")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_file_is_404_with_cors() {
    let (_temp, app) = setup();

    let response = send(app, Method::GET, "/Pack1/nope.ogg", Some(VALID_AUTH)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_cors(&response);
}

#[tokio::test]
async fn test_range_request_is_partial_with_cors() {
    let (temp, app) = setup();
    fs::write(temp.path().join("digits.txt"), "0123456789").unwrap();

    let request = Request::builder()
        .uri("/digits.txt")
        .header(header::AUTHORIZATION, VALID_AUTH)
        .header(header::RANGE, "bytes=2-4")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_cors(&response);
    assert_eq!(body_string(response).await, "234");
}

#[tokio::test]
async fn test_slow_request_times_out_with_cors() {
    let temp_dir = TempDir::new().unwrap();
    let config = ServerConfig {
        root: temp_dir.path().to_path_buf(),
        request_timeout: Duration::from_millis(20),
        ..ServerConfig::default()
    };
    let slow = Router::new().fallback(|| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    });
    let state = AppState::from_config(&config).unwrap();
    let app = apply_layers(slow, state, &config).unwrap();

    let response = send(app, Method::GET, "/slow", Some(VALID_AUTH)).await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_cors(&response);
}

// =============================================================================
// OPTIONS / HEAD
// =============================================================================

#[tokio::test]
async fn test_options_preflight_without_auth() {
    let (_temp, app) = setup();

    let response = send(app, Method::OPTIONS, "/packs.json", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS),
        Some("GET, OPTIONS")
    );
    assert_eq!(
        header_str(&response, header::ACCESS_CONTROL_ALLOW_HEADERS),
        Some("Authorization")
    );
    assert_eq!(header_str(&response, header::CONNECTION), Some("close"));
    assert_cors(&response);
    assert!(body_string(response).await.is_empty());
}

#[tokio::test]
async fn test_options_ignores_bad_credentials() {
    let (_temp, app) = setup();

    let response = send(app, Method::OPTIONS, "/anything", Some("Basic bm9wZTpub3Bl")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_head_returns_headers_only() {
    let (_temp, app) = setup();

    let response = send(app, Method::HEAD, "/packs.json", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    assert!(body_string(response).await.is_empty());
}

// =============================================================================
// Directory handling
// =============================================================================

#[tokio::test]
async fn test_directory_listing() {
    let (_temp, app) = setup();

    let response = send(app, Method::GET, "/Pack1/", Some(VALID_AUTH)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);
    let content_type = header_str(&response, header::CONTENT_TYPE).unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = body_string(response).await;
    assert!(body.contains("Directory listing for /Pack1/"));
    assert!(body.contains("<a href=\"Song1/\">Song1/</a>"));
}

#[tokio::test]
async fn test_root_listing_requires_auth() {
    let (_temp, app) = setup();

    let response = send(app, Method::GET, "/", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_root_listing_shows_entries() {
    let (_temp, app) = setup();

    let response = send(app, Method::GET, "/", Some(VALID_AUTH)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Pack1/"));
    assert!(body.contains("packs.json"));
}

#[tokio::test]
async fn test_index_html_preferred_over_listing() {
    let (temp, app) = setup();
    fs::write(temp.path().join("Pack1/index.html"), "<p>pack page</p>").unwrap();

    let response = send(app, Method::GET, "/Pack1/", Some(VALID_AUTH)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<p>pack page</p>");
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_configured_origin_realm_and_credential() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("packs.json"), "[]").unwrap();

    let config = ServerConfig {
        root: temp_dir.path().to_path_buf(),
        credential: Credential::new("alice:secret").unwrap(),
        uses_default_credential: false,
        allowed_origin: "https://game.example.com".to_string(),
        realm: "Songs".to_string(),
        ..ServerConfig::default()
    };
    let app = build_router(&config).unwrap();

    let denied = send(app.clone(), Method::GET, "/packs.json", Some(VALID_AUTH)).await;
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        header_str(&denied, header::WWW_AUTHENTICATE),
        Some("Basic realm=\"Songs\"")
    );
    assert_eq!(
        header_str(&denied, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("https://game.example.com")
    );

    let allowed = send(app, Method::GET, "/packs.json", Some("Basic YWxpY2U6c2VjcmV0")).await;
    assert_eq!(allowed.status(), StatusCode::OK);
    assert_eq!(body_string(allowed).await, "[]");
}

#[test]
fn test_missing_root_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = ServerConfig {
        root: temp_dir.path().join("missing"),
        ..ServerConfig::default()
    };

    assert!(build_router(&config).is_err());
}

#[test]
fn test_origin_with_newline_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = ServerConfig {
        root: temp_dir.path().to_path_buf(),
        allowed_origin: "http://a\nb".to_string(),
        ..ServerConfig::default()
    };

    assert!(build_router(&config).is_err());
}
