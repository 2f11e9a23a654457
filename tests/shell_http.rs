//! HTTP-level tests for the shell server.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::Router;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use axum_test::TestServer;
use devies_gpt::AppState;
use devies_gpt::config::{AppConfig, FontsConfig, RenderConfig, ServerConfig, TelemetryConfig};
use devies_gpt::error::ShellError;
use devies_gpt::font::DEFAULT_FONT_BASE_URL;
use devies_gpt::server::{build_router, with_middleware};
use tower::ServiceExt;

fn test_config(static_dir: &Path, interactive: bool) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_dir: static_dir.to_string_lossy().into_owned(),
            request_timeout_secs: 5,
        },
        render: RenderConfig {
            interactive,
            client_bundle: Some("/static/main.js".to_string()),
        },
        fonts: FontsConfig {
            base_url: "/static/fonts".to_string(),
        },
        telemetry: TelemetryConfig { json: false },
    }
}

fn test_state(static_dir: &Path) -> AppState {
    AppState::from_config(Arc::new(test_config(static_dir, true))).expect("shell builds")
}

fn test_server(static_dir: &Path) -> TestServer {
    TestServer::new(build_router(test_state(static_dir))).expect("test server")
}

#[tokio::test]
async fn index_renders_the_root_shell() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(dir.path());
    let class = format!("class=\"{} h-full\"", state.shell.font().class_name);
    let server = TestServer::new(build_router(state)).unwrap();

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(&format!("<html lang=\"en\" {class}>")));
    assert!(html.contains(&format!("<body {class}>")));
    assert!(html.contains("<title>Devies GPT</title>"));
    assert!(html.contains("<meta name=\"description\" content=\"Chatbot for Devies\">"));
    assert!(html.contains("style=\"background: rgb(38, 38, 41)\""));
    assert!(html.contains("--chakra-fonts-body:var(--font-fira-sans)"));
    assert!(html.contains("id=\"chat-root\""));
}

#[tokio::test]
async fn index_is_identical_across_requests() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let first = server.get("/").await.text();
    let second = server.get("/").await.text();
    assert_eq!(first, second);
}

#[tokio::test]
async fn health_returns_ok() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn theme_endpoint_exposes_font_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let body: serde_json::Value = server.get("/api/theme").await.json();

    assert_eq!(body["fonts"]["heading"], "var(--font-fira-sans)");
    assert_eq!(body["fonts"]["body"], "var(--font-fira-sans)");
    assert!(
        body["fonts"]["mono"]
            .as_str()
            .unwrap()
            .starts_with("SFMono-Regular")
    );
    assert_eq!(body["font"]["family"], "Fira Sans");
    assert_eq!(body["font"]["variable"], "--font-fira-sans");
    assert_eq!(body["font"]["display"], "swap");
    assert!(body["font"].get("stylesheet").is_none());
}

#[tokio::test]
async fn unknown_path_renders_not_found_inside_shell() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path());

    let response = server.get("/does-not-exist").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let html = response.text();
    assert!(html.contains("<title>Devies GPT</title>"));
    assert!(html.contains(">404</h1>"));
}

#[tokio::test]
async fn static_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.js"), "console.log('hi');").unwrap();
    let server = test_server(dir.path());

    let response = server.get("/static/main.js").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "console.log('hi');");
}

/// Every `url(...)` referenced by a stylesheet.
fn font_urls(stylesheet: &str) -> Vec<String> {
    stylesheet
        .split("url(")
        .skip(1)
        .filter_map(|rest| rest.split(')').next())
        .map(str::to_string)
        .collect()
}

#[test]
fn default_font_urls_point_at_the_font_mirror() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path(), true);
    config.fonts.base_url = DEFAULT_FONT_BASE_URL.to_string();
    let state = AppState::from_config(Arc::new(config)).unwrap();

    let urls = font_urls(&state.shell.font().stylesheet);
    assert_eq!(
        urls,
        [
            format!("{DEFAULT_FONT_BASE_URL}/fira-sans-latin-400-normal.woff2"),
            format!("{DEFAULT_FONT_BASE_URL}/fira-sans-latin-700-normal.woff2"),
        ]
    );
}

#[tokio::test]
async fn self_hosted_font_urls_are_served() {
    let dir = tempfile::tempdir().unwrap();
    let fonts_dir = dir.path().join("fonts");
    std::fs::create_dir(&fonts_dir).unwrap();

    let state = test_state(dir.path());
    let urls = font_urls(&state.shell.font().stylesheet);
    assert_eq!(urls.len(), 2);
    for url in &urls {
        let file = url.strip_prefix("/static/fonts/").expect("served from /static");
        std::fs::write(fonts_dir.join(file), b"wOF2").unwrap();
    }

    let server = TestServer::new(build_router(state)).unwrap();
    for url in &urls {
        server.get(url).await.assert_status_ok();
    }
}

#[tokio::test]
async fn slow_requests_time_out() {
    let routes = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let server = TestServer::new(with_middleware(routes, Duration::from_millis(50))).unwrap();

    let response = server.get("/slow").await;
    response.assert_status(StatusCode::REQUEST_TIMEOUT);
    assert_eq!(response.text(), "Request timed out");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let dir = tempfile::tempdir().unwrap();
    let app = build_router(test_state(dir.path()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://chat.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[test]
fn static_only_runtime_is_rejected_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppState::from_config(Arc::new(test_config(dir.path(), false))).unwrap_err();
    assert!(matches!(err, ShellError::Registration(_)));
}
