use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::font::LoadedFont;
use crate::theme::ThemeFonts;
use crate::ui::pages::{chat_page, not_found_page};

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::from_config(Arc::clone(&config))?;

    info!(
        name: "shell.ready",
        title = state.shell.metadata().title,
        font_class = %state.shell.font().class_name,
        mode = %config.render.mode(),
        "Root shell built"
    );

    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    let routes = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/theme", get(theme_handler))
        .nest_service("/static", static_dir)
        .fallback(not_found_handler)
        .with_state(state);

    with_middleware(routes, timeout)
}

/// Wrap routes with the request timeout, permissive CORS and request tracing.
///
/// A request still running after `timeout` gets `408 Request Timeout`.
pub fn with_middleware(routes: Router, timeout: Duration) -> Router {
    routes
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Root shell around the chat page.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.shell.render(&chat_page()))
}

/// Fallback - Root shell around the not-found page.
async fn not_found_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(state.shell.render(&not_found_page())),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /health - Liveness check.
async fn health_handler() -> &'static str {
    "OK"
}

/// Theme tokens exposed to client code.
#[derive(Debug, Serialize)]
struct ThemeResponse {
    fonts: ThemeFonts,
    font: LoadedFont,
}

/// GET /api/theme - Resolved theme fonts and font variable.
async fn theme_handler(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(ThemeResponse {
        fonts: state.shell.theme().fonts().clone(),
        font: state.shell.font().clone(),
    })
}
