use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use monitor_notify::config::Config;
use monitor_notify::handler::{self, AppState};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("monitor_notify=info".parse()?),
        )
        .init();

    info!("Starting monitor-notify webhook server");

    // Load configuration from environment and build the API clients once
    let config = Config::from_env()?;
    let port = config.port;
    let state = Arc::new(AppState::new(config));

    let app = Router::new()
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn webhook(State(state): State<Arc<AppState>>, event: String) -> impl IntoResponse {
    let response = handler::handle_event(&state, &event).await;
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [("content-type", "application/json")],
        response.body,
    )
}
