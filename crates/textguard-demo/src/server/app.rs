use crate::server::{routes, static_files};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

/// Build the Axum application
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/model", get(routes::model_status))
        .route("/examples", get(routes::examples))
        .route("/classify", post(routes::classify))
        .route("/history", get(routes::history));

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_files::serve_static)
        .layer(cors)
        .with_state(state)
}

/// Run the server
pub async fn run_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_app(state);

    tracing::info!("starting TextGuard demo server on {}", addr);
    tracing::info!("open http://{} in your browser", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
