use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use transdoc_backend::config::Config;
use transdoc_backend::routes;
use transdoc_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "transdoc_backend=debug,tower_http=debug".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.upload_dir)?;
    info!(upload_dir = %config.upload_dir.display(), "initialized upload directory");

    let max_content_length = config.max_content_length;
    let port = config.port;
    let state = AppState::new(config)?;

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_content_length as usize))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
