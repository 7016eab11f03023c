use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::users::{repository::UserRepository, JsonUserStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{errors::StartupError, routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {raw}: {e}")))
}

/// Open the configured user store and wrap it as handler state.
/// A corrupt store file aborts startup.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let store = JsonUserStore::open_collection(&cfg.storage.path, &cfg.storage.collection).await?;
    let repo: Arc<dyn UserRepository> = store;
    Ok(ServerState::new(repo))
}

pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and serve it until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, db = %cfg.storage.path, "starting users api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
