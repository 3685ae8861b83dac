pub mod state;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::core::error::AppError;
use crate::core::http_client::build_proxy_client;
use crate::features::proxy::{ProxyRules, handle_proxy};

pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new().fallback(handle_proxy).with_state(state)
}

pub async fn run_proxy(config: ProxyConfig) -> Result<(), AppError> {
    let http_client = build_proxy_client()
        .map_err(|err| AppError::internal(format!("failed to build HTTP client: {err}")))?;
    let app = build_router(AppState::new(ProxyRules::from_config(&config), http_client));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!(
        %addr,
        libcal = %config.libcal_target,
        token_refresh = %config.token_refresh_target,
        "starting dev proxy"
    );
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::internal(format!("failed to bind: {err}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::internal(format!("server error: {err}")))?;

    Ok(())
}
