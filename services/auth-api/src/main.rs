//! SSO Auth API
//!
//! Identity provider exposing `sso.v1.Auth` over gRPC:
//!
//! - `Register(email, password)` - create a user
//! - `Login(email, password, app_id)` - get a token signed for one application
//!
//! The schema must already be migrated (see the `sso-migrator` binary).

mod config;
mod error;
mod grpc;
mod state;

use std::net::SocketAddr;

use sso_proto::auth_service::auth_server::AuthServer;
use tokio::signal;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        grpc_port = config.grpc_port,
        token_ttl_secs = config.auth.default_token_ttl.as_secs(),
        "Starting SSO Auth API"
    );

    let state = AppState::connect(config).await?;
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.grpc_port));

    run_grpc_server(&state, addr).await?;

    state.pool.close().await;
    Ok(())
}

async fn run_grpc_server(state: &AppState, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!(addr = %addr, "starting gRPC server");

    Server::builder()
        .add_service(AuthServer::new(state.grpc_service()))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    tracing::info!("gRPC server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = ?e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("stopping gRPC server");
}
