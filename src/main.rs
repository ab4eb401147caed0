// ============================================================================
// Election API Gateway
// ============================================================================
//
// Single HTTP entry point in front of the gRPC backends (auth, user-profile,
// election, storage). Stateless: it resolves the caller's session identity
// from cookies, dispatches to the owning backend, and normalizes replies into
// the uniform response envelope.
//
// ============================================================================

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use election_gateway::clients::BackendClients;
use election_gateway::config::Config;
use election_gateway::context::AppContext;
use election_gateway::routes::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    let config = Arc::new(config);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Election API Gateway Starting ===");
    info!("Port: {}", config.port);
    info!("Auth backend: {}", config.auth.uri());
    info!("User backend: {}", config.user.uri());
    info!("Election backend: {}", config.election.uri());
    info!("Storage backend: {}", config.storage.uri());

    // One lazy channel per backend; the first RPC reports connectivity.
    let clients =
        BackendClients::from_config(&config).context("Failed to build backend clients")?;

    let ctx = Arc::new(AppContext::new(config.clone(), clients));
    let app = create_router(ctx);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .context("Failed to parse bind address")?;

    info!("Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
