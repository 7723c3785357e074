mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod images;
mod jobs;
mod llm_client;
mod models;
mod payments;
mod resume;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::tokens::JwtKeys;
use crate::config::Config;
use crate::db::create_pool;
use crate::images::S3ImageStore;
use crate::llm_client::GeminiClient;
use crate::payments::RpcPaymentVerifier;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite (runs migrations)
    let db = create_pool(&config.database_path).await?;

    // Initialize LLM client
    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.as_deref(),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize image storage
    let images = S3ImageStore::from_config(&config).await;
    info!("Image store initialized (bucket: {})", config.image_bucket);

    let payments = RpcPaymentVerifier::new(
        config.chain_rpc_url.clone(),
        config.payment_recipient.clone(),
    )?;

    let state = AppState {
        db: db.clone(),
        llm: Arc::new(llm),
        images: Arc::new(images),
        payments: Arc::new(payments),
        jwt: JwtKeys::new(&config.jwt_secret),
    };

    let app = build_router(state)
        .layer(cors_layer(&config.frontend_origin)?)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        finished = &mut server => {
            finished??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    info!("Shutdown signal received, draining in-flight requests");
    let _ = stop_tx.send(());
    match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
        Ok(finished) => finished??,
        Err(_) => warn!(
            "Requests still in flight after {}s, exiting anyway",
            SHUTDOWN_GRACE.as_secs()
        ),
    }

    db.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
