//! Footy Cache - a caching gateway for the football-data API
//!
//! Serves football data from an in-memory TTL cache, rate-limits the calls
//! that reach the upstream API, and degrades to stale or placeholder data
//! instead of failing.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use footy_cache::api::create_router;
use footy_cache::{spawn_stale_sweeper, AppState, Config};

/// Wires config, cache, gates and upstream client, then serves until a
/// shutdown signal arrives.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "footy_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Footy Cache gateway");

    let config = Config::from_env();
    info!(
        "Configuration loaded: upstream={}, api_key={}, port={}, listing_limit={}/{}s, detail_interval={}ms",
        config.api_base_url,
        if config.api_key.is_some() { "set" } else { "missing" },
        config.server_port,
        config.max_requests,
        config.rate_window,
        config.detail_min_interval_ms
    );
    if config.api_key.is_none() {
        warn!("FOOTBALL_API_KEY is not set; upstream calls will likely be rejected");
    }

    let state = AppState::from_config(&config).context("failed to build upstream HTTP client")?;
    info!("Cache and rate limiters initialized");

    let sweeper = (config.cleanup_interval > 0).then(|| {
        spawn_stale_sweeper(
            state.orchestrator.cache().clone(),
            Duration::from_secs(config.cleanup_interval),
            Duration::from_secs(config.stale_retention),
        )
    });

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Gateway listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper))
        .await
        .context("server error")?;

    info!("Gateway stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM, stopping the sweeper first.
async fn shutdown_signal(sweeper: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, shutting down");
        }
        _ = terminate => {
            info!("SIGTERM received, shutting down");
        }
    }

    if let Some(handle) = sweeper {
        handle.abort();
        warn!("Stale sweeper aborted");
    }
}
