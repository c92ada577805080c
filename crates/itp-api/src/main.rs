//! # itp-api: Binary Entry Point
//!
//! Reads configuration from the environment, derives the provider signing
//! key, and serves the interaction API. Any configuration or key error
//! aborts startup with a non-zero exit.

use std::sync::Arc;

use anyhow::Context;
use itp_api::config::AppConfig;
use itp_api::orchestrator::InteractionOrchestrator;
use itp_api::state::AppState;
use itp_entitlement::EntitlementRegistry;
use itp_order::{HttpOrderVerifier, OrderVerifier, RetryingOrderVerifier};
use itp_vc::CredentialSigner;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;
    tracing::debug!(?config, "configuration loaded");

    let signer = CredentialSigner::new(&config.signing_key, config.provider_id)
        .context("failed to derive provider signing key")?;
    tracing::info!(
        verification_method = signer.verification_method(),
        public_key = %signer.public_key(),
        "provider signing key loaded"
    );

    let registry = EntitlementRegistry::with_defaults()?;
    tracing::info!(rules = registry.len(), "entitlement registry initialised");

    let http = HttpOrderVerifier::new(&config.order)?;
    tracing::info!(
        endpoint = %config.order.status_url,
        timeout_secs = config.order.timeout_secs,
        max_retries = config.order.max_retries,
        "order-status client configured"
    );
    let verifier: Arc<dyn OrderVerifier> = if config.order.max_retries > 0 {
        Arc::new(RetryingOrderVerifier::new(http, config.order.max_retries))
    } else {
        Arc::new(http)
    };

    let orchestrator = InteractionOrchestrator::new(
        Arc::new(registry),
        verifier,
        Arc::new(signer),
        config.provider_id,
    );

    let prometheus = itp_api::metrics::install_recorder()
        .context("failed to install Prometheus recorder")?;
    let state = AppState::new(orchestrator).with_prometheus(prometheus);
    let app = itp_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Interaction ticket provider listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` filter (default `info`); `LOG_FORMAT=json` for JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
