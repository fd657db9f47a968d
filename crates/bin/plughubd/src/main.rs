//! # plughubd: plughub daemon
//!
//! Composition root that wires the gateway, services and HTTP adapter
//! together and starts the server.
//!
//! ## Responsibilities
//! - Load `.env`, then parse configuration (config file, env vars)
//! - Initialize `tracing` with the configured filter
//! - Construct the selected device gateway (Tapo or virtual)
//! - Construct application services and the credential resolver
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use plughub_adapter_http_axum::state::AppState;
use plughub_adapter_tapo::TapoGateway;
use plughub_adapter_virtual::VirtualGateway;
use plughub_app::ports::DeviceGateway;
use plughub_app::services::control_service::ControlService;
use plughub_app::services::credential_resolver::CredentialResolver;
use plughub_app::services::discovery_service::DiscoveryService;
use tracing_subscriber::EnvFilter;

use crate::config::{Backend, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err.into());
    }

    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();
    tracing::debug!(?config, "configuration loaded");

    match config.gateway.backend {
        Backend::Tapo => {
            let timeout = config.gateway.request_timeout();
            let gateway = TapoGateway::new(config.tapo.clone(), timeout);
            serve(&config, gateway).await
        }
        Backend::Virtual => serve(&config, VirtualGateway::demo()).await,
    }
}

async fn serve<G>(config: &Config, gateway: G) -> Result<(), Box<dyn std::error::Error>>
where
    G: DeviceGateway + Clone + 'static,
{
    let resolver = CredentialResolver::new(
        config.device.host.clone(),
        config.device.email.clone(),
        config.device.password.clone(),
    );
    if !resolver.has_default_host() {
        tracing::warn!("DEVICE_HOST is not set, every switch request must name its device");
    }

    let timeout = config.gateway.request_timeout();
    let state = AppState::new(
        ControlService::new(gateway.clone(), timeout),
        DiscoveryService::new(gateway, config.gateway.scan_timeout(), timeout),
        resolver,
    );
    let cors = plughub_adapter_http_axum::cors::layer(&config.cors.origins)?;
    let app = plughub_adapter_http_axum::router::build(state, cors);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        backend = ?config.gateway.backend,
        "plughubd listening on http://{bind_addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("plughubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown requested");
}
