//! # plughub-adapter-tapo
//!
//! Device gateway for TP-Link Tapo plugs, built on the
//! [`tapo`](https://docs.rs/tapo) crate.
//!
//! ## Responsibilities
//! - Open an authenticated session per device call (`connect`)
//! - Refresh device state and switch power through the session
//! - Run the UDP discovery probe and keep the plug answers (`scan`)
//!
//! The library logs in to every device that answers the probe. A device whose
//! login fails is reported as [`ScanAnswer::Failed`] so discovery can list or
//! reject it like any other unreachable plug.
//!
//! The vendor protocol (handshake, encryption, discovery packets) lives
//! entirely in the `tapo` crate; this adapter only maps its types and errors
//! onto the gateway port.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `plughub-app` and `plughub-domain`.

mod config;
mod session;

use std::time::Duration;

use tapo::{ApiClient, DiscoveryResult};
use tokio_stream::StreamExt as _;

use plughub_app::ports::DeviceGateway;
use plughub_domain::credential::{Credential, DeviceTarget};
use plughub_domain::device::{DiscoveredDevice, ScanAnswer};
use plughub_domain::error::{BoxError, GatewayError};

pub use config::TapoConfig;
pub use session::TapoSession;

/// Gateway talking to real Tapo devices.
#[derive(Debug, Clone)]
pub struct TapoGateway {
    config: TapoConfig,
    request_timeout: Duration,
}

impl TapoGateway {
    /// Every HTTP exchange with a device, including the logins made while
    /// scanning, is bounded by `request_timeout`.
    #[must_use]
    pub fn new(config: TapoConfig, request_timeout: Duration) -> Self {
        Self {
            config,
            request_timeout,
        }
    }

    fn client(&self, credential: &Credential) -> ApiClient {
        ApiClient::new(credential.identifier(), credential.secret())
            .with_timeout(self.request_timeout)
    }
}

impl DeviceGateway for TapoGateway {
    type Session = TapoSession;

    async fn connect(&self, target: &DeviceTarget) -> Result<TapoSession, GatewayError> {
        let handler = self
            .client(target.credential())
            .generic_device(target.host())
            .await
            .map_err(|err| GatewayError::connect(target.host(), err))?;
        tracing::debug!(host = target.host(), "tapo session opened");
        Ok(TapoSession::new(target.host(), handler))
    }

    async fn scan(
        &self,
        credential: &Credential,
        timeout: Duration,
    ) -> Result<Vec<ScanAnswer>, GatewayError> {
        let discovery = self
            .client(credential)
            .discover_devices(self.config.discovery_target.clone(), timeout_secs(timeout))
            .await
            .map_err(GatewayError::scan)?;
        let mut discovery = std::pin::pin!(discovery);

        let mut answers = Vec::new();
        while let Some(answer) = discovery.next().await {
            match answer {
                Ok(result) => answers.extend(describe(result).map(ScanAnswer::Found)),
                Err(err) => answers.push(rejected(err.ip, err.source)),
            }
        }
        Ok(answers)
    }
}

/// Keep the address and model of plug-like answers.
fn describe(result: DiscoveryResult) -> Option<DiscoveredDevice> {
    match result {
        DiscoveryResult::Plug { device_info, .. } => {
            Some(DiscoveredDevice::new(device_info.ip, "plug").with_model(device_info.model))
        }
        DiscoveryResult::PlugEnergyMonitoring { device_info, .. } => Some(
            DiscoveredDevice::new(device_info.ip, "plug_energy_monitoring")
                .with_model(device_info.model),
        ),
        DiscoveryResult::GenericDevice { device_info, .. } => {
            Some(DiscoveredDevice::new(device_info.ip, "generic").with_model(device_info.model))
        }
        _ => {
            tracing::debug!("skipping discovered device that is not a plug");
            None
        }
    }
}

/// A device that answered the probe but failed the login that followed.
fn rejected(address: String, source: impl Into<BoxError>) -> ScanAnswer {
    let error = GatewayError::connect(address.clone(), source);
    tracing::warn!(ip = %address, %error, "device failed during discovery");
    ScanAnswer::Failed { address, error }
}

/// Longest discovery window the library accepts, in seconds.
pub const MAX_SCAN_SECS: u64 = 60;

/// The library counts the discovery window in whole seconds, from 1 to
/// [`MAX_SCAN_SECS`].
fn timeout_secs(timeout: Duration) -> u64 {
    let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    secs.clamp(1, MAX_SCAN_SECS)
}
