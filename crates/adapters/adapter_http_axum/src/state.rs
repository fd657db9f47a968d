//! Shared application state for axum handlers.

use std::sync::Arc;

use plughub_app::ports::DeviceGateway;
use plughub_app::services::control_service::ControlService;
use plughub_app::services::credential_resolver::CredentialResolver;
use plughub_app::services::discovery_service::DiscoveryService;

/// Application state shared across all axum handlers.
///
/// Generic over the device gateway to avoid dynamic dispatch. `Clone` is
/// implemented manually so the gateway itself does not need to be `Clone`;
/// only the `Arc` wrappers are cloned.
pub struct AppState<G> {
    /// Switches a single plug on or off.
    pub control_service: Arc<ControlService<G>>,
    /// Scans the network and probes every plug found.
    pub discovery_service: Arc<DiscoveryService<G>>,
    /// Fills in the host and credential a request left out.
    pub resolver: Arc<CredentialResolver>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            control_service: Arc::clone(&self.control_service),
            discovery_service: Arc::clone(&self.discovery_service),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<G> AppState<G>
where
    G: DeviceGateway + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        control_service: ControlService<G>,
        discovery_service: DiscoveryService<G>,
        resolver: CredentialResolver,
    ) -> Self {
        Self {
            control_service: Arc::new(control_service),
            discovery_service: Arc::new(discovery_service),
            resolver: Arc::new(resolver),
        }
    }
}
