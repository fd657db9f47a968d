//! Control service: switches one plug on or off.

use std::time::Duration;

use plughub_domain::credential::DeviceTarget;
use plughub_domain::error::{GatewayError, PlugHubError};
use plughub_domain::power::PowerState;

use crate::ports::{DeviceGateway, DeviceSession};

/// Application service for power commands.
pub struct ControlService<G> {
    gateway: G,
    timeout: Duration,
}

impl<G: DeviceGateway> ControlService<G> {
    /// Create a new service; every command must finish within `timeout`.
    pub fn new(gateway: G, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    /// Connect to `target`, refresh its state, then switch it to `state`.
    ///
    /// Returns the confirmation message for the new state.
    ///
    /// # Errors
    ///
    /// Returns [`PlugHubError::Gateway`] when the connection, the refresh or
    /// the command fails, or when the whole exchange exceeds the timeout.
    #[tracing::instrument(skip(self, target), fields(host = %target.host()))]
    pub async fn set_power(
        &self,
        target: &DeviceTarget,
        state: PowerState,
    ) -> Result<&'static str, PlugHubError> {
        tokio::time::timeout(self.timeout, self.switch(target, state))
            .await
            .map_err(|_| GatewayError::Timeout {
                host: target.host().to_string(),
                timeout: self.timeout,
            })??;
        Ok(state.confirmation())
    }

    async fn switch(&self, target: &DeviceTarget, state: PowerState) -> Result<(), GatewayError> {
        let mut session = self.gateway.connect(target).await?;
        session.update().await?;
        tracing::info!(host = session.host(), "device connected and refreshed");

        session.set_power(state).await?;
        if let Err(err) = session.close().await {
            tracing::debug!(%err, "failed to close device session");
        }
        Ok(())
    }
}
