//! Session to a Tapo device, wrapping the library's generic handler.

use plughub_app::ports::DeviceSession;
use plughub_domain::error::GatewayError;
use plughub_domain::power::PowerState;
use tapo::GenericDeviceHandler;

/// Open connection to one Tapo device.
///
/// The generic handler works for every Tapo model that supports
/// `get_device_info` and on/off, which covers all plugs.
pub struct TapoSession {
    host: String,
    handler: GenericDeviceHandler,
    raw_state: Option<serde_json::Value>,
}

impl TapoSession {
    pub(crate) fn new(host: impl Into<String>, handler: GenericDeviceHandler) -> Self {
        Self {
            host: host.into(),
            handler,
            raw_state: None,
        }
    }
}

impl DeviceSession for TapoSession {
    fn host(&self) -> &str {
        &self.host
    }

    async fn update(&mut self) -> Result<(), GatewayError> {
        let raw = self
            .handler
            .get_device_info_json()
            .await
            .map_err(|err| GatewayError::update(&self.host, err))?;
        self.raw_state = Some(raw);
        Ok(())
    }

    async fn turn_on(&mut self) -> Result<(), GatewayError> {
        self.handler
            .on()
            .await
            .map_err(|err| GatewayError::command(&self.host, PowerState::On, err))
    }

    async fn turn_off(&mut self) -> Result<(), GatewayError> {
        self.handler
            .off()
            .await
            .map_err(|err| GatewayError::command(&self.host, PowerState::Off, err))
    }

    // The library negotiates KLAP or passthrough internally and does not
    // expose which one it picked.
    fn protocol_version(&self) -> Option<&str> {
        None
    }

    fn raw_state(&self) -> Option<&serde_json::Value> {
        self.raw_state.as_ref()
    }

    async fn close(self) -> Result<(), GatewayError> {
        tracing::debug!(host = %self.host, "tapo session closed");
        Ok(())
    }
}
