//! Session to a virtual plug.

use std::sync::Arc;

use plughub_app::ports::DeviceSession;
use plughub_domain::error::GatewayError;
use plughub_domain::power::PowerState;

use crate::plug::VirtualPlug;

/// Protocol name reported by virtual sessions.
pub const PROTOCOL: &str = "virtual";

/// Open connection to one [`VirtualPlug`].
pub struct VirtualSession {
    plug: Arc<VirtualPlug>,
    raw_state: Option<serde_json::Value>,
}

impl VirtualSession {
    pub(crate) fn new(plug: Arc<VirtualPlug>) -> Self {
        Self {
            plug,
            raw_state: None,
        }
    }
}

impl DeviceSession for VirtualSession {
    fn host(&self) -> &str {
        self.plug.host()
    }

    async fn update(&mut self) -> Result<(), GatewayError> {
        self.raw_state = Some(self.plug.report());
        Ok(())
    }

    async fn turn_on(&mut self) -> Result<(), GatewayError> {
        self.plug.set_power(PowerState::On);
        tracing::debug!(host = self.plug.host(), "virtual plug turned on");
        Ok(())
    }

    async fn turn_off(&mut self) -> Result<(), GatewayError> {
        self.plug.set_power(PowerState::Off);
        tracing::debug!(host = self.plug.host(), "virtual plug turned off");
        Ok(())
    }

    fn protocol_version(&self) -> Option<&str> {
        Some(PROTOCOL)
    }

    fn raw_state(&self) -> Option<&serde_json::Value> {
        self.raw_state.as_ref()
    }

    async fn close(self) -> Result<(), GatewayError> {
        Ok(())
    }
}
