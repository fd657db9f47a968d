//! # plughub-adapter-virtual
//!
//! Virtual device gateway that provides simulated plugs for testing and
//! demonstration purposes.
//!
//! ## Demo plugs
//!
//! | Host | Model | Nickname | Behaviour |
//! |------|-------|----------|-----------|
//! | `192.168.50.10` | P100 | Desk Lamp | Responds to `turn_on` / `turn_off` |
//! | `192.168.50.11` | P110 | Kettle | Responds to `turn_on` / `turn_off`, starts on |
//! | `192.168.50.12` | P100 | Garage | Answers scans, refuses connections |
//!
//! Like a Tapo discovery, a scan logs in to every plug that answers: an
//! unreachable plug, or any plug when the scan credential does not match the
//! configured account, comes back as [`ScanAnswer::Failed`].
//!
//! ## Dependency rule
//!
//! Depends on `plughub-app` (port traits) and `plughub-domain` only.

mod plug;
mod session;

use std::sync::Arc;
use std::time::Duration;

use plughub_app::ports::DeviceGateway;
use plughub_domain::credential::{Credential, DeviceTarget};
use plughub_domain::device::{DiscoveredDevice, ScanAnswer};
use plughub_domain::error::GatewayError;
use plughub_domain::power::PowerState;

pub use plug::VirtualPlug;
pub use session::{PROTOCOL, VirtualSession};

/// Gateway backed by in-process [`VirtualPlug`]s.
///
/// Cloning is cheap and every clone sees the same plugs, so a test can keep a
/// handle to observe the power state the service produced.
#[derive(Clone, Default)]
pub struct VirtualGateway {
    plugs: Arc<Vec<Arc<VirtualPlug>>>,
    account: Option<Credential>,
}

impl VirtualGateway {
    #[must_use]
    pub fn builder() -> VirtualGatewayBuilder {
        VirtualGatewayBuilder::default()
    }

    /// The three demo plugs listed in the crate documentation.
    #[must_use]
    pub fn demo() -> Self {
        Self::builder()
            .plug(VirtualPlug::new("192.168.50.10").nickname("Desk Lamp"))
            .plug(
                VirtualPlug::new("192.168.50.11")
                    .model("P110")
                    .nickname("Kettle")
                    .powered(PowerState::On),
            )
            .plug(
                VirtualPlug::new("192.168.50.12")
                    .nickname("Garage")
                    .unreachable(),
            )
            .build()
    }

    /// Current power state of the plug at `host`.
    #[must_use]
    pub fn power_state(&self, host: &str) -> Option<PowerState> {
        self.find(host).map(|plug| plug.power_state())
    }

    fn find(&self, host: &str) -> Option<&Arc<VirtualPlug>> {
        self.plugs.iter().find(|plug| plug.host() == host)
    }

    fn login(&self, plug: &VirtualPlug, credential: &Credential) -> Result<(), GatewayError> {
        if !plug.is_reachable() {
            return Err(GatewayError::connect(plug.host(), "connection refused"));
        }
        if self
            .account
            .as_ref()
            .is_some_and(|account| account != credential)
        {
            return Err(GatewayError::connect(plug.host(), "invalid credentials"));
        }
        Ok(())
    }
}

impl DeviceGateway for VirtualGateway {
    type Session = VirtualSession;

    async fn connect(&self, target: &DeviceTarget) -> Result<VirtualSession, GatewayError> {
        let host = target.host();
        let plug = self
            .find(host)
            .ok_or_else(|| GatewayError::connect(host, "no route to host"))?;
        self.login(plug, target.credential())?;
        tracing::debug!(host, "virtual plug connected");
        Ok(VirtualSession::new(Arc::clone(plug)))
    }

    async fn scan(
        &self,
        credential: &Credential,
        _timeout: Duration,
    ) -> Result<Vec<ScanAnswer>, GatewayError> {
        Ok(self
            .plugs
            .iter()
            .map(|plug| match self.login(plug, credential) {
                Ok(()) => ScanAnswer::Found(
                    DiscoveredDevice::new(plug.host(), "plug").with_model(plug.model_name()),
                ),
                Err(error) => {
                    tracing::debug!(host = plug.host(), %error, "virtual plug rejected scan");
                    ScanAnswer::Failed {
                        address: plug.host().to_string(),
                        error,
                    }
                }
            })
            .collect())
    }
}

/// Step-by-step builder for [`VirtualGateway`].
#[derive(Default)]
pub struct VirtualGatewayBuilder {
    plugs: Vec<Arc<VirtualPlug>>,
    account: Option<Credential>,
}

impl VirtualGatewayBuilder {
    #[must_use]
    pub fn plug(mut self, plug: VirtualPlug) -> Self {
        self.plugs.push(Arc::new(plug));
        self
    }

    /// Only accept connections made with this credential.
    #[must_use]
    pub fn account(mut self, credential: Credential) -> Self {
        self.account = Some(credential);
        self
    }

    #[must_use]
    pub fn build(self) -> VirtualGateway {
        VirtualGateway {
            plugs: Arc::new(self.plugs),
            account: self.account,
        }
    }
}
