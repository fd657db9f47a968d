//! Discovery service: scans the network and describes every plug found.
//!
//! Devices are probed one after another within the calling task. How a
//! failing device is handled is decided by the caller through
//! [`DiscoveryPolicy`].

use std::time::Duration;

use plughub_domain::credential::{Credential, DeviceTarget};
use plughub_domain::device::{DeviceInfo, DiscoveredDevice, ScanAnswer};
use plughub_domain::error::{GatewayError, PlugHubError};
use plughub_domain::report::{DeviceReport, DiscoveryPolicy, ProbeOutcome};

use crate::ports::{DeviceGateway, DeviceSession};

/// Device type reported for devices that failed during the scan itself.
const UNKNOWN_TYPE: &str = "unknown";

/// Application service for device discovery.
pub struct DiscoveryService<G> {
    gateway: G,
    scan_timeout: Duration,
    probe_timeout: Duration,
}

impl<G: DeviceGateway> DiscoveryService<G> {
    /// Create a new service.
    ///
    /// `scan_timeout` bounds the network scan, `probe_timeout` bounds the
    /// connect/refresh exchange with each discovered device.
    pub fn new(gateway: G, scan_timeout: Duration, probe_timeout: Duration) -> Self {
        Self {
            gateway,
            scan_timeout,
            probe_timeout,
        }
    }

    /// Scan the network, then connect to each device and read its state.
    ///
    /// # Errors
    ///
    /// Returns [`PlugHubError::Gateway`] when the scan fails, or, under
    /// [`DiscoveryPolicy::Strict`], the error of the first device that could
    /// not be probed, whether it failed during the scan or afterwards.
    #[tracing::instrument(skip(self, credential))]
    pub async fn discover(
        &self,
        credential: &Credential,
        policy: DiscoveryPolicy,
    ) -> Result<Vec<DeviceReport>, PlugHubError> {
        let answers = self.gateway.scan(credential, self.scan_timeout).await?;
        tracing::info!(count = answers.len(), "scan finished");

        let mut reports = Vec::with_capacity(answers.len());
        for answer in answers {
            let (device, probed) = match answer {
                ScanAnswer::Found(device) => {
                    let probed = self.probe(&device, credential).await;
                    (device, probed)
                }
                ScanAnswer::Failed { address, error } => (
                    DiscoveredDevice::new(address, UNKNOWN_TYPE),
                    Err(PlugHubError::from(error)),
                ),
            };
            match probed {
                Ok(outcome) => reports.push(DeviceReport::new(device, outcome)),
                Err(err) if policy == DiscoveryPolicy::Strict => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        ip = %device.address,
                        device_type = %device.device_type,
                        %err,
                        "failed to probe device"
                    );
                    let outcome = ProbeOutcome::Failed {
                        error: err.to_string(),
                    };
                    reports.push(DeviceReport::new(device, outcome));
                }
            }
        }
        Ok(reports)
    }

    async fn probe(
        &self,
        device: &DiscoveredDevice,
        credential: &Credential,
    ) -> Result<ProbeOutcome, PlugHubError> {
        let target = DeviceTarget::new(&device.address, credential.clone())?;
        let outcome = tokio::time::timeout(self.probe_timeout, self.read_state(&target))
            .await
            .map_err(|_| GatewayError::Timeout {
                host: device.address.clone(),
                timeout: self.probe_timeout,
            })??;
        Ok(outcome)
    }

    async fn read_state(&self, target: &DeviceTarget) -> Result<ProbeOutcome, GatewayError> {
        let mut session = self.gateway.connect(target).await?;
        session.update().await?;

        let raw_state = session
            .raw_state()
            .cloned()
            .ok_or_else(|| GatewayError::NotUpdated {
                host: target.host().to_string(),
            })?;
        let info = DeviceInfo::from_raw(&raw_state).map_err(|source| GatewayError::Decode {
            host: target.host().to_string(),
            source,
        })?;
        let protocol = session.protocol_version().map(str::to_string);

        if let Err(err) = session.close().await {
            tracing::debug!(%err, "failed to close device session");
        }
        Ok(ProbeOutcome::Ok {
            protocol,
            info,
            raw_state,
        })
    }
}
