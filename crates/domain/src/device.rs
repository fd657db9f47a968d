//! Devices as seen by a discovery scan and as described by the plug itself.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// A device answering a discovery scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredDevice {
    /// Network address the device answered from.
    pub address: String,
    /// Device family declared in the scan answer (e.g. `plug`).
    pub device_type: String,
    /// Hardware model, when the scan answer carries one (e.g. `P110`).
    pub model: Option<String>,
}

impl DiscoveredDevice {
    #[must_use]
    pub fn new(address: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            device_type: device_type.into(),
            model: None,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// One answer collected during a discovery scan.
///
/// Some libraries authenticate against every device while scanning, so a
/// device can be known by address and still fail before any session opens.
#[derive(Debug)]
pub enum ScanAnswer {
    /// The device answered and is ready to be probed.
    Found(DiscoveredDevice),
    /// The device answered but could not be reached or logged in to.
    Failed { address: String, error: GatewayError },
}

impl ScanAnswer {
    /// Address of the device behind this answer.
    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            Self::Found(device) => &device.address,
            Self::Failed { address, .. } => address,
        }
    }
}

impl From<DiscoveredDevice> for ScanAnswer {
    fn from(device: DiscoveredDevice) -> Self {
        Self::Found(device)
    }
}

/// Descriptive record mirrored from the state a plug reports about itself.
///
/// Field names follow the device's own wire names. Every field is optional
/// and is only serialized when the device reported it, so a record read from
/// a raw state serializes back to the same keys and values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_ver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fw_ver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fw_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oem_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_diff: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_set_location_info: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_on: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overheated: Option<bool>,
}

impl DeviceInfo {
    /// Read the record out of a raw reported state, ignoring unknown keys.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when a known key carries a value of the
    /// wrong type, or when `raw` is not an object.
    pub fn from_raw(raw: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }
}
