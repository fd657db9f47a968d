//! Per-device discovery results.

use serde::Serialize;

use crate::device::{DeviceInfo, DiscoveredDevice};

/// How discovery treats a device that cannot be probed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscoveryPolicy {
    /// Record the failure in the report list and keep going.
    #[default]
    Tolerant,
    /// Abort the whole discovery on the first failing device.
    Strict,
}

/// What discovery learned about one device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub ip: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
}

/// Result of connecting to a discovered device and reading its state.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Ok {
        protocol: Option<String>,
        info: DeviceInfo,
        raw_state: serde_json::Value,
    },
    Failed {
        error: String,
    },
}

impl DeviceReport {
    #[must_use]
    pub fn new(device: DiscoveredDevice, outcome: ProbeOutcome) -> Self {
        Self {
            ip: device.address,
            device_type: device.device_type,
            model: device.model,
            outcome,
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_flatten_successful_probe() {
        let report = DeviceReport::new(
            DiscoveredDevice::new("10.0.0.2", "plug").with_model("P100"),
            ProbeOutcome::Ok {
                protocol: Some("klap".to_string()),
                info: DeviceInfo {
                    device_on: Some(true),
                    ..DeviceInfo::default()
                },
                raw_state: json!({"device_on": true}),
            },
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "ip": "10.0.0.2",
                "type": "plug",
                "model": "P100",
                "status": "ok",
                "protocol": "klap",
                "info": {"device_on": true},
                "raw_state": {"device_on": true}
            })
        );
        assert!(report.is_ok());
    }

    #[test]
    fn should_flatten_failed_probe() {
        let report = DeviceReport::new(
            DiscoveredDevice::new("10.0.0.3", "plug"),
            ProbeOutcome::Failed {
                error: "failed to connect to 10.0.0.3: timed out".to_string(),
            },
        );

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "ip": "10.0.0.3",
                "type": "plug",
                "status": "failed",
                "error": "failed to connect to 10.0.0.3: timed out"
            })
        );
        assert!(!report.is_ok());
    }

    #[test]
    fn should_default_to_tolerant_policy() {
        assert_eq!(DiscoveryPolicy::default(), DiscoveryPolicy::Tolerant);
    }
}
