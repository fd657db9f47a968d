//! Virtual plug: holds a power state and reports itself like a real plug.

use std::sync::{Mutex, MutexGuard, PoisonError};

use plughub_domain::power::PowerState;
use serde_json::json;

/// A simulated plug reachable at a fixed address.
pub struct VirtualPlug {
    host: String,
    model: String,
    nickname: String,
    reachable: bool,
    state: Mutex<PowerState>,
}

impl VirtualPlug {
    /// A reachable `P100` plug at `host`, initially off.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            model: "P100".to_string(),
            nickname: "Virtual Plug".to_string(),
            reachable: true,
            state: Mutex::new(PowerState::Off),
        }
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    #[must_use]
    pub fn powered(self, state: PowerState) -> Self {
        *self.lock_state() = state;
        self
    }

    /// The plug answers scans but refuses every connection.
    #[must_use]
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    #[must_use]
    pub fn power_state(&self) -> PowerState {
        *self.lock_state()
    }

    pub(crate) fn set_power(&self, state: PowerState) {
        *self.lock_state() = state;
    }

    /// Device info in the shape a Tapo plug reports it.
    pub(crate) fn report(&self) -> serde_json::Value {
        let slug = self.host.replace(['.', ':'], "");
        json!({
            "device_id": format!("VIRTUAL{slug}"),
            "fw_ver": "1.0.0 Build 000000 Rel.virtual",
            "hw_ver": "1.0",
            "type": "SMART.TAPOPLUG",
            "model": self.model,
            "mac": mac_for(&self.host),
            "hw_id": "00000000000000000000000000000000",
            "fw_id": "00000000000000000000000000000000",
            "oem_id": "00000000000000000000000000000000",
            "ip": self.host,
            "time_diff": 0,
            "ssid": "",
            "rssi": -40,
            "signal_level": 3,
            "latitude": 0,
            "longitude": 0,
            "lang": "en_US",
            "avatar": "plug",
            "region": "UTC",
            "specs": "",
            "nickname": self.nickname,
            "has_set_location_info": false,
            "device_on": self.power_state().is_on(),
            "on_time": 0,
            "overheated": false,
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, PowerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Stable, locally administered MAC derived from the host string.
fn mac_for(host: &str) -> String {
    let hash = host
        .bytes()
        .fold(0x811c_9dc5_u32, |acc, b| (acc ^ u32::from(b)).wrapping_mul(0x0100_0193));
    let [a, b, c, d] = hash.to_be_bytes();
    format!("02-00-{a:02X}-{b:02X}-{c:02X}-{d:02X}")
}
