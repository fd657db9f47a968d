//! In-memory gateway used by the service tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use plughub_domain::credential::{Credential, DeviceTarget};
use plughub_domain::device::{DiscoveredDevice, ScanAnswer};
use plughub_domain::error::GatewayError;
use serde_json::json;

use crate::ports::{DeviceGateway, DeviceSession};

pub(crate) fn credential() -> Credential {
    Credential::new("home@example.com", "s3cret").unwrap()
}

enum ScanEntry {
    Found(DiscoveredDevice),
    Rejected { host: String, reason: &'static str },
}

impl ScanEntry {
    fn answer(&self) -> ScanAnswer {
        match self {
            Self::Found(device) => ScanAnswer::Found(device.clone()),
            Self::Rejected { host, reason } => ScanAnswer::Failed {
                address: host.clone(),
                error: GatewayError::connect(host, *reason),
            },
        }
    }
}

#[derive(Default)]
struct Inner {
    plugs: HashMap<String, bool>,
    failing_update: HashSet<String>,
    hanging: HashSet<String>,
    scan: Vec<ScanEntry>,
    scan_fails: bool,
    calls: Vec<String>,
}

#[derive(Clone, Default)]
pub(crate) struct StubGateway {
    inner: Arc<Mutex<Inner>>,
}

impl StubGateway {
    pub(crate) fn with_plug(self, host: &str, on: bool) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.plugs.insert(host.to_string(), on);
            inner.scan.push(ScanEntry::Found(
                DiscoveredDevice::new(host, "plug").with_model("P100"),
            ));
        }
        self
    }

    /// Answers the scan but refuses connections.
    pub(crate) fn with_ghost(self, host: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .scan
            .push(ScanEntry::Found(DiscoveredDevice::new(host, "plug")));
        self
    }

    /// Answers the scan but refuses the login the scan performs.
    pub(crate) fn rejected_at_scan(self, host: &str) -> Self {
        self.inner.lock().unwrap().scan.push(ScanEntry::Rejected {
            host: host.to_string(),
            reason: "invalid credentials",
        });
        self
    }

    pub(crate) fn failing_update(self, host: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .failing_update
            .insert(host.to_string());
        self
    }

    pub(crate) fn hanging(self, host: &str) -> Self {
        self.inner.lock().unwrap().hanging.insert(host.to_string());
        self
    }

    pub(crate) fn failing_scan(self) -> Self {
        self.inner.lock().unwrap().scan_fails = true;
        self
    }

    pub(crate) fn is_on(&self, host: &str) -> Option<bool> {
        self.inner.lock().unwrap().plugs.get(host).copied()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

pub(crate) struct StubSession {
    host: String,
    gateway: StubGateway,
    raw: Option<serde_json::Value>,
}

impl DeviceGateway for StubGateway {
    type Session = StubSession;

    async fn connect(&self, target: &DeviceTarget) -> Result<StubSession, GatewayError> {
        let host = target.host().to_string();
        self.record(format!("connect {host}"));
        let (known, hangs) = {
            let inner = self.inner.lock().unwrap();
            (
                inner.plugs.contains_key(&host),
                inner.hanging.contains(&host),
            )
        };
        if hangs {
            std::future::pending::<()>().await;
        }
        if !known {
            return Err(GatewayError::connect(host, "no route to host"));
        }
        Ok(StubSession {
            host,
            gateway: self.clone(),
            raw: None,
        })
    }

    async fn scan(
        &self,
        _credential: &Credential,
        _timeout: Duration,
    ) -> Result<Vec<ScanAnswer>, GatewayError> {
        self.record("scan".to_string());
        let inner = self.inner.lock().unwrap();
        if inner.scan_fails {
            return Err(GatewayError::scan("broadcast not permitted"));
        }
        Ok(inner.scan.iter().map(ScanEntry::answer).collect())
    }
}

impl DeviceSession for StubSession {
    fn host(&self) -> &str {
        &self.host
    }

    async fn update(&mut self) -> Result<(), GatewayError> {
        self.gateway.record(format!("update {}", self.host));
        let inner = self.gateway.inner.lock().unwrap();
        if inner.failing_update.contains(&self.host) {
            return Err(GatewayError::update(&self.host, "session expired"));
        }
        let on = inner.plugs.get(&self.host).copied().unwrap_or_default();
        self.raw = Some(json!({
            "ip": self.host,
            "model": "P100",
            "type": "SMART.TAPOPLUG",
            "device_on": on,
        }));
        Ok(())
    }

    async fn turn_on(&mut self) -> Result<(), GatewayError> {
        self.gateway.record(format!("turn_on {}", self.host));
        self.gateway
            .inner
            .lock()
            .unwrap()
            .plugs
            .insert(self.host.clone(), true);
        Ok(())
    }

    async fn turn_off(&mut self) -> Result<(), GatewayError> {
        self.gateway.record(format!("turn_off {}", self.host));
        self.gateway
            .inner
            .lock()
            .unwrap()
            .plugs
            .insert(self.host.clone(), false);
        Ok(())
    }

    fn protocol_version(&self) -> Option<&str> {
        Some("stub")
    }

    fn raw_state(&self) -> Option<&serde_json::Value> {
        self.raw.as_ref()
    }

    async fn close(self) -> Result<(), GatewayError> {
        self.gateway.record(format!("close {}", self.host));
        Ok(())
    }
}
