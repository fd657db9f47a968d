//! Gateway port: the vendor library that actually talks to the plugs.
//!
//! The service never speaks the device protocol itself. A gateway opens
//! authenticated sessions to single devices and runs discovery scans; a
//! session refreshes the device state and switches its power.

use std::future::Future;
use std::time::Duration;

use plughub_domain::credential::{Credential, DeviceTarget};
use plughub_domain::device::ScanAnswer;
use plughub_domain::error::GatewayError;
use plughub_domain::power::PowerState;

/// Entry point into a device-control library.
///
/// Implementations live in adapter crates (`adapter_tapo`, `adapter_virtual`).
/// A gateway holds no per-device state: every [`connect`](Self::connect)
/// yields a fresh session owned by the caller.
pub trait DeviceGateway: Send + Sync {
    /// Session type produced by [`connect`](Self::connect).
    type Session: DeviceSession;

    /// Open an authenticated session to the device at `target`.
    fn connect(
        &self,
        target: &DeviceTarget,
    ) -> impl Future<Output = Result<Self::Session, GatewayError>> + Send;

    /// Probe the local network for devices, waiting at most `timeout` for
    /// answers.
    ///
    /// A device that answered but failed during the scan is returned as
    /// [`ScanAnswer::Failed`], never dropped. The outer error is reserved
    /// for a scan that could not run at all.
    fn scan(
        &self,
        credential: &Credential,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<ScanAnswer>, GatewayError>> + Send;
}

/// An open connection to one device.
///
/// Callers use it in this order:
///
/// 1. [`update`](Self::update): fetch the device's current state
/// 2. [`turn_on`](Self::turn_on) / [`turn_off`](Self::turn_off), or read
///    [`raw_state`](Self::raw_state)
/// 3. [`close`](Self::close)
pub trait DeviceSession: Send {
    /// Address this session is connected to.
    fn host(&self) -> &str;

    /// Refresh the locally held copy of the device state.
    fn update(&mut self) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn turn_on(&mut self) -> impl Future<Output = Result<(), GatewayError>> + Send;

    fn turn_off(&mut self) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Name of the wire protocol negotiated with the device, when the
    /// library exposes it.
    fn protocol_version(&self) -> Option<&str>;

    /// State reported by the last successful [`update`](Self::update).
    fn raw_state(&self) -> Option<&serde_json::Value>;

    /// Release the connection.
    fn close(self) -> impl Future<Output = Result<(), GatewayError>> + Send
    where
        Self: Sized;

    /// Dispatch to [`turn_on`](Self::turn_on) or [`turn_off`](Self::turn_off).
    fn set_power(
        &mut self,
        state: PowerState,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send {
        async move {
            match state {
                PowerState::On => self.turn_on().await,
                PowerState::Off => self.turn_off().await,
            }
        }
    }
}
