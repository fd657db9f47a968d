//! # plughub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that gateway adapters must implement:
//!   - `DeviceGateway`: open a device session, scan the network
//!   - `DeviceSession`: refresh state, switch power, close
//! - Define the **use-cases** driven by the HTTP adapter:
//!   - `CredentialResolver`: merge request input with configured defaults
//!   - `ControlService`: switch one plug on or off
//!   - `DiscoveryService`: scan and describe every reachable plug
//! - Orchestrate domain objects without knowing *which* vendor library talks
//!   to the devices
//!
//! ## Dependency rule
//! Depends on `plughub-domain` only (plus `tokio::time` for call deadlines).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
