//! # plughub-domain
//!
//! Pure domain model for the plughub smart-plug service.
//!
//! ## Responsibilities
//! - Define **Credentials** and **Device targets** (who we talk to, and how we
//!   authenticate)
//! - Define **Power states** (`on` / `off`) and their parsing rules
//! - Define **Discovered devices**, the mirrored **Device info** record and the
//!   per-device **Device reports** returned by discovery
//! - Define the error taxonomy shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod credential;
pub mod device;
pub mod power;
pub mod report;
