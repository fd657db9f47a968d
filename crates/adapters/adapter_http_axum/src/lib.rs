//! # plughub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API: `/device/{state}` switches one plug, `/devices`
//!   scans the network and reports every plug found
//! - Resolve the per-request host and credential against the configured
//!   defaults before calling a service
//! - Map [`PlugHubError`](plughub_domain::error::PlugHubError) into
//!   `{"detail": ...}` responses
//! - Apply the CORS allow-list for browser clients
//!
//! ## Dependency rule
//! Depends on `plughub-app` (for port traits and services) and
//! `plughub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod cors;
pub mod error;
pub mod router;
pub mod state;
