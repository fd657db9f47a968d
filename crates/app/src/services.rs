//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod control_service;
pub mod credential_resolver;
pub mod discovery_service;

#[cfg(test)]
pub(crate) mod stub;
