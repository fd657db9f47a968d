//! Power state: the only two things a plug can be asked to do.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Requested or observed power state of a plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// Human-readable confirmation returned once the plug accepted the command.
    #[must_use]
    pub fn confirmation(self) -> &'static str {
        match self {
            Self::On => "device turned on",
            Self::Off => "device turned off",
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::On => "on",
            Self::Off => "off",
        })
    }
}

impl FromStr for PowerState {
    type Err = ValidationError;

    /// Only the exact lowercase words `on` and `off` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(ValidationError::UnsupportedState(other.to_string())),
        }
    }
}
