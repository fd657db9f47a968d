//! Credential resolver: merges per-request input with configured defaults.
//!
//! Built once at startup from configuration and shared read-only by every
//! request. A value given in the request always wins; blank values count as
//! absent.

use plughub_domain::credential::{Credential, DeviceTarget};
use plughub_domain::error::{PlugHubError, ValidationError};

/// Fallback host and credential used when a request does not carry its own.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    host: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl CredentialResolver {
    /// Create a resolver from configured defaults.
    #[must_use]
    pub fn new(host: Option<String>, email: Option<String>, password: Option<String>) -> Self {
        Self {
            host: non_blank(host),
            email: non_blank(email),
            password: non_blank(password),
        }
    }

    /// Whether a default host is configured.
    #[must_use]
    pub fn has_default_host(&self) -> bool {
        self.host.is_some()
    }

    /// Resolve the credential for one request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingCredential`] when neither the request
    /// nor the configuration provides the email or the password.
    pub fn credential(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Credential, PlugHubError> {
        let email = non_blank(email)
            .or_else(|| self.email.clone())
            .ok_or(ValidationError::MissingCredential("email"))?;
        let password = non_blank(password)
            .or_else(|| self.password.clone())
            .ok_or(ValidationError::MissingCredential("password"))?;
        Credential::new(email, password)
    }

    /// Resolve the full connection target for one request.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingHost`] when no host is available,
    /// or the errors of [`credential`](Self::credential).
    pub fn target(
        &self,
        host: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<DeviceTarget, PlugHubError> {
        let host = non_blank(host)
            .or_else(|| self.host.clone())
            .ok_or(ValidationError::MissingHost)?;
        let credential = self.credential(email, password)?;
        DeviceTarget::new(host, credential)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
