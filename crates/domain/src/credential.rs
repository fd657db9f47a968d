//! Credentials and device targets.

use std::fmt;

use crate::error::{PlugHubError, ValidationError};

/// Identifier/secret pair used to authenticate against a plug.
///
/// The secret is never shown by [`Debug`] and the type does not implement
/// `Serialize`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    identifier: String,
    secret: String,
}

impl Credential {
    /// Build a credential from an account identifier (usually an email) and
    /// its password.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingCredential`] when either part is empty.
    pub fn new(
        identifier: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, PlugHubError> {
        let identifier = identifier.into();
        let secret = secret.into();
        if identifier.is_empty() {
            return Err(ValidationError::MissingCredential("email").into());
        }
        if secret.is_empty() {
            return Err(ValidationError::MissingCredential("password").into());
        }
        Ok(Self { identifier, secret })
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"***")
            .finish()
    }
}

/// Where to connect and how to authenticate, for exactly one device call.
#[derive(Debug, Clone)]
pub struct DeviceTarget {
    host: String,
    credential: Credential,
}

impl DeviceTarget {
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingHost`] when `host` is blank.
    pub fn new(host: impl Into<String>, credential: Credential) -> Result<Self, PlugHubError> {
        let host = host.into();
        let host = host.trim();
        if host.is_empty() {
            return Err(ValidationError::MissingHost.into());
        }
        Ok(Self {
            host: host.to_string(),
            credential,
        })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new("me@example.com", "hunter2").unwrap()
    }

    #[test]
    fn should_build_credential_when_both_parts_present() {
        let cred = credential();
        assert_eq!(cred.identifier(), "me@example.com");
        assert_eq!(cred.secret(), "hunter2");
    }

    #[test]
    fn should_reject_empty_identifier() {
        let result = Credential::new("", "hunter2");
        assert!(matches!(
            result,
            Err(PlugHubError::Validation(ValidationError::MissingCredential(
                "email"
            )))
        ));
    }

    #[test]
    fn should_reject_empty_secret() {
        let result = Credential::new("me@example.com", "");
        assert!(matches!(
            result,
            Err(PlugHubError::Validation(ValidationError::MissingCredential(
                "password"
            )))
        ));
    }

    #[test]
    fn should_redact_secret_in_debug_output() {
        let debug = format!("{:?}", credential());
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn should_trim_target_host() {
        let target = DeviceTarget::new(" 192.168.1.20 ", credential()).unwrap();
        assert_eq!(target.host(), "192.168.1.20");
        assert_eq!(target.credential().identifier(), "me@example.com");
    }

    #[test]
    fn should_reject_blank_host() {
        let result = DeviceTarget::new("   ", credential());
        assert!(matches!(
            result,
            Err(PlugHubError::Validation(ValidationError::MissingHost))
        ));
    }
}
