//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `plughub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values; `main` loads `.env` into the environment
//! before this runs.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use plughub_adapter_tapo::{MAX_SCAN_SECS, TapoConfig};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Defaults used when a request leaves out the host or credential.
    pub device: DeviceConfig,
    /// Gateway selection and call deadlines.
    pub gateway: GatewayConfig,
    /// Tapo-specific settings.
    pub tapo: TapoConfig,
    /// Browser origins allowed to call the API.
    pub cors: CorsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub host: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("host", &self.host)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Which device gateway serves the requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Real Tapo devices on the local network.
    #[default]
    Tapo,
    /// In-process demo plugs.
    Virtual,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tapo" => Ok(Self::Tapo),
            "virtual" => Ok(Self::Virtual),
            other => Err(ConfigError::Validation(format!(
                "unknown gateway backend '{other}', use 'tapo' or 'virtual'"
            ))),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub backend: Backend,
    /// How long the discovery probe listens for answers.
    pub scan_timeout_secs: u64,
    /// Deadline for one device call (connect, refresh and switch).
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    #[must_use]
    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub origins: Vec<String>,
}

impl Config {
    /// Load configuration from `plughub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("plughub.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("DEVICE_HOST") {
            self.device.host = Some(val);
        }
        if let Some(val) = lookup("EMAIL") {
            self.device.email = Some(val);
        }
        if let Some(val) = lookup("PASSWORD") {
            self.device.password = Some(val);
        }
        if let Some(val) = lookup("PLUGHUB_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("PLUGHUB_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = lookup("PLUGHUB_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("PLUGHUB_GATEWAY") {
            self.gateway.backend = val.parse()?;
        }
        if let Some(val) = lookup("PLUGHUB_CORS_ORIGINS") {
            self.cors.origins = val
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(val) = lookup("PLUGHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.gateway.scan_timeout_secs == 0 || self.gateway.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "gateway timeouts must be non-zero".to_string(),
            ));
        }
        if self.gateway.scan_timeout_secs > MAX_SCAN_SECS {
            return Err(ConfigError::Validation(format!(
                "scan timeout must be at most {MAX_SCAN_SECS} seconds"
            )));
        }
        // a wildcard cannot be combined with credentials
        if self.cors.origins.iter().any(|origin| origin == "*") {
            return Err(ConfigError::Validation(
                "cors origins must be listed explicitly, '*' is not allowed".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "plughubd=info,plughub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            scan_timeout_secs: 5,
            request_timeout_secs: 10,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
