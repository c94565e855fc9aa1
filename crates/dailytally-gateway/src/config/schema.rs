use std::net::SocketAddr;

use chrono::Weekday;
use serde::Deserialize;
use dailytally_core::error::{MetricsError, Result};

pub const DEFAULT_SERVICE_NAME: &str = "unknown_service";
pub const DEFAULT_RETENTION_DAYS: u32 = 30;
pub const DEFAULT_HISTORICAL_DAYS: u32 = 7;
pub const DEFAULT_CLEANUP_WEEKDAY: Weekday = Weekday::Sat;
pub const DEFAULT_CLEANUP_HOUR: u32 = 3;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MetricsError::BadRequest(format!("server.listen must be a socket address: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:9090".into()
}

/// Metrics collector settings.
///
/// Nothing here is ever rejected: empty or zero values and an hour past 23
/// fall back to defaults in [`MetricsConfig::normalized`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Value of the `service` label on every line.
    #[serde(default)]
    pub service_name: String,

    /// Token for `/admin/<token>/metrics`; empty disables the admin endpoint.
    #[serde(default)]
    pub admin_secret_path: String,

    #[serde(default = "default_retention_days")]
    pub cleanup_retention_days: u32,

    /// Prior days exported alongside today.
    #[serde(default = "default_historical_days")]
    pub historical_days: u32,

    #[serde(default = "default_auto_cleanup")]
    pub auto_cleanup: bool,

    #[serde(default = "default_cleanup_weekday")]
    pub cleanup_weekday: Weekday,

    /// Hour of day, UTC.
    #[serde(default = "default_cleanup_hour")]
    pub cleanup_hour: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.into(),
            admin_secret_path: String::new(),
            cleanup_retention_days: default_retention_days(),
            historical_days: default_historical_days(),
            auto_cleanup: default_auto_cleanup(),
            cleanup_weekday: default_cleanup_weekday(),
            cleanup_hour: default_cleanup_hour(),
        }
    }
}

impl MetricsConfig {
    /// Substitute defaults for unset fields.
    pub fn normalized(mut self) -> Self {
        if self.service_name.trim().is_empty() {
            self.service_name = DEFAULT_SERVICE_NAME.into();
        }
        if self.cleanup_retention_days == 0 {
            self.cleanup_retention_days = DEFAULT_RETENTION_DAYS;
        }
        if self.historical_days == 0 {
            self.historical_days = DEFAULT_HISTORICAL_DAYS;
        }
        if self.cleanup_hour > 23 {
            tracing::warn!(
                cleanup_hour = self.cleanup_hour,
                "cleanup_hour out of range, using default"
            );
            self.cleanup_hour = DEFAULT_CLEANUP_HOUR;
        }
        self
    }

    /// Whether the admin endpoint is enabled.
    pub fn admin_enabled(&self) -> bool {
        !self.admin_secret_path.is_empty()
    }
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}
fn default_historical_days() -> u32 {
    DEFAULT_HISTORICAL_DAYS
}
fn default_auto_cleanup() -> bool {
    true
}
fn default_cleanup_weekday() -> Weekday {
    DEFAULT_CLEANUP_WEEKDAY
}
fn default_cleanup_hour() -> u32 {
    DEFAULT_CLEANUP_HOUR
}
