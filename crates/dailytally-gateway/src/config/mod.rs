//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use dailytally_core::error::{MetricsError, Result};

pub use schema::{GatewayConfig, MetricsConfig, ServerSection};

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let mut cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    cfg.metrics = cfg.metrics.normalized();
    Ok(cfg)
}
