//! Loading service configuration (CEP lookup endpoint + date display offset) from TOML.
//!
//! See `ServiceConfig` for the expected schema. Every section is optional:
//!
//! ```toml
//! [cep]
//! base_url = "https://viacep.com.br/ws"
//! timeout_secs = 10
//!
//! [dates]
//! utc_offset_minutes = -180
//! ```

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CEP_BASE_URL: &str = "https://viacep.com.br/ws";

#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ServiceConfig {
  #[serde(default)]
  pub cep: CepConfig,
  #[serde(default)]
  pub dates: DatesConfig,
}

/// Where and how long to wait for postal-code lookups.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CepConfig {
  pub base_url: String,
  pub timeout_secs: u64,
}

impl Default for CepConfig {
  fn default() -> Self {
    Self { base_url: DEFAULT_CEP_BASE_URL.into(), timeout_secs: 10 }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatesConfig {
  /// Minutes east of UTC used to display instants. Brasília is -180.
  pub utc_offset_minutes: i32,
}

impl Default for DatesConfig {
  fn default() -> Self {
    Self { utc_offset_minutes: -180 }
  }
}

impl ServiceConfig {
  pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }

  /// Load from FORMKIT_CONFIG_PATH (defaults if unset or broken), then apply
  /// the CEP_BASE_URL override.
  pub fn from_env() -> Self {
    let mut cfg = load_service_config_from_env().unwrap_or_default();
    if let Ok(url) = std::env::var("CEP_BASE_URL") {
      if !url.trim().is_empty() {
        cfg.cep.base_url = url;
      }
    }
    cfg
  }
}

/// Attempt to load `ServiceConfig` from FORMKIT_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_service_config_from_env() -> Option<ServiceConfig> {
  let path = std::env::var("FORMKIT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match ServiceConfig::from_toml(&s) {
      Ok(cfg) => {
        info!(target: "formkit", %path, "Loaded service config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "formkit", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "formkit", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_gives_defaults() {
    let cfg = ServiceConfig::from_toml("").unwrap();
    assert_eq!(cfg, ServiceConfig::default());
    assert_eq!(cfg.cep.base_url, DEFAULT_CEP_BASE_URL);
    assert_eq!(cfg.cep.timeout_secs, 10);
    assert_eq!(cfg.dates.utc_offset_minutes, -180);
  }

  #[test]
  fn partial_sections_keep_other_defaults() {
    let cfg = ServiceConfig::from_toml("[cep]\ntimeout_secs = 3\n").unwrap();
    assert_eq!(cfg.cep.timeout_secs, 3);
    assert_eq!(cfg.cep.base_url, DEFAULT_CEP_BASE_URL);

    let cfg = ServiceConfig::from_toml("[dates]\nutc_offset_minutes = 60\n").unwrap();
    assert_eq!(cfg.dates.utc_offset_minutes, 60);
  }

  #[test]
  fn wrong_types_are_rejected() {
    assert!(ServiceConfig::from_toml("[cep]\ntimeout_secs = \"soon\"\n").is_err());
  }
}
