//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    initial_balance = %config.ledger.initial_balance,
    reminders = config.reminders.enabled,
    results = config.results.enabled,
    data_dir = %config.persistence.data_dir,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-negative starting balance
/// - Positive reminder interval
/// - A base URL whenever the result feed is enabled
/// - Non-empty paths and addresses
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.tracker.name.trim().is_empty(),
    "tracker.name must not be empty"
  );

  // Ledger validation
  anyhow::ensure!(
    config.ledger.initial_balance >= Decimal::ZERO,
    "ledger.initial_balance must not be negative, got {}",
    config.ledger.initial_balance
  );

  // Reminder validation
  anyhow::ensure!(
    config.reminders.check_interval_seconds > 0,
    "reminders.check_interval_seconds must be positive"
  );

  // Result feed validation
  if config.results.enabled {
    anyhow::ensure!(
      config.results.base_url.starts_with("http://")
        || config.results.base_url.starts_with("https://"),
      "results.base_url must be an http(s) URL when results are enabled, got {:?}",
      config.results.base_url
    );
    anyhow::ensure!(
      config.results.timeout_seconds > 0,
      "results.timeout_seconds must be positive"
    );
  }

  anyhow::ensure!(
    !config.persistence.data_dir.is_empty(),
    "persistence.data_dir must not be empty"
  );
  anyhow::ensure!(
    !config.server.bind_address.is_empty(),
    "server.bind_address must not be empty"
  );

  Ok(())
}
