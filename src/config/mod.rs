//! Configuration Module - TOML-based Tracker Configuration
//!
//! Loads and validates configuration from `config.toml`. Starting
//! balance, reminder cadence, result feed endpoint, data directory and
//! HTTP bind address are externalized here - nothing is hardcoded in the
//! domain layer.

pub mod loader;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level tracker configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the service begins operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Service identity and logging.
  pub tracker: TrackerConfig,
  /// Ledger defaults.
  #[serde(default)]
  pub ledger: LedgerConfig,
  /// Reminder scheduling.
  #[serde(default)]
  pub reminders: ReminderConfig,
  /// Match result feed.
  #[serde(default)]
  pub results: ResultsConfig,
  /// Persistence configuration.
  #[serde(default)]
  pub persistence: PersistenceConfig,
  /// HTTP API server.
  #[serde(default)]
  pub server: ServerConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
  /// Human-readable service name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
  /// Cash balance of a brand-new ledger (ignored once a snapshot exists).
  #[serde(default = "default_initial_balance")]
  pub initial_balance: Decimal,
  /// Currency label reported by `GET /summary` and the startup log.
  #[serde(default = "default_currency")]
  pub currency: String,
}

/// Reminder scheduler configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
  /// Run the reminder scheduler.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// How often due reminders are checked (seconds).
  #[serde(default = "default_check_interval")]
  pub check_interval_seconds: u64,
  /// Lead time used when a bet does not specify one.
  #[serde(default = "default_lead_minutes")]
  pub default_lead_minutes: u32,
}

/// Match result feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsConfig {
  /// Enable automatic result lookup.
  #[serde(default)]
  pub enabled: bool,
  /// Base URL of the result service.
  #[serde(default)]
  pub base_url: String,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// Directory for the ledger snapshot and audit log.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Address the bet API binds to.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
}

impl Default for LedgerConfig {
  fn default() -> Self {
    Self {
      initial_balance: default_initial_balance(),
      currency: default_currency(),
    }
  }
}

impl Default for ReminderConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      check_interval_seconds: default_check_interval(),
      default_lead_minutes: default_lead_minutes(),
    }
  }
}

impl Default for ResultsConfig {
  fn default() -> Self {
    Self {
      enabled: false,
      base_url: String::new(),
      timeout_seconds: default_timeout(),
    }
  }
}

impl Default for PersistenceConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
    }
  }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_address: default_bind_address(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}

fn default_initial_balance() -> Decimal {
  Decimal::ONE_THOUSAND
}

fn default_currency() -> String {
  "EUR".to_string()
}

fn default_check_interval() -> u64 {
  60
}

fn default_lead_minutes() -> u32 {
  30
}

fn default_timeout() -> u64 {
  10
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_bind_address() -> String {
  "127.0.0.1:8080".to_string()
}
