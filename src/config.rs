//! Garbage-collection configuration for the session daemon.
//!
//! Settings are loaded once at startup and treated as an immutable snapshot
//! for the lifetime of the collector. There is no reload path: restarting the
//! daemon is the way to pick up new settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment override for the inactivity timeout (seconds).
/// Useful for shortening the timeout in integration environments.
pub const INACTIVITY_TIMEOUT_ENV: &str = "SESSIOND_INACTIVITY_SECS";

/// Garbage-collection settings, read by the collector once per daemon run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GcConfig {
    /// Percentage chance [0, 100] that a wake cycle triggers a sweep.
    /// Fractional values are honored down to hundredths of a percent.
    #[serde(default = "default_probability")]
    pub probability: f64,

    /// Seconds a session may stay untouched before it is eligible for
    /// eviction. `0` disables eviction entirely (sentinel, not "instant
    /// expiry"). Negative values are rejected at the parse boundary.
    #[serde(default = "default_inactivity_timeout_secs")]
    pub inactivity_timeout_secs: u64,

    /// Directory holding persisted per-session files.
    /// Defaults to `~/.sessiond/sessions/` when absent.
    #[serde(default)]
    pub session_save_path: Option<PathBuf>,

    /// Filename prefix for persisted session files.
    #[serde(default = "default_session_file_prefix")]
    pub session_file_prefix: String,

    /// Seconds the collector sleeps between wake cycles.
    #[serde(default = "default_wake_interval_secs")]
    pub wake_interval_secs: u64,
}

fn default_probability() -> f64 {
    1.0
}

fn default_inactivity_timeout_secs() -> u64 {
    // Matches the classic session.gc_maxlifetime default (24 minutes).
    1440
}

fn default_session_file_prefix() -> String {
    "sess_".to_string()
}

fn default_wake_interval_secs() -> u64 {
    60
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            probability: default_probability(),
            inactivity_timeout_secs: default_inactivity_timeout_secs(),
            session_save_path: None,
            session_file_prefix: default_session_file_prefix(),
            wake_interval_secs: default_wake_interval_secs(),
        }
    }
}

impl GcConfig {
    /// Loads configuration from a YAML file, applies environment overrides,
    /// and validates the result.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file as YAML: {}", path.display()))?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the built-in default configuration.
    pub fn default_config() -> Self {
        const DEFAULT_SESSIOND_YAML: &str = include_str!("../sessiond.yaml");

        serde_yaml::from_str(DEFAULT_SESSIOND_YAML)
            .expect("Failed to parse embedded sessiond.yaml - this is a bug in the sessiond.yaml file")
    }

    /// Resolves the session save path, falling back to the home-based default.
    pub fn save_path(&self) -> Result<PathBuf> {
        match &self.session_save_path {
            Some(path) => Ok(path.clone()),
            None => crate::sessiond_paths::sessions_dir(),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(INACTIVITY_TIMEOUT_ENV) {
            self.inactivity_timeout_secs = raw.parse().with_context(|| {
                format!(
                    "{} must be a non-negative integer, got '{}'",
                    INACTIVITY_TIMEOUT_ENV, raw
                )
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.probability.is_finite() {
            anyhow::bail!("probability must be a finite number");
        }
        if !(0.0..=100.0).contains(&self.probability) {
            anyhow::bail!(
                "probability must be within [0, 100], got {}",
                self.probability
            );
        }
        if self.session_file_prefix.is_empty() {
            anyhow::bail!("session_file_prefix must not be empty");
        }
        if self.wake_interval_secs == 0 {
            anyhow::bail!("wake_interval_secs must be at least 1");
        }
        Ok(())
    }
}
