//! Centralized home-based storage paths for all sessiond persistence.
//!
//! This module provides helpers for unified storage under `~/.sessiond/`:
//! - `sessions/` - Persisted per-session files (default save path)
//! - `daemon-debug.log` - Best-effort debug/profiling log
//! - `sessiond.pid` - Pid of the running daemon
//! - `sessiond.lock` - Singleton lock file

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// The name of the sessiond home directory.
const SESSIOND_DIR: &str = ".sessiond";

/// Returns the home-based sessiond directory: `~/.sessiond/`
///
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if:
/// - Home directory cannot be determined
/// - Directory creation fails
pub fn sessiond_home_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory for session storage")?;
    let sessiond_dir = home.join(SESSIOND_DIR);
    fs::create_dir_all(&sessiond_dir).with_context(|| {
        format!(
            "Failed to create sessiond directory: {}",
            sessiond_dir.display()
        )
    })?;
    Ok(sessiond_dir)
}

/// Returns the default session save path: `~/.sessiond/sessions/`
///
/// Creates the directory if it doesn't exist.
pub fn sessions_dir() -> Result<PathBuf> {
    let dir = sessiond_home_dir()?.join("sessions");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create sessions directory: {}", dir.display()))?;
    Ok(dir)
}

/// Returns the pid file path: `~/.sessiond/sessiond.pid`
pub fn pid_path() -> Result<PathBuf> {
    Ok(sessiond_home_dir()?.join("sessiond.pid"))
}

/// Returns the singleton lock file path: `~/.sessiond/sessiond.lock`
pub fn lock_path() -> Result<PathBuf> {
    Ok(sessiond_home_dir()?.join("sessiond.lock"))
}
