//! Per-session file persistence helpers.
//!
//! Each session may have one persisted file at
//! `{save_path}/{prefix}{session_id}`: exact concatenation, no extension.
//! The naming is a compatibility contract with the request-side persistence
//! writer. A file's existence is best-effort: a session that was never
//! persisted has none.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Returns the persisted file path for a session id.
pub fn session_file_path(save_path: &Path, prefix: &str, session_id: &str) -> PathBuf {
    save_path.join(format!("{}{}", prefix, session_id))
}

/// Deletes a session's persisted file if it exists.
///
/// Best-effort: an absent file or a failed deletion is logged and reported
/// as `false`, never propagated; filesystem cleanup must not abort a sweep.
pub fn remove_session_file(save_path: &Path, prefix: &str, session_id: &str) -> bool {
    let path = session_file_path(save_path, prefix, session_id);
    if !path.exists() {
        return false;
    }
    match std::fs::remove_file(&path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                session_id,
                path = %path.display(),
                "failed to delete persisted session file: {}",
                e
            );
            false
        }
    }
}

/// Scans the save path for persisted session files.
///
/// Returns `(session_id, last_activity)` pairs, where the file mtime stands
/// in for the last-activity timestamp. Used at daemon startup to re-register
/// sessions left behind by a previous run so they age out normally.
///
/// Entries that don't match the prefix are ignored. Entries whose metadata
/// can't be read are skipped with a warning rather than failing the scan.
pub fn scan_persisted_sessions(save_path: &Path, prefix: &str) -> Result<Vec<(String, i64)>> {
    let entries = std::fs::read_dir(save_path)
        .with_context(|| format!("Failed to read session save path: {}", save_path.display()))?;

    let mut sessions = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("skipping unreadable directory entry: {}", e);
                continue;
            }
        };

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(session_id) = name.strip_prefix(prefix) else {
            continue;
        };
        if session_id.is_empty() {
            continue;
        }

        let last_activity = match entry.metadata().and_then(|m| m.modified()) {
            Ok(mtime) => match mtime.duration_since(UNIX_EPOCH) {
                Ok(elapsed) => elapsed.as_secs() as i64,
                Err(_) => 0,
            },
            Err(e) => {
                tracing::warn!(file = name, "skipping session file without mtime: {}", e);
                continue;
            }
        };

        sessions.push((session_id.to_string(), last_activity));
    }

    Ok(sessions)
}
