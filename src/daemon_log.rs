//! Shared debug/profiling logging utility for daemon components.

use std::io::Write;

/// Best-effort logging utility for daemon components.
///
/// The `tag` parameter identifies the source module (e.g., "gc", "main")
/// to aid debugging.
///
/// Writes to ~/.sessiond/daemon-debug.log. Every failure path is swallowed:
/// a broken log file must never affect the sweep cycle that reports to it.
pub fn daemon_log(tag: &str, msg: &str) {
    if let Ok(home) = crate::sessiond_paths::sessiond_home_dir() {
        let log_path = home.join("daemon-debug.log");
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] [{}] {}", now, tag, msg);
        }
    }
}
