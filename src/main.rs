use anyhow::{Context, Result};
use clap::Parser;
use fs2::FileExt;
use sessiond::config::GcConfig;
use sessiond::daemon_log::daemon_log;
use sessiond::session_gc::{GarbageCollector, SessionFactory, SessionStore};
use sessiond::sessiond_paths;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "sessiond")]
#[command(about = "Session garbage-collection daemon")]
#[command(version)]
struct Cli {
    /// Path to the YAML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the wake interval in seconds
    #[arg(long)]
    wake_interval: Option<u64>,

    /// Override the session save path
    #[arg(long)]
    save_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GcConfig::load(path)?,
        None => GcConfig::default_config(),
    };
    if let Some(secs) = cli.wake_interval {
        if secs == 0 {
            anyhow::bail!("--wake-interval must be at least 1 second");
        }
        config.wake_interval_secs = secs;
    }
    if let Some(path) = cli.save_path {
        config.session_save_path = Some(path);
    }

    // Singleton guard: one collector daemon per host.
    let lock_path = sessiond_paths::lock_path()?;
    let lock_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;
    lock_file
        .try_lock_exclusive()
        .context("Another sessiond instance is already running")?;

    let pid_path = sessiond_paths::pid_path()?;
    std::fs::write(&pid_path, std::process::id().to_string()).context("Failed to write PID file")?;

    daemon_log(
        "main",
        &format!(
            "sessiond started (pid {}, wake interval {}s)",
            std::process::id(),
            config.wake_interval_secs
        ),
    );

    let store = Arc::new(SessionStore::new());
    let factory = Arc::new(SessionFactory::new());

    let collector = GarbageCollector::new(store, factory, config)?;
    collector.bootstrap().await?;
    let (handle, stop_tx) = collector.spawn();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    daemon_log("main", "shutdown signal received, stopping collector");

    // The collector finishes any in-progress sweep before observing this.
    let _ = stop_tx.send(()).await;
    let _ = handle.await;

    let _ = std::fs::remove_file(&pid_path);
    daemon_log("main", "sessiond stopped");
    Ok(())
}
