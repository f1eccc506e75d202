//! The session garbage collector.
//!
//! A background task that reclaims expired sessions from the shared store,
//! keeping the factory index and the persisted files consistent with it.
//! Each wake cycle rolls a probabilistic trigger; when it fires, the sweep
//! snapshots the store and evicts every session whose idle time exceeds the
//! configured inactivity timeout.
//!
//! Concurrency contract: request tasks keep creating and touching sessions
//! while a sweep runs. The sweep works off a point-in-time snapshot and
//! accepts last-checked-wins semantics: a session touched after its
//! timestamp was read may still be evicted in that cycle. The store and
//! factory synchronize internally, so every removal here tolerates having
//! already lost a race.

use crate::config::GcConfig;
use crate::daemon_log::daemon_log;
use crate::session_gc::factory::SessionFactory;
use crate::session_gc::persistence;
use crate::session_gc::session::Session;
use crate::session_gc::store::SessionStore;
use anyhow::{Context, Result};
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Basis points in 100%. The trigger draws a uniform integer in
/// [0, PROBABILITY_SPAN] and sweeps iff it lands at or below the threshold.
const PROBABILITY_SPAN: u32 = 10_000;

/// Converts a percentage in [0, 100] to basis points in [0, 10_000].
///
/// Fixed-point on purpose: precision is two decimal places of a percent,
/// independent of how the value happened to be formatted in the config file.
pub(crate) fn probability_to_basis_points(probability: f64) -> u32 {
    (probability * 100.0).round() as u32
}

/// The scheduling and sweep-decision engine for session eviction.
///
/// All dependencies arrive at construction; there is no window in which the
/// collector runs partially configured.
pub struct GarbageCollector {
    store: Arc<SessionStore>,
    factory: Arc<SessionFactory>,
    config: GcConfig,
    save_path: PathBuf,
    sweep_threshold: u32,
}

impl GarbageCollector {
    /// Creates a collector over the shared store and factory with an
    /// immutable settings snapshot.
    pub fn new(
        store: Arc<SessionStore>,
        factory: Arc<SessionFactory>,
        config: GcConfig,
    ) -> Result<Self> {
        let save_path = config.save_path()?;
        let sweep_threshold = probability_to_basis_points(config.probability);
        Ok(Self {
            store,
            factory,
            config,
            save_path,
            sweep_threshold,
        })
    }

    /// One-time startup work, invoked before the first wake cycle.
    ///
    /// Re-registers sessions whose persisted files survive from a previous
    /// daemon run, with the file mtime standing in for last activity, so
    /// they age out through the normal sweep path.
    pub async fn bootstrap(&self) -> Result<()> {
        daemon_log(
            "gc",
            &format!(
                "garbage collector starting (build {})",
                env!("SESSIOND_GIT_SHA")
            ),
        );

        std::fs::create_dir_all(&self.save_path).with_context(|| {
            format!(
                "Failed to create session save path: {}",
                self.save_path.display()
            )
        })?;

        let persisted = persistence::scan_persisted_sessions(
            &self.save_path,
            &self.config.session_file_prefix,
        )?;

        let mut restored = 0usize;
        for (id, last_activity) in persisted {
            // A live session beats its stale file.
            if self.store.get(&id).await.is_some() {
                continue;
            }
            let session = Arc::new(Session::restored(id, last_activity));
            self.factory.register(session.id()).await;
            self.store.put(session).await;
            restored += 1;
        }

        if restored > 0 {
            tracing::info!(restored, "re-registered persisted sessions from disk");
            daemon_log(
                "gc",
                &format!("re-registered {} persisted sessions from disk", restored),
            );
        }
        Ok(())
    }

    /// Runs the wake/iterate cycle until a stop signal arrives.
    ///
    /// The stop channel is only consulted between cycles: it can cut a sleep
    /// short, but a sweep that has started always runs to completion, so no
    /// session is ever left half-evicted. Dropping the sender counts as a
    /// stop signal.
    pub async fn run(self, mut stop_rx: mpsc::Receiver<()>) {
        let wake_interval = Duration::from_secs(self.config.wake_interval_secs);
        loop {
            tokio::select! {
                _ = tokio::time::sleep(wake_interval) => {
                    self.iterate().await;
                }
                _ = stop_rx.recv() => {
                    daemon_log("gc", "stop signal received, shutting down");
                    break;
                }
            }
        }
    }

    /// Spawns the collector loop as a background task.
    ///
    /// Returns the task handle and the stop sender; send `()` (or drop the
    /// sender) to stop the loop at the next cycle boundary.
    pub fn spawn(self) -> (JoinHandle<()>, mpsc::Sender<()>) {
        let (stop_tx, stop_rx) = mpsc::channel::<()>(1);
        let handle = tokio::spawn(self.run(stop_rx));
        (handle, stop_tx)
    }

    /// One wake cycle: roll the trigger, sweep if it fires, report either way.
    async fn iterate(&self) {
        let draw = rand::thread_rng().gen_range(0..=PROBABILITY_SPAN);
        let swept = self.sweep_due(draw);

        let evicted = if swept { self.collect_garbage().await } else { 0 };
        let pool_size = self.store.len().await;

        // Profiling sink: best-effort by construction, never fails the cycle.
        daemon_log(
            "gc",
            &format!(
                "sweep {}: evicted {}, session pool size {}",
                if swept { "ran" } else { "skipped" },
                evicted,
                pool_size
            ),
        );
        tracing::debug!(swept, evicted, pool_size, "wake cycle complete");
    }

    /// Whether a given trigger draw fires a sweep.
    ///
    /// Note the inclusive comparison: probability 0 still fires on the single
    /// 0 draw (1 in 10_001), near-zero but not exactly zero, matching the
    /// long-standing behavior of this trigger. Probability 100 always fires.
    pub(crate) fn sweep_due(&self, draw: u32) -> bool {
        draw <= self.sweep_threshold
    }

    /// Sweeps the store once and returns the number of evicted sessions.
    ///
    /// An inactivity timeout of 0 disables eviction entirely. Sessions
    /// created or touched after the snapshot is taken are evaluated on the
    /// next cycle.
    pub async fn collect_garbage(&self) -> usize {
        let inactivity_timeout = self.config.inactivity_timeout_secs;
        if inactivity_timeout == 0 {
            return 0;
        }

        let snapshot = self.store.snapshot().await;
        let now = chrono::Utc::now().timestamp();

        let mut evicted = 0usize;
        for session in snapshot {
            let idle_seconds = now - session.last_activity();
            if idle_seconds <= inactivity_timeout as i64 {
                continue;
            }
            self.evict(&session, idle_seconds).await;
            evicted += 1;
        }
        evicted
    }

    /// Evicts one expired session: factory, store, destruction, file.
    ///
    /// The order is fixed: the factory forgets the id first so no new
    /// handle can be issued for a session about to vanish from the store.
    /// Every step tolerates the entity already being gone, and a filesystem
    /// failure is logged without aborting the rest of the sweep.
    async fn evict(&self, session: &Session, idle_seconds: i64) {
        let id = session.id();

        self.factory.remove_by_session_id(id).await;
        self.store.remove(id).await;

        if !session.is_destroyed() {
            session.destroy(&format!(
                "session {} was inactive for {}s, exceeding the configured timeout of {}s",
                id, idle_seconds, self.config.inactivity_timeout_secs
            ));
        }

        persistence::remove_session_file(&self.save_path, &self.config.session_file_prefix, id);
    }
}
