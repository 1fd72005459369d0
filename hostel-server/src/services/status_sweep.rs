//! Status sweeper
//!
//! Periodically promotes stale `pending` records to `accepted`:
//!
//! - every pending leave request, regardless of age
//! - every pending complaint created at least `complaint_dwell` ago
//!
//! Each tick is an independent, idempotent attempt. Store failures are logged
//! and the next tick simply tries again.

use std::time::Duration;

use sqlx::SqlitePool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::db::repository::{complaint, leave};

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub leaves_accepted: u64,
    pub complaints_accepted: u64,
}

/// Periodic promoter of pending leave requests and complaints
#[derive(Debug, Clone)]
pub struct StatusSweeper {
    pool: SqlitePool,
    interval: Duration,
    complaint_dwell: Duration,
}

impl StatusSweeper {
    pub fn new(pool: SqlitePool, interval: Duration, complaint_dwell: Duration) -> Self {
        Self {
            pool,
            interval,
            complaint_dwell,
        }
    }

    /// Run one sweep as of `now` (epoch millis). Never fails.
    pub async fn sweep_once(&self, now: i64) -> SweepReport {
        let mut report = SweepReport::default();

        match leave::accept_pending(&self.pool, now).await {
            Ok(n) => report.leaves_accepted = n,
            Err(e) => tracing::error!(error = %e, "Leave status sweep failed"),
        }

        let dwell_ms = i64::try_from(self.complaint_dwell.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now.saturating_sub(dwell_ms);
        match complaint::accept_pending_older_than(&self.pool, cutoff, now).await {
            Ok(n) => report.complaints_accepted = n,
            Err(e) => tracing::error!(error = %e, "Complaint status sweep failed"),
        }

        if report != SweepReport::default() {
            tracing::info!(
                leaves = report.leaves_accepted,
                complaints = report.complaints_accepted,
                "Status sweep accepted pending records"
            );
        }
        report
    }

    /// Sweep every `interval` until `shutdown` is cancelled.
    ///
    /// The first sweep runs immediately.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            complaint_dwell_secs = self.complaint_dwell.as_secs(),
            "Status sweeper started"
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    self.sweep_once(shared::util::now_millis()).await;
                }
            }
        }

        tracing::info!("Status sweeper stopped");
    }
}
