use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tracing::debug;

/// Events emitted by [`super::ExecutionEngine::ingest_all`].
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted { sources: usize },
    ThrottleWaited { duration: Duration },
    SourceStarted { index: usize, path: PathBuf },
    /// `rows` is `None` when the source failed.
    SourceFinished { index: usize, rows: Option<usize> },
    RunFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
///
/// Called from worker threads, possibly concurrently.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// Forwards every execution event to `tracing` at `DEBUG`.
#[derive(Debug, Default)]
pub struct TracingExecutionObserver;

impl ExecutionObserver for TracingExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        debug!(?event, "execution event");
    }
}

/// Live counters for the current run.
///
/// The engine resets them at the start of each run; callers can snapshot them at any time.
#[derive(Default)]
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    elapsed_ns: AtomicU64,

    sources_started: AtomicU64,
    sources_finished: AtomicU64,
    sources_failed: AtomicU64,
    rows_ingested: AtomicU64,
    throttle_wait_ns: AtomicU64,

    active_sources: AtomicUsize,
    max_active_sources: AtomicUsize,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin_run(&self) {
        self.run_id.fetch_add(1, Ordering::SeqCst);
        for counter in [
            &self.elapsed_ns,
            &self.sources_started,
            &self.sources_finished,
            &self.sources_failed,
            &self.rows_ingested,
            &self.throttle_wait_ns,
        ] {
            counter.store(0, Ordering::SeqCst);
        }
        self.active_sources.store(0, Ordering::SeqCst);
        self.max_active_sources.store(0, Ordering::SeqCst);
    }

    pub(crate) fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns.store(saturating_nanos(elapsed), Ordering::SeqCst);
    }

    pub(crate) fn on_source_start(&self) {
        self.sources_started.fetch_add(1, Ordering::SeqCst);
        let now = self.active_sources.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active_sources.fetch_max(now, Ordering::SeqCst);
    }

    pub(crate) fn on_source_end(&self, rows: Option<usize>) {
        self.sources_finished.fetch_add(1, Ordering::SeqCst);
        self.active_sources.fetch_sub(1, Ordering::SeqCst);
        match rows {
            Some(n) => {
                self.rows_ingested.fetch_add(n as u64, Ordering::SeqCst);
            }
            None => {
                self.sources_failed.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    pub(crate) fn on_throttle_wait(&self, d: Duration) {
        self.throttle_wait_ns.fetch_add(saturating_nanos(d), Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let elapsed_ns = self.elapsed_ns.load(Ordering::SeqCst);
        ExecutionMetricsSnapshot {
            run_id: self.run_id.load(Ordering::SeqCst),
            elapsed: (elapsed_ns > 0).then(|| Duration::from_nanos(elapsed_ns)),
            sources_started: self.sources_started.load(Ordering::SeqCst),
            sources_finished: self.sources_finished.load(Ordering::SeqCst),
            sources_failed: self.sources_failed.load(Ordering::SeqCst),
            rows_ingested: self.rows_ingested.load(Ordering::SeqCst),
            throttle_wait: Duration::from_nanos(self.throttle_wait_ns.load(Ordering::SeqCst)),
            max_active_sources: self.max_active_sources.load(Ordering::SeqCst),
        }
    }
}

fn saturating_nanos(d: Duration) -> u64 {
    d.as_nanos().min(u64::MAX as u128) as u64
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    pub elapsed: Option<Duration>,
    pub sources_started: u64,
    pub sources_finished: u64,
    pub sources_failed: u64,
    pub rows_ingested: u64,
    pub throttle_wait: Duration,
    pub max_active_sources: usize,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={}, sources={}/{} (failed={}), rows_ingested={}, max_active_sources={}, throttle_wait={:?}, elapsed={:?}",
            self.run_id,
            self.sources_finished,
            self.sources_started,
            self.sources_failed,
            self.rows_ingested,
            self.max_active_sources,
            self.throttle_wait,
            self.elapsed
        )
    }
}
