//! Parallel ingestion of independent sources.
//!
//! A dashboard page usually needs several datasets at once. Each source is parsed on its own, with
//! no shared mutable state, so the engine simply fans requests out over a rayon pool:
//!
//! - results come back in request order, one per request
//! - a failing source does not affect the others
//! - `max_in_flight_sources` bounds how many files are open at once
//! - metrics and observer hooks report progress

mod observer;
mod semaphore;

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::error::IngestionResult;
use crate::ingestion::IngestionRequest;
use crate::types::DataSet;

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, TracingExecutionObserver,
};

use semaphore::Semaphore;

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Number of worker threads used by the engine.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
    /// Upper bound on sources being read concurrently.
    pub max_in_flight_sources: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            num_threads: Some(n),
            max_in_flight_sources: n.max(1),
        }
    }
}

/// Runs many [`IngestionRequest`]s concurrently.
pub struct ExecutionEngine {
    pool: ThreadPool,
    opts: ExecutionOptions,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `max_in_flight_sources == 0`, `num_threads == Some(0)`, or the thread pool
    /// cannot be built.
    pub fn new(opts: ExecutionOptions) -> Self {
        assert!(
            opts.max_in_flight_sources > 0,
            "max_in_flight_sources must be > 0"
        );
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .thread_name(|i| format!("ingest-{i}"))
            .build()
            .expect("failed to build rayon thread pool");

        Self {
            pool,
            opts,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        }
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Ingest every request in parallel; `results[i]` belongs to `requests[i]`.
    pub fn ingest_all(&self, requests: &[IngestionRequest]) -> Vec<IngestionResult<DataSet>> {
        self.pool.install(|| self.ingest_all_impl(requests))
    }

    fn ingest_all_impl(&self, requests: &[IngestionRequest]) -> Vec<IngestionResult<DataSet>> {
        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted {
            sources: requests.len(),
        });

        let sem = Semaphore::new(self.opts.max_in_flight_sources);
        let results: Vec<IngestionResult<DataSet>> = requests
            .par_iter()
            .enumerate()
            .map(|(index, request)| {
                let permit = sem.acquire();
                if permit.waited > Duration::ZERO {
                    self.metrics.on_throttle_wait(permit.waited);
                    self.emit(ExecutionEvent::ThrottleWaited {
                        duration: permit.waited,
                    });
                }

                self.metrics.on_source_start();
                self.emit(ExecutionEvent::SourceStarted {
                    index,
                    path: request.path.clone(),
                });

                let result = request.run();
                let rows = result.as_ref().ok().map(DataSet::row_count);

                self.metrics.on_source_end(rows);
                self.emit(ExecutionEvent::SourceFinished { index, rows });
                drop(permit);
                result
            })
            .collect();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });

        results
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExecutionEngine, ExecutionOptions};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::execution::{ExecutionEvent, ExecutionObserver};
    use crate::ingestion::IngestionRequest;

    fn write_csv(tag: &str, rows: usize) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let path = std::env::temp_dir().join(format!("indicator-data-exec-{tag}-{nanos}.csv"));
        let mut text = String::from("id,value\n");
        for i in 0..rows {
            text.push_str(&format!("{i},{}\n", i * 10));
        }
        std::fs::write(&path, text).unwrap();
        path
    }

    #[derive(Default)]
    struct ConcurrencyObserver {
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    impl ExecutionObserver for ConcurrencyObserver {
        fn on_event(&self, event: &ExecutionEvent) {
            match event {
                ExecutionEvent::SourceStarted { .. } => {
                    let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
                    self.max_active.fetch_max(now, Ordering::SeqCst);
                }
                ExecutionEvent::SourceFinished { .. } => {
                    self.active.fetch_sub(1, Ordering::SeqCst);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn results_are_in_request_order_and_failures_are_isolated() {
        let a = write_csv("a", 3);
        let b = write_csv("b", 5);
        let requests = vec![
            IngestionRequest::new(&a),
            IngestionRequest::new("definitely/missing.csv"),
            IngestionRequest::new(&b),
        ];

        let engine = ExecutionEngine::new(ExecutionOptions {
            num_threads: Some(3),
            max_in_flight_sources: 3,
        });
        let results = engine.ingest_all(&requests);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().row_count(), 3);
        assert!(results[1].as_ref().unwrap_err().is_source_unavailable());
        assert_eq!(results[2].as_ref().unwrap().row_count(), 5);

        let snap = engine.metrics().snapshot();
        assert_eq!(snap.sources_started, 3);
        assert_eq!(snap.sources_finished, 3);
        assert_eq!(snap.sources_failed, 1);
        assert_eq!(snap.rows_ingested, 8);
        assert!(snap.elapsed.is_some());

        let _ = std::fs::remove_file(a);
        let _ = std::fs::remove_file(b);
    }

    #[test]
    fn max_in_flight_sources_throttles_concurrency() {
        let paths: Vec<PathBuf> = (0..8).map(|i| write_csv(&format!("t{i}"), 50)).collect();
        let requests: Vec<IngestionRequest> = paths.iter().map(IngestionRequest::new).collect();

        let observer = Arc::new(ConcurrencyObserver::default());
        let obs_trait: Arc<dyn ExecutionObserver> = observer.clone();
        let engine = ExecutionEngine::new(ExecutionOptions {
            num_threads: Some(4),
            max_in_flight_sources: 1,
        })
        .with_observer(obs_trait);

        let results = engine.ingest_all(&requests);
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(observer.max_active.load(Ordering::SeqCst), 1);
        assert_eq!(engine.metrics().snapshot().max_active_sources, 1);

        for p in paths {
            let _ = std::fs::remove_file(p);
        }
    }

    #[test]
    fn empty_request_list_is_fine() {
        let engine = ExecutionEngine::new(ExecutionOptions::default());
        assert!(engine.ingest_all(&[]).is_empty());
        assert_eq!(engine.metrics().snapshot().run_id, 1);
    }
}
