//! Metrics collection for job runs

use std::collections::HashMap;

/// Counters collected by the job runner
///
/// Tracks completed, aborted and failed runs per job type, and repositories
/// skipped by sweeps.
#[derive(Debug, Clone, Default)]
pub struct RunnerMetrics {
    /// Runs that completed, per job type
    pub completed: HashMap<String, usize>,

    /// Runs aborted because of bad configuration, per job type
    pub aborted: HashMap<String, usize>,

    /// Runs that failed in a delegate, per job type
    pub failed: HashMap<String, usize>,

    /// Repositories skipped across all sweeps
    pub skipped_repositories: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u128,
}

impl RunnerMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed run
    pub fn record_completed(&mut self, job: &str) {
        *self.completed.entry(job.to_string()).or_insert(0) += 1;
    }

    /// Record an aborted run
    pub fn record_aborted(&mut self, job: &str) {
        *self.aborted.entry(job.to_string()).or_insert(0) += 1;
    }

    /// Record a failed run
    pub fn record_failed(&mut self, job: &str) {
        *self.failed.entry(job.to_string()).or_insert(0) += 1;
    }

    /// Record repositories skipped by a sweep
    pub fn record_skipped(&mut self, count: usize) {
        self.skipped_repositories += count;
    }

    /// Total completed runs
    pub fn total_completed(&self) -> usize {
        self.completed.values().sum()
    }

    /// Total aborted runs
    pub fn total_aborted(&self) -> usize {
        self.aborted.values().sum()
    }

    /// Total failed runs
    pub fn total_failed(&self) -> usize {
        self.failed.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        self.completed.clear();
        self.aborted.clear();
        self.failed.clear();
        self.skipped_repositories = 0;
        self.total_runtime_ms = 0;
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Runner Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Completed runs: {}", self.total_completed()),
            format!("Aborted runs: {}", self.total_aborted()),
            format!("Failed runs: {}", self.total_failed()),
            format!("Skipped repositories: {}", self.skipped_repositories),
            format!("Total runtime: {}ms", self.total_runtime_ms),
        ];

        for (label, counts) in [
            ("Completed", &self.completed),
            ("Aborted", &self.aborted),
            ("Failed", &self.failed),
        ] {
            if counts.is_empty() {
                continue;
            }
            let mut jobs: Vec<_> = counts.iter().collect();
            jobs.sort();
            lines.push(String::new());
            lines.push(format!("{} by job:", label));
            for (job, count) in jobs {
                lines.push(format!("  {}: {}", job, count));
            }
        }

        lines.join("\n")
    }
}
