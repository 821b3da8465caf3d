// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Progress logging through `tracing`.
//!
//! `LogMonitor` emits a `debug!` line every `interval` iterations and whenever
//! the best-so-far record improves, an `info!` line whenever nodes fail
//! mid-run, and a single `info!` summary when the run ends. Installing a subscriber is left to the caller.

use crate::{
    incumbent::BestSoFar, monitor::search_monitor::SearchMonitor, population::Population,
    record::IterationRecord, stats::SearchStatistics,
};
use stratus_model::index::NodeIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMonitor {
    strategy: String,
    interval: u64,
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl LogMonitor {
    const DEFAULT_INTERVAL: u64 = 10;

    /// Creates a monitor that logs every `interval` iterations.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[inline]
    pub fn new(interval: u64) -> Self {
        assert!(interval > 0, "called `LogMonitor::new` with zero interval");
        Self {
            strategy: String::new(),
            interval,
        }
    }

    #[inline]
    pub fn interval(&self) -> u64 {
        self.interval
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_start(&mut self, strategy: &str, population: &Population, best: &BestSoFar) {
        self.strategy = strategy.to_string();
        tracing::debug!(
            strategy = %self.strategy,
            population = population.len(),
            baseline = best.score(),
            "search started"
        );
    }

    fn on_iteration(&mut self, record: &IterationRecord, statistics: &SearchStatistics) {
        if record.iteration % self.interval == 0 {
            tracing::debug!(
                strategy = %self.strategy,
                iteration = record.iteration,
                best = record.best_score,
                throughput = record.throughput,
                evaluations = statistics.evaluations,
                "progress"
            );
        }
    }

    fn on_new_best(&mut self, best: &BestSoFar, _statistics: &SearchStatistics) {
        tracing::debug!(
            strategy = %self.strategy,
            iteration = best.iteration(),
            best = best.score(),
            "new best"
        );
    }

    fn on_failures(
        &mut self,
        iteration: u64,
        failed: &[NodeIndex],
        statistics: &SearchStatistics,
    ) {
        tracing::info!(
            strategy = %self.strategy,
            iteration,
            failed = failed.len(),
            failed_total = statistics.failed_nodes,
            "nodes failed"
        );
    }

    fn on_end(&mut self, best: &BestSoFar, statistics: &SearchStatistics) {
        tracing::info!(
            strategy = %self.strategy,
            best = best.score(),
            found_at = best.iteration(),
            iterations = statistics.iterations,
            evaluations = statistics.evaluations,
            improvements = statistics.improvements,
            guard_hits = statistics.guard_hits,
            failed_nodes = statistics.failed_nodes,
            elapsed_ms = statistics.time_total.as_millis() as u64,
            "search finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "called `LogMonitor::new` with zero interval")]
    fn test_zero_interval_panics() {
        let _ = LogMonitor::new(0);
    }

    #[test]
    fn test_default_interval() {
        assert_eq!(LogMonitor::default().interval(), 10);
    }
}
