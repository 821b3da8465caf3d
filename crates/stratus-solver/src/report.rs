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

//! Comparison reports.
//!
//! A `ComparisonReport` keeps, per algorithm, either the full report of a
//! completed run (the sampled convergence series, a summary of the best
//! assignment found, and the search outcome) or the configuration error that
//! halted the algorithm. Its `Display` impl prints the performance summary
//! table.

use crate::algorithm::Algorithm;
use stratus_model::error::ConfigurationError;
use stratus_search::{record::IterationRecord, result::SearchOutcome};

/// Key figures of the best assignment an algorithm found.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlgorithmSummary {
    pub best_score: f64,
    pub baseline_score: f64,
    pub response_time: f64,
    /// Fraction of tasks served, in `[0, 1]`.
    pub throughput: f64,
    /// Fraction of failed nodes left without load, in `[0, 1]`.
    pub fault_tolerance: f64,
    pub energy: f64,
    pub active_nodes: usize,
    pub completed_tasks: usize,
    pub task_count: usize,
    /// Iteration in which the best assignment was found.
    pub found_at: u64,
    pub iterations: u64,
    pub evaluations: u64,
    /// Nodes lost to scheduled failures while the algorithm ran.
    pub failed_during_run: u64,
}

impl AlgorithmSummary {
    /// Summarizes a finished run.
    pub fn from_outcome(outcome: &SearchOutcome) -> Self {
        let best = outcome.best();
        let metrics = best.metrics();
        let statistics = outcome.statistics();
        Self {
            best_score: best.score(),
            baseline_score: outcome.baseline_score(),
            response_time: metrics.response_time,
            throughput: metrics.throughput,
            fault_tolerance: metrics.fault_tolerance,
            energy: metrics.energy,
            active_nodes: metrics.active_nodes,
            completed_tasks: metrics.served_tasks,
            task_count: metrics.num_tasks(),
            found_at: best.iteration(),
            iterations: statistics.iterations,
            evaluations: statistics.evaluations,
            failed_during_run: statistics.failed_nodes,
        }
    }
}

/// Everything one completed algorithm run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmReport {
    pub algorithm: Algorithm,
    pub records: Vec<IterationRecord>,
    pub summary: AlgorithmSummary,
    pub outcome: SearchOutcome,
}

impl AlgorithmReport {
    #[inline]
    pub fn new(
        algorithm: Algorithm,
        records: Vec<IterationRecord>,
        outcome: SearchOutcome,
    ) -> Self {
        Self {
            algorithm,
            records,
            summary: AlgorithmSummary::from_outcome(&outcome),
            outcome,
        }
    }
}

/// Result of one algorithm within a comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmEntry {
    pub algorithm: Algorithm,
    pub result: Result<AlgorithmReport, ConfigurationError>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonReport {
    node_count: usize,
    task_count: usize,
    failed_nodes: usize,
    entries: Vec<AlgorithmEntry>,
}

impl ComparisonReport {
    #[inline]
    pub fn new(
        node_count: usize,
        task_count: usize,
        failed_nodes: usize,
        entries: Vec<AlgorithmEntry>,
    ) -> Self {
        Self {
            node_count,
            task_count,
            failed_nodes,
            entries,
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn task_count(&self) -> usize {
        self.task_count
    }

    #[inline]
    pub fn failed_nodes(&self) -> usize {
        self.failed_nodes
    }

    #[inline]
    pub fn entries(&self) -> &[AlgorithmEntry] {
        &self.entries
    }

    /// The entry of `algorithm`, if it was part of the comparison.
    pub fn entry(&self, algorithm: Algorithm) -> Option<&AlgorithmEntry> {
        self.entries.iter().find(|e| e.algorithm == algorithm)
    }

    /// The report of `algorithm` if it completed.
    pub fn report(&self, algorithm: Algorithm) -> Option<&AlgorithmReport> {
        self.entry(algorithm).and_then(|e| e.result.as_ref().ok())
    }

    /// Reports of every completed algorithm, in comparison order.
    pub fn completed(&self) -> impl Iterator<Item = &AlgorithmReport> {
        self.entries.iter().filter_map(|e| e.result.as_ref().ok())
    }

    /// The completed algorithm with the lowest best score; ties go to the earlier one.
    pub fn winner(&self) -> Option<Algorithm> {
        self.completed()
            .reduce(|best, next| {
                if next.summary.best_score < best.summary.best_score {
                    next
                } else {
                    best
                }
            })
            .map(|r| r.algorithm)
    }
}

impl std::fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Performance Summary ({} nodes, {} tasks, {} failed):",
            self.node_count, self.task_count, self.failed_nodes
        )?;
        writeln!(
            f,
            "{:<24} | {:<10} | {:<11} | {:<8} | {:<12} | {:<12} | Completed",
            "Algorithm", "Best", "Throughput%", "Fault%", "Response", "Energy"
        )?;
        writeln!(f, "{}", "-".repeat(105))?;
        for entry in &self.entries {
            match &entry.result {
                Ok(report) => {
                    let s = &report.summary;
                    writeln!(
                        f,
                        "{:<24} | {:>10.4} | {:>10.1}% | {:>7.1}% | {:>12.4} | {:>12.2} | {:>4}/{}",
                        entry.algorithm.name(),
                        s.best_score,
                        s.throughput * 100.0,
                        s.fault_tolerance * 100.0,
                        s.response_time,
                        s.energy,
                        s.completed_tasks,
                        s.task_count
                    )?;
                }
                Err(error) => {
                    writeln!(f, "{:<24} | halted: {}", entry.algorithm.name(), error)?;
                }
            }
        }
        Ok(())
    }
}
