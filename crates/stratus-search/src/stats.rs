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

//! Statistics of a single search run.
//!
//! Counters use saturating arithmetic so that long runs can never trap on
//! overflow. The engine updates them once per iteration and copies the
//! oracle's evaluation and guard counters in before handing them to monitors.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchStatistics {
    /// Number of completed step iterations (the baseline evaluation is not counted).
    pub iterations: u64,

    /// Number of assignments evaluated against the environment.
    pub evaluations: u64,

    /// Number of times the best-so-far record was replaced.
    pub improvements: u64,

    /// Number of scores the numeric guard had to clamp.
    pub guard_hits: u64,

    /// Number of nodes failed by scheduled failure events during the run.
    pub failed_nodes: u64,

    /// Total time taken by the run.
    pub time_total: Duration,
}

impl SearchStatistics {
    /// Called once per completed step.
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    /// Called when the best-so-far record improves.
    #[inline]
    pub fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    /// Called when a failure event took `count` nodes offline.
    #[inline]
    pub fn on_failures(&mut self, count: usize) {
        self.failed_nodes = self.failed_nodes.saturating_add(count as u64);
    }

    #[inline]
    pub fn set_evaluations(&mut self, evaluations: u64) {
        self.evaluations = evaluations;
    }

    #[inline]
    pub fn set_guard_hits(&mut self, guard_hits: u64) {
        self.guard_hits = guard_hits;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Mean number of evaluations per completed iteration, or `0.0` before the first step.
    #[inline]
    pub fn evaluations_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.evaluations as f64 / self.iterations as f64
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "   Iterations:    {}", self.iterations)?;
        writeln!(f, "   Evaluations:   {}", self.evaluations)?;
        writeln!(f, "   Improvements:  {}", self.improvements)?;
        writeln!(f, "   Guard Hits:    {}", self.guard_hits)?;
        writeln!(f, "   Failed Nodes:  {}", self.failed_nodes)?;
        writeln!(f, "   Total Time:    {:?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_saturate() {
        let mut stats = SearchStatistics {
            iterations: u64::MAX,
            improvements: u64::MAX,
            ..SearchStatistics::default()
        };
        stats.on_iteration();
        stats.on_improvement();
        stats.on_failures(3);
        assert_eq!(stats.failed_nodes, 3);
        assert_eq!(stats.iterations, u64::MAX);
        assert_eq!(stats.improvements, u64::MAX);
    }

    #[test]
    fn test_evaluations_per_iteration() {
        let mut stats = SearchStatistics::default();
        assert_eq!(stats.evaluations_per_iteration(), 0.0);
        stats.on_iteration();
        stats.on_iteration();
        stats.set_evaluations(40);
        assert_eq!(stats.evaluations_per_iteration(), 20.0);
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SearchStatistics {
            iterations: 3,
            evaluations: 60,
            improvements: 2,
            guard_hits: 0,
            failed_nodes: 4,
            time_total: Duration::from_millis(5),
        };
        let rendered = stats.to_string();
        assert!(rendered.contains("Search Statistics:"), "missing header");
        assert!(rendered.contains("Iterations:    3"), "missing iterations");
        assert!(rendered.contains("Evaluations:   60"), "missing evaluations");
        assert!(rendered.contains("Improvements:  2"), "missing improvements");
        assert!(rendered.contains("Guard Hits:    0"), "missing guard hits");
        assert!(rendered.contains("Failed Nodes:  4"), "missing failed nodes");
    }
}
