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

//! Stagnation-based termination.
//!
//! `StallMonitor` stops a run once `window` consecutive iterations passed
//! without the best-so-far record improving. The baseline iteration counts as
//! the last improvement, so a run that never improves stops after exactly
//! `window` steps.

use crate::{
    incumbent::BestSoFar,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    population::Population,
    record::IterationRecord,
    stats::SearchStatistics,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StallMonitor {
    window: u64,
    last_improvement: u64,
}

impl StallMonitor {
    /// Creates a monitor that tolerates `window` iterations without improvement.
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    #[inline]
    pub fn new(window: u64) -> Self {
        assert!(window > 0, "called `StallMonitor::new` with zero window");
        Self {
            window,
            last_improvement: 0,
        }
    }

    #[inline]
    pub fn window(&self) -> u64 {
        self.window
    }
}

impl SearchMonitor for StallMonitor {
    fn name(&self) -> &str {
        "StallMonitor"
    }

    fn on_start(&mut self, _strategy: &str, _population: &Population, _best: &BestSoFar) {
        self.last_improvement = 0;
    }

    fn on_iteration(&mut self, _record: &IterationRecord, _statistics: &SearchStatistics) {}

    fn on_new_best(&mut self, best: &BestSoFar, _statistics: &SearchStatistics) {
        self.last_improvement = best.iteration();
    }

    fn on_end(&mut self, _best: &BestSoFar, _statistics: &SearchStatistics) {}

    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        let stalled = statistics.iterations.saturating_sub(self.last_improvement);
        if stalled >= self.window {
            return SearchCommand::Terminate(format!(
                "no improvement for {} iterations",
                stalled
            ));
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::Evaluation;
    use stratus_model::{assignment::Assignment, index::NodeIndex, metrics::Metrics};

    fn stats(iterations: u64) -> SearchStatistics {
        SearchStatistics {
            iterations,
            ..SearchStatistics::default()
        }
    }

    fn best_at(iteration: u64) -> BestSoFar {
        let evaluation = Evaluation {
            metrics: Metrics {
                response_time: 0.0,
                throughput: 1.0,
                energy: 0.0,
                fault_tolerance: 1.0,
                violating_tasks: 0,
                served_tasks: 1,
                active_nodes: 1,
                energy_bound: 1.0,
            },
            score: 0.0,
        };
        BestSoFar::new(Assignment::uniform(1, NodeIndex::new(0)), evaluation, iteration)
    }

    #[test]
    fn test_terminates_after_window_without_improvement() {
        let mut monitor = StallMonitor::new(3);
        assert_eq!(monitor.search_command(&stats(2)), SearchCommand::Continue);
        assert_eq!(
            monitor.search_command(&stats(3)),
            SearchCommand::Terminate("no improvement for 3 iterations".to_string())
        );
    }

    #[test]
    fn test_improvement_resets_window() {
        let mut monitor = StallMonitor::new(3);
        monitor.on_new_best(&best_at(2), &stats(2));
        assert_eq!(monitor.search_command(&stats(4)), SearchCommand::Continue);
        assert!(matches!(
            monitor.search_command(&stats(5)),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    #[should_panic(expected = "called `StallMonitor::new` with zero window")]
    fn test_zero_window_panics() {
        let _ = StallMonitor::new(0);
    }
}
