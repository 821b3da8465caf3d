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

//! Wall-clock termination.
//!
//! Population steps are coarse (every step evaluates the whole population), so
//! unlike a per-move local search this monitor checks the clock on every call.

use crate::{
    incumbent::BestSoFar,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    population::Population,
    record::IterationRecord,
    stats::SearchStatistics,
};
use std::time::{Duration, Instant};

/// Terminates a run once `time_limit` has elapsed since `on_start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    start_time: Instant,
    time_limit: Duration,
}

impl TimeLimitMonitor {
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_start(&mut self, _strategy: &str, _population: &Population, _best: &BestSoFar) {
        self.start_time = Instant::now();
    }

    fn on_iteration(&mut self, _record: &IterationRecord, _statistics: &SearchStatistics) {}

    fn on_new_best(&mut self, _best: &BestSoFar, _statistics: &SearchStatistics) {}

    fn on_end(&mut self, _best: &BestSoFar, _statistics: &SearchStatistics) {}

    fn search_command(&mut self, _statistics: &SearchStatistics) -> SearchCommand {
        if self.start_time.elapsed() >= self.time_limit {
            return SearchCommand::Terminate("time limit exceeded".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_terminates_immediately() {
        let mut monitor = TimeLimitMonitor::new(Duration::ZERO);
        assert_eq!(
            monitor.search_command(&SearchStatistics::default()),
            SearchCommand::Terminate("time limit exceeded".to_string())
        );
    }

    #[test]
    fn test_generous_limit_continues() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_secs(3600));
        assert_eq!(
            monitor.search_command(&SearchStatistics::default()),
            SearchCommand::Continue
        );
    }
}
