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

use crate::{
    incumbent::BestSoFar,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    population::Population,
    record::IterationRecord,
    stats::SearchStatistics,
};
use stratus_model::index::NodeIndex;

/// A composite monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl std::fmt::Debug for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names().join(", "))
            .finish()
    }
}

impl std::fmt::Display for CompositeMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names().join(", "))
    }
}

impl Default for CompositeMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeMonitor<'a> {
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a new boxed monitor to the composite monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors in the composite monitor.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    fn names(&self) -> Vec<&str> {
        self.monitors.iter().map(|m| m.name()).collect()
    }
}

impl<'a> FromIterator<Box<dyn SearchMonitor + 'a>> for CompositeMonitor<'a> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SearchMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_start(&mut self, strategy: &str, population: &Population, best: &BestSoFar) {
        for monitor in &mut self.monitors {
            monitor.on_start(strategy, population, best);
        }
    }

    fn on_iteration(&mut self, record: &IterationRecord, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_iteration(record, statistics);
        }
    }

    fn on_new_best(&mut self, best: &BestSoFar, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_new_best(best, statistics);
        }
    }

    fn on_end(&mut self, best: &BestSoFar, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_end(best, statistics);
        }
    }

    fn on_failures(
        &mut self,
        iteration: u64,
        failed: &[NodeIndex],
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_failures(iteration, failed, statistics);
        }
    }

    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        // Every monitor is polled so that stateful monitors observe each iteration.
        let mut command = SearchCommand::Continue;
        for monitor in &mut self.monitors {
            let reply = monitor.search_command(statistics);
            if command == SearchCommand::Continue {
                command = reply;
            }
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOpMonitor;

    struct StopAfter {
        limit: u64,
        polled: u64,
    }

    impl SearchMonitor for StopAfter {
        fn name(&self) -> &str {
            "StopAfter"
        }

        fn on_start(&mut self, _strategy: &str, _population: &Population, _best: &BestSoFar) {}

        fn on_iteration(&mut self, _record: &IterationRecord, _statistics: &SearchStatistics) {}

        fn on_new_best(&mut self, _best: &BestSoFar, _statistics: &SearchStatistics) {}

        fn on_end(&mut self, _best: &BestSoFar, _statistics: &SearchStatistics) {}

        fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
            self.polled += 1;
            if statistics.iterations >= self.limit {
                return SearchCommand::Terminate(format!("limit {}", self.limit));
            }
            SearchCommand::Continue
        }
    }

    #[test]
    fn test_first_terminate_wins_and_all_are_polled() {
        let mut first = StopAfter { limit: 2, polled: 0 };
        let mut second = StopAfter { limit: 1, polled: 0 };
        {
            let mut composite = CompositeMonitor::new();
            composite.add_monitor(NoOpMonitor::new());
            composite.add_monitor(&mut first);
            composite.add_monitor(&mut second);
            assert_eq!(composite.len(), 3);

            let stats = SearchStatistics {
                iterations: 1,
                ..SearchStatistics::default()
            };
            assert_eq!(
                composite.search_command(&stats),
                SearchCommand::Terminate("limit 1".to_string())
            );

            let stats = SearchStatistics {
                iterations: 2,
                ..SearchStatistics::default()
            };
            assert_eq!(
                composite.search_command(&stats),
                SearchCommand::Terminate("limit 2".to_string())
            );
        }
        assert_eq!(first.polled, 2);
        assert_eq!(second.polled, 2);
    }

    #[test]
    fn test_display_lists_names() {
        let mut composite = CompositeMonitor::with_capacity(2);
        assert!(composite.is_empty());
        composite.add_monitor(NoOpMonitor::new());
        composite.add_monitor_boxed(Box::new(NoOpMonitor::new()));
        assert_eq!(
            composite.to_string(),
            "CompositeMonitor([NoOpMonitor, NoOpMonitor])"
        );
    }
}
