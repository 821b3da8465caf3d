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
    incumbent::BestSoFar, population::Population, record::IterationRecord,
    stats::SearchStatistics,
};
use stratus_model::index::NodeIndex;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// A monitor for population-based search runs.
pub trait SearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once the initial population has been scored.
    fn on_start(&mut self, strategy: &str, population: &Population, best: &BestSoFar);

    /// Called after every completed iteration, including the baseline iteration `0`.
    fn on_iteration(&mut self, record: &IterationRecord, statistics: &SearchStatistics);

    /// Called when the best-so-far record improves.
    fn on_new_best(&mut self, best: &BestSoFar, statistics: &SearchStatistics);

    /// Called when the run ends, for whatever reason.
    fn on_end(&mut self, best: &BestSoFar, statistics: &SearchStatistics);

    /// Called when scheduled failures took `failed` offline at the start of `iteration`.
    fn on_failures(
        &mut self,
        _iteration: u64,
        _failed: &[NodeIndex],
        _statistics: &SearchStatistics,
    ) {
    }

    /// Determines the command for the next step of the run.
    fn search_command(&mut self, _statistics: &SearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<M> SearchMonitor for &mut M
where
    M: SearchMonitor + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_start(&mut self, strategy: &str, population: &Population, best: &BestSoFar) {
        (**self).on_start(strategy, population, best);
    }

    fn on_iteration(&mut self, record: &IterationRecord, statistics: &SearchStatistics) {
        (**self).on_iteration(record, statistics);
    }

    fn on_new_best(&mut self, best: &BestSoFar, statistics: &SearchStatistics) {
        (**self).on_new_best(best, statistics);
    }

    fn on_end(&mut self, best: &BestSoFar, statistics: &SearchStatistics) {
        (**self).on_end(best, statistics);
    }

    fn on_failures(
        &mut self,
        iteration: u64,
        failed: &[NodeIndex],
        statistics: &SearchStatistics,
    ) {
        (**self).on_failures(iteration, failed, statistics);
    }

    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        (**self).search_command(statistics)
    }
}

impl std::fmt::Debug for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor {{ name: {} }}", self.name())
    }
}

impl std::fmt::Display for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor: {}", self.name())
    }
}
