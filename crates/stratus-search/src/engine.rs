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

//! Iterative population search driver.
//!
//! `SearchRun` owns everything one run of one metaheuristic needs: the
//! population, the strategy state, the random number generator, the monitor,
//! and the best-so-far record. Building a run scores a random initial
//! population drawn from the run's own generator, so two runs seeded alike
//! start from identical populations regardless of their strategy.
//!
//! The run is an `Iterator` over `IterationRecord`s. The first record is the
//! baseline (iteration `0`, the scored initial population). Every further call
//! asks the monitor for a command, lets the strategy take one step, rescores
//! the whole population, offers the population best to the best-so-far
//! record, and yields the record of that iteration. The iterator ends once the
//! budget is spent or a monitor requests termination, and it stays ended.
//! `finish` drains whatever is left and returns the `SearchOutcome`.
//!
//! A run may carry a `FailureSchedule`. Events due at an iteration fire before
//! that iteration's step: the oracle's private copy of the environment loses
//! the nodes, the population and the strategy's cached scores are refreshed,
//! and the best-so-far record is reassessed against the new environment. The
//! best score is therefore non-increasing between failure events, and may jump
//! up at one.

use crate::{
    fitness::FitnessOracle,
    incumbent::BestSoFar,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    population::Population,
    record::IterationRecord,
    result::{SearchOutcome, TerminationReason},
    stats::SearchStatistics,
    strategy::{SearchStrategy, StepContext},
};
use rand::Rng;
use std::{iter::FusedIterator, time::Instant};
use stratus_model::{error::ConfigurationError, failure::FailureSchedule};

/// A single, consumable run of one strategy against one environment snapshot.
pub struct SearchRun<'a, S, R, M> {
    oracle: FitnessOracle<'a>,
    strategy: S,
    rng: R,
    monitor: M,
    failure_schedule: FailureSchedule,
    population: Population,
    best: BestSoFar,
    statistics: SearchStatistics,
    budget: u64,
    next_iteration: u64,
    baseline_score: f64,
    start_time: Instant,
    termination_reason: Option<TerminationReason>,
}

impl<'a, S, R, M> SearchRun<'a, S, R, M>
where
    S: SearchStrategy<R>,
    R: Rng,
    M: SearchMonitor,
{
    /// Draws and scores the initial population and prepares the strategy.
    ///
    /// The run takes ownership of `oracle`, so its evaluation counters describe
    /// this run alone.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroCount` if `population_size` or `budget` is zero.
    pub fn new(
        oracle: FitnessOracle<'a>,
        mut strategy: S,
        mut monitor: M,
        mut rng: R,
        population_size: usize,
        budget: u64,
    ) -> Result<Self, ConfigurationError> {
        if budget == 0 {
            return Err(ConfigurationError::ZeroCount { name: "iterations" });
        }

        let start_time = Instant::now();
        let population = Population::random(population_size, &oracle, &mut rng)?;

        let best_index = population.best_index();
        let best_member = population.member(best_index).clone();
        let evaluation = oracle.evaluate(&best_member);
        let best = BestSoFar::new(best_member, evaluation, 0);
        let baseline_score = best.score();

        strategy.initialize(&population, &oracle, &mut rng);
        monitor.on_start(strategy.name(), &population, &best);

        let mut statistics = SearchStatistics::default();
        statistics.set_evaluations(oracle.evaluations());
        statistics.set_guard_hits(oracle.guard_hits());

        Ok(Self {
            oracle,
            strategy,
            rng,
            monitor,
            failure_schedule: FailureSchedule::new(),
            population,
            best,
            statistics,
            budget,
            next_iteration: 0,
            baseline_score,
            start_time,
            termination_reason: None,
        })
    }

    /// Lets nodes fail during the run according to `schedule`.
    #[inline]
    pub fn with_failure_schedule(mut self, schedule: FailureSchedule) -> Self {
        self.failure_schedule = schedule;
        self
    }

    #[inline]
    pub fn failure_schedule(&self) -> &FailureSchedule {
        &self.failure_schedule
    }

    #[inline]
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    #[inline]
    pub fn oracle(&self) -> &FitnessOracle<'a> {
        &self.oracle
    }

    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[inline]
    pub fn best(&self) -> &BestSoFar {
        &self.best
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn budget(&self) -> u64 {
        self.budget
    }

    #[inline]
    pub fn baseline_score(&self) -> f64 {
        self.baseline_score
    }

    /// Returns `Some` once the run has ended.
    #[inline]
    pub fn termination_reason(&self) -> Option<&TerminationReason> {
        self.termination_reason.as_ref()
    }

    /// Runs the remaining iterations and returns the outcome.
    pub fn finish(mut self) -> SearchOutcome {
        while self.next().is_some() {}

        let termination_reason = match self.termination_reason {
            Some(reason) => reason,
            None => TerminationReason::BudgetExhausted,
        };
        SearchOutcome::new(
            self.best,
            self.statistics,
            termination_reason,
            self.baseline_score,
        )
    }

    fn sync_statistics(&mut self) {
        self.statistics.set_evaluations(self.oracle.evaluations());
        self.statistics.set_guard_hits(self.oracle.guard_hits());
        self.statistics.set_total_time(self.start_time.elapsed());
    }

    fn terminate(&mut self, reason: TerminationReason) {
        self.sync_statistics();
        self.monitor.on_end(&self.best, &self.statistics);
        self.termination_reason = Some(reason);
    }

    fn apply_failures(&mut self, iteration: u64) {
        let events = self.failure_schedule.events_at(iteration);
        if events.is_empty() {
            return;
        }

        let mut failed = Vec::new();
        for event in events {
            failed.extend(self.oracle.apply_failure_event(event));
        }
        self.statistics.on_failures(failed.len());

        self.population.rescore(&self.oracle);
        self.strategy.on_environment_change(&self.population, &self.oracle);
        let evaluation = self.oracle.evaluate(self.best.assignment());
        self.best.reassess(evaluation);

        self.sync_statistics();
        self.monitor.on_failures(iteration, &failed, &self.statistics);
    }

    fn advance(&mut self, iteration: u64) -> IterationRecord {
        self.apply_failures(iteration);

        let size = self.population.len();
        let context = StepContext::new(iteration, self.budget);
        self.strategy.step(&mut self.population, &self.oracle, context, &mut self.rng);
        self.population.rescore(&self.oracle);

        debug_assert!(
            self.population.len() == size,
            "called `SearchRun::advance` with a strategy that changed the population size from {} to {}",
            size,
            self.population.len()
        );
        debug_assert!(
            self.population
                .is_consistent(self.oracle.node_count(), self.oracle.task_count()),
            "called `SearchRun::advance` with a strategy that produced an out-of-bounds assignment"
        );

        self.statistics.on_iteration();

        let (member, score) = self.population.best();
        if self.best.is_improved_by(score) {
            let evaluation = self.oracle.evaluate(member);
            if self.best.try_install(member, evaluation, iteration) {
                self.statistics.on_improvement();
                self.sync_statistics();
                self.monitor.on_new_best(&self.best, &self.statistics);
            }
        }

        debug_assert!(
            self.statistics.failed_nodes > 0 || self.best.score() <= self.baseline_score,
            "called `SearchRun::advance` with a best score {} above the baseline {}",
            self.best.score(),
            self.baseline_score
        );

        self.sync_statistics();
        IterationRecord::capture(iteration, &self.best)
    }
}

impl<S, R, M> Iterator for SearchRun<'_, S, R, M>
where
    S: SearchStrategy<R>,
    R: Rng,
    M: SearchMonitor,
{
    type Item = IterationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.termination_reason.is_some() {
            return None;
        }

        let iteration = self.next_iteration;
        if iteration == 0 {
            self.next_iteration = 1;
            let record = IterationRecord::capture(0, &self.best);
            self.monitor.on_iteration(&record, &self.statistics);
            return Some(record);
        }

        if iteration > self.budget {
            self.terminate(TerminationReason::BudgetExhausted);
            return None;
        }

        if let SearchCommand::Terminate(reason) = self.monitor.search_command(&self.statistics) {
            self.terminate(TerminationReason::Aborted(reason));
            return None;
        }

        let record = self.advance(iteration);
        self.next_iteration = iteration + 1;
        self.monitor.on_iteration(&record, &self.statistics);
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.termination_reason.is_some() {
            return (0, Some(0));
        }
        let remaining = (self.budget + 1).saturating_sub(self.next_iteration) as usize;
        (0, Some(remaining))
    }
}

impl<S, R, M> FusedIterator for SearchRun<'_, S, R, M>
where
    S: SearchStrategy<R>,
    R: Rng,
    M: SearchMonitor,
{
}

impl<S, R, M> std::fmt::Debug for SearchRun<'_, S, R, M>
where
    S: SearchStrategy<R>,
    R: Rng,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchRun")
            .field("strategy", &self.strategy.name())
            .field("budget", &self.budget)
            .field("next_iteration", &self.next_iteration)
            .field("best", &self.best.score())
            .field("termination_reason", &self.termination_reason)
            .finish()
    }
}
