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

//! # Comparison Driver
//!
//! Runs every metaheuristic against one shared environment snapshot under the
//! same protocol, so that their results are directly comparable.
//!
//! ## Protocol
//!
//! - `Comparison::new` validates the shared configuration, builds the
//!   environment from the configured seed, and injects the configured failures.
//!   The environment is not modified afterwards.
//! - Every algorithm gets its own `SearchRun` with a `ChaCha8Rng` seeded from the
//!   same seed, so all of them start from the same initial population and
//!   differ only in their update rule. The runs draw from a different ChaCha
//!   stream than the environment generator, so initial assignments are
//!   independent of node and task sizes.
//! - The configured failure schedule is handed to every run. Each run applies
//!   it to its own copy of the snapshot, so all algorithms lose the same nodes
//!   at the same iterations.
//! - All algorithms share the fitness weights, population size, iteration
//!   budget, and stall window.
//! - An algorithm with an invalid parameter block is recorded as halted; the
//!   remaining algorithms still run.
//!
//! Runs are sequential. Each run only borrows the environment immutably, so
//! nothing prevents running them on separate threads later.

use crate::{
    algorithm::Algorithm,
    config::ComparisonConfig,
    report::{AlgorithmEntry, AlgorithmReport, ComparisonReport},
    trace::AlgorithmTrace,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stratus_model::{
    environment::{Environment, EnvironmentBuilder},
    error::ConfigurationError,
    index::NodeIndex,
};
use stratus_search::{
    engine::SearchRun,
    fitness::{FitnessOracle, WeightedFitness},
    monitor::{composite::CompositeMonitor, log::LogMonitor, stall::StallMonitor},
};

/// ChaCha stream the search runs draw from. The environment uses stream `0`.
const SEARCH_STREAM: u64 = 1;

#[derive(Debug, Clone)]
pub struct Comparison {
    config: ComparisonConfig,
    environment: Environment,
    fitness: WeightedFitness,
    failed_nodes: Vec<NodeIndex>,
}

impl Comparison {
    /// Validates `config` and prepares the shared environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any shared setting is invalid.
    pub fn new(config: ComparisonConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let mut environment = EnvironmentBuilder::new(config.node_count, config.task_count)
            .seed(config.seed)
            .ranges(config.ranges)
            .build()?;
        let failed_nodes = environment.inject_failures(config.failure_rate)?;
        let fitness = WeightedFitness::new(config.weights)?;

        tracing::info!(
            nodes = environment.node_count(),
            tasks = environment.task_count(),
            failed = failed_nodes.len(),
            scheduled_failures = config.failure_schedule.len(),
            seed = config.seed,
            "comparison environment ready"
        );

        Ok(Self {
            config,
            environment,
            fitness,
            failed_nodes,
        })
    }

    #[inline]
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    #[inline]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Nodes taken offline before any search started.
    #[inline]
    pub fn failed_nodes(&self) -> &[NodeIndex] {
        &self.failed_nodes
    }

    /// Prepares the run of `algorithm` and returns its lazy, sampled trace.
    ///
    /// The initial population is drawn and scored here; every step happens
    /// while the trace is iterated.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the parameters of `algorithm` are invalid.
    pub fn trace(&self, algorithm: Algorithm) -> Result<AlgorithmTrace<'_>, ConfigurationError> {
        let strategy = algorithm.strategy(&self.config)?;

        let mut monitor = CompositeMonitor::with_capacity(2);
        monitor.add_monitor(LogMonitor::default());
        if let Some(window) = self.config.stall_window {
            monitor.add_monitor(StallMonitor::new(window));
        }

        let run = SearchRun::new(
            FitnessOracle::new(&self.environment, &self.fitness),
            strategy,
            monitor,
            self.search_rng(),
            self.config.population_size,
            self.config.iterations,
        )?
        .with_failure_schedule(self.config.failure_schedule.clone());

        Ok(AlgorithmTrace::new(
            algorithm,
            run,
            self.config.sample_interval,
        ))
    }

    /// The generator every run starts from.
    fn search_rng(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        rng.set_stream(SEARCH_STREAM);
        rng
    }

    /// Runs `algorithm` to completion.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the parameters of `algorithm` are invalid.
    pub fn run(&self, algorithm: Algorithm) -> Result<AlgorithmReport, ConfigurationError> {
        let mut trace = self.trace(algorithm)?;
        let records = trace.by_ref().collect();
        let outcome = trace.finish();

        tracing::info!(
            algorithm = algorithm.name(),
            best = outcome.best().score(),
            baseline = outcome.baseline_score(),
            throughput = outcome.best().metrics().throughput,
            termination = %outcome.termination_reason(),
            "algorithm finished"
        );

        Ok(AlgorithmReport::new(algorithm, records, outcome))
    }

    /// Runs every algorithm in turn and collects the report.
    pub fn run_all(&self) -> ComparisonReport {
        let entries = Algorithm::ALL
            .iter()
            .map(|&algorithm| {
                tracing::info!(algorithm = algorithm.name(), "running algorithm");
                let result = self.run(algorithm);
                if let Err(error) = &result {
                    tracing::warn!(algorithm = algorithm.name(), %error, "algorithm halted");
                }
                AlgorithmEntry { algorithm, result }
            })
            .collect();

        ComparisonReport::new(
            self.environment.node_count(),
            self.environment.task_count(),
            self.failed_nodes.len(),
            entries,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;
    use stratus_model::failure::{FailureEvent, FailureSchedule};
    use stratus_search::strategy::bat::BatParams;

    fn small_config() -> ComparisonConfig {
        ComparisonConfig::builder()
            .node_count(5)
            .task_count(10)
            .failure_rate(0.2)
            .population_size(8)
            .iterations(12)
            .seed(11)
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_injects_configured_failures() {
        let comparison = Comparison::new(small_config()).unwrap();
        assert_eq!(comparison.failed_nodes().len(), 1);
        assert_eq!(comparison.environment().alive_count(), 4);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ComparisonConfig {
            population_size: 0,
            ..small_config()
        };
        assert_eq!(
            Comparison::new(config).unwrap_err(),
            ConfigurationError::ZeroCount {
                name: "population_size"
            }
        );
    }

    #[test]
    fn test_trace_samples_and_always_emits_final_record() {
        let config = ComparisonConfig {
            sample_interval: 5,
            ..small_config()
        };
        let comparison = Comparison::new(config).unwrap();
        let iterations: Vec<u64> = comparison
            .trace(Algorithm::Butterfly)
            .unwrap()
            .map(|r| r.iteration)
            .collect();
        assert_eq!(iterations, vec![0, 5, 10, 12]);
    }

    #[test]
    fn test_trace_is_lazy() {
        let comparison = Comparison::new(small_config()).unwrap();
        let mut trace = comparison.trace(Algorithm::Lion).unwrap();
        assert_eq!(trace.run().statistics().iterations, 0);
        let first = trace.next().unwrap();
        assert_eq!(first.iteration, 0);
        assert_eq!(trace.run().statistics().iterations, 0);
        trace.next();
        assert_eq!(trace.run().statistics().iterations, 1);
    }

    #[test]
    fn test_halted_algorithm_does_not_stop_the_others() {
        let config = ComparisonConfig {
            bat: BatParams {
                alpha: 3.0,
                ..BatParams::default()
            },
            ..small_config()
        };
        let report = Comparison::new(config).unwrap().run_all();

        assert_eq!(report.entries().len(), 4);
        assert!(report.entry(Algorithm::Bat).unwrap().result.is_err());
        assert_eq!(report.completed().count(), 3);
        assert!(report.to_string().contains("halted"));
        assert!(report.winner().is_some());
    }

    #[test]
    fn test_search_stream_is_separate_from_environment_stream() {
        let comparison = Comparison::new(small_config()).unwrap();
        let mut environment_rng = ChaCha8Rng::seed_from_u64(11);
        let mut search_rng = comparison.search_rng();
        assert_ne!(search_rng.next_u64(), environment_rng.next_u64());
        assert_eq!(comparison.search_rng(), comparison.search_rng());
    }

    #[test]
    fn test_scheduled_failure_reaches_every_algorithm() {
        let config = ComparisonConfig {
            failure_rate: 0.0,
            failure_schedule: FailureSchedule::from(vec![FailureEvent::new(6, 1.0).unwrap()]),
            ..small_config()
        };
        let comparison = Comparison::new(config).unwrap();
        assert!(comparison.failed_nodes().is_empty());

        let report = comparison.run_all();
        assert_eq!(report.completed().count(), 4);
        for report in report.completed() {
            let throughput: Vec<f64> = report.records.iter().map(|r| r.throughput).collect();
            assert!(throughput[..6].iter().all(|&t| t > 0.0), "{}", report.algorithm);
            assert!(throughput[6..].iter().all(|&t| t == 0.0), "{}", report.algorithm);
            assert_eq!(report.summary.failed_during_run, 5);
        }
        assert_eq!(comparison.environment().alive_count(), 5);
    }
}
