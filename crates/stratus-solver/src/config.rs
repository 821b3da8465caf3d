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

//! Comparison configuration.
//!
//! `ComparisonConfig` gathers every knob of a comparison: the size of the
//! simulated cloud, the failure rate and the mid-run failure schedule, the
//! shared search protocol (population
//! size, iteration budget, optional stall window, sampling interval, seed), the
//! fitness weights, the environment sampling ranges, and one parameter block per
//! algorithm. It (de)serializes with `serde`; missing fields take their
//! defaults.
//!
//! `validate` checks everything shared by all algorithms and fails fast. The
//! per-algorithm parameter blocks are deliberately left out: an invalid block
//! halts only its own algorithm when the comparison runs.

use stratus_model::{
    environment::EnvironmentRanges, error::ConfigurationError, failure::FailureSchedule,
};
use stratus_search::{
    fitness::FitnessWeights,
    strategy::{
        bat::BatParams, butterfly::ButterflyParams, crow::CrowParams, lion::LionParams,
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub node_count: usize,
    pub task_count: usize,
    /// Fraction of nodes failed before any search starts, in `[0, 1]`.
    pub failure_rate: f64,
    /// Node failures that strike every algorithm at the same iterations.
    pub failure_schedule: FailureSchedule,
    pub population_size: usize,
    pub iterations: u64,
    /// Stop an algorithm early after this many iterations without improvement.
    pub stall_window: Option<u64>,
    /// Emit every `sample_interval`-th iteration record; the final one is always emitted.
    pub sample_interval: u64,
    pub seed: u64,
    pub weights: FitnessWeights,
    pub ranges: EnvironmentRanges,
    pub lion: LionParams,
    pub bat: BatParams,
    pub crow: CrowParams,
    pub butterfly: ButterflyParams,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            node_count: 60,
            task_count: 1000,
            failure_rate: 0.1,
            failure_schedule: FailureSchedule::new(),
            population_size: 30,
            iterations: 100,
            stall_window: None,
            sample_interval: 1,
            seed: 42,
            weights: FitnessWeights::default(),
            ranges: EnvironmentRanges::default(),
            lion: LionParams::default(),
            bat: BatParams::default(),
            crow: CrowParams::default(),
            butterfly: ButterflyParams::default(),
        }
    }
}

impl ComparisonConfig {
    #[inline]
    pub fn builder() -> ComparisonConfigBuilder {
        ComparisonConfigBuilder::new()
    }

    /// Checks every setting shared by all algorithms.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigurationError` found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::ensure_non_zero("node_count", self.node_count)?;
        ConfigurationError::ensure_non_zero("task_count", self.task_count)?;
        ConfigurationError::ensure_probability("failure_rate", self.failure_rate)?;
        ConfigurationError::ensure_non_zero("population_size", self.population_size)?;
        if self.iterations == 0 {
            return Err(ConfigurationError::ZeroCount { name: "iterations" });
        }
        if self.stall_window == Some(0) {
            return Err(ConfigurationError::ZeroCount {
                name: "stall_window",
            });
        }
        if self.sample_interval == 0 {
            return Err(ConfigurationError::ZeroCount {
                name: "sample_interval",
            });
        }
        self.weights.validate()?;
        self.ranges.validate()?;
        Ok(())
    }
}

/// Builder for `ComparisonConfig`, starting from the defaults.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ComparisonConfigBuilder {
    config: ComparisonConfig,
}

impl ComparisonConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn node_count(mut self, node_count: usize) -> Self {
        self.config.node_count = node_count;
        self
    }

    #[inline]
    pub fn task_count(mut self, task_count: usize) -> Self {
        self.config.task_count = task_count;
        self
    }

    #[inline]
    pub fn failure_rate(mut self, failure_rate: f64) -> Self {
        self.config.failure_rate = failure_rate;
        self
    }

    #[inline]
    pub fn failure_schedule(mut self, schedule: FailureSchedule) -> Self {
        self.config.failure_schedule = schedule;
        self
    }

    #[inline]
    pub fn population_size(mut self, population_size: usize) -> Self {
        self.config.population_size = population_size;
        self
    }

    #[inline]
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.config.iterations = iterations;
        self
    }

    #[inline]
    pub fn stall_window(mut self, stall_window: u64) -> Self {
        self.config.stall_window = Some(stall_window);
        self
    }

    #[inline]
    pub fn sample_interval(mut self, sample_interval: u64) -> Self {
        self.config.sample_interval = sample_interval;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    #[inline]
    pub fn weights(mut self, weights: FitnessWeights) -> Self {
        self.config.weights = weights;
        self
    }

    #[inline]
    pub fn ranges(mut self, ranges: EnvironmentRanges) -> Self {
        self.config.ranges = ranges;
        self
    }

    #[inline]
    pub fn lion(mut self, params: LionParams) -> Self {
        self.config.lion = params;
        self
    }

    #[inline]
    pub fn bat(mut self, params: BatParams) -> Self {
        self.config.bat = params;
        self
    }

    #[inline]
    pub fn crow(mut self, params: CrowParams) -> Self {
        self.config.crow = params;
        self
    }

    #[inline]
    pub fn butterfly(mut self, params: ButterflyParams) -> Self {
        self.config.butterfly = params;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any shared setting is invalid.
    pub fn build(self) -> Result<ComparisonConfig, ConfigurationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ComparisonConfig::default().validate().is_ok());
        assert_eq!(ComparisonConfig::builder().build().unwrap(), ComparisonConfig::default());
    }

    #[test]
    fn test_builder_rejects_invalid_shared_settings() {
        assert_eq!(
            ComparisonConfig::builder().node_count(0).build().unwrap_err(),
            ConfigurationError::ZeroCount { name: "node_count" }
        );
        assert_eq!(
            ComparisonConfig::builder().failure_rate(1.5).build().unwrap_err(),
            ConfigurationError::ProbabilityOutOfRange {
                name: "failure_rate",
                value: 1.5
            }
        );
        assert_eq!(
            ComparisonConfig::builder().iterations(0).build().unwrap_err(),
            ConfigurationError::ZeroCount { name: "iterations" }
        );
        assert_eq!(
            ComparisonConfig::builder().stall_window(0).build().unwrap_err(),
            ConfigurationError::ZeroCount {
                name: "stall_window"
            }
        );
        assert_eq!(
            ComparisonConfig::builder().sample_interval(0).build().unwrap_err(),
            ConfigurationError::ZeroCount {
                name: "sample_interval"
            }
        );
    }

    #[test]
    fn test_algorithm_params_are_not_validated_up_front() {
        let config = ComparisonConfig::builder()
            .crow(CrowParams {
                awareness_probability: 2.0,
                ..CrowParams::default()
            })
            .build();
        assert!(config.is_ok());
    }

    #[test]
    fn test_json_round_trip_and_partial_input() {
        let config = ComparisonConfig::builder()
            .node_count(8)
            .task_count(40)
            .stall_window(12)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ComparisonConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: ComparisonConfig =
            serde_json::from_str(r#"{ "node_count": 5, "bat": { "alpha": 0.8 } }"#).unwrap();
        assert!(partial.failure_schedule.is_empty());
        assert_eq!(partial.node_count, 5);
        assert_eq!(partial.task_count, 1000);
        assert_eq!(partial.bat.alpha, 0.8);
        assert_eq!(partial.bat.gamma, BatParams::default().gamma);
    }

    #[test]
    fn test_failure_schedule_from_json_pairs() {
        let config: ComparisonConfig =
            serde_json::from_str(r#"{ "failure_schedule": [[30, 0.1], [10, 0.2]] }"#).unwrap();
        let iterations: Vec<u64> = config
            .failure_schedule
            .events()
            .iter()
            .map(|e| e.iteration())
            .collect();
        assert_eq!(iterations, vec![10, 30]);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: ComparisonConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        assert!(
            serde_json::from_str::<ComparisonConfig>(r#"{ "failure_schedule": [[0, 0.1]] }"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<ComparisonConfig>(r#"{ "failure_schedule": [[5, 1.5]] }"#)
                .is_err()
        );
    }
}
