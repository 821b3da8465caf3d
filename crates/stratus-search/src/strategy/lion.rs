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

//! Lion optimization.
//!
//! The population is read as one pride plus a band of nomads. The best member
//! is the pride leader. Every other pride member closes part of its distance
//! to the leader gene by gene and then mutates single genes at random, which
//! keeps the pride hunting around the leader without collapsing onto it. The
//! last members of the population are nomads: they roam by re-drawing genes
//! uniformly and keep the search from settling too early. The leader itself
//! only ever takes greedy single-gene moves, so the population best cannot get
//! worse from one step to the next.

use crate::{
    fitness::FitnessOracle,
    population::Population,
    strategy::{SearchStrategy, StepContext},
};
use rand::Rng;
use stratus_model::{error::ConfigurationError, index::TaskIndex};

/// Parameters of the lion strategy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LionParams {
    /// Fraction of the distance to the leader a pride member may close per step.
    pub attraction: f64,
    /// Per-gene probability that a pride member re-draws the gene after moving.
    pub mutation_rate: f64,
    /// Fraction of the population that roams as nomads.
    pub nomad_fraction: f64,
    /// Per-gene probability that a nomad re-draws the gene.
    pub roam_rate: f64,
}

impl Default for LionParams {
    fn default() -> Self {
        Self {
            attraction: 0.7,
            mutation_rate: 0.05,
            nomad_fraction: 0.2,
            roam_rate: 0.3,
        }
    }
}

impl LionParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::ensure_non_negative("lion.attraction", self.attraction)?;
        ConfigurationError::ensure_probability("lion.mutation_rate", self.mutation_rate)?;
        ConfigurationError::ensure_probability("lion.nomad_fraction", self.nomad_fraction)?;
        ConfigurationError::ensure_probability("lion.roam_rate", self.roam_rate)?;
        Ok(())
    }

    /// Number of nomads in a population of `size`; the leader is never a nomad.
    #[inline]
    pub fn nomad_count(&self, size: usize) -> usize {
        ((self.nomad_fraction * size as f64).floor() as usize).min(size.saturating_sub(1))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LionStrategy {
    params: LionParams,
}

impl LionStrategy {
    /// Creates a lion strategy.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the parameters are invalid.
    pub fn new(params: LionParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &LionParams {
        &self.params
    }
}

impl<R> SearchStrategy<R> for LionStrategy
where
    R: Rng,
{
    fn name(&self) -> &str {
        "Lion"
    }

    fn initialize(&mut self, _population: &Population, _oracle: &FitnessOracle<'_>, _rng: &mut R) {}

    fn step(
        &mut self,
        population: &mut Population,
        oracle: &FitnessOracle<'_>,
        _context: StepContext,
        rng: &mut R,
    ) {
        let bounds = *oracle.bounds();
        let size = population.len();
        let leader = population.best_index();
        let leader_coords = bounds.coordinates(population.member(leader));
        let first_nomad = size - self.params.nomad_count(size);

        for i in 0..size {
            if i == leader {
                continue;
            }

            let mut candidate = population.member(i).clone();
            if i >= first_nomad {
                for gene in candidate.nodes_mut() {
                    if rng.random_bool(self.params.roam_rate) {
                        *gene = bounds.random_node(rng);
                    }
                }
            } else {
                for (gene, &target) in candidate.nodes_mut().iter_mut().zip(&leader_coords) {
                    let x = gene.get() as f64;
                    let r = rng.random::<f64>();
                    *gene = bounds.repair(x + self.params.attraction * r * (target - x));
                    if rng.random_bool(self.params.mutation_rate) {
                        *gene = bounds.random_node(rng);
                    }
                }
            }

            let score = oracle.score(&candidate);
            population.replace(i, candidate, score);
        }

        if oracle.task_count() > 0 {
            let mut candidate = population.member(leader).clone();
            let task = TaskIndex::new(rng.random_range(0..oracle.task_count()));
            candidate.set_node_for_task(task, bounds.random_node(rng));
            let score = oracle.score(&candidate);
            if score < population.score(leader) {
                population.replace(leader, candidate, score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::testing::{assert_steps_stay_in_bounds, best_scores};

    #[test]
    fn test_params_validation() {
        assert!(LionParams::default().validate().is_ok());
        let bad = LionParams {
            roam_rate: 1.5,
            ..LionParams::default()
        };
        assert_eq!(
            LionStrategy::new(bad).unwrap_err(),
            ConfigurationError::ProbabilityOutOfRange {
                name: "lion.roam_rate",
                value: 1.5
            }
        );
        let negative = LionParams {
            attraction: -0.1,
            ..LionParams::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_nomad_count_never_includes_everyone() {
        let params = LionParams::default();
        assert_eq!(params.nomad_count(20), 4);
        assert_eq!(params.nomad_count(1), 0);
        let all = LionParams {
            nomad_fraction: 1.0,
            ..LionParams::default()
        };
        assert_eq!(all.nomad_count(5), 4);
    }

    #[test]
    fn test_thousand_steps_stay_in_bounds() {
        let strategy = LionStrategy::new(LionParams::default()).unwrap();
        assert_steps_stay_in_bounds(strategy, 1000);
    }

    #[test]
    fn test_population_best_never_worsens() {
        let strategy = LionStrategy::new(LionParams::default()).unwrap();
        let scores = best_scores(strategy, 13, 60);
        for pair in scores.windows(2) {
            assert!(pair[1] <= pair[0], "best worsened: {} -> {}", pair[0], pair[1]);
        }
    }
}
