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

//! Crow search.
//!
//! Each crow remembers the best position it has visited. Per step a crow picks
//! another crow at random and tries to follow it to its hiding place:
//! `x + r * flight_length * (m_j - x)` with `r ~ U(0, 1)`. If the followed
//! crow notices (probability `awareness_probability`), the follower is fooled
//! and lands on a uniformly random assignment instead. Crows always move; only
//! the memories are kept greedily.

use crate::{
    fitness::FitnessOracle,
    population::Population,
    strategy::{SearchStrategy, StepContext},
};
use rand::Rng;
use stratus_model::{assignment::Assignment, error::ConfigurationError};

/// Parameters of the crow strategy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CrowParams {
    pub awareness_probability: f64,
    pub flight_length: f64,
}

impl Default for CrowParams {
    fn default() -> Self {
        Self {
            awareness_probability: 0.1,
            flight_length: 2.0,
        }
    }
}

impl CrowParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::ensure_probability(
            "crow.awareness_probability",
            self.awareness_probability,
        )?;
        ConfigurationError::ensure_non_negative("crow.flight_length", self.flight_length)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrowStrategy {
    params: CrowParams,
    memories: Vec<Assignment>,
    memory_scores: Vec<f64>,
}

impl CrowStrategy {
    /// Creates a crow strategy.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the parameters are invalid.
    pub fn new(params: CrowParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self {
            params,
            memories: Vec::new(),
            memory_scores: Vec::new(),
        })
    }

    #[inline]
    pub fn params(&self) -> &CrowParams {
        &self.params
    }

    /// The remembered position of every crow.
    #[inline]
    pub fn memories(&self) -> &[Assignment] {
        &self.memories
    }

    #[inline]
    pub fn memory_scores(&self) -> &[f64] {
        &self.memory_scores
    }
}

impl<R> SearchStrategy<R> for CrowStrategy
where
    R: Rng,
{
    fn name(&self) -> &str {
        "Crow"
    }

    fn initialize(&mut self, population: &Population, _oracle: &FitnessOracle<'_>, _rng: &mut R) {
        self.memories = population.members().to_vec();
        self.memory_scores = population.scores().to_vec();
    }

    fn on_environment_change(&mut self, _population: &Population, oracle: &FitnessOracle<'_>) {
        for (memory, score) in self.memories.iter().zip(self.memory_scores.iter_mut()) {
            *score = oracle.score(memory);
        }
    }

    fn step(
        &mut self,
        population: &mut Population,
        oracle: &FitnessOracle<'_>,
        _context: StepContext,
        rng: &mut R,
    ) {
        debug_assert_eq!(
            self.memories.len(),
            population.len(),
            "called `CrowStrategy::step` before `initialize`"
        );

        let bounds = *oracle.bounds();
        let size = population.len();

        for i in 0..size {
            let candidate = if rng.random::<f64>() >= self.params.awareness_probability {
                let j = if size > 1 {
                    let other = rng.random_range(0..size - 1);
                    if other >= i { other + 1 } else { other }
                } else {
                    i
                };
                let r = rng.random::<f64>();
                let coords: Vec<f64> = population
                    .member(i)
                    .nodes()
                    .iter()
                    .zip(self.memories[j].nodes())
                    .map(|(x, m)| {
                        let x = x.get() as f64;
                        x + r * self.params.flight_length * (m.get() as f64 - x)
                    })
                    .collect();
                bounds.repair_all(&coords)
            } else {
                Assignment::random(oracle.task_count(), oracle.node_count(), rng)
            };

            let score = oracle.score(&candidate);
            if score < self.memory_scores[i] {
                self.memories[i].clone_from(&candidate);
                self.memory_scores[i] = score;
            }
            population.replace(i, candidate, score);
        }
    }
}
