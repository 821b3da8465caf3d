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

//! Butterfly optimization.
//!
//! A butterfly's fragrance is `f_i = c * I_i^a`, where the stimulus intensity
//! `I_i = 1 / (1 + score_i)` grows as the score falls. With the switch
//! probability `p` a butterfly flies toward the population best
//! (`x + r^2 * (g - x) * f_i`); otherwise it takes a local flight along the
//! difference of two random butterflies (`x + r^2 * (x_j - x_k) * f_i`). The
//! switch probability moves linearly from `switch_probability` to
//! `final_switch_probability` over the iteration budget, so early iterations
//! favour the global flight. A flight is kept only if it does not worsen the
//! butterfly.

use crate::{
    fitness::FitnessOracle,
    population::Population,
    strategy::{SearchStrategy, StepContext},
};
use rand::Rng;
use stratus_model::error::ConfigurationError;

/// Parameters of the butterfly strategy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ButterflyParams {
    /// Sensory modality `c`.
    pub sensory_modality: f64,
    /// Power exponent `a`.
    pub power_exponent: f64,
    pub switch_probability: f64,
    pub final_switch_probability: f64,
}

impl Default for ButterflyParams {
    fn default() -> Self {
        Self {
            sensory_modality: 0.8,
            power_exponent: 0.1,
            switch_probability: 0.8,
            final_switch_probability: 0.2,
        }
    }
}

impl ButterflyParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::ensure_positive("butterfly.sensory_modality", self.sensory_modality)?;
        ConfigurationError::ensure_probability("butterfly.power_exponent", self.power_exponent)?;
        ConfigurationError::ensure_probability(
            "butterfly.switch_probability",
            self.switch_probability,
        )?;
        ConfigurationError::ensure_probability(
            "butterfly.final_switch_probability",
            self.final_switch_probability,
        )?;
        Ok(())
    }

    /// Switch probability at `progress` in `[0, 1]` of the budget.
    #[inline]
    pub fn switch_probability_at(&self, progress: f64) -> f64 {
        let p = self.switch_probability
            + (self.final_switch_probability - self.switch_probability) * progress;
        p.clamp(0.0, 1.0)
    }

    /// Fragrance emitted by a butterfly with `score`.
    #[inline]
    pub fn fragrance(&self, score: f64) -> f64 {
        let intensity = 1.0 / (1.0 + score.max(0.0));
        self.sensory_modality * intensity.powf(self.power_exponent)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButterflyStrategy {
    params: ButterflyParams,
}

impl ButterflyStrategy {
    /// Creates a butterfly strategy.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the parameters are invalid.
    pub fn new(params: ButterflyParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &ButterflyParams {
        &self.params
    }
}

impl<R> SearchStrategy<R> for ButterflyStrategy
where
    R: Rng,
{
    fn name(&self) -> &str {
        "Butterfly"
    }

    fn initialize(&mut self, _population: &Population, _oracle: &FitnessOracle<'_>, _rng: &mut R) {}

    fn step(
        &mut self,
        population: &mut Population,
        oracle: &FitnessOracle<'_>,
        context: StepContext,
        rng: &mut R,
    ) {
        let bounds = *oracle.bounds();
        let size = population.len();
        let switch = self.params.switch_probability_at(context.progress());
        let best_coords = bounds.coordinates(population.best().0);

        for i in 0..size {
            let position = bounds.coordinates(population.member(i));
            let fragrance = self.params.fragrance(population.score(i));
            let r = rng.random::<f64>();
            let pull = r * r * fragrance;

            let coords: Vec<f64> = if rng.random::<f64>() < switch {
                position
                    .iter()
                    .zip(&best_coords)
                    .map(|(&x, &g)| x + pull * (g - x))
                    .collect()
            } else {
                let j = bounds.coordinates(population.member(rng.random_range(0..size)));
                let k = bounds.coordinates(population.member(rng.random_range(0..size)));
                position
                    .iter()
                    .zip(j.iter().zip(&k))
                    .map(|(&x, (&xj, &xk))| x + pull * (xj - xk))
                    .collect()
            };

            let candidate = bounds.repair_all(&coords);
            let score = oracle.score(&candidate);
            if score <= population.score(i) {
                population.replace(i, candidate, score);
            }
        }
    }
}
