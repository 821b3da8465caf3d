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

//! Bat algorithm.
//!
//! Every bat carries a velocity, a loudness `A_i` and a pulse rate `r_i`. Per
//! step a bat draws a frequency in `[frequency_min, frequency_max]`, pulls its
//! velocity toward the current population best, and flies to `x + v`. With
//! probability `1 - r_i` it instead takes a local walk around the best, whose
//! radius shrinks with the mean loudness of the colony. A candidate replaces
//! the bat when it improves on the bat and the bat is still loud enough
//! (`U(0, 1) < A_i`), or unconditionally when it beats the population best.
//! Each acceptance quietens the bat (`A_i *= alpha`) and raises its pulse rate
//! towards `r0` following `r0 * (1 - exp(-gamma * t))`. Bats start with a low
//! pulse rate, so early steps mostly walk around the best and later steps trust
//! their velocity. A pulse rate never decreases.

use crate::{
    fitness::FitnessOracle,
    population::Population,
    strategy::{SearchStrategy, StepContext},
};
use rand::Rng;
use stratus_model::error::ConfigurationError;

/// Parameters of the bat strategy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BatParams {
    pub frequency_min: f64,
    pub frequency_max: f64,
    /// Initial loudness `A0` of every bat.
    pub initial_loudness: f64,
    /// Pulse rate every bat starts with. Must not exceed `pulse_rate`.
    pub initial_pulse_rate: f64,
    /// Pulse rate `r0` every bat converges to.
    pub pulse_rate: f64,
    /// Loudness decay factor applied on acceptance.
    pub alpha: f64,
    /// Pulse-rate growth constant.
    pub gamma: f64,
    /// Radius of the local walk relative to the node-index span.
    pub local_scale: f64,
}

impl Default for BatParams {
    fn default() -> Self {
        Self {
            frequency_min: 0.0,
            frequency_max: 2.0,
            initial_loudness: 0.5,
            initial_pulse_rate: 0.0,
            pulse_rate: 0.5,
            alpha: 0.9,
            gamma: 0.9,
            local_scale: 1.0,
        }
    }
}

impl BatParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.frequency_min.is_finite()
            && self.frequency_max.is_finite()
            && self.frequency_min <= self.frequency_max)
        {
            return Err(ConfigurationError::InvalidRange {
                name: "bat.frequency",
                min: self.frequency_min,
                max: self.frequency_max,
            });
        }
        ConfigurationError::ensure_probability("bat.initial_loudness", self.initial_loudness)?;
        ConfigurationError::ensure_probability("bat.initial_pulse_rate", self.initial_pulse_rate)?;
        ConfigurationError::ensure_probability("bat.pulse_rate", self.pulse_rate)?;
        if self.initial_pulse_rate > self.pulse_rate {
            return Err(ConfigurationError::InvalidRange {
                name: "bat.pulse_rate",
                min: self.initial_pulse_rate,
                max: self.pulse_rate,
            });
        }
        ConfigurationError::ensure_probability("bat.alpha", self.alpha)?;
        ConfigurationError::ensure_non_negative("bat.gamma", self.gamma)?;
        ConfigurationError::ensure_non_negative("bat.local_scale", self.local_scale)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatStrategy {
    params: BatParams,
    velocities: Vec<Vec<f64>>,
    loudness: Vec<f64>,
    pulse_rates: Vec<f64>,
}

impl BatStrategy {
    /// Creates a bat strategy.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the parameters are invalid.
    pub fn new(params: BatParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self {
            params,
            velocities: Vec::new(),
            loudness: Vec::new(),
            pulse_rates: Vec::new(),
        })
    }

    #[inline]
    pub fn params(&self) -> &BatParams {
        &self.params
    }

    /// Current loudness of every bat.
    #[inline]
    pub fn loudness(&self) -> &[f64] {
        &self.loudness
    }

    /// Current pulse rate of every bat.
    #[inline]
    pub fn pulse_rates(&self) -> &[f64] {
        &self.pulse_rates
    }

    fn mean_loudness(&self) -> f64 {
        if self.loudness.is_empty() {
            return 0.0;
        }
        self.loudness.iter().sum::<f64>() / self.loudness.len() as f64
    }
}

impl<R> SearchStrategy<R> for BatStrategy
where
    R: Rng,
{
    fn name(&self) -> &str {
        "Bat"
    }

    fn initialize(&mut self, population: &Population, oracle: &FitnessOracle<'_>, _rng: &mut R) {
        let size = population.len();
        self.velocities = vec![vec![0.0; oracle.task_count()]; size];
        self.loudness = vec![self.params.initial_loudness; size];
        self.pulse_rates = vec![self.params.initial_pulse_rate; size];
    }

    fn step(
        &mut self,
        population: &mut Population,
        oracle: &FitnessOracle<'_>,
        context: StepContext,
        rng: &mut R,
    ) {
        debug_assert_eq!(
            self.velocities.len(),
            population.len(),
            "called `BatStrategy::step` before `initialize`"
        );

        let bounds = *oracle.bounds();
        let span = bounds.span();
        let mut best_index = population.best_index();
        let mut best_coords = bounds.coordinates(population.member(best_index));
        let pulse_target =
            self.params.pulse_rate * (1.0 - (-self.params.gamma * context.iteration as f64).exp());

        for i in 0..population.len() {
            let position = bounds.coordinates(population.member(i));
            let frequency = self.params.frequency_min
                + (self.params.frequency_max - self.params.frequency_min) * rng.random::<f64>();

            let velocity = &mut self.velocities[i];
            let mut coords: Vec<f64> = Vec::with_capacity(position.len());
            for ((v, &x), &g) in velocity.iter_mut().zip(&position).zip(&best_coords) {
                *v = (*v + (g - x) * frequency).clamp(-span, span);
                coords.push(x + *v);
            }

            if rng.random::<f64>() > self.pulse_rates[i] {
                let radius = self.mean_loudness() * span * self.params.local_scale;
                for (c, &g) in coords.iter_mut().zip(&best_coords) {
                    *c = g + rng.random_range(-1.0..=1.0) * radius;
                }
            }

            let candidate = bounds.repair_all(&coords);
            let score = oracle.score(&candidate);
            let improves_bat = score < population.score(i);
            let improves_best = score < population.score(best_index);

            if (improves_bat && rng.random::<f64>() < self.loudness[i]) || improves_best {
                population.replace(i, candidate, score);
                self.loudness[i] *= self.params.alpha;
                self.pulse_rates[i] = self.pulse_rates[i].max(pulse_target);

                if improves_best {
                    best_index = i;
                    best_coords = bounds.coordinates(population.member(i));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fitness::WeightedFitness,
        strategy::testing::{assert_steps_stay_in_bounds, best_scores},
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use stratus_model::environment::Environment;

    #[test]
    fn test_params_validation() {
        assert!(BatParams::default().validate().is_ok());
        let inverted = BatParams {
            frequency_min: 3.0,
            ..BatParams::default()
        };
        assert!(matches!(
            BatStrategy::new(inverted).unwrap_err(),
            ConfigurationError::InvalidRange {
                name: "bat.frequency",
                ..
            }
        ));
        let loud = BatParams {
            initial_loudness: 2.0,
            ..BatParams::default()
        };
        assert!(loud.validate().is_err());
    }

    #[test]
    fn test_thousand_steps_stay_in_bounds() {
        let strategy = BatStrategy::new(BatParams::default()).unwrap();
        assert_steps_stay_in_bounds(strategy, 1000);
    }

    #[test]
    fn test_population_best_never_worsens() {
        let strategy = BatStrategy::new(BatParams::default()).unwrap();
        let scores = best_scores(strategy, 29, 60);
        for pair in scores.windows(2) {
            assert!(pair[1] <= pair[0], "best worsened: {} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_acceptance_decays_loudness() {
        let env = Environment::initialize(5, 12, 3).unwrap();
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut population = Population::random(10, &oracle, &mut rng).unwrap();

        let mut strategy = BatStrategy::new(BatParams::default()).unwrap();
        SearchStrategy::<ChaCha8Rng>::initialize(&mut strategy, &population, &oracle, &mut rng);
        assert!(strategy.loudness().iter().all(|&a| a == 0.5));

        for iteration in 1..=30 {
            strategy.step(
                &mut population,
                &oracle,
                StepContext::new(iteration, 30),
                &mut rng,
            );
        }

        assert!(strategy.loudness().iter().all(|&a| a <= 0.5 && a > 0.0));
        assert!(strategy.pulse_rates().iter().all(|&r| (0.0..=0.5).contains(&r)));
    }

    #[test]
    fn test_pulse_rate_rises_over_the_run() {
        let env = Environment::initialize(5, 12, 17).unwrap();
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut population = Population::random(10, &oracle, &mut rng).unwrap();

        let params = BatParams::default();
        let mut strategy = BatStrategy::new(params).unwrap();
        SearchStrategy::<ChaCha8Rng>::initialize(&mut strategy, &population, &oracle, &mut rng);
        assert!(
            strategy
                .pulse_rates()
                .iter()
                .all(|&r| r == params.initial_pulse_rate)
        );

        let mut previous = strategy.pulse_rates().to_vec();
        for iteration in 1..=50 {
            strategy.step(
                &mut population,
                &oracle,
                StepContext::new(iteration, 50),
                &mut rng,
            );
            for (now, before) in strategy.pulse_rates().iter().zip(&previous) {
                assert!(now >= before, "pulse rate fell from {} to {}", before, now);
                assert!(*now <= params.pulse_rate);
            }
            previous = strategy.pulse_rates().to_vec();
        }

        let highest = previous.iter().copied().fold(0.0, f64::max);
        assert!(
            highest > params.initial_pulse_rate,
            "pulse rate never rose above {}",
            params.initial_pulse_rate
        );
    }

    #[test]
    fn test_initial_pulse_rate_above_target_is_rejected() {
        let params = BatParams {
            initial_pulse_rate: 0.8,
            pulse_rate: 0.5,
            ..BatParams::default()
        };
        assert_eq!(
            params.validate().unwrap_err(),
            ConfigurationError::InvalidRange {
                name: "bat.pulse_rate",
                min: 0.8,
                max: 0.5
            }
        );
    }
}
