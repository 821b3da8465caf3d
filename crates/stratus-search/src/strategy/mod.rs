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

//! # Search Strategies
//!
//! A `SearchStrategy` owns the update rule of one metaheuristic. The engine
//! drives it with a fixed protocol: `initialize` once after the initial
//! population has been scored, then `step` once per iteration, and
//! `on_environment_change` whenever nodes fail mid-run. A step may
//! replace members of the population but never adds or removes any, and every
//! member it writes must cover all tasks with valid node indices. All
//! strategies move through a continuous coordinate space and map back onto
//! nodes with `NodeBounds::repair`.
//!
//! ## Submodules
//!
//! - `lion`: pride attraction toward a leader, nomads that roam, and a greedy leader.
//! - `bat`: frequency-tuned velocities with loudness and pulse-rate control.
//! - `crow`: memory-following flights with an awareness probability.
//! - `butterfly`: fragrance-weighted global and local flights.

pub mod bat;
pub mod butterfly;
pub mod crow;
pub mod lion;

use crate::{fitness::FitnessOracle, population::Population};
use rand::Rng;

/// Position of a step within the iteration budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StepContext {
    /// Iteration being computed, starting at `1`.
    pub iteration: u64,
    /// Total number of iterations of the run.
    pub budget: u64,
}

impl StepContext {
    #[inline]
    pub fn new(iteration: u64, budget: u64) -> Self {
        Self { iteration, budget }
    }

    /// Fraction of the budget reached by this step, in `[0, 1]`.
    #[inline]
    pub fn progress(&self) -> f64 {
        if self.budget == 0 {
            return 1.0;
        }
        (self.iteration as f64 / self.budget as f64).clamp(0.0, 1.0)
    }
}

/// The update rule of a population-based metaheuristic.
pub trait SearchStrategy<R>
where
    R: Rng,
{
    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// Prepares per-run state for the scored initial `population`.
    fn initialize(&mut self, population: &Population, oracle: &FitnessOracle<'_>, rng: &mut R);

    /// Advances the population by one iteration.
    fn step(
        &mut self,
        population: &mut Population,
        oracle: &FitnessOracle<'_>,
        context: StepContext,
        rng: &mut R,
    );

    /// Called after nodes failed during the run, once `population` has been rescored.
    ///
    /// Strategies that keep scores outside the population refresh them here.
    fn on_environment_change(&mut self, _population: &Population, _oracle: &FitnessOracle<'_>) {}
}

impl<R, S> SearchStrategy<R> for Box<S>
where
    R: Rng,
    S: SearchStrategy<R> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initialize(&mut self, population: &Population, oracle: &FitnessOracle<'_>, rng: &mut R) {
        (**self).initialize(population, oracle, rng);
    }

    fn step(
        &mut self,
        population: &mut Population,
        oracle: &FitnessOracle<'_>,
        context: StepContext,
        rng: &mut R,
    ) {
        (**self).step(population, oracle, context, rng);
    }

    fn on_environment_change(&mut self, population: &Population, oracle: &FitnessOracle<'_>) {
        (**self).on_environment_change(population, oracle);
    }
}

impl<R> std::fmt::Debug for dyn SearchStrategy<R> + '_
where
    R: Rng,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchStrategy {{ name: {} }}", self.name())
    }
}

impl<R> std::fmt::Display for dyn SearchStrategy<R> + '_
where
    R: Rng,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchStrategy: {}", self.name())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(StepContext::new(5, 10).progress(), 0.5);
        assert_eq!(StepContext::new(12, 10).progress(), 1.0);
        assert_eq!(StepContext::new(3, 0).progress(), 1.0);
    }
}
