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

//! Fitness scoring of assignments.
//!
//! Scores are **minimized**. A `FitnessFunction` combines the raw `Metrics` of
//! an assignment into one scalar; the `FitnessOracle` pairs a function with the
//! environment snapshot and is the only channel through which a metaheuristic
//! learns anything about the environment. Strategies therefore never read node
//! liveness directly: dead nodes are visible only through the scores they cause.
//!
//! `WeightedFitness` is the combination used for every algorithm comparison:
//!
//! ```text
//! score = w_response   * min(response_time, RESPONSE_TIME_PENALTY)
//!       + w_throughput * (1 - throughput)
//!       + w_energy     * energy / (total_demand * max_energy_coefficient)
//!       + w_violation  * min(violating_tasks, VIOLATION_CAP)
//! ```
//!
//! With the default weights `1.0, 1.0, 0.5, 10.0` an assignment that serves
//! every task scores at most `1.5`, while every task routed to a dead or
//! overloaded node adds at least `10` on top. Every term is bounded, and the
//! oracle passes the result through `guard_finite`, so the score stays finite
//! even when every node is dead.

use crate::{
    bounds::NodeBounds,
    num::{guard_finite, needs_guard},
};
use std::{borrow::Cow, cell::Cell};
use stratus_model::{
    assignment::Assignment,
    environment::Environment,
    error::ConfigurationError,
    failure::FailureEvent,
    index::NodeIndex,
    metrics::{Metrics, RESPONSE_TIME_PENALTY},
};

/// Upper bound on the number of violating tasks that contribute to a score.
pub const VIOLATION_CAP: f64 = 1e9;

/// Maps raw metrics to a score to be minimized.
pub trait FitnessFunction {
    /// Returns the name of the fitness function.
    fn name(&self) -> &str;

    /// Scores `metrics`. Lower is better.
    fn score(&self, metrics: &Metrics) -> f64;
}

impl std::fmt::Debug for dyn FitnessFunction + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FitnessFunction {{ name: {} }}", self.name())
    }
}

/// Relative weights of the four objectives.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    pub response_time: f64,
    pub throughput: f64,
    pub energy: f64,
    pub violation: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            response_time: 1.0,
            throughput: 1.0,
            energy: 0.5,
            violation: 10.0,
        }
    }
}

impl FitnessWeights {
    /// Fails unless every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::ensure_non_negative("response_time weight", self.response_time)?;
        ConfigurationError::ensure_non_negative("throughput weight", self.throughput)?;
        ConfigurationError::ensure_non_negative("energy weight", self.energy)?;
        ConfigurationError::ensure_non_negative("violation weight", self.violation)?;
        Ok(())
    }
}

/// Clamps `value` into `[0, max]`, reading `NaN` as the worst case `max`.
#[inline]
fn pessimistic(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return max;
    }
    value.clamp(0.0, max)
}

/// Weighted sum of capped objective terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedFitness {
    weights: FitnessWeights,
}

impl Default for WeightedFitness {
    fn default() -> Self {
        Self {
            weights: FitnessWeights::default(),
        }
    }
}

impl WeightedFitness {
    /// Creates a weighted fitness function.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any weight is negative or not finite.
    pub fn new(weights: FitnessWeights) -> Result<Self, ConfigurationError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    #[inline]
    pub fn weights(&self) -> &FitnessWeights {
        &self.weights
    }
}

impl FitnessFunction for WeightedFitness {
    fn name(&self) -> &str {
        "WeightedFitness"
    }

    fn score(&self, metrics: &Metrics) -> f64 {
        let response = pessimistic(metrics.response_time, RESPONSE_TIME_PENALTY);
        let unserved = pessimistic(1.0 - metrics.throughput, 1.0);
        let energy = metrics.normalized_energy();
        let violations = (metrics.violating_tasks as f64).min(VIOLATION_CAP);

        self.weights.response_time * response
            + self.weights.throughput * unserved
            + self.weights.energy * energy
            + self.weights.violation * violations
    }
}

/// Result of scoring one assignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub metrics: Metrics,
    pub score: f64,
}

/// Read-only scoring access to an environment snapshot.
///
/// The oracle exposes the environment's dimensions and the `evaluate`/`score`
/// pair, nothing else. It also counts evaluations and how often the numeric
/// guard had to clamp a score.
///
/// The oracle borrows the environment snapshot until the first failure event
/// is applied, which switches it to a private copy. The snapshot itself is
/// never modified.
pub struct FitnessOracle<'env> {
    environment: Cow<'env, Environment>,
    fitness: &'env dyn FitnessFunction,
    bounds: NodeBounds,
    evaluations: Cell<u64>,
    guard_hits: Cell<u64>,
}

impl<'env> FitnessOracle<'env> {
    #[inline]
    pub fn new(environment: &'env Environment, fitness: &'env dyn FitnessFunction) -> Self {
        Self {
            environment: Cow::Borrowed(environment),
            fitness,
            bounds: NodeBounds::new(environment.node_count()),
            evaluations: Cell::new(0),
            guard_hits: Cell::new(0),
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.bounds.node_count()
    }

    #[inline]
    pub fn task_count(&self) -> usize {
        self.environment.task_count()
    }

    /// The valid node-index range, including the shared repair rule.
    #[inline]
    pub fn bounds(&self) -> &NodeBounds {
        &self.bounds
    }

    /// Computes the raw metrics and the guarded score of `assignment`.
    pub fn evaluate(&self, assignment: &Assignment) -> Evaluation {
        self.evaluations.set(self.evaluations.get().saturating_add(1));

        let metrics = self.environment.evaluate(assignment);
        let raw = self.fitness.score(&metrics);
        if needs_guard(raw) {
            self.guard_hits.set(self.guard_hits.get().saturating_add(1));
            tracing::trace!(raw, "score clamped by numeric guard");
        }

        Evaluation {
            metrics,
            score: guard_finite(raw),
        }
    }

    /// Returns the guarded score of `assignment`.
    #[inline]
    pub fn score(&self, assignment: &Assignment) -> f64 {
        self.evaluate(assignment).score
    }

    /// Number of assignments evaluated so far.
    #[inline]
    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }

    /// Number of scores the numeric guard had to clamp.
    #[inline]
    pub fn guard_hits(&self) -> u64 {
        self.guard_hits.get()
    }

    /// Fails nodes of the oracle's environment according to `event`.
    ///
    /// Every later evaluation sees the failed nodes. Returns the nodes failed by
    /// this event in ascending order.
    pub fn apply_failure_event(&mut self, event: &FailureEvent) -> Vec<NodeIndex> {
        self.environment.to_mut().apply_failure_event(event)
    }
}

impl std::fmt::Debug for FitnessOracle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitnessOracle")
            .field("fitness", &self.fitness.name())
            .field("node_count", &self.node_count())
            .field("task_count", &self.task_count())
            .field("evaluations", &self.evaluations.get())
            .field("private_copy", &matches!(self.environment, Cow::Owned(_)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::SCORE_CEILING;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn metrics(response_time: f64, throughput: f64, violating_tasks: usize) -> Metrics {
        Metrics {
            response_time,
            throughput,
            energy: 5.0,
            fault_tolerance: 1.0,
            violating_tasks,
            served_tasks: 10 - violating_tasks.min(10),
            active_nodes: 3,
            energy_bound: 10.0,
        }
    }

    struct Exploding;

    impl FitnessFunction for Exploding {
        fn name(&self) -> &str {
            "Exploding"
        }

        fn score(&self, _metrics: &Metrics) -> f64 {
            f64::NAN
        }
    }

    #[test]
    fn test_weights_validation() {
        assert!(FitnessWeights::default().validate().is_ok());
        let negative = FitnessWeights {
            energy: -1.0,
            ..FitnessWeights::default()
        };
        assert!(WeightedFitness::new(negative).is_err());
        let infinite = FitnessWeights {
            violation: f64::INFINITY,
            ..FitnessWeights::default()
        };
        assert!(WeightedFitness::new(infinite).is_err());
    }

    #[test]
    fn test_weighted_score_combines_terms() {
        let fitness = WeightedFitness::default();
        let score = fitness.score(&metrics(0.4, 0.75, 0));
        // 1.0 * 0.4 + 1.0 * 0.25 + 0.5 * 0.5 + 10.0 * 0
        assert!((score - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_violations_dominate_feasible_terms() {
        let fitness = WeightedFitness::default();
        let feasible = fitness.score(&metrics(1.0, 1.0, 0));
        let one_violation = fitness.score(&metrics(0.0, 0.9, 1));
        assert!(feasible < one_violation);
    }

    #[test]
    fn test_score_is_finite_for_pathological_metrics() {
        let fitness = WeightedFitness::default();
        let weird = Metrics {
            response_time: f64::INFINITY,
            throughput: f64::NAN,
            energy: f64::INFINITY,
            fault_tolerance: 0.0,
            violating_tasks: usize::MAX,
            served_tasks: 0,
            active_nodes: 0,
            energy_bound: 0.0,
        };
        assert!(fitness.score(&weird).is_finite());
    }

    #[test]
    fn test_oracle_scores_all_dead_environment_finitely() {
        let mut env = Environment::initialize(4, 12, 8).unwrap();
        env.inject_failures(1.0).unwrap();
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let assignment = Assignment::random(12, 4, &mut rng);
        let evaluation = oracle.evaluate(&assignment);

        assert_eq!(evaluation.metrics.throughput, 0.0);
        assert!(evaluation.score.is_finite());
        assert!(evaluation.score <= SCORE_CEILING);
        assert_eq!(oracle.evaluations(), 1);
        assert_eq!(oracle.guard_hits(), 0);
    }

    #[test]
    fn test_oracle_guards_non_finite_scores() {
        let env = Environment::initialize(2, 3, 1).unwrap();
        let fitness = Exploding;
        let oracle = FitnessOracle::new(&env, &fitness);

        let score = oracle.score(&Assignment::uniform(3, NodeIndex::new(1)));
        assert_eq!(score, SCORE_CEILING);
        assert_eq!(oracle.guard_hits(), 1);
    }

    #[test]
    fn test_oracle_prefers_alive_nodes() {
        let mut env = Environment::initialize(2, 2, 4).unwrap();
        env.fail_node(NodeIndex::new(0));
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);

        let on_dead = oracle.score(&Assignment::uniform(2, NodeIndex::new(0)));
        let on_alive = oracle.score(&Assignment::uniform(2, NodeIndex::new(1)));
        assert!(on_alive < on_dead);
    }

    #[test]
    fn test_failure_event_hits_the_private_copy_only() {
        let env = Environment::initialize(3, 6, 12).unwrap();
        let fitness = WeightedFitness::default();
        let mut oracle = FitnessOracle::new(&env, &fitness);
        let assignment = Assignment::new((0..6).map(|t| NodeIndex::new(t % 3)).collect());
        let before = oracle.evaluate(&assignment);
        assert_eq!(before.metrics.throughput, 1.0);

        let failed = oracle.apply_failure_event(&FailureEvent::new(4, 1.0).unwrap());
        assert_eq!(failed.len(), 3);

        let after = oracle.evaluate(&assignment);
        assert_eq!(after.metrics.throughput, 0.0);
        assert!(after.score > before.score);
        assert_eq!(env.alive_count(), 3);
        assert_eq!(oracle.evaluations(), 2);
    }
}
