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

//! Fixed-size populations of candidate assignments.
//!
//! A `Population` is owned by exactly one search run. Members can be replaced
//! in place but never added or removed, so its size stays the same for the
//! whole run. Each member carries the score it received at its last
//! evaluation; the engine rescores every member after each step so strategies
//! always start from fresh scores.

use crate::fitness::FitnessOracle;
use stratus_model::{assignment::Assignment, error::ConfigurationError};

#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    members: Vec<Assignment>,
    scores: Vec<f64>,
}

impl Population {
    /// Draws `size` uniformly random assignments and scores them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroCount` if `size` is zero.
    pub fn random<R>(
        size: usize,
        oracle: &FitnessOracle<'_>,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError>
    where
        R: rand::Rng,
    {
        ConfigurationError::ensure_non_zero("population_size", size)?;

        let members: Vec<Assignment> = (0..size)
            .map(|_| Assignment::random(oracle.task_count(), oracle.node_count(), rng))
            .collect();
        let scores = members.iter().map(|m| oracle.score(m)).collect();

        Ok(Self { members, scores })
    }

    /// Builds a population from explicit members and scores them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroCount` if `members` is empty.
    pub fn from_members(
        members: Vec<Assignment>,
        oracle: &FitnessOracle<'_>,
    ) -> Result<Self, ConfigurationError> {
        ConfigurationError::ensure_non_zero("population_size", members.len())?;
        let scores = members.iter().map(|m| oracle.score(m)).collect();
        Ok(Self { members, scores })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; populations cannot be empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn members(&self) -> &[Assignment] {
        &self.members
    }

    #[inline]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Returns member `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn member(&self, index: usize) -> &Assignment {
        &self.members[index]
    }

    /// Returns the score of member `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn score(&self, index: usize) -> f64 {
        self.scores[index]
    }

    /// Replaces member `index` with an already scored assignment.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the assignment length differs.
    pub fn replace(&mut self, index: usize, assignment: Assignment, score: f64) {
        assert_eq!(
            assignment.num_tasks(),
            self.members[index].num_tasks(),
            "called `Population::replace` with an assignment of {} tasks, but members have {}",
            assignment.num_tasks(),
            self.members[index].num_tasks()
        );

        self.members[index] = assignment;
        self.scores[index] = score;
    }

    /// Recomputes the score of every member.
    pub fn rescore(&mut self, oracle: &FitnessOracle<'_>) {
        for (member, score) in self.members.iter().zip(self.scores.iter_mut()) {
            *score = oracle.score(member);
        }
    }

    /// Index of the lowest-scoring member; ties resolve to the lowest index.
    pub fn best_index(&self) -> usize {
        let mut best = 0;
        for (i, score) in self.scores.iter().enumerate().skip(1) {
            if score.total_cmp(&self.scores[best]).is_lt() {
                best = i;
            }
        }
        best
    }

    /// The lowest-scoring member and its score.
    #[inline]
    pub fn best(&self) -> (&Assignment, f64) {
        let index = self.best_index();
        (&self.members[index], self.scores[index])
    }

    /// Mean score over all members.
    pub fn mean_score(&self) -> f64 {
        self.scores.iter().sum::<f64>() / self.len() as f64
    }

    /// Returns `true` if every member references one of `node_count` nodes and covers `task_count` tasks.
    pub fn is_consistent(&self, node_count: usize, task_count: usize) -> bool {
        self.members.len() == self.scores.len()
            && self
                .members
                .iter()
                .all(|m| m.num_tasks() == task_count && m.is_within(node_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::WeightedFitness;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use stratus_model::{environment::Environment, index::NodeIndex};

    #[test]
    fn test_random_population_is_consistent_and_scored() {
        let env = Environment::initialize(4, 9, 21).unwrap();
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let population = Population::random(12, &oracle, &mut rng).unwrap();
        assert_eq!(population.len(), 12);
        assert!(population.is_consistent(4, 9));
        for (member, score) in population.members().iter().zip(population.scores()) {
            assert_eq!(oracle.score(member), *score);
        }
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let env = Environment::initialize(2, 2, 0).unwrap();
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(
            Population::random(0, &oracle, &mut rng).unwrap_err(),
            ConfigurationError::ZeroCount {
                name: "population_size"
            }
        );
    }

    #[test]
    fn test_best_index_prefers_lowest_score_then_lowest_index() {
        let mut env = Environment::initialize(2, 2, 3).unwrap();
        env.fail_node(NodeIndex::new(0));
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);

        let dead = Assignment::uniform(2, NodeIndex::new(0));
        let alive = Assignment::uniform(2, NodeIndex::new(1));
        let population =
            Population::from_members(vec![dead.clone(), alive.clone(), alive.clone()], &oracle)
                .unwrap();

        assert_eq!(population.best_index(), 1);
        assert_eq!(population.best().0, &alive);
    }

    #[test]
    fn test_replace_keeps_size() {
        let env = Environment::initialize(3, 4, 5).unwrap();
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut population = Population::random(3, &oracle, &mut rng).unwrap();

        let replacement = Assignment::uniform(4, NodeIndex::new(2));
        let score = oracle.score(&replacement);
        population.replace(1, replacement.clone(), score);

        assert_eq!(population.len(), 3);
        assert_eq!(population.member(1), &replacement);
        assert_eq!(population.score(1), score);
    }

    #[test]
    #[should_panic(expected = "called `Population::replace` with an assignment of 1 tasks")]
    fn test_replace_rejects_wrong_length() {
        let env = Environment::initialize(3, 4, 5).unwrap();
        let fitness = WeightedFitness::default();
        let oracle = FitnessOracle::new(&env, &fitness);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut population = Population::random(2, &oracle, &mut rng).unwrap();

        population.replace(0, Assignment::uniform(1, NodeIndex::new(0)), 0.0);
    }
}
