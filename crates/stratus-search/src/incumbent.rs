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

//! # Best-So-Far Record
//!
//! Holds the best assignment a single search run has observed. A run seeds it
//! from the scored initial population and afterwards offers it the population
//! best after every step. The record is replaced only by a strictly lower
//! score, so the sequence of recorded scores never increases and ties keep the
//! assignment that was found first. The one exception is a change of the
//! environment itself: when nodes fail mid-run, `reassess` rescores the
//! recorded assignment against the new environment, which may raise it.
//!
//! Unlike a shared incumbent across threads, a `BestSoFar` is owned by exactly
//! one run and needs no synchronisation.

use crate::fitness::Evaluation;
use stratus_model::{assignment::Assignment, metrics::Metrics};

/// The best assignment of a run, with its metrics and the iteration it was found in.
#[derive(Clone, Debug, PartialEq)]
pub struct BestSoFar {
    assignment: Assignment,
    score: f64,
    metrics: Metrics,
    iteration: u64,
}

impl BestSoFar {
    /// Creates a record from the first evaluated assignment of a run.
    #[inline]
    pub fn new(assignment: Assignment, evaluation: Evaluation, iteration: u64) -> Self {
        Self {
            assignment,
            score: evaluation.score,
            metrics: evaluation.metrics,
            iteration,
        }
    }

    #[inline]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    #[inline]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[inline]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Iteration in which the current record was installed.
    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Returns `true` if `score` would replace the current record.
    #[inline]
    pub fn is_improved_by(&self, score: f64) -> bool {
        score < self.score
    }

    /// Installs `assignment` if its score is strictly lower than the record.
    ///
    /// Returns `true` if the record changed.
    pub fn try_install(
        &mut self,
        assignment: &Assignment,
        evaluation: Evaluation,
        iteration: u64,
    ) -> bool {
        if !self.is_improved_by(evaluation.score) {
            return false;
        }

        self.assignment.clone_from(assignment);
        self.score = evaluation.score;
        self.metrics = evaluation.metrics;
        self.iteration = iteration;
        true
    }

    /// Replaces the score and metrics of the recorded assignment after the
    /// environment changed. The assignment and its iteration are kept.
    #[inline]
    pub fn reassess(&mut self, evaluation: Evaluation) {
        self.score = evaluation.score;
        self.metrics = evaluation.metrics;
    }

    /// Consumes the record and returns the assignment.
    #[inline]
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }
}

impl std::fmt::Display for BestSoFar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BestSoFar(score: {:.6}, iteration: {})",
            self.score, self.iteration
        )
    }
}
