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

//! Search outcome and termination reporting.
//!
//! `SearchOutcome` bundles what a finished run leaves behind: the best-so-far
//! record, the run statistics, the score of the initial population, and why
//! the run stopped. A run either spends its whole iteration budget or is
//! aborted early by a monitor (for example on stagnation).

use crate::{incumbent::BestSoFar, stats::SearchStatistics};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Every iteration of the configured budget was executed.
    BudgetExhausted,

    /// A monitor requested termination.
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::BudgetExhausted => write!(f, "Budget Exhausted"),
            TerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

/// Result of a search run after termination.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    best: BestSoFar,
    statistics: SearchStatistics,
    termination_reason: TerminationReason,
    baseline_score: f64,
}

impl SearchOutcome {
    #[inline]
    pub fn new(
        best: BestSoFar,
        statistics: SearchStatistics,
        termination_reason: TerminationReason,
        baseline_score: f64,
    ) -> Self {
        Self {
            best,
            statistics,
            termination_reason,
            baseline_score,
        }
    }

    #[inline]
    pub fn best(&self) -> &BestSoFar {
        &self.best
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Best score of the initial population, before any step.
    #[inline]
    pub fn baseline_score(&self) -> f64 {
        self.baseline_score
    }

    /// How much the run lowered the score relative to its initial population.
    #[inline]
    pub fn improvement(&self) -> f64 {
        self.baseline_score - self.best.score()
    }

    #[inline]
    pub fn was_aborted(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Aborted(_))
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Outcome:")?;
        writeln!(f, "   Termination:   {}", self.termination_reason)?;
        writeln!(f, "   Baseline:      {:.6}", self.baseline_score)?;
        writeln!(f, "   Best:          {:.6}", self.best.score())?;
        writeln!(f, "   Found At:      {}", self.best.iteration())?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termination_reason_display() {
        assert_eq!(
            TerminationReason::BudgetExhausted.to_string(),
            "Budget Exhausted"
        );
        assert_eq!(
            TerminationReason::Aborted("stalled".to_string()).to_string(),
            "Aborted: stalled"
        );
    }
}
