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

//! Per-iteration convergence records.

use crate::incumbent::BestSoFar;

/// Snapshot of a run's best-so-far record after one iteration.
///
/// Iteration `0` describes the scored initial population; iteration `t >= 1`
/// describes the record after the `t`-th step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IterationRecord {
    pub iteration: u64,
    pub best_score: f64,
    pub response_time: f64,
    pub throughput: f64,
    pub energy: f64,
    pub fault_tolerance: f64,
}

impl IterationRecord {
    /// Captures the current state of `best` as the record of `iteration`.
    #[inline]
    pub fn capture(iteration: u64, best: &BestSoFar) -> Self {
        let metrics = best.metrics();
        Self {
            iteration,
            best_score: best.score(),
            response_time: metrics.response_time,
            throughput: metrics.throughput,
            energy: metrics.energy,
            fault_tolerance: metrics.fault_tolerance,
        }
    }
}

impl std::fmt::Display for IterationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:<5} best {:.6} | response {:.4} | throughput {:.1}% | energy {:.3} | fault tolerance {:.1}%",
            self.iteration,
            self.best_score,
            self.response_time,
            self.throughput * 100.0,
            self.energy,
            self.fault_tolerance * 100.0
        )
    }
}
