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

//! Raw performance metrics of an assignment.
//!
//! `Metrics` is the output of `Environment::evaluate` and the only input of a
//! fitness function. It deliberately stores raw, uncombined quantities so that
//! weighting stays a separate policy decision.

/// Response time charged to every task that lands on a dead or overloaded node.
///
/// A serving node contributes its utilisation `load / capacity`, which is at
/// most `1.0`, so the penalty dominates any feasible contribution.
pub const RESPONSE_TIME_PENALTY: f64 = 10.0;

/// Raw metrics derived from routing a workload according to one assignment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metrics {
    /// Mean per-task response time, in `[0, RESPONSE_TIME_PENALTY]`.
    pub response_time: f64,
    /// Fraction of tasks served by alive, non-overloaded nodes, in `[0, 1]`.
    pub throughput: f64,
    /// Sum over nodes of `load * energy_coefficient`.
    pub energy: f64,
    /// Fraction of dead nodes left without load, or `1.0` if no node is dead.
    pub fault_tolerance: f64,
    /// Tasks routed to a dead or overloaded node.
    pub violating_tasks: usize,
    /// Tasks routed to a serving node.
    pub served_tasks: usize,
    /// Alive nodes in the environment at evaluation time.
    pub active_nodes: usize,
    /// Energy of the whole workload on the most expensive node; normalisation bound for `energy`.
    pub energy_bound: f64,
}

impl Metrics {
    /// Returns `energy` scaled into `[0, 1]` by `energy_bound`.
    ///
    /// Returns `0.0` when the bound is zero or not finite (e.g. an empty workload).
    #[inline]
    pub fn normalized_energy(&self) -> f64 {
        if !(self.energy_bound.is_finite() && self.energy_bound > 0.0) {
            return 0.0;
        }
        (self.energy / self.energy_bound).clamp(0.0, 1.0)
    }

    /// Returns the total number of tasks covered by these metrics.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.served_tasks + self.violating_tasks
    }
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Metrics(response_time: {:.4}, throughput: {:.1}%, energy: {:.3}, fault_tolerance: {:.1}%, violating_tasks: {})",
            self.response_time,
            self.throughput * 100.0,
            self.energy,
            self.fault_tolerance * 100.0,
            self.violating_tasks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(energy: f64, energy_bound: f64) -> Metrics {
        Metrics {
            response_time: 0.5,
            throughput: 1.0,
            energy,
            fault_tolerance: 1.0,
            violating_tasks: 0,
            served_tasks: 4,
            active_nodes: 2,
            energy_bound,
        }
    }

    #[test]
    fn test_normalized_energy_is_bounded() {
        assert_eq!(metrics(5.0, 10.0).normalized_energy(), 0.5);
        assert_eq!(metrics(50.0, 10.0).normalized_energy(), 1.0);
        assert_eq!(metrics(5.0, 0.0).normalized_energy(), 0.0);
        assert_eq!(metrics(5.0, f64::NAN).normalized_energy(), 0.0);
    }

    #[test]
    fn test_display_reports_percentages() {
        let shown = metrics(1.0, 2.0).to_string();
        assert!(shown.contains("throughput: 100.0%"));
        assert!(shown.contains("fault_tolerance: 100.0%"));
    }
}
