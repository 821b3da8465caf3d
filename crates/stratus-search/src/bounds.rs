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

//! Repair of continuous coordinates into node indices.
//!
//! Every metaheuristic in this crate moves assignments through a continuous
//! space: each task's node index is read as an `f64`, blended, scaled or
//! perturbed, and must then be mapped back onto an existing node. All of them
//! use the same rule, implemented once by `NodeBounds::repair`:
//!
//! 1. round to the nearest integer (halfway cases away from zero),
//! 2. clamp into `[0, node_count - 1]`,
//! 3. map non-finite coordinates to node `0`.
//!
//! Clamping rather than wrapping keeps moves monotone: overshooting the last
//! node lands on the last node instead of jumping to the first.

use rand::Rng;
use stratus_model::{assignment::Assignment, index::NodeIndex};

/// The valid node-index range of an environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeBounds {
    node_count: usize,
}

impl NodeBounds {
    /// Creates bounds for `node_count` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `node_count` is zero.
    #[inline]
    pub fn new(node_count: usize) -> Self {
        assert!(
            node_count > 0,
            "called `NodeBounds::new` with zero nodes"
        );
        Self { node_count }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Distance between the first and the last node index.
    #[inline]
    pub fn span(&self) -> f64 {
        (self.node_count - 1) as f64
    }

    /// Maps a continuous coordinate onto a valid node index.
    #[inline]
    pub fn repair(&self, coordinate: f64) -> NodeIndex {
        if !coordinate.is_finite() {
            return NodeIndex::new(0);
        }
        let clamped = coordinate.round().clamp(0.0, self.span());
        NodeIndex::new(clamped as usize)
    }

    /// Repairs a full coordinate vector into an assignment.
    #[inline]
    pub fn repair_all(&self, coordinates: &[f64]) -> Assignment {
        Assignment::new(coordinates.iter().map(|&c| self.repair(c)).collect())
    }

    /// Reads an assignment as a coordinate vector.
    #[inline]
    pub fn coordinates(&self, assignment: &Assignment) -> Vec<f64> {
        assignment.nodes().iter().map(|n| n.get() as f64).collect()
    }

    /// Draws a uniformly random node index.
    #[inline]
    pub fn random_node<R>(&self, rng: &mut R) -> NodeIndex
    where
        R: Rng,
    {
        NodeIndex::new(rng.random_range(0..self.node_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_rounds_and_clamps() {
        let bounds = NodeBounds::new(5);
        assert_eq!(bounds.repair(1.4).get(), 1);
        assert_eq!(bounds.repair(1.5).get(), 2);
        assert_eq!(bounds.repair(-3.0).get(), 0);
        assert_eq!(bounds.repair(-0.4).get(), 0);
        assert_eq!(bounds.repair(4.6).get(), 4);
        assert_eq!(bounds.repair(1e300).get(), 4);
    }

    #[test]
    fn test_repair_non_finite_maps_to_zero() {
        let bounds = NodeBounds::new(3);
        assert_eq!(bounds.repair(f64::NAN).get(), 0);
        assert_eq!(bounds.repair(f64::INFINITY).get(), 0);
        assert_eq!(bounds.repair(f64::NEG_INFINITY).get(), 0);
    }

    #[test]
    fn test_single_node_always_repairs_to_zero() {
        let bounds = NodeBounds::new(1);
        assert_eq!(bounds.span(), 0.0);
        assert_eq!(bounds.repair(7.9).get(), 0);
    }

    #[test]
    fn test_coordinates_and_repair_all_agree() {
        let bounds = NodeBounds::new(4);
        let assignment = Assignment::new(vec![NodeIndex::new(3), NodeIndex::new(0)]);
        let coords = bounds.coordinates(&assignment);
        assert_eq!(coords, vec![3.0, 0.0]);
        assert_eq!(bounds.repair_all(&coords), assignment);
    }

    #[test]
    #[should_panic(expected = "called `NodeBounds::new` with zero nodes")]
    fn test_new_panics_on_zero_nodes() {
        let _ = NodeBounds::new(0);
    }
}
