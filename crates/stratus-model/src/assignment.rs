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

use crate::index::{NodeIndex, TaskIndex};

/// A task-to-node mapping.
///
/// `nodes[t]` is the node that task `t` is routed to. Validity is structural
/// only: every element must reference an existing node, dead or alive.
/// Whether a node can actually serve its tasks is a matter for scoring.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Assignment {
    nodes: Vec<NodeIndex>,
}

impl Assignment {
    /// Creates an assignment from one node index per task.
    #[inline]
    pub fn new(nodes: Vec<NodeIndex>) -> Self {
        Self { nodes }
    }

    /// Routes every one of `num_tasks` tasks to `node`.
    #[inline]
    pub fn uniform(num_tasks: usize, node: NodeIndex) -> Self {
        Self {
            nodes: vec![node; num_tasks],
        }
    }

    /// Draws a uniformly random assignment of `num_tasks` tasks over `num_nodes` nodes.
    ///
    /// # Panics
    ///
    /// Panics if `num_nodes` is zero.
    pub fn random<R>(num_tasks: usize, num_nodes: usize, rng: &mut R) -> Self
    where
        R: rand::Rng,
    {
        assert!(
            num_nodes > 0,
            "called `Assignment::random` with zero nodes"
        );

        let nodes = (0..num_tasks)
            .map(|_| NodeIndex::new(rng.random_range(0..num_nodes)))
            .collect();
        Self { nodes }
    }

    /// Returns the number of tasks covered by this assignment.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node assigned to `task`.
    ///
    /// # Panics
    ///
    /// Panics if `task` is out of bounds.
    #[inline]
    pub fn node_for_task(&self, task: TaskIndex) -> NodeIndex {
        let index = task.get();
        debug_assert!(
            index < self.num_tasks(),
            "called `Assignment::node_for_task` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks(),
            index
        );

        self.nodes[index]
    }

    /// Routes `task` to `node`.
    ///
    /// # Panics
    ///
    /// Panics if `task` is out of bounds.
    #[inline]
    pub fn set_node_for_task(&mut self, task: TaskIndex, node: NodeIndex) {
        let index = task.get();
        debug_assert!(
            index < self.num_tasks(),
            "called `Assignment::set_node_for_task` with task index out of bounds: the len is {} but the index is {}",
            self.num_tasks(),
            index
        );

        self.nodes[index] = node;
    }

    /// Returns the node indices in task order.
    #[inline]
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Returns the node indices in task order, mutably.
    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [NodeIndex] {
        &mut self.nodes
    }

    /// Returns `true` if every element references one of `num_nodes` nodes.
    #[inline]
    pub fn is_within(&self, num_nodes: usize) -> bool {
        self.nodes.iter().all(|node| node.get() < num_nodes)
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", node.get())?;
        }
        write!(f, "]")
    }
}
