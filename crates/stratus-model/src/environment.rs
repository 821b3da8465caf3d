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

//! Simulated cloud environment.
//!
//! The environment owns the nodes and the workload of one simulation run. Node
//! capacities follow the usual cloud sizing model of processing elements times
//! MIPS per element, energy coefficients are drawn per node, and every task
//! carries a fixed resource demand. All draws come from one `ChaCha8Rng`
//! seeded at construction, so a given seed always produces the same
//! environment, and later fault injections continue from the same stream.
//!
//! The environment stores no per-node load. Loads only exist relative to an
//! `Assignment` and are computed on demand by `evaluate`, which keeps a built
//! environment a read-only snapshot that many searches can share. The only
//! mutation is fault injection, which flips alive flags off and never back on.
//! A search that must see failures strike mid-run works on its own copy of the
//! snapshot and applies `FailureEvent`s to that copy.

use crate::{
    assignment::Assignment,
    error::ConfigurationError,
    failure::FailureEvent,
    index::{NodeIndex, TaskIndex},
    metrics::{Metrics, RESPONSE_TIME_PENALTY},
};
use fixedbitset::FixedBitSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A closed sampling interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampleRange {
    pub min: f64,
    pub max: f64,
}

impl SampleRange {
    #[inline]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Fails unless both bounds are finite and `min <= max`.
    pub fn validate(&self, name: &'static str) -> Result<(), ConfigurationError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min <= self.max) {
            return Err(ConfigurationError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    #[inline]
    fn sample<R>(&self, rng: &mut R) -> f64
    where
        R: Rng,
    {
        if self.min == self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }
}

/// Sampling ranges used to randomize nodes and tasks.
///
/// The defaults reproduce the reference cloud setup: 4 processing elements per
/// node at 2000 to 4000 MIPS each, energy coefficients between 0.001 and 0.003
/// per resource unit, and task demands between 200 and 4000 units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EnvironmentRanges {
    pub processing_elements: u32,
    pub mips: SampleRange,
    pub energy_coefficient: SampleRange,
    pub demand: SampleRange,
}

impl Default for EnvironmentRanges {
    fn default() -> Self {
        Self {
            processing_elements: 4,
            mips: SampleRange::new(2000.0, 4000.0),
            energy_coefficient: SampleRange::new(0.001, 0.003),
            demand: SampleRange::new(200.0, 4000.0),
        }
    }
}

impl EnvironmentRanges {
    /// Validates every range.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::ensure_non_zero(
            "processing_elements",
            self.processing_elements as usize,
        )?;
        self.mips.validate("mips")?;
        ConfigurationError::ensure_non_negative("mips", self.mips.min)?;
        self.energy_coefficient.validate("energy_coefficient")?;
        ConfigurationError::ensure_positive("energy_coefficient", self.energy_coefficient.min)?;
        self.demand.validate("demand")?;
        ConfigurationError::ensure_positive("demand", self.demand.min)?;
        Ok(())
    }
}

/// A compute node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    index: NodeIndex,
    capacity: f64,
    energy_coefficient: f64,
}

impl Node {
    /// Creates a node.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is negative or `energy_coefficient` is not strictly positive.
    pub fn new(index: NodeIndex, capacity: f64, energy_coefficient: f64) -> Self {
        assert!(
            capacity.is_finite() && capacity >= 0.0,
            "called `Node::new` with invalid capacity: {}",
            capacity
        );
        assert!(
            energy_coefficient.is_finite() && energy_coefficient > 0.0,
            "called `Node::new` with invalid energy coefficient: {}",
            energy_coefficient
        );

        Self {
            index,
            capacity,
            energy_coefficient,
        }
    }

    #[inline]
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Maximum load the node serves without being overloaded.
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Energy consumed per unit of load.
    #[inline]
    pub fn energy_coefficient(&self) -> f64 {
        self.energy_coefficient
    }
}

/// A unit of work with a fixed resource demand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Task {
    index: TaskIndex,
    demand: f64,
}

impl Task {
    /// Creates a task.
    ///
    /// # Panics
    ///
    /// Panics if `demand` is not strictly positive.
    pub fn new(index: TaskIndex, demand: f64) -> Self {
        assert!(
            demand.is_finite() && demand > 0.0,
            "called `Task::new` with invalid demand: {}",
            demand
        );

        Self { index, demand }
    }

    #[inline]
    pub fn index(&self) -> TaskIndex {
        self.index
    }

    #[inline]
    pub fn demand(&self) -> f64 {
        self.demand
    }
}

/// Builder for a randomized `Environment`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentBuilder {
    node_count: usize,
    task_count: usize,
    seed: u64,
    ranges: EnvironmentRanges,
}

impl EnvironmentBuilder {
    /// Starts a builder for `node_count` nodes and `task_count` tasks with default ranges and seed `0`.
    #[inline]
    pub fn new(node_count: usize, task_count: usize) -> Self {
        Self {
            node_count,
            task_count,
            seed: 0,
            ranges: EnvironmentRanges::default(),
        }
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn ranges(mut self, ranges: EnvironmentRanges) -> Self {
        self.ranges = ranges;
        self
    }

    /// Validates the settings and draws nodes, then tasks.
    pub fn build(self) -> Result<Environment, ConfigurationError> {
        ConfigurationError::ensure_non_zero("node_count", self.node_count)?;
        ConfigurationError::ensure_non_zero("task_count", self.task_count)?;
        self.ranges.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let processing_elements = f64::from(self.ranges.processing_elements);

        let nodes = (0..self.node_count)
            .map(|i| {
                let capacity = processing_elements * self.ranges.mips.sample(&mut rng);
                let energy = self.ranges.energy_coefficient.sample(&mut rng);
                Node::new(NodeIndex::new(i), capacity, energy)
            })
            .collect();

        let tasks = (0..self.task_count)
            .map(|i| Task::new(TaskIndex::new(i), self.ranges.demand.sample(&mut rng)))
            .collect();

        Ok(Environment::from_parts(nodes, tasks, rng))
    }
}

/// Nodes, workload, and liveness of one simulation run.
#[derive(Clone, Debug)]
pub struct Environment {
    nodes: Vec<Node>,
    tasks: Vec<Task>,
    alive: FixedBitSet,
    rng: ChaCha8Rng,
    total_demand: f64,
    max_energy_coefficient: f64,
}

impl Environment {
    /// Creates an environment with default sampling ranges.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroCount` if `node_count` or `task_count` is zero.
    pub fn initialize(
        node_count: usize,
        task_count: usize,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        EnvironmentBuilder::new(node_count, task_count)
            .seed(seed)
            .build()
    }

    /// Assembles an environment from explicit nodes and tasks, all alive.
    ///
    /// `seed` drives later fault injections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroCount` if either list is empty.
    pub fn with_nodes_and_tasks(
        nodes: Vec<Node>,
        tasks: Vec<Task>,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        ConfigurationError::ensure_non_zero("node_count", nodes.len())?;
        ConfigurationError::ensure_non_zero("task_count", tasks.len())?;
        Ok(Self::from_parts(nodes, tasks, ChaCha8Rng::seed_from_u64(seed)))
    }

    fn from_parts(nodes: Vec<Node>, tasks: Vec<Task>, rng: ChaCha8Rng) -> Self {
        let mut alive = FixedBitSet::with_capacity(nodes.len());
        alive.insert_range(..);

        let total_demand: f64 = tasks.iter().map(Task::demand).sum();
        let max_energy_coefficient = nodes
            .iter()
            .map(Node::energy_coefficient)
            .fold(0.0, f64::max);

        Self {
            nodes,
            tasks,
            alive,
            rng,
            total_demand,
            max_energy_coefficient,
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive.count_ones(..)
    }

    /// Returns whether `node` is alive.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of bounds.
    #[inline]
    pub fn is_alive(&self, node: NodeIndex) -> bool {
        let index = node.get();
        assert!(
            index < self.node_count(),
            "called `Environment::is_alive` with node index out of bounds: the len is {} but the index is {}",
            self.node_count(),
            index
        );
        self.alive.contains(index)
    }

    /// Sum of all task demands.
    #[inline]
    pub fn total_demand(&self) -> f64 {
        self.total_demand
    }

    /// Largest energy coefficient over all nodes.
    #[inline]
    pub fn max_energy_coefficient(&self) -> f64 {
        self.max_energy_coefficient
    }

    /// Marks `node` as failed. Returns `true` if it was alive.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of bounds.
    pub fn fail_node(&mut self, node: NodeIndex) -> bool {
        let was_alive = self.is_alive(node);
        self.alive.set(node.get(), false);
        was_alive
    }

    /// Fails `round(failure_rate * node_count)` nodes chosen among the alive ones.
    ///
    /// Failures accumulate over calls and nodes never recover. If fewer nodes are
    /// alive than requested, all remaining nodes fail. Returns the nodes failed by
    /// this call in ascending order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ProbabilityOutOfRange` if `failure_rate` is
    /// not within `[0, 1]`.
    pub fn inject_failures(
        &mut self,
        failure_rate: f64,
    ) -> Result<Vec<NodeIndex>, ConfigurationError> {
        ConfigurationError::ensure_probability("failure_rate", failure_rate)?;
        Ok(self.fail_fraction(failure_rate))
    }

    /// Applies a scheduled failure event.
    ///
    /// Behaves like `inject_failures` with the event's rate. Returns the nodes
    /// failed by this event in ascending order.
    #[inline]
    pub fn apply_failure_event(&mut self, event: &FailureEvent) -> Vec<NodeIndex> {
        self.fail_fraction(event.rate())
    }

    fn fail_fraction(&mut self, failure_rate: f64) -> Vec<NodeIndex> {
        let requested = (failure_rate * self.node_count() as f64).round() as usize;
        let candidates: Vec<usize> = self.alive.ones().collect();
        let amount = requested.min(candidates.len());

        let mut failed: Vec<NodeIndex> =
            rand::seq::index::sample(&mut self.rng, candidates.len(), amount)
                .into_iter()
                .map(|position| NodeIndex::new(candidates[position]))
                .collect();
        failed.sort();

        for node in &failed {
            self.alive.set(node.get(), false);
        }

        failed
    }

    /// Computes the raw metrics of routing the workload according to `assignment`.
    ///
    /// Each node's load is the total demand of its tasks. A node serves its tasks
    /// if it is alive and its load does not exceed its capacity; tasks on any other
    /// node are charged `RESPONSE_TIME_PENALTY` and do not count towards throughput.
    ///
    /// # Panics
    ///
    /// Panics if `assignment` does not cover exactly `task_count` tasks or
    /// references a node outside the environment.
    pub fn evaluate(&self, assignment: &Assignment) -> Metrics {
        assert_eq!(
            assignment.num_tasks(),
            self.task_count(),
            "called `Environment::evaluate` with an assignment of {} tasks, but the environment has {}",
            assignment.num_tasks(),
            self.task_count()
        );

        let mut loads = vec![0.0_f64; self.node_count()];
        for (task, node) in self.tasks.iter().zip(assignment.nodes()) {
            loads[node.get()] += task.demand();
        }

        let utilisation: Vec<Option<f64>> = self
            .nodes
            .iter()
            .zip(&loads)
            .map(|(node, &load)| {
                let serving = self.alive.contains(node.index().get()) && load <= node.capacity();
                if !serving {
                    return None;
                }
                if node.capacity() > 0.0 {
                    Some(load / node.capacity())
                } else {
                    Some(0.0)
                }
            })
            .collect();

        let mut response_sum = 0.0;
        let mut served_tasks = 0usize;
        for node in assignment.nodes() {
            match utilisation[node.get()] {
                Some(u) => {
                    response_sum += u;
                    served_tasks += 1;
                }
                None => response_sum += RESPONSE_TIME_PENALTY,
            }
        }

        let num_tasks = assignment.num_tasks();
        let violating_tasks = num_tasks - served_tasks;
        let (response_time, throughput) = if num_tasks == 0 {
            (0.0, 0.0)
        } else {
            (
                response_sum / num_tasks as f64,
                served_tasks as f64 / num_tasks as f64,
            )
        };

        let energy: f64 = self
            .nodes
            .iter()
            .zip(&loads)
            .map(|(node, load)| load * node.energy_coefficient())
            .sum();

        let active_nodes = self.alive_count();
        let dead_nodes = self.node_count() - active_nodes;
        let fault_tolerance = if dead_nodes == 0 {
            1.0
        } else {
            let unloaded_dead = (0..self.node_count())
                .filter(|&i| !self.alive.contains(i) && loads[i] == 0.0)
                .count();
            unloaded_dead as f64 / dead_nodes as f64
        };

        Metrics {
            response_time,
            throughput,
            energy,
            fault_tolerance,
            violating_tasks,
            served_tasks,
            active_nodes,
            energy_bound: self.total_demand * self.max_energy_coefficient,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Environment Summary")?;
        writeln!(
            f,
            "   Nodes: {} ({} alive), Tasks: {}, Total Demand: {:.1}",
            self.node_count(),
            self.alive_count(),
            self.task_count(),
            self.total_demand
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "   {:<6} | {:<12} | {:<12} | {:<6}",
            "Node", "Capacity", "Energy/Unit", "Alive"
        )?;
        writeln!(f, "   {:-<6}-+-{:-<12}-+-{:-<12}-+-{:-<6}", "", "", "", "")?;
        for node in &self.nodes {
            writeln!(
                f,
                "   {:<6} | {:<12.1} | {:<12.5} | {:<6}",
                node.index().get(),
                node.capacity(),
                node.energy_coefficient(),
                self.alive.contains(node.index().get())
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn fixed_environment() -> Environment {
        // Two nodes: capacity 10 and 4, energy 0.5 and 1.0.
        let nodes = vec![Node::new(ni(0), 10.0, 0.5), Node::new(ni(1), 4.0, 1.0)];
        let tasks = vec![
            Task::new(TaskIndex::new(0), 3.0),
            Task::new(TaskIndex::new(1), 2.0),
            Task::new(TaskIndex::new(2), 5.0),
        ];
        Environment::with_nodes_and_tasks(nodes, tasks, 7).unwrap()
    }

    #[test]
    fn test_initialize_rejects_zero_counts() {
        assert_eq!(
            Environment::initialize(0, 5, 1).unwrap_err(),
            ConfigurationError::ZeroCount { name: "node_count" }
        );
        assert_eq!(
            Environment::initialize(5, 0, 1).unwrap_err(),
            ConfigurationError::ZeroCount { name: "task_count" }
        );
    }

    #[test]
    fn test_initialize_is_deterministic_and_within_ranges() {
        let a = Environment::initialize(6, 12, 42).unwrap();
        let b = Environment::initialize(6, 12, 42).unwrap();

        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.tasks(), b.tasks());
        for node in a.nodes() {
            assert!((8000.0..=16000.0).contains(&node.capacity()));
            assert!((0.001..=0.003).contains(&node.energy_coefficient()));
        }
        for task in a.tasks() {
            assert!((200.0..=4000.0).contains(&task.demand()));
        }
        assert_eq!(a.alive_count(), 6);
    }

    #[test]
    fn test_builder_rejects_inverted_range() {
        let ranges = EnvironmentRanges {
            demand: SampleRange::new(10.0, 1.0),
            ..EnvironmentRanges::default()
        };
        let err = EnvironmentBuilder::new(2, 2).ranges(ranges).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidRange { name: "demand", .. }
        ));
    }

    #[test]
    fn test_inject_failures_validates_rate() {
        let mut env = Environment::initialize(4, 4, 3).unwrap();
        assert!(env.inject_failures(-0.1).is_err());
        assert!(env.inject_failures(1.1).is_err());
        assert_eq!(env.alive_count(), 4);
    }

    #[test]
    fn test_inject_failures_counts_and_accumulates() {
        let mut env = Environment::initialize(10, 4, 3).unwrap();

        let first = env.inject_failures(0.3).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(env.alive_count(), 7);
        for node in &first {
            assert!(!env.is_alive(*node));
        }

        let second = env.inject_failures(0.3).unwrap();
        assert_eq!(second.len(), 3);
        assert!(second.iter().all(|node| !first.contains(node)));
        assert_eq!(env.alive_count(), 4);

        env.inject_failures(1.0).unwrap();
        assert_eq!(env.alive_count(), 0);
        assert!(env.inject_failures(1.0).unwrap().is_empty());
    }

    #[test]
    fn test_failure_event_on_a_copy_leaves_the_snapshot_alive() {
        let snapshot = Environment::initialize(8, 4, 21).unwrap();
        let event = FailureEvent::new(5, 0.5).unwrap();

        let mut first = snapshot.clone();
        let mut second = snapshot.clone();
        let failed = first.apply_failure_event(&event);
        assert_eq!(failed.len(), 4);
        assert_eq!(first.alive_count(), 4);
        assert_eq!(second.apply_failure_event(&event), failed);
        assert_eq!(snapshot.alive_count(), 8);
    }

    #[test]
    fn test_inject_failures_is_deterministic_given_seed() {
        let mut a = Environment::initialize(20, 4, 99).unwrap();
        let mut b = Environment::initialize(20, 4, 99).unwrap();
        assert_eq!(a.inject_failures(0.25).unwrap(), b.inject_failures(0.25).unwrap());
    }

    #[test]
    fn test_evaluate_all_served() {
        let env = fixed_environment();
        // Node 0 gets tasks 0 and 2 (load 8 / 10), node 1 gets task 1 (load 2 / 4).
        let assignment = Assignment::new(vec![ni(0), ni(1), ni(0)]);
        let m = env.evaluate(&assignment);

        assert_eq!(m.throughput, 1.0);
        assert_eq!(m.violating_tasks, 0);
        assert_eq!(m.served_tasks, 3);
        assert!((m.response_time - (0.8 + 0.5 + 0.8) / 3.0).abs() < 1e-12);
        assert!((m.energy - (8.0 * 0.5 + 2.0 * 1.0)).abs() < 1e-12);
        assert_eq!(m.fault_tolerance, 1.0);
        assert!((m.energy_bound - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_overloaded_node_is_penalized() {
        let env = fixed_environment();
        // Node 1 gets tasks 0 and 2 (load 8 > capacity 4).
        let assignment = Assignment::new(vec![ni(1), ni(0), ni(1)]);
        let m = env.evaluate(&assignment);

        assert_eq!(m.violating_tasks, 2);
        assert!((m.throughput - 1.0 / 3.0).abs() < 1e-12);
        let expected_rt = (2.0 * RESPONSE_TIME_PENALTY + 0.2) / 3.0;
        assert!((m.response_time - expected_rt).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_dead_node_and_fault_tolerance() {
        let mut env = fixed_environment();
        assert!(env.fail_node(ni(1)));
        assert!(!env.fail_node(ni(1)));

        let avoiding = env.evaluate(&Assignment::new(vec![ni(0), ni(0), ni(0)]));
        assert_eq!(avoiding.fault_tolerance, 1.0);
        assert_eq!(avoiding.throughput, 1.0);
        assert_eq!(avoiding.active_nodes, 1);

        let hitting = env.evaluate(&Assignment::new(vec![ni(0), ni(1), ni(0)]));
        assert_eq!(hitting.fault_tolerance, 0.0);
        assert_eq!(hitting.violating_tasks, 1);
    }

    #[test]
    fn test_evaluate_all_dead_has_zero_throughput() {
        let mut env = Environment::initialize(3, 8, 5).unwrap();
        env.inject_failures(1.0).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let m = env.evaluate(&Assignment::random(8, 3, &mut rng));

        assert_eq!(m.throughput, 0.0);
        assert_eq!(m.response_time, RESPONSE_TIME_PENALTY);
        assert_eq!(m.violating_tasks, 8);
        assert!(m.energy.is_finite());
    }

    #[test]
    #[should_panic(expected = "called `Environment::evaluate` with an assignment of 2 tasks")]
    fn test_evaluate_panics_on_length_mismatch() {
        let env = fixed_environment();
        let _ = env.evaluate(&Assignment::new(vec![ni(0), ni(0)]));
    }

    #[test]
    fn test_display_lists_nodes() {
        let env = fixed_environment();
        let shown = env.to_string();
        assert!(shown.starts_with("Environment Summary\n"));
        assert!(shown.contains("Nodes: 2 (2 alive), Tasks: 3"));
    }
}
