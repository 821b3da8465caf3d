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

//! # Stratus Search
//!
//! **Population-based metaheuristics for task-to-node load balancing.**
//!
//! This crate contains everything a single search run needs on top of the
//! environment model: the fitness function and the oracle through which
//! strategies observe the environment, the shared repair rule, populations,
//! the four update rules, and the `SearchRun` loop that drives them under one
//! common protocol so their results are comparable.
//!
//! ## Modules
//!
//! * **`num`**: the numeric guard that keeps every score finite.
//! * **`bounds`**: `NodeBounds`, mapping continuous coordinates onto node indices.
//! * **`fitness`**: `FitnessWeights`, `WeightedFitness`, and `FitnessOracle`.
//! * **`population`**: fixed-size scored populations.
//! * **`incumbent`**: the best-so-far record of a run.
//! * **`strategy`**: the `SearchStrategy` trait with Lion, Bat, Crow, and Butterfly.
//! * **`engine`**: `SearchRun`, an iterator over per-iteration records.
//! * **`monitor`**: lifecycle observers (logging, stagnation, time limits).
//! * **`record`**, **`stats`**, **`result`**: what a run reports.
//!
//! ## Usage
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use stratus_model::environment::Environment;
//! use stratus_search::{
//!     engine::SearchRun,
//!     fitness::{FitnessOracle, WeightedFitness},
//!     monitor::no_op::NoOpMonitor,
//!     strategy::lion::{LionParams, LionStrategy},
//! };
//!
//! let environment = Environment::initialize(5, 10, 42).unwrap();
//! let fitness = WeightedFitness::default();
//! let oracle = FitnessOracle::new(&environment, &fitness);
//!
//! let strategy = LionStrategy::new(LionParams::default()).unwrap();
//! let run = SearchRun::new(
//!     oracle,
//!     strategy,
//!     NoOpMonitor::new(),
//!     ChaCha8Rng::seed_from_u64(42),
//!     20,
//!     50,
//! )
//! .unwrap();
//!
//! let outcome = run.finish();
//! assert!(outcome.best().score() <= outcome.baseline_score());
//! ```

pub mod bounds;
pub mod engine;
pub mod fitness;
pub mod incumbent;
pub mod monitor;
pub mod num;
pub mod population;
pub mod record;
pub mod result;
pub mod stats;
pub mod strategy;
