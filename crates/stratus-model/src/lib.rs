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

//! # Stratus Model
//!
//! **The simulated cloud for the Stratus load-balancing workbench.**
//!
//! This crate defines the data every search works against: nodes with a
//! capacity and an energy coefficient, a workload of tasks with fixed demands,
//! fault injection that takes nodes offline, and the evaluation that turns a
//! task-to-node `Assignment` into raw `Metrics`.
//!
//! ## Modules
//!
//! * **`index`**: strongly typed `NodeIndex` and `TaskIndex`.
//! * **`environment`**: `Environment` (a read-only snapshot once built), its
//!   builder and sampling ranges, fault injection, and `evaluate`.
//! * **`assignment`**: the candidate-solution representation shared by all
//!   metaheuristics.
//! * **`metrics`**: response time, throughput, energy, and fault tolerance of an
//!   assignment.
//! * **`error`**: `ConfigurationError`, raised by every fail-fast validation.
//! * **`failure`**: `FailureSchedule`, node failures that strike during a search.

pub mod assignment;
pub mod environment;
pub mod error;
pub mod failure;
pub mod index;
pub mod metrics;
