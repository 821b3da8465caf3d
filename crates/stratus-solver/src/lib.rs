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

//! # Stratus Solver
//!
//! Side-by-side comparison of the Stratus metaheuristics. This crate owns the
//! comparison configuration, builds the shared environment snapshot, drives
//! each algorithm through the common search protocol, and gathers the results
//! into a report.
//!
//! ## Modules
//!
//! - `config`: `ComparisonConfig` and its builder, with serde support.
//! - `algorithm`: the `Algorithm` enum and strategy construction.
//! - `comparison`: the `Comparison` driver.
//! - `trace`: lazy, sampled per-algorithm convergence traces.
//! - `report`: per-algorithm summaries and the printable comparison table.
//!
//! ## Usage
//!
//! ```rust
//! use stratus_solver::{comparison::Comparison, config::ComparisonConfig};
//!
//! let config = ComparisonConfig::builder()
//!     .node_count(5)
//!     .task_count(10)
//!     .population_size(10)
//!     .iterations(20)
//!     .build()
//!     .unwrap();
//!
//! let report = Comparison::new(config).unwrap().run_all();
//! println!("{}", report);
//! ```

pub mod algorithm;
pub mod comparison;
pub mod config;
pub mod report;
pub mod trace;
