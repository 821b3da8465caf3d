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

//! # Search Monitors
//!
//! Pluggable observers and controllers for the lifecycle of a search run.
//! Monitors can log progress, collect the convergence series, enforce limits,
//! and issue termination commands to stop a run before its iteration budget is
//! spent.
//!
//! ## Submodules
//!
//! - `search_monitor`: Core trait (`SearchMonitor`) and `SearchCommand` enum.
//! - `composite`: Aggregate multiple monitors into a single composite.
//! - `log`: Periodic `tracing` progress lines.
//! - `no_op`: A monitor that observes nothing and never stops a run.
//! - `stall`: Stops a run after a window of iterations without improvement.
//! - `time_limit`: Wall-clock time budget.

pub mod composite;
pub mod log;
pub mod no_op;
pub mod search_monitor;
pub mod stall;
pub mod time_limit;
