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

//! Lazy, sampled convergence traces.
//!
//! An `AlgorithmTrace` wraps the `SearchRun` of one algorithm and yields its
//! iteration records on demand. Only every `sample_interval`-th record is
//! emitted, plus the final record of the run, which is always emitted even
//! when it falls between two samples or the run was stopped early. Nothing is
//! computed until the trace is iterated.

use crate::algorithm::Algorithm;
use rand_chacha::ChaCha8Rng;
use std::iter::FusedIterator;
use stratus_search::{
    engine::SearchRun, monitor::composite::CompositeMonitor, record::IterationRecord,
    result::SearchOutcome, strategy::SearchStrategy,
};

/// The run type every comparison algorithm is driven by.
pub type AlgorithmRun<'a> =
    SearchRun<'a, Box<dyn SearchStrategy<ChaCha8Rng>>, ChaCha8Rng, CompositeMonitor<'a>>;

pub struct AlgorithmTrace<'a> {
    algorithm: Algorithm,
    run: AlgorithmRun<'a>,
    sample_interval: u64,
    held: Option<IterationRecord>,
}

impl<'a> AlgorithmTrace<'a> {
    /// Wraps `run`, emitting every `sample_interval`-th record.
    ///
    /// # Panics
    ///
    /// Panics if `sample_interval` is zero.
    #[inline]
    pub fn new(algorithm: Algorithm, run: AlgorithmRun<'a>, sample_interval: u64) -> Self {
        assert!(
            sample_interval > 0,
            "called `AlgorithmTrace::new` with zero sample interval"
        );
        Self {
            algorithm,
            run,
            sample_interval,
            held: None,
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn sample_interval(&self) -> u64 {
        self.sample_interval
    }

    /// The underlying run, for inspecting its current state.
    #[inline]
    pub fn run(&self) -> &AlgorithmRun<'a> {
        &self.run
    }

    /// Runs whatever is left of the search and returns its outcome.
    #[inline]
    pub fn finish(self) -> SearchOutcome {
        self.run.finish()
    }
}

impl Iterator for AlgorithmTrace<'_> {
    type Item = IterationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        for record in self.run.by_ref() {
            if record.iteration % self.sample_interval == 0 {
                self.held = None;
                return Some(record);
            }
            self.held = Some(record);
        }
        self.held.take()
    }
}

impl FusedIterator for AlgorithmTrace<'_> {}

impl std::fmt::Debug for AlgorithmTrace<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmTrace")
            .field("algorithm", &self.algorithm)
            .field("sample_interval", &self.sample_interval)
            .field("run", &self.run)
            .finish()
    }
}
