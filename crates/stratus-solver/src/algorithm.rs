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

//! The algorithms a comparison runs.

use crate::config::ComparisonConfig;
use rand_chacha::ChaCha8Rng;
use stratus_model::error::ConfigurationError;
use stratus_search::strategy::{
    SearchStrategy, bat::BatStrategy, butterfly::ButterflyStrategy, crow::CrowStrategy,
    lion::LionStrategy,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Algorithm {
    Lion,
    Bat,
    Crow,
    Butterfly,
}

impl Algorithm {
    /// Every algorithm, in reporting order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Lion,
        Algorithm::Bat,
        Algorithm::Crow,
        Algorithm::Butterfly,
    ];

    /// Human-readable name used in reports.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Lion => "Lion Optimization",
            Algorithm::Bat => "Bat Algorithm",
            Algorithm::Crow => "Crow Search",
            Algorithm::Butterfly => "Butterfly Optimization",
        }
    }

    /// Builds the strategy from this algorithm's parameter block in `config`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the parameter block is invalid.
    pub fn strategy(
        &self,
        config: &ComparisonConfig,
    ) -> Result<Box<dyn SearchStrategy<ChaCha8Rng>>, ConfigurationError> {
        Ok(match self {
            Algorithm::Lion => Box::new(LionStrategy::new(config.lion)?),
            Algorithm::Bat => Box::new(BatStrategy::new(config.bat)?),
            Algorithm::Crow => Box::new(CrowStrategy::new(config.crow)?),
            Algorithm::Butterfly => Box::new(ButterflyStrategy::new(config.butterfly)?),
        })
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
