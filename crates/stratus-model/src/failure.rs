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

//! Scheduled fault injection.
//!
//! A `FailureSchedule` lists the iterations at which a running search loses
//! nodes. Each `FailureEvent` fails `round(rate * node_count)` of the nodes
//! still alive when it fires, drawing them from the environment's own random
//! stream, so every run that starts from the same environment snapshot loses
//! the same nodes at the same iterations.
//!
//! Failures before the first iteration are configured separately through
//! `Environment::inject_failures`; a scheduled event therefore fires no earlier
//! than iteration `1`.

use crate::error::ConfigurationError;

/// Failure of a fraction of the nodes at one iteration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "(u64, f64)", into = "(u64, f64)")]
pub struct FailureEvent {
    iteration: u64,
    rate: f64,
}

impl FailureEvent {
    /// Creates an event that fails `rate * node_count` nodes at `iteration`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroCount` if `iteration` is zero and
    /// `ConfigurationError::ProbabilityOutOfRange` if `rate` is not within `[0, 1]`.
    pub fn new(iteration: u64, rate: f64) -> Result<Self, ConfigurationError> {
        if iteration == 0 {
            return Err(ConfigurationError::ZeroCount {
                name: "failure_event.iteration",
            });
        }
        ConfigurationError::ensure_probability("failure_event.rate", rate)?;
        Ok(Self { iteration, rate })
    }

    #[inline]
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Fraction of all nodes to fail, in `[0, 1]`.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl TryFrom<(u64, f64)> for FailureEvent {
    type Error = ConfigurationError;

    fn try_from((iteration, rate): (u64, f64)) -> Result<Self, Self::Error> {
        Self::new(iteration, rate)
    }
}

impl From<FailureEvent> for (u64, f64) {
    fn from(event: FailureEvent) -> Self {
        (event.iteration, event.rate)
    }
}

impl std::fmt::Display for FailureEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FailureEvent(iteration: {}, rate: {})",
            self.iteration, self.rate
        )
    }
}

/// Failure events ordered by iteration.
///
/// Events sharing an iteration keep their relative order and fire one after
/// the other.
#[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "Vec<FailureEvent>", into = "Vec<FailureEvent>")]
pub struct FailureSchedule {
    events: Vec<FailureEvent>,
}

impl FailureSchedule {
    /// Creates an empty schedule.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `event`, keeping the schedule ordered.
    pub fn push(&mut self, event: FailureEvent) {
        let position = self
            .events
            .partition_point(|e| e.iteration <= event.iteration);
        self.events.insert(position, event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn events(&self) -> &[FailureEvent] {
        &self.events
    }

    /// Events that fire at `iteration`, in schedule order.
    pub fn events_at(&self, iteration: u64) -> &[FailureEvent] {
        let start = self.events.partition_point(|e| e.iteration < iteration);
        let end = self.events.partition_point(|e| e.iteration <= iteration);
        &self.events[start..end]
    }
}

impl From<Vec<FailureEvent>> for FailureSchedule {
    fn from(mut events: Vec<FailureEvent>) -> Self {
        events.sort_by_key(FailureEvent::iteration);
        Self { events }
    }
}

impl From<FailureSchedule> for Vec<FailureEvent> {
    fn from(schedule: FailureSchedule) -> Self {
        schedule.events
    }
}

impl FromIterator<FailureEvent> for FailureSchedule {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = FailureEvent>,
    {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(iteration: u64, rate: f64) -> FailureEvent {
        FailureEvent::new(iteration, rate).unwrap()
    }

    #[test]
    fn test_event_validation() {
        assert_eq!(
            FailureEvent::new(0, 0.5).unwrap_err(),
            ConfigurationError::ZeroCount {
                name: "failure_event.iteration"
            }
        );
        assert_eq!(
            FailureEvent::new(3, 1.5).unwrap_err(),
            ConfigurationError::ProbabilityOutOfRange {
                name: "failure_event.rate",
                value: 1.5
            }
        );
        assert!(FailureEvent::new(3, f64::NAN).is_err());
        assert_eq!(event(3, 0.25).rate(), 0.25);
    }

    #[test]
    fn test_schedule_orders_events_and_keeps_ties_stable() {
        let mut schedule: FailureSchedule =
            vec![event(9, 0.1), event(2, 0.2), event(9, 0.3)].into();
        schedule.push(event(2, 0.4));

        let iterations: Vec<u64> = schedule.events().iter().map(|e| e.iteration()).collect();
        assert_eq!(iterations, vec![2, 2, 9, 9]);
        assert_eq!(schedule.events_at(2), &[event(2, 0.2), event(2, 0.4)]);
        assert_eq!(schedule.events_at(9), &[event(9, 0.1), event(9, 0.3)]);
        assert!(schedule.events_at(5).is_empty());
        assert!(schedule.events_at(10).is_empty());
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = FailureSchedule::new();
        assert!(schedule.is_empty());
        assert_eq!(schedule.len(), 0);
        assert!(schedule.events_at(1).is_empty());
    }
}
