use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::{Time, TimeInterval};
use crate::error::TimeResult;
use crate::iter::{TimeIterator, TimeSpanIterator};

/// A pair of instants delimiting a range
///
/// No ordering is enforced between `start` and `end`. Walking an inverted
/// span yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// `end - start`; negative for an inverted span
    pub fn length(&self) -> TimeInterval {
        self.end - self.start
    }

    /// Whether `time` lies within the span, both ends included
    pub fn contains(&self, time: &Time) -> bool {
        self.start <= *time && *time <= self.end
    }

    /// Endpoint by position: 0 is `start`, 1 is `end`
    pub fn get(&self, index: usize) -> Option<&Time> {
        match index {
            0 => Some(&self.start),
            1 => Some(&self.end),
            _ => None,
        }
    }

    /// Instants from `start` to `end` in steps of `step`
    pub fn iter_times(&self, step: TimeInterval) -> TimeResult<TimeIterator> {
        TimeIterator::new(*self, step)
    }

    /// Consecutive sub-spans of length `step` tiling the span
    pub fn iter_spans(&self, step: TimeInterval) -> TimeResult<TimeSpanIterator> {
        TimeSpanIterator::new(*self, step)
    }
}

impl Index<usize> for TimeSpan {
    type Output = Time;

    fn index(&self, index: usize) -> &Time {
        match self.get(index) {
            Some(time) => time,
            None => panic!("TimeSpan index out of range: {} (expected 0 or 1)", index),
        }
    }
}

impl IntoIterator for TimeSpan {
    type Item = Time;
    type IntoIter = std::array::IntoIter<Time, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.start, self.end].into_iter()
    }
}

impl From<TimeSpan> for (Time, Time) {
    fn from(span: TimeSpan) -> Self {
        (span.start, span.end)
    }
}

impl From<(Time, Time)> for TimeSpan {
    fn from((start, end): (Time, Time)) -> Self {
        Self::new(start, end)
    }
}
