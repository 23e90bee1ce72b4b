//! Fixed-step walks over a [`TimeSpan`]
//!
//! Both generators are cheap descriptions of a walk. Calling `iter()` (or
//! iterating a reference) starts a fresh pass from `span.start` every time.

use log::debug;
use std::iter::FusedIterator;

use crate::error::{TimeError, TimeResult};
use crate::values::{Time, TimeInterval, TimeSpan};

fn ensure_positive(step: TimeInterval) -> TimeResult<TimeInterval> {
    if step <= TimeInterval::ZERO {
        debug!("rejecting non-positive step {}", step);
        return Err(TimeError::NonPositiveStep(step));
    }
    Ok(step)
}

/// Instants from `span.start` to `span.end` inclusive, `step` apart
///
/// The last instant is `span.end` when `step` divides the span evenly and
/// the last one before it otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeIterator {
    span: TimeSpan,
    step: TimeInterval,
}

impl TimeIterator {
    /// Fails with `NonPositiveStep` unless `step` is greater than zero
    pub fn new(span: TimeSpan, step: TimeInterval) -> TimeResult<Self> {
        Ok(Self {
            span,
            step: ensure_positive(step)?,
        })
    }

    pub fn span(&self) -> &TimeSpan {
        &self.span
    }

    pub fn step(&self) -> TimeInterval {
        self.step
    }

    pub fn iter(&self) -> TimeIter {
        TimeIter {
            cursor: Some(self.span.start),
            end: self.span.end,
            step: self.step,
        }
    }
}

impl<'a> IntoIterator for &'a TimeIterator {
    type Item = Time;
    type IntoIter = TimeIter;

    fn into_iter(self) -> TimeIter {
        self.iter()
    }
}

/// One pass of a [`TimeIterator`]
#[derive(Debug, Clone)]
pub struct TimeIter {
    cursor: Option<Time>,
    end: Time,
    step: TimeInterval,
}

impl Iterator for TimeIter {
    type Item = Time;

    fn next(&mut self) -> Option<Time> {
        let current = self.cursor.filter(|cursor| *cursor <= self.end)?;
        // stepping past the representable range ends the walk
        self.cursor = current.checked_add(self.step).ok();
        Some(current)
    }
}

impl FusedIterator for TimeIter {}

/// Consecutive, non-overlapping sub-spans of length `step` covering a span
///
/// The final sub-span is clipped to `span.end` and may be shorter than `step`.
/// A cursor landing exactly on `span.end` ends the walk without a zero-length span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpanIterator {
    span: TimeSpan,
    step: TimeInterval,
}

impl TimeSpanIterator {
    /// Fails with `NonPositiveStep` unless `step` is greater than zero
    pub fn new(span: TimeSpan, step: TimeInterval) -> TimeResult<Self> {
        Ok(Self {
            span,
            step: ensure_positive(step)?,
        })
    }

    pub fn span(&self) -> &TimeSpan {
        &self.span
    }

    pub fn step(&self) -> TimeInterval {
        self.step
    }

    pub fn iter(&self) -> TimeSpanIter {
        TimeSpanIter {
            cursor: Some(self.span.start),
            end: self.span.end,
            step: self.step,
        }
    }
}

impl<'a> IntoIterator for &'a TimeSpanIterator {
    type Item = TimeSpan;
    type IntoIter = TimeSpanIter;

    fn into_iter(self) -> TimeSpanIter {
        self.iter()
    }
}

/// One pass of a [`TimeSpanIterator`]
#[derive(Debug, Clone)]
pub struct TimeSpanIter {
    cursor: Option<Time>,
    end: Time,
    step: TimeInterval,
}

impl Iterator for TimeSpanIter {
    type Item = TimeSpan;

    fn next(&mut self) -> Option<TimeSpan> {
        let start = self.cursor.filter(|cursor| *cursor < self.end)?;
        let next = start.checked_add(self.step).ok();
        let end = next.map_or(self.end, |next| next.min(self.end));
        self.cursor = next;
        Some(TimeSpan::new(start, end))
    }
}

impl FusedIterator for TimeSpanIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_minutes() -> TimeSpan {
        let start = Time::new(2014, 4, 18, 17, 0, 0, 0).unwrap();
        TimeSpan::new(start, start + 5 * 60_i64)
    }

    fn minute() -> TimeInterval {
        TimeInterval::from_seconds(60)
    }

    #[test]
    fn test_times_include_both_ends() {
        let span = five_minutes();
        let times: Vec<Time> = TimeIterator::new(span, minute()).unwrap().iter().collect();

        assert_eq!(times.len(), 6);
        assert_eq!(times[0], span.start);
        assert_eq!(times[5], span.end);
        assert!(times.windows(2).all(|pair| pair[1] - pair[0] == minute()));
    }

    #[test]
    fn test_times_uneven_step_stays_inside() {
        let span = five_minutes();
        let step = TimeInterval::from_seconds(120);
        let times: Vec<Time> = TimeIterator::new(span, step).unwrap().iter().collect();

        assert_eq!(times.len(), 3);
        assert_eq!(*times.last().unwrap(), span.start + 240_i64);
    }

    #[test]
    fn test_spans_tile_the_span() {
        let span = five_minutes();
        let spans: Vec<TimeSpan> = TimeSpanIterator::new(span, minute()).unwrap().iter().collect();

        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].start, span.start);
        assert_eq!(spans[4].end, span.end);
        assert!(spans.windows(2).all(|pair| pair[0].end == pair[1].start));
    }

    #[test]
    fn test_last_span_is_clipped() {
        let span = five_minutes();
        let step = TimeInterval::from_seconds(120);
        let spans: Vec<TimeSpan> = TimeSpanIterator::new(span, step).unwrap().iter().collect();

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2].length(), minute());
        assert_eq!(spans[2].end, span.end);
    }

    #[test]
    fn test_restartable() {
        let walk = TimeIterator::new(five_minutes(), minute()).unwrap();
        assert_eq!(walk.iter().count(), 6);
        assert_eq!(walk.iter().count(), 6);

        let tiles = TimeSpanIterator::new(five_minutes(), minute()).unwrap();
        let first: Vec<TimeSpan> = (&tiles).into_iter().collect();
        let second: Vec<TimeSpan> = (&tiles).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_inverted_span_is_empty() {
        let span = five_minutes();
        let inverted = TimeSpan::new(span.end, span.start);

        assert_eq!(TimeIterator::new(inverted, minute()).unwrap().iter().count(), 0);
        assert_eq!(TimeSpanIterator::new(inverted, minute()).unwrap().iter().count(), 0);
    }

    #[test]
    fn test_empty_span() {
        let start = five_minutes().start;
        let point = TimeSpan::new(start, start);

        let times: Vec<Time> = TimeIterator::new(point, minute()).unwrap().iter().collect();
        assert_eq!(times, vec![start]);
        assert_eq!(TimeSpanIterator::new(point, minute()).unwrap().iter().count(), 0);
    }

    #[test]
    fn test_non_positive_step_is_rejected() {
        let span = five_minutes();
        for step in [TimeInterval::ZERO, TimeInterval::from_seconds(-60)] {
            assert_eq!(
                TimeIterator::new(span, step).unwrap_err(),
                TimeError::NonPositiveStep(step)
            );
            assert_eq!(
                TimeSpanIterator::new(span, step).unwrap_err(),
                TimeError::NonPositiveStep(step)
            );
        }
    }
}
