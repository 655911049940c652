// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ranges between two settings and the sequences sampled from them.
//!
//! A [`SettingRange`] keeps its start strictly before its end. Three
//! strategies turn a range into an ordered list of settings:
//!
//! | Method | Length | Points |
//! |--------|--------|--------|
//! | [`subdiv_range(n)`](SettingRange::subdiv_range) | `n + 1` | evenly spaced, closing on `end` |
//! | [`increment_range(step, count)`](SettingRange::increment_range) | `count` | `start + k·step`, `k = 1..=count` |
//! | [`increment_until_range(step)`](SettingRange::increment_until_range) | `≤ 101` | fixed steps bounded by `end` |
//!
//! None of them modify the range, so one range can be sampled repeatedly.
//! Steps are added with the range's [`CarryMode`], [`CarryMode::Stepwise`]
//! unless [`SettingRange::with_carry`] says otherwise.

use crate::error::{Error, Result};
use crate::setting::{CarryMode, Location, Setting, SettingDate};
use crate::timespan::Timespan;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard cap on the number of settings produced by
/// [`SettingRange::increment_until_range`].
pub const MAX_UNTIL_STEPS: usize = 101;

/// Projected step count above which step-until sampling warns.
const UNTIL_STEP_BUDGET: f64 = 100.0;

/// Which point step-until sampling reports on each iteration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UntilAnchor {
    /// One step ahead of the cursor that was just advanced. The first point
    /// is `start + 2·step` and the last may lie one step past `end`.
    #[default]
    Lookahead,
    /// The advanced cursor itself: `start + step`, `start + 2·step`, … up to
    /// and including the last point not after `end`.
    Cursor,
}

/// An ordered pair of settings with their cached span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingRange {
    start: Setting,
    end: Setting,
    span: Timespan,
    carry: CarryMode,
}

impl SettingRange {
    /// Range from `start` to `end`.
    ///
    /// If `start` does not precede `end` the range collapses to `start` on
    /// both ends with a zero span, and a warning is logged.
    pub fn new(start: Setting, end: Setting) -> Self {
        Self::try_new(start, end).unwrap_or_else(|err| {
            tracing::warn!(
                target: "sunvec::range",
                error = %err,
                "start does not precede end, collapsing range to its start"
            );
            Self {
                start,
                end: start,
                span: Timespan::ZERO,
                carry: CarryMode::default(),
            }
        })
    }

    /// Range from `start` to `end`, or [`Error::StartNotBeforeEnd`].
    pub fn try_new(start: Setting, end: Setting) -> Result<Self> {
        check_order(&start, &end)?;
        Ok(Self {
            start,
            end,
            span: end - start,
            carry: CarryMode::default(),
        })
    }

    /// The same range, stepping with `carry`.
    #[must_use]
    pub fn with_carry(mut self, carry: CarryMode) -> Self {
        self.carry = carry;
        self
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn start(&self) -> Setting {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Setting {
        self.end
    }

    /// `end − start`, never negative.
    #[inline]
    pub const fn span(&self) -> Timespan {
        self.span
    }

    #[inline]
    pub const fn start_date(&self) -> SettingDate {
        self.start.date()
    }

    #[inline]
    pub const fn end_date(&self) -> SettingDate {
        self.end.date()
    }

    /// The location samples are taken at (that of the start).
    #[inline]
    pub const fn location(&self) -> Location {
        self.start.location()
    }

    #[inline]
    pub const fn carry(&self) -> CarryMode {
        self.carry
    }

    /// `true` for a range that collapsed on construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.span == Timespan::ZERO
    }

    // ── endpoint changes ──────────────────────────────────────────────

    /// Replace the start if it still precedes the current end.
    ///
    /// On rejection the range is left untouched and a warning is logged.
    pub fn change_start(&mut self, start: Setting) -> Result<()> {
        if let Err(err) = check_order(&start, &self.end) {
            tracing::warn!(target: "sunvec::range", error = %err, "start cannot occur later than the end");
            return Err(err);
        }
        self.start = start;
        self.span = self.end - self.start;
        Ok(())
    }

    /// Replace the end if the current start still precedes it.
    ///
    /// On rejection the range is left untouched and a warning is logged.
    pub fn change_end(&mut self, end: Setting) -> Result<()> {
        if let Err(err) = check_order(&self.start, &end) {
            tracing::warn!(target: "sunvec::range", error = %err, "end cannot occur before the start");
            return Err(err);
        }
        self.end = end;
        self.span = self.end - self.start;
        Ok(())
    }

    // ── sampling ──────────────────────────────────────────────────────

    /// `divisions + 1` settings evenly spaced over the range.
    ///
    /// Element `i < divisions` is `start + span·i/divisions` (floored to
    /// whole seconds); the last element is `end` itself, so the closing
    /// sample is exact even though calendar stepping is approximate.
    /// With `divisions == 0` the result is `[end]`.
    pub fn subdiv_range(&self, divisions: usize) -> Vec<Setting> {
        let total = i128::from(self.span.to_seconds());
        let n = divisions as i128;
        let mut settings: Vec<Setting> = (0..n)
            .map(|i| {
                let offset = i64::try_from(total * i / n).unwrap_or(i64::MAX);
                self.start.add_with(Timespan::from_seconds(offset), self.carry)
            })
            .collect();
        settings.push(self.end);
        settings
    }

    /// `count` settings, each one `step` after the previous, starting one
    /// step after `start`.
    ///
    /// The running setting is threaded through a fold; the range itself is
    /// not advanced. Fails with [`Error::NonPositiveStep`] unless
    /// `step.to_seconds() > 0`.
    pub fn increment_range(&self, step: Timespan, count: usize) -> Result<Vec<Setting>> {
        let seconds = step.to_seconds();
        if seconds <= 0 {
            return Err(Error::NonPositiveStep { seconds });
        }
        Ok((0..count)
            .scan(self.start, |cursor, _| {
                *cursor = cursor.add_with(step, self.carry);
                Some(*cursor)
            })
            .collect())
    }

    /// Step from `start` towards `end`, reporting the look-ahead point.
    ///
    /// Shorthand for [`increment_until_range_with`](Self::increment_until_range_with)
    /// with [`UntilAnchor::Lookahead`].
    pub fn increment_until_range(&self, step: Timespan) -> Vec<Setting> {
        self.increment_until_range_with(step, UntilAnchor::Lookahead)
    }

    /// Step a cursor from `start` while `cursor + step` does not pass `end`.
    ///
    /// A non-positive step is replaced by one second. At most
    /// [`MAX_UNTIL_STEPS`] settings are produced; a warning is logged when
    /// the range would need more than 100 steps.
    pub fn increment_until_range_with(&self, step: Timespan, anchor: UntilAnchor) -> Vec<Setting> {
        let step = if step.to_seconds() <= 0 {
            tracing::warn!(
                target: "sunvec::range",
                step = %step,
                "non-positive increments are not permitted, using 1 second"
            );
            Timespan::SECOND
        } else {
            let projected = self.span.to_seconds() as f64 / step.to_seconds() as f64;
            if projected > UNTIL_STEP_BUDGET {
                tracing::warn!(
                    target: "sunvec::range",
                    step = %step,
                    projected,
                    limit = MAX_UNTIL_STEPS,
                    "increment too small to bridge the range, output will be truncated"
                );
            }
            step
        };

        let mut settings = Vec::new();
        let mut cursor = self.start;
        while (self.end - cursor.add_with(step, self.carry)).nonnegative() {
            cursor = cursor.add_with(step, self.carry);
            settings.push(match anchor {
                UntilAnchor::Lookahead => cursor.add_with(step, self.carry),
                UntilAnchor::Cursor => cursor,
            });
            if settings.len() == MAX_UNTIL_STEPS {
                break;
            }
        }
        settings
    }
}

fn check_order(start: &Setting, end: &Setting) -> Result<()> {
    if start.precedes(end) {
        Ok(())
    } else {
        Err(Error::StartNotBeforeEnd {
            start: start.aggregate_seconds(),
            end: end.aggregate_seconds(),
        })
    }
}

impl fmt::Display for SettingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nto\n{}", self.start, self.end)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Location = Location::new(40.0, -105.0);

    fn at(day: i32, hour: i32, minute: i32, second: i32) -> Setting {
        let checked = Setting::validate(HERE, SettingDate::new(2024, 1, day, hour, minute, second, -7));
        assert!(checked.is_clean());
        checked.value
    }

    #[test]
    fn new_caches_span() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(2, 6, 0, 0));
        assert_eq!(range.span(), Timespan::new(0, 0, 1, 6, 0, 0));
        assert_eq!(range.start(), at(1, 0, 0, 0));
        assert_eq!(range.end(), at(2, 6, 0, 0));
        assert_eq!(range.location(), HERE);
        assert_eq!(range.start_date().day, 1);
        assert_eq!(range.end_date().hour, 6);
        assert!(!range.is_empty());
    }

    #[test]
    fn reversed_endpoints_collapse_to_start() {
        let range = SettingRange::new(at(2, 0, 0, 0), at(1, 0, 0, 0));
        assert_eq!(range.start(), at(2, 0, 0, 0));
        assert_eq!(range.end(), at(2, 0, 0, 0));
        assert_eq!(range.span(), Timespan::ZERO);
        assert!(range.is_empty());
    }

    #[test]
    fn equal_endpoints_collapse() {
        let s = at(1, 12, 0, 0);
        assert!(SettingRange::try_new(s, s).is_err());
        assert!(SettingRange::new(s, s).is_empty());
    }

    #[test]
    fn try_new_reports_order_violation() {
        let err = SettingRange::try_new(at(1, 0, 0, 1), at(1, 0, 0, 0)).unwrap_err();
        assert!(matches!(err, Error::StartNotBeforeEnd { start, end } if start == end + 1));
    }

    #[test]
    fn change_start_validates_against_end() {
        let mut range = SettingRange::new(at(1, 0, 0, 0), at(3, 0, 0, 0));
        assert!(range.change_start(at(2, 0, 0, 0)).is_ok());
        assert_eq!(range.span(), Timespan::from_days(1));

        let before = range;
        assert!(range.change_start(at(4, 0, 0, 0)).is_err());
        assert_eq!(range, before);
    }

    #[test]
    fn change_end_validates_against_start() {
        let mut range = SettingRange::new(at(2, 0, 0, 0), at(3, 0, 0, 0));
        assert!(range.change_end(at(5, 0, 0, 0)).is_ok());
        assert_eq!(range.span(), Timespan::from_days(3));

        let before = range;
        assert!(range.change_end(at(2, 0, 0, 0)).is_err());
        assert!(range.change_end(at(1, 0, 0, 0)).is_err());
        assert_eq!(range, before);
    }

    #[test]
    fn subdiv_splits_evenly_and_closes_on_end() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(2, 0, 0, 0));
        let points = range.subdiv_range(4);
        assert_eq!(
            points,
            vec![
                at(1, 0, 0, 0),
                at(1, 6, 0, 0),
                at(1, 12, 0, 0),
                at(1, 18, 0, 0),
                at(2, 0, 0, 0),
            ]
        );
    }

    #[test]
    fn subdiv_floors_to_whole_seconds() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(1, 0, 0, 10));
        let seconds: Vec<i32> = range
            .subdiv_range(3)
            .iter()
            .map(|s| s.date().second)
            .collect();
        assert_eq!(seconds, vec![0, 3, 6, 10]);
    }

    #[test]
    fn subdiv_zero_yields_end_only() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(2, 0, 0, 0));
        assert_eq!(range.subdiv_range(0), vec![at(2, 0, 0, 0)]);
    }

    #[test]
    fn subdiv_of_collapsed_range_repeats_start() {
        let start = at(2, 0, 0, 0);
        let range = SettingRange::new(start, at(1, 23, 59, 59));
        assert_eq!(range.subdiv_range(3), vec![start; 4]);
    }

    #[test]
    fn increment_range_steps_from_start() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(2, 0, 0, 0));
        let points = range.increment_range(Timespan::from_hours(1), 3).unwrap();
        assert_eq!(points, vec![at(1, 1, 0, 0), at(1, 2, 0, 0), at(1, 3, 0, 0)]);
    }

    #[test]
    fn increment_range_ignores_end_and_leaves_range_intact() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(1, 1, 0, 0));
        let first = range.increment_range(Timespan::from_hours(1), 3).unwrap();
        let second = range.increment_range(Timespan::from_hours(1), 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[2], at(1, 3, 0, 0));
        assert_eq!(range.start(), at(1, 0, 0, 0));
    }

    #[test]
    fn increment_range_rejects_non_positive_steps() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(2, 0, 0, 0));
        assert_eq!(
            range.increment_range(Timespan::ZERO, 3),
            Err(Error::NonPositiveStep { seconds: 0 })
        );
        assert!(range.increment_range(Timespan::from_hours(-1), 3).is_err());
        assert_eq!(range.increment_range(Timespan::from_hours(1), 0), Ok(vec![]));
    }

    #[test]
    fn daily_steps_follow_the_range_carry_mode() {
        let range = SettingRange::new(at(29, 0, 0, 0), at(31, 0, 0, 0));
        assert_eq!(range.carry(), CarryMode::Stepwise);
        let days = |points: Vec<Setting>| -> Vec<(i32, i32)> {
            points.iter().map(|s| (s.date().month, s.date().day)).collect()
        };

        let stepwise = range.increment_range(Timespan::from_days(1), 4).unwrap();
        assert_eq!(days(stepwise), vec![(1, 30), (1, 31), (1, 12), (1, 13)]);

        let rollover = range
            .with_carry(CarryMode::Rollover)
            .increment_range(Timespan::from_days(1), 4)
            .unwrap();
        assert_eq!(days(rollover), vec![(1, 30), (1, 31), (2, 1), (2, 2)]);
    }

    #[test]
    fn with_carry_keeps_endpoints() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(2, 0, 0, 0));
        let rolled = range.with_carry(CarryMode::Rollover);
        assert_eq!(rolled.start(), range.start());
        assert_eq!(rolled.span(), range.span());
        assert_eq!(rolled.carry(), CarryMode::Rollover);
        assert_eq!(rolled.subdiv_range(4), range.subdiv_range(4));
    }

    #[test]
    fn increment_until_reports_lookahead_points() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(1, 3, 0, 0));
        let points = range.increment_until_range(Timespan::from_hours(1));
        assert_eq!(points, vec![at(1, 2, 0, 0), at(1, 3, 0, 0), at(1, 4, 0, 0)]);
    }

    #[test]
    fn increment_until_cursor_anchor_stays_inside_range() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(1, 3, 0, 0));
        let points = range.increment_until_range_with(Timespan::from_hours(1), UntilAnchor::Cursor);
        assert_eq!(points, vec![at(1, 1, 0, 0), at(1, 2, 0, 0), at(1, 3, 0, 0)]);
    }

    #[test]
    fn increment_until_substitutes_one_second_step() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(1, 0, 0, 5));
        let seconds: Vec<i32> = range
            .increment_until_range_with(Timespan::ZERO, UntilAnchor::Cursor)
            .iter()
            .map(|s| s.date().second)
            .collect();
        assert_eq!(seconds, vec![1, 2, 3, 4, 5]);
        assert_eq!(range.increment_until_range(Timespan::from_minutes(-1)).len(), 5);
    }

    #[test]
    fn increment_until_is_capped() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(2, 0, 0, 0));
        let points = range.increment_until_range(Timespan::from_minutes(1));
        assert_eq!(points.len(), MAX_UNTIL_STEPS);
        assert_eq!(points[0], at(1, 0, 2, 0));
        assert_eq!(points[100], at(1, 1, 42, 0));
    }

    #[test]
    fn increment_until_step_larger_than_range_is_empty() {
        let range = SettingRange::new(at(1, 0, 0, 0), at(1, 1, 0, 0));
        assert!(range.increment_until_range(Timespan::from_hours(2)).is_empty());
    }
}
