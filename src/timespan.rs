// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Signed calendar-length intervals.
//!
//! A [`Timespan`] stores six independent integer components. No
//! normalisation is enforced: `Timespan::new(0, 0, 0, 0, 90, 0)` is a valid
//! value meaning ninety minutes. Only the aggregate returned by
//! [`Timespan::to_seconds`] carries meaning, computed with fixed-length
//! months and years:
//!
//! | Unit | Seconds |
//! |------|---------|
//! | year | 31 556 952 (365.2425 days) |
//! | month | 2 628 288 (one twelfth of that, rounded) |
//! | day | 86 400 |
//! | hour | 3 600 |
//! | minute | 60 |
//!
//! Many component tuples share one aggregate, so
//! `Timespan::from_seconds(t.to_seconds())` is not guaranteed to give back
//! `t` verbatim.

use crate::error::{Error, Result};
use crate::setting::Setting;
use qtty::Seconds;
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const SECONDS_PER_YEAR: i64 = 31_556_952;
pub const SECONDS_PER_MONTH: i64 = 2_628_288;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_MINUTE: i64 = 60;

/// A signed calendar-length interval.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timespan {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Timespan {
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0, 0);

    /// One second; the fallback step of
    /// [`SettingRange::increment_until_range`](crate::SettingRange::increment_until_range).
    pub const SECOND: Self = Self::new(0, 0, 0, 0, 0, 1);

    // ── constructors ──────────────────────────────────────────────────

    #[inline]
    pub const fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    #[inline]
    pub const fn from_days(days: i64) -> Self {
        Self::new(0, 0, days, 0, 0, 0)
    }

    #[inline]
    pub const fn from_hours(hours: i64) -> Self {
        Self::new(0, 0, 0, hours, 0, 0)
    }

    #[inline]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self::new(0, 0, 0, 0, minutes, 0)
    }

    /// Reinterpret a setting's own date fields as timespan components.
    ///
    /// The aggregate of this value is what orders and subtracts settings.
    pub fn from_setting(setting: &Setting) -> Self {
        let date = setting.date();
        Self::new(
            date.year.into(),
            date.month.into(),
            date.day.into(),
            date.hour.into(),
            date.minute.into(),
            date.second.into(),
        )
    }

    /// Decompose an aggregate number of seconds by successive division.
    ///
    /// The magnitude is decomposed and the sign is then applied to every
    /// component, so `from_seconds(-90)` is `0y 0mo 0d 0h -1m -30s`.
    pub const fn from_seconds(total: i64) -> Self {
        let negative = total < 0;
        let mut rest = total.unsigned_abs();

        let years = rest / SECONDS_PER_YEAR as u64;
        rest %= SECONDS_PER_YEAR as u64;
        let months = rest / SECONDS_PER_MONTH as u64;
        rest %= SECONDS_PER_MONTH as u64;
        let days = rest / SECONDS_PER_DAY as u64;
        rest %= SECONDS_PER_DAY as u64;
        let hours = rest / SECONDS_PER_HOUR as u64;
        rest %= SECONDS_PER_HOUR as u64;
        let minutes = rest / SECONDS_PER_MINUTE as u64;
        let seconds = rest % SECONDS_PER_MINUTE as u64;

        let sign = if negative { -1 } else { 1 };
        Self::new(
            sign * years as i64,
            sign * months as i64,
            sign * days as i64,
            sign * hours as i64,
            sign * minutes as i64,
            sign * seconds as i64,
        )
    }

    // ── conversions ───────────────────────────────────────────────────

    /// Approximate length in seconds using the fixed unit lengths,
    /// saturating at the `i64` bounds.
    #[inline]
    pub const fn to_seconds(&self) -> i64 {
        saturate(self.wide_seconds())
    }

    /// The aggregate without overflow.
    const fn wide_seconds(&self) -> i128 {
        SECONDS_PER_YEAR as i128 * self.years as i128
            + SECONDS_PER_MONTH as i128 * self.months as i128
            + SECONDS_PER_DAY as i128 * self.days as i128
            + SECONDS_PER_HOUR as i128 * self.hours as i128
            + SECONDS_PER_MINUTE as i128 * self.minutes as i128
            + self.seconds as i128
    }

    /// The aggregate as a `qtty` quantity.
    #[inline]
    pub fn as_quantity(&self) -> Seconds {
        Seconds::new(self.to_seconds() as f64)
    }

    #[inline]
    pub const fn nonnegative(&self) -> bool {
        self.to_seconds() >= 0
    }

    /// `true` when no single component is negative.
    ///
    /// This is stricter than [`nonnegative`](Self::nonnegative), which only
    /// looks at the aggregate.
    #[inline]
    pub const fn all_components_nonnegative(&self) -> bool {
        self.years >= 0
            && self.months >= 0
            && self.days >= 0
            && self.hours >= 0
            && self.minutes >= 0
            && self.seconds >= 0
    }

    // ── scaling ───────────────────────────────────────────────────────

    /// `self` scaled by `n`, decomposed back into components.
    ///
    /// Fails with [`Error::NegativeComponent`] if any component is negative.
    pub fn checked_scale(&self, n: i64) -> Result<Self> {
        self.checked_fraction(n, 1)
    }

    /// `self` scaled by the ratio `num / den`, floored to whole seconds.
    ///
    /// Used to place evenly spaced samples inside a range. Fails with
    /// [`Error::NegativeComponent`] if any component is negative.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    pub fn checked_fraction(&self, num: i64, den: i64) -> Result<Self> {
        assert!(den != 0, "timespan fraction with a zero denominator");
        if !self.all_components_nonnegative() {
            return Err(Error::NegativeComponent(*self));
        }
        let total = self.wide_seconds().saturating_mul(i128::from(num));
        Ok(Self::from_seconds(saturate(total.div_euclid(i128::from(den)))))
    }
}

const fn saturate(value: i128) -> i64 {
    if value > i64::MAX as i128 {
        i64::MAX
    } else if value < i64::MIN as i128 {
        i64::MIN
    } else {
        value as i64
    }
}

// ── Display / parsing ─────────────────────────────────────────────────────

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}y {}mo {}d {}h {}m {}s",
            self.years, self.months, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Parses whitespace-separated (or adjacent) `<integer><unit>` terms with
/// units `y`, `mo`, `d`, `h`, `m` and `s`; repeated units accumulate.
///
/// ```
/// use sunvec::Timespan;
///
/// let step: Timespan = "1d 2h 30m".parse().unwrap();
/// assert_eq!(step, Timespan::new(0, 0, 1, 2, 30, 0));
/// ```
impl FromStr for Timespan {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let fail = |reason: String| Error::ParseTimespan {
            input: input.to_owned(),
            reason,
        };

        let mut rest = input.trim();
        if rest.is_empty() {
            return Err(fail("empty input".to_owned()));
        }

        let mut span = Timespan::ZERO;
        while !rest.is_empty() {
            let number_end = rest
                .char_indices()
                .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
                .map_or(rest.len(), |(i, _)| i);
            let (number, tail) = rest.split_at(number_end);
            let value: i64 = number
                .parse()
                .map_err(|_| fail(format!("expected a number at {rest:?}")))?;

            let unit_end = tail
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(tail.len());
            let (unit, tail) = tail.split_at(unit_end);
            let slot = match unit {
                "y" => &mut span.years,
                "mo" => &mut span.months,
                "d" => &mut span.days,
                "h" => &mut span.hours,
                "m" => &mut span.minutes,
                "s" => &mut span.seconds,
                "" => return Err(fail(format!("missing unit after {number}"))),
                other => return Err(fail(format!("unknown unit {other:?}"))),
            };
            *slot += value;
            rest = tail.trim_start();
        }
        Ok(span)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add for Timespan {
    type Output = Self;

    /// Componentwise sum.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.years + rhs.years,
            self.months + rhs.months,
            self.days + rhs.days,
            self.hours + rhs.hours,
            self.minutes + rhs.minutes,
            self.seconds + rhs.seconds,
        )
    }
}

impl Sub for Timespan {
    type Output = Self;

    /// Difference of the aggregates, decomposed back into components.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_seconds(saturate(self.wide_seconds() - rhs.wide_seconds()))
    }
}

impl Mul<i64> for Timespan {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if any component of `self` is negative; use
    /// [`Timespan::checked_scale`] to handle that case. The aggregate
    /// saturates at the `i64` bounds.
    fn mul(self, n: i64) -> Self::Output {
        assert!(
            self.all_components_nonnegative(),
            "cannot scale a timespan with a negative component: {self}"
        );
        Self::from_seconds(saturate(self.wide_seconds().saturating_mul(i128::from(n))))
    }
}

impl From<Timespan> for Seconds {
    #[inline]
    fn from(span: Timespan) -> Self {
        span.as_quantity()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
