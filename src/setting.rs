// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Validated time-and-place instants.
//!
//! A [`Setting`] is a civil date and time at a geographic location, with a
//! whole-hour UTC offset. Every field is checked on construction and an
//! out-of-range field is replaced by a fixed default:
//!
//! | Field | Domain | Default |
//! |-------|--------|---------|
//! | latitude | -90 ..= 90 | 0 |
//! | longitude | -180 ..= 180 | 0 |
//! | year | 1901 ..= 2099 | 2022 |
//! | month | 1 ..= 12 | 7 |
//! | day | valid for month and year | 12 |
//! | hour | 0 ..= 23 | 12 |
//! | minute, second | 0 ..= 59 | 0 |
//! | timezone | -14 ..= 12 | -6 |
//!
//! Leap years follow `year % 4 == 0`. Inside the supported year range this
//! agrees with the Gregorian calendar.
//!
//! Construction never fails. [`Setting::validate`] returns the defaulted
//! fields as [`ValidationWarning`]s; [`Setting::new`] logs them instead.

use crate::error::{Validated, ValidationWarning};
use crate::timespan::Timespan;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, TimeZone, Timelike};
use std::fmt;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

const DEFAULT_LAT: f64 = 0.0;
const DEFAULT_LONG: f64 = 0.0;
const DEFAULT_YEAR: i32 = 2022;
const DEFAULT_MONTH: i32 = 7;
const DEFAULT_DAY: i32 = 12;
const DEFAULT_HOUR: i32 = 12;
const DEFAULT_MINUTE: i32 = 0;
const DEFAULT_SECOND: i32 = 0;
const DEFAULT_TIMEZONE: i32 = -6;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Simplified leap rule: every fourth year, no century exception.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0
}

/// Number of days in `month` of `year`, or 0 if `month` is not in `1..=12`.
pub const fn days_in_month(month: i32, year: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// `true` if `day` exists in `month` of `year`.
#[inline]
pub const fn valid_day(day: i32, month: i32, year: i32) -> bool {
    day >= 1 && day <= days_in_month(month, year)
}

/// Days in four consecutive years under the simplified leap rule.
const DAYS_PER_LEAP_CYCLE: i64 = 4 * 365 + 1;

/// How adding a [`Timespan`] to a [`Setting`] treats calendar edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CarryMode {
    /// The day walk of the interactive tool. A walk ending one past the
    /// last day of a month is defaulted by validation (31 January plus one
    /// day is 12 January), and the years component of the span is ignored.
    #[default]
    Stepwise,
    /// A walk ending one past the last day of a month rolls into the next
    /// month (31 January plus one day is 1 February), and the years
    /// component is added.
    Rollover,
}

/// Geographic position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

impl Location {
    #[inline]
    pub const fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

/// Civil date, time of day and whole-hour UTC offset.
///
/// A plain value: building one performs no validation. It becomes part of a
/// [`Setting`] only through [`Setting::new`] or [`Setting::validate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SettingDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub timezone: i32,
}

impl SettingDate {
    #[inline]
    pub const fn new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        timezone: i32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            timezone,
        }
    }
}

/// A validated time and place on Earth.
///
/// Equality compares the date tuple and the location tuple. There is no
/// `PartialOrd`: chronological order is [`Setting::precedes`], which
/// disregards location and timezone.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Setting {
    location: Location,
    date: SettingDate,
}

impl Setting {
    // ── constructors ──────────────────────────────────────────────────

    /// Build a setting, defaulting and logging every out-of-range field.
    pub fn new(location: Location, date: SettingDate) -> Self {
        let Validated { value, warnings } = Self::validate(location, date);
        for warning in &warnings {
            tracing::warn!(
                target: "sunvec::setting",
                warning = %warning,
                "setting field out of range, using default"
            );
        }
        value
    }

    /// Build a setting and report the defaulted fields instead of logging.
    ///
    /// Fields are checked independently; the day is checked against the
    /// month and year that survived validation.
    pub fn validate(location: Location, date: SettingDate) -> Validated<Self> {
        let mut warnings = Vec::new();
        let mut check = |ok: bool, value: i32, default: i32, warning: ValidationWarning| {
            if ok {
                value
            } else {
                warnings.push(warning);
                default
            }
        };

        let year = check(
            (1901..=2099).contains(&date.year),
            date.year,
            DEFAULT_YEAR,
            ValidationWarning::Year(date.year),
        );
        let month = check(
            (1..=12).contains(&date.month),
            date.month,
            DEFAULT_MONTH,
            ValidationWarning::Month(date.month),
        );
        let day = check(
            valid_day(date.day, month, year),
            date.day,
            DEFAULT_DAY,
            ValidationWarning::Day {
                day: date.day,
                month,
                year,
            },
        );
        let hour = check(
            (0..=23).contains(&date.hour),
            date.hour,
            DEFAULT_HOUR,
            ValidationWarning::Hour(date.hour),
        );
        let minute = check(
            (0..=59).contains(&date.minute),
            date.minute,
            DEFAULT_MINUTE,
            ValidationWarning::Minute(date.minute),
        );
        let second = check(
            (0..=59).contains(&date.second),
            date.second,
            DEFAULT_SECOND,
            ValidationWarning::Second(date.second),
        );
        let timezone = check(
            (-14..=12).contains(&date.timezone),
            date.timezone,
            DEFAULT_TIMEZONE,
            ValidationWarning::Timezone(date.timezone),
        );

        let lat = if (-90.0..=90.0).contains(&location.lat) {
            location.lat
        } else {
            warnings.push(ValidationWarning::Latitude(location.lat));
            DEFAULT_LAT
        };
        let long = if (-180.0..=180.0).contains(&location.long) {
            location.long
        } else {
            warnings.push(ValidationWarning::Longitude(location.long));
            DEFAULT_LONG
        };

        Validated {
            value: Self {
                location: Location { lat, long },
                date: SettingDate::new(year, month, day, hour, minute, second, timezone),
            },
            warnings,
        }
    }

    /// Build a setting from a chrono datetime.
    ///
    /// The offset is truncated to whole hours. Out-of-range fields are
    /// defaulted as in [`Setting::new`].
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>, location: Location) -> Self {
        let offset_hours = datetime.offset().fix().local_minus_utc() / 3600;
        let date = SettingDate::new(
            datetime.year(),
            datetime.month() as i32,
            datetime.day() as i32,
            datetime.hour() as i32,
            datetime.minute() as i32,
            datetime.second() as i32,
            offset_hours,
        );
        Self::new(location, date)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// A copy of the date tuple.
    #[inline]
    pub const fn date(&self) -> SettingDate {
        self.date
    }

    /// A copy of the location tuple.
    #[inline]
    pub const fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub const fn timezone(&self) -> i32 {
        self.date.timezone
    }

    /// The setting's own fields read as a [`Timespan`], in seconds.
    ///
    /// Only meaningful for comparing or subtracting settings that share a
    /// timezone.
    #[inline]
    pub fn aggregate_seconds(&self) -> i64 {
        Timespan::from_setting(self).to_seconds()
    }

    /// `true` if `self` occurs strictly before `other`.
    ///
    /// Timezones and locations are not compared; callers must keep them
    /// consistent.
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool {
        self.aggregate_seconds() < other.aggregate_seconds()
    }

    /// The setting as a chrono datetime at its UTC offset.
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let d = self.date;
        let offset = FixedOffset::east_opt(d.timezone * 3600)?;
        let naive = NaiveDate::from_ymd_opt(d.year, d.month as u32, d.day as u32)?.and_hms_opt(
            d.hour as u32,
            d.minute as u32,
            d.second as u32,
        )?;
        offset.from_local_datetime(&naive).single()
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// `self` advanced by `span` with [`CarryMode::Stepwise`], with any
    /// defaulted field reported.
    ///
    /// Seconds, minutes and hours carry upward. Whole days are then walked
    /// one at a time so month and year boundaries follow the calendar, and
    /// finally months are added. A calendar-invalid result, such as
    /// 31 January plus one month, is defaulted by validation.
    ///
    /// A negative day count is not walked backwards.
    pub fn checked_add(&self, span: Timespan) -> Validated<Self> {
        self.checked_add_with(span, CarryMode::Stepwise)
    }

    /// `self` advanced by `span` under `carry`, with any defaulted field
    /// reported.
    pub fn checked_add_with(&self, span: Timespan, carry: CarryMode) -> Validated<Self> {
        Self::validate(self.location, self.advance(span, carry))
    }

    /// `self` advanced by `span` under `carry`, logging defaulted fields.
    ///
    /// `setting + span` is `setting.add_with(span, CarryMode::Stepwise)`.
    pub fn add_with(&self, span: Timespan, carry: CarryMode) -> Self {
        Self::new(self.location, self.advance(span, carry))
    }

    fn advance(&self, span: Timespan, carry: CarryMode) -> SettingDate {
        let d = self.date;

        let seconds = i64::from(d.second).saturating_add(span.seconds);
        let minutes = i64::from(d.minute)
            .saturating_add(span.minutes)
            .saturating_add(seconds.div_euclid(60));
        let hours = i64::from(d.hour)
            .saturating_add(span.hours)
            .saturating_add(minutes.div_euclid(60));
        let mut steps = span.days.saturating_add(hours.div_euclid(24)).max(0);

        // The walk is periodic over a leap cycle. Skip whole cycles but keep
        // at least one step so the landing day is still produced by the walk.
        let mut cycles = 0;
        if steps > DAYS_PER_LEAP_CYCLE {
            cycles = (steps - 1) / DAYS_PER_LEAP_CYCLE;
            steps -= cycles * DAYS_PER_LEAP_CYCLE;
        }

        let mut day = d.day;
        let mut month = d.month;
        let mut year = d.year;
        for _ in 0..steps {
            if !valid_day(day, month, year) {
                day = 1;
                month += 1;
            }
            if month > 12 {
                month = 1;
                year += 1;
            }
            day += 1;
        }

        let mut years = 4 * cycles;
        if carry == CarryMode::Rollover {
            // The walk increments after checking, so the last step can land
            // one past the end of the month.
            if !valid_day(day, month, year) {
                day = 1;
                month += 1;
                if month > 12 {
                    month = 1;
                    year += 1;
                }
            }
            years = years.saturating_add(span.years);
        }

        // Months are 1-based on settings and 0-based in the carry.
        let month_index = (i64::from(month) - 1).saturating_add(span.months);
        let year = i64::from(year)
            .saturating_add(years)
            .saturating_add(month_index.div_euclid(12));
        let month = month_index.rem_euclid(12) + 1;

        SettingDate::new(
            saturate(year),
            saturate(month),
            day,
            saturate(hours.rem_euclid(24)),
            saturate(minutes.rem_euclid(60)),
            saturate(seconds.rem_euclid(60)),
            d.timezone,
        )
    }
}

#[inline]
fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Add<Timespan> for Setting {
    type Output = Self;

    /// See [`Setting::checked_add`]; defaulted fields are logged.
    fn add(self, span: Timespan) -> Self::Output {
        self.add_with(span, CarryMode::Stepwise)
    }
}

impl Sub for Setting {
    type Output = Timespan;

    /// The span between two settings, from their aggregates.
    fn sub(self, rhs: Self) -> Self::Output {
        Timespan::from_seconds(self.aggregate_seconds() - rhs.aggregate_seconds())
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.date;
        let month = MONTH_NAMES
            .get((d.month - 1) as usize)
            .copied()
            .unwrap_or("?");
        let suffix = match (d.day % 100, d.day % 10) {
            (11..=13, _) => "th",
            (_, 1) => "st",
            (_, 2) => "nd",
            (_, 3) => "rd",
            _ => "th",
        };
        let clock_hour = match d.hour % 12 {
            0 => 12,
            h => h,
        };
        let meridiem = if d.hour < 12 { "AM" } else { "PM" };

        let (lat, ns) = if self.location.lat >= 0.0 {
            (self.location.lat, 'N')
        } else {
            (-self.location.lat, 'S')
        };
        let (long, ew) = if self.location.long >= 0.0 {
            (self.location.long, 'E')
        } else {
            (-self.location.long, 'W')
        };

        writeln!(f, "{month} {}{suffix}, {}", d.day, d.year)?;
        writeln!(
            f,
            "{clock_hour}:{:02}:{:02}{meridiem}",
            d.minute, d.second
        )?;
        write!(
            f,
            "@ ({lat:.3} {ns}, {long:.3} {ew}) UTC {}:00",
            d.timezone
        )
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Setting {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let d = self.date;
        let mut s = serializer.serialize_struct("Setting", 9)?;
        s.serialize_field("lat", &self.location.lat)?;
        s.serialize_field("long", &self.location.long)?;
        s.serialize_field("year", &d.year)?;
        s.serialize_field("month", &d.month)?;
        s.serialize_field("day", &d.day)?;
        s.serialize_field("hour", &d.hour)?;
        s.serialize_field("minute", &d.minute)?;
        s.serialize_field("second", &d.second)?;
        s.serialize_field("timezone", &d.timezone)?;
        s.end()
    }
}

/// Deserialisation goes through [`Setting::new`], so stored out-of-range
/// fields come back defaulted.
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Setting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            lat: f64,
            long: f64,
            year: i32,
            month: i32,
            day: i32,
            hour: i32,
            minute: i32,
            second: i32,
            timezone: i32,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Setting::new(
            Location::new(raw.lat, raw.long),
            SettingDate::new(
                raw.year,
                raw.month,
                raw.day,
                raw.hour,
                raw.minute,
                raw.second,
                raw.timezone,
            ),
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
