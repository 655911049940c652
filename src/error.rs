// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error and warning types.
//!
//! Nothing in the scheduling core blocks the caller: out-of-domain input is
//! replaced by a default and reported as a [`ValidationWarning`]. [`Error`]
//! is reserved for rejected mutations and broken preconditions.

use crate::timespan::Timespan;
use thiserror::Error;

/// Result type alias for fallible sunvec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the checked entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Scaling requires every component of the timespan to be non-negative.
    #[error("cannot scale a timespan with a negative component: {0}")]
    NegativeComponent(Timespan),

    /// Stepping requires a strictly positive step.
    #[error("step must be strictly positive, got {seconds} s")]
    NonPositiveStep { seconds: i64 },

    /// A range endpoint change would put the start at or after the end.
    #[error("start must occur before end (start aggregate {start} s, end aggregate {end} s)")]
    StartNotBeforeEnd { start: i64, end: i64 },

    /// Text could not be parsed as a timespan.
    #[error("invalid timespan {input:?}: {reason}")]
    ParseTimespan { input: String, reason: String },
}

/// A field that was out of its domain and has been replaced by a default.
///
/// The `Display` text is also what gets logged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationWarning {
    #[error("invalid latitude={0}, range -90 to 90, default 0")]
    Latitude(f64),

    #[error("invalid longitude={0}, range -180 to 180, default 0")]
    Longitude(f64),

    #[error("invalid year={0}, range 1901 to 2099, default 2022")]
    Year(i32),

    #[error("invalid month={0}, range 1 to 12, default 7")]
    Month(i32),

    #[error("invalid day={day} for month={month} of year={year}, default 12")]
    Day { day: i32, month: i32, year: i32 },

    #[error("invalid hour={0}, range 0 to 23, default 12")]
    Hour(i32),

    #[error("invalid minute={0}, range 0 to 59, default 0")]
    Minute(i32),

    #[error("invalid second={0}, range 0 to 59, default 0")]
    Second(i32),

    #[error("invalid timezone={0}, range -14 to 12, default -6")]
    Timezone(i32),
}

/// A value produced by validation together with every warning raised while
/// producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub value: T,
    pub warnings: Vec<ValidationWarning>,
}

impl<T> Validated<T> {
    /// `true` when no field had to be defaulted.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Drop the warnings and keep the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}
