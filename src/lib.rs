// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sun Vector Module
//!
//! Samples the sun's direction over a calendar range and colors the samples
//! along a hue ring, with palettes that stay distinguishable under
//! protanopia, deuteranopia and tritanopia.
//!
//! # Core types
//!
//! - [`Timespan`]: signed six-component calendar interval with a
//!   fixed-length approximation to seconds.
//! - [`Setting`]: validated civil date, time, UTC offset and location.
//! - [`SettingRange`]: ordered pair of settings with three sampling
//!   strategies.
//! - [`Spectrum`]: number of samples a palette is spread over.
//! - [`HueMapping`]: trait mapping a sample position to an [`Rgb`] color.
//! - [`RingColor`]: hue-ring [`HueMapping`] keyed by [`VisionType`].
//!
//! # Collaborators
//!
//! | Trait | Provided by the host |
//! |-------|----------------------|
//! | [`SolarPosition`] | azimuth and elevation of the sun in degrees |
//! | [`ScenePlacement`] | creation and bulk removal of directional lights |
//!
//! # Degraded input
//!
//! Nothing here refuses input coming from an interactive form. Out-of-range
//! setting fields are replaced by defaults and logged through `tracing`
//! (see [`Setting::validate`] to collect them instead), and an out-of-order
//! range collapses to its start. Only broken programming preconditions,
//! such as a non-positive step, surface as [`Error`].
//!
//! # Quick example
//!
//! ```
//! use sunvec::{HueMapping, Location, RingColor, Setting, SettingDate, SettingRange, Spectrum, VisionType};
//!
//! let here = Location::new(47.6, -122.3);
//! let range = SettingRange::new(
//!     Setting::new(here, SettingDate::new(2024, 6, 21, 5, 0, 0, -7)),
//!     Setting::new(here, SettingDate::new(2024, 6, 21, 21, 0, 0, -7)),
//! );
//! let samples = range.subdiv_range(8);
//! assert_eq!(samples.len(), 9);
//! assert_eq!(samples[8], range.end());
//!
//! let palette = RingColor::new(Spectrum::from_settings(&samples), VisionType::Protanopia);
//! assert_eq!(palette.color_spectrum().len(), 10);
//! ```

mod color;
mod config;
mod error;
pub mod pipeline;
mod range;
mod scene;
pub(crate) mod setting;
mod solar;
mod spectrum;
pub(crate) mod timespan;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use color::{HueMapping, Rgb, RingColor, VisionType, DEFAULT_MAX_ANGLE};
pub use config::{SamplingConfig, Strategy, DEFAULT_DIVISIONS, DEFAULT_INTENSITY};
pub use error::{Error, Result, Validated, ValidationWarning};
pub use pipeline::{generate, place_samples, Sample};
pub use range::{SettingRange, UntilAnchor, MAX_UNTIL_STEPS};
pub use scene::ScenePlacement;
pub use setting::{
    days_in_month, is_leap_year, valid_day, CarryMode, Location, Setting, SettingDate,
};
pub use solar::{SolarPosition, SunVector};
pub use spectrum::Spectrum;
pub use timespan::{
    Timespan, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_MONTH,
    SECONDS_PER_YEAR,
};
