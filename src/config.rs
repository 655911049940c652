// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sampling parameters.
//!
//! These are the transient inputs a host collects from its user before
//! asking for samples. With the `serde` feature enabled they can be stored
//! and restored; missing fields take their [`Default`] values.

use crate::color::{VisionType, DEFAULT_MAX_ANGLE};
use crate::range::UntilAnchor;
use crate::setting::CarryMode;
use crate::timespan::Timespan;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of subdivisions used when nothing else is requested.
pub const DEFAULT_DIVISIONS: usize = 50;

/// Light intensity used when nothing else is requested.
pub const DEFAULT_INTENSITY: f64 = 100.0;

/// How a range is turned into settings.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// [`SettingRange::subdiv_range`](crate::SettingRange::subdiv_range).
    Subdivide { divisions: usize },
    /// [`SettingRange::increment_range`](crate::SettingRange::increment_range).
    Increment { step: Timespan, count: usize },
    /// [`SettingRange::increment_until_range_with`](crate::SettingRange::increment_until_range_with).
    IncrementUntil { step: Timespan, anchor: UntilAnchor },
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Subdivide {
            divisions: DEFAULT_DIVISIONS,
        }
    }
}

/// Everything the sampling pipeline needs besides the range.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingConfig {
    pub strategy: Strategy,
    /// How steps cross month ends.
    pub carry: CarryMode,
    /// `None` leaves samples uncolored.
    pub vision: Option<VisionType>,
    /// Hue sweep for full color, in radians.
    pub max_angle: f64,
    pub intensity: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            carry: CarryMode::default(),
            vision: None,
            max_angle: DEFAULT_MAX_ANGLE,
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl SamplingConfig {
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_carry(mut self, carry: CarryMode) -> Self {
        self.carry = carry;
        self
    }

    #[must_use]
    pub fn with_vision(mut self, vision: VisionType) -> Self {
        self.vision = Some(vision);
        self
    }

    #[must_use]
    pub fn with_max_angle(mut self, max_angle: f64) -> Self {
        self.max_angle = max_angle;
        self
    }

    #[must_use]
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }
}
