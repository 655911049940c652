// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Hue-ring coloring with dichromatic vision simulation.
//!
//! A sample index `i` out of a [`Spectrum`] of length `n` is placed at the
//! angle `offset + max_angle · i/n` on the unit circle. Each raw channel is
//! `1 − d²/2.25`, where `d` is the distance from that point to the
//! channel's anchor:
//!
//! | Channel | Anchor `(sin, cos)` |
//! |---------|---------------------|
//! | red | `(0, 1)` |
//! | green | `(√3/2, −1/2)` |
//! | blue | `(−√3/2, −1/2)` |
//!
//! Full color returns the raw triple. The dichromatic types sweep a shorter
//! arc and fold the raw channels, together with the midtones
//! `yellow = (r+g)/2` and `cyan = (g+b)/2`, into a two-hue palette:
//!
//! | Vision | Max angle | Offset | Output |
//! |--------|-----------|--------|--------|
//! | full color | caller's, default 1.5π | −π/8 | `(r, g, b)` |
//! | protanopia | −0.75π | π/16 | `(max(r,g) − min(b,cyan), same, b − min(r,yellow))` |
//! | deuteranopia | −0.75π | π/16 | as protanopia |
//! | tritanopia | −0.75π | π/16 | `(r − min(b,cyan), max(g,b) − min(r,yellow), same)` |
//!
//! Values are **not** clamped and routinely leave `[0, 1]`; use
//! [`Rgb::clamped`] where a displayable color is required.

use crate::spectrum::Spectrum;
use std::f64::consts::PI;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sweep used by full color when none is given.
pub const DEFAULT_MAX_ANGLE: f64 = 1.5 * PI;

const DICHROMATIC_MAX_ANGLE: f64 = -0.75 * PI;
const FULL_COLOR_OFFSET: f64 = -PI / 8.0;
const DICHROMATIC_OFFSET: f64 = PI / 16.0;
const NORMALIZATION: f64 = 2.25;

const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;
const RED_ANCHOR: (f64, f64) = (0.0, 1.0);
const GREEN_ANCHOR: (f64, f64) = (HALF_SQRT_3, -0.5);
const BLUE_ANCHOR: (f64, f64) = (-HALF_SQRT_3, -0.5);

// ═══════════════════════════════════════════════════════════════════════════
// Rgb
// ═══════════════════════════════════════════════════════════════════════════

/// An unclamped red/green/blue triple.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Each channel clamped to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(self.r.clamp(0.0, 1.0), self.g.clamp(0.0, 1.0), self.b.clamp(0.0, 1.0))
    }

    /// `true` if every channel already lies in `[0, 1]`.
    #[inline]
    pub fn is_displayable(&self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R={:.3}, G={:.3}, B={:.3}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for [f64; 3] {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        rgb.to_array()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// VisionType
// ═══════════════════════════════════════════════════════════════════════════

/// The color vision a palette is produced for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VisionType {
    #[default]
    FullColor,
    Protanopia,
    Deuteranopia,
    Tritanopia,
}

/// Ring parameters attached to a vision type.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Ring {
    /// `None` lets the caller choose the sweep.
    forced_max_angle: Option<f64>,
    offset: f64,
}

impl VisionType {
    pub const ALL: [VisionType; 4] = [
        VisionType::FullColor,
        VisionType::Protanopia,
        VisionType::Deuteranopia,
        VisionType::Tritanopia,
    ];

    const fn ring(self) -> Ring {
        match self {
            VisionType::FullColor => Ring {
                forced_max_angle: None,
                offset: FULL_COLOR_OFFSET,
            },
            VisionType::Protanopia | VisionType::Deuteranopia | VisionType::Tritanopia => Ring {
                forced_max_angle: Some(DICHROMATIC_MAX_ANGLE),
                offset: DICHROMATIC_OFFSET,
            },
        }
    }

    /// `true` for the three simulated color-vision deficiencies.
    #[inline]
    pub const fn is_dichromatic(self) -> bool {
        !matches!(self, VisionType::FullColor)
    }

    /// Fold raw ring channels into what this vision type perceives.
    pub fn recombine(self, raw: Rgb) -> Rgb {
        let Rgb { r, g, b } = raw;
        let yellow = (r + g) / 2.0;
        let cyan = (g + b) / 2.0;
        match self {
            VisionType::FullColor => raw,
            VisionType::Protanopia | VisionType::Deuteranopia => {
                let warm = r.max(g) - b.min(cyan);
                Rgb::new(warm, warm, b - r.min(yellow))
            }
            VisionType::Tritanopia => {
                let cool = g.max(b) - r.min(yellow);
                Rgb::new(r - b.min(cyan), cool, cool)
            }
        }
    }
}

impl fmt::Display for VisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VisionType::FullColor => "full color",
            VisionType::Protanopia => "protanopia",
            VisionType::Deuteranopia => "deuteranopia",
            VisionType::Tritanopia => "tritanopia",
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HueMapping
// ═══════════════════════════════════════════════════════════════════════════

/// Maps an ordinal position within a sample sequence to a color.
pub trait HueMapping {
    /// Number of samples the hues are spread over.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color of position `index`; meaningful for `index` in `0..=len()`.
    fn color(&self, index: usize) -> Rgb;

    /// Colors for every position `0..=len()`, so `len() + 1` of them.
    fn color_spectrum(&self) -> Vec<Rgb> {
        (0..=self.len()).map(|i| self.color(i)).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RingColor
// ═══════════════════════════════════════════════════════════════════════════

/// Hue-ring [`HueMapping`] for a given [`VisionType`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RingColor {
    spectrum: Spectrum,
    vision: VisionType,
    max_angle: f64,
    offset: f64,
}

impl RingColor {
    /// Ring coloring with the [`DEFAULT_MAX_ANGLE`] sweep for full color.
    pub fn new(spectrum: Spectrum, vision: VisionType) -> Self {
        Self::with_max_angle(spectrum, vision, DEFAULT_MAX_ANGLE)
    }

    /// Ring coloring sweeping `max_angle` radians.
    ///
    /// Dichromatic vision types ignore `max_angle` and always sweep −0.75π.
    pub fn with_max_angle(spectrum: Spectrum, vision: VisionType, max_angle: f64) -> Self {
        let ring = vision.ring();
        Self {
            spectrum,
            vision,
            max_angle: ring.forced_max_angle.unwrap_or(max_angle),
            offset: ring.offset,
        }
    }

    #[inline]
    pub fn set_spectrum(&mut self, spectrum: Spectrum) {
        self.spectrum = spectrum;
    }

    #[inline]
    pub const fn spectrum(&self) -> Spectrum {
        self.spectrum
    }

    #[inline]
    pub const fn vision(&self) -> VisionType {
        self.vision
    }

    #[inline]
    pub const fn max_angle(&self) -> f64 {
        self.max_angle
    }

    #[inline]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Ring angle of `index`, in radians.
    ///
    /// An empty spectrum places every index at the offset. Indices past
    /// `len()` extrapolate along the ring.
    pub fn angle(&self, index: usize) -> f64 {
        let fraction = if self.spectrum.is_empty() {
            0.0
        } else {
            index as f64 / self.spectrum.len() as f64
        };
        self.offset + self.max_angle * fraction
    }

    /// Channels before vision recombination.
    #[inline]
    pub fn raw(&self, index: usize) -> Rgb {
        ring_channels(self.angle(index))
    }
}

impl HueMapping for RingColor {
    #[inline]
    fn len(&self) -> usize {
        self.spectrum.len()
    }

    fn color(&self, index: usize) -> Rgb {
        self.vision.recombine(self.raw(index))
    }
}

impl fmt::Display for RingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rgb) in self.color_spectrum().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{rgb}")?;
        }
        Ok(())
    }
}

/// Raw channels for a point at `angle` on the unit circle.
fn ring_channels(angle: f64) -> Rgb {
    let (sin, cos) = angle.sin_cos();
    let channel = |(x, y): (f64, f64)| 1.0 - ((x - sin).powi(2) + (y - cos).powi(2)) / NORMALIZATION;
    Rgb::new(channel(RED_ANCHOR), channel(GREEN_ANCHOR), channel(BLUE_ANCHOR))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
