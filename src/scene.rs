// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Interface to the host scene that displays samples.

use crate::color::Rgb;
use crate::solar::SunVector;

/// A scene that can show one directional light per sample.
///
/// The crate only requests creation and a bulk clear; the lifetime of the
/// created primitives is the host's business.
pub trait ScenePlacement {
    /// Create (or replace) the light called `name`, pointing along
    /// `orientation`, tinted by `color` when one is given.
    fn place(&mut self, name: &str, orientation: SunVector, color: Option<Rgb>, intensity: f64);

    /// Remove every sample light previously placed.
    fn clear_samples(&mut self);
}

impl<T: ScenePlacement + ?Sized> ScenePlacement for &mut T {
    #[inline]
    fn place(&mut self, name: &str, orientation: SunVector, color: Option<Rgb>, intensity: f64) {
        (**self).place(name, orientation, color, intensity);
    }

    #[inline]
    fn clear_samples(&mut self) {
        (**self).clear_samples();
    }
}
