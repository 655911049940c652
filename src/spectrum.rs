// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sample count shared by a coloring pass.

use crate::setting::Setting;

/// How many samples a coloring pass spreads its hues over.
///
/// Only the count of the generated sequence matters; colors are indexed
/// `0..=len`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Spectrum {
    length: usize,
}

impl Spectrum {
    #[inline]
    pub const fn new(length: usize) -> Self {
        Self { length }
    }

    #[inline]
    pub fn from_settings(settings: &[Setting]) -> Self {
        Self::new(settings.len())
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl From<&[Setting]> for Spectrum {
    fn from(settings: &[Setting]) -> Self {
        Self::from_settings(settings)
    }
}
