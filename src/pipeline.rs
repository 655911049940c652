// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! From a range to colored sun lights.
//!
//! ```text
//! SettingRange ─strategy─▶ [Setting] ─Spectrum─▶ RingColor ─▶ [Sample]
//!                                                              │
//!                    SolarPosition ─▶ SunVector ─▶ ScenePlacement
//! ```

use crate::color::{HueMapping, Rgb, RingColor};
use crate::config::{SamplingConfig, Strategy};
use crate::error::Result;
use crate::range::SettingRange;
use crate::scene::ScenePlacement;
use crate::setting::Setting;
use crate::solar::{SolarPosition, SunVector};
use crate::spectrum::Spectrum;

/// Name prefix of placed lights; the n-th sample (1-based) is `sunVector{n}`.
pub const SAMPLE_NAME_PREFIX: &str = "sunVector";

/// A setting and the color assigned to its position in the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub setting: Setting,
    pub color: Option<Rgb>,
}

/// The settings `strategy` draws from `range`.
pub fn sample_settings(range: &SettingRange, strategy: &Strategy) -> Result<Vec<Setting>> {
    match *strategy {
        Strategy::Subdivide { divisions } => Ok(range.subdiv_range(divisions)),
        Strategy::Increment { step, count } => range.increment_range(step, count),
        Strategy::IncrementUntil { step, anchor } => {
            Ok(range.increment_until_range_with(step, anchor))
        }
    }
}

/// Sample `range` and color each sample by its ordinal position.
///
/// Steps are added with the configured [`CarryMode`](crate::CarryMode),
/// whatever the range itself carries. The spectrum is sized from the generated sequence, so sample `i` gets
/// `color(i)` out of `len + 1` available hues.
pub fn generate(range: &SettingRange, config: &SamplingConfig) -> Result<Vec<Sample>> {
    let range = range.with_carry(config.carry);
    let settings = sample_settings(&range, &config.strategy)?;
    let ring = config.vision.map(|vision| {
        RingColor::with_max_angle(Spectrum::from_settings(&settings), vision, config.max_angle)
    });

    tracing::debug!(
        target: "sunvec::pipeline",
        samples = settings.len(),
        vision = ?config.vision,
        "generated samples"
    );

    Ok(settings
        .into_iter()
        .enumerate()
        .map(|(i, setting)| Sample {
            setting,
            color: ring.as_ref().map(|ring| ring.color(i)),
        })
        .collect())
}

/// Clear the scene, then place one light per sample along its sun vector.
pub fn place_samples<P, S>(samples: &[Sample], solar: &P, scene: &mut S, intensity: f64)
where
    P: SolarPosition + ?Sized,
    S: ScenePlacement + ?Sized,
{
    scene.clear_samples();
    for (i, sample) in samples.iter().enumerate() {
        let sun = SunVector::for_setting(&sample.setting, solar);
        let name = format!("{SAMPLE_NAME_PREFIX}{}", i + 1);
        scene.place(&name, sun, sample.color, intensity);
    }
    tracing::debug!(target: "sunvec::pipeline", placed = samples.len(), "placed samples");
}

/// [`generate`] followed by [`place_samples`] with the configured intensity.
pub fn run<P, S>(
    range: &SettingRange,
    config: &SamplingConfig,
    solar: &P,
    scene: &mut S,
) -> Result<Vec<Sample>>
where
    P: SolarPosition + ?Sized,
    S: ScenePlacement + ?Sized,
{
    let samples = generate(range, config)?;
    place_samples(&samples, solar, scene, config.intensity);
    Ok(samples)
}
