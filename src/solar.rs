// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sun directions from an external solar-position model.
//!
//! The solar-position algorithm itself is not part of this crate: anything
//! implementing [`SolarPosition`] (including a plain closure) supplies
//! horizontal coordinates in degrees, and [`SunVector`] turns them into the
//! radian pair used for placement:
//!
//! ```text
//! (azimuth°, elevation°)  →  (azimuth rad, π/2 − elevation rad)
//! ```

use crate::setting::{Location, Setting, SettingDate};
use qtty::{Degree, Degrees, Radian, Radians};
use std::f64::consts::FRAC_PI_2;

/// Source of horizontal solar coordinates.
pub trait SolarPosition {
    /// `(azimuth, elevation)` of the sun for a civil date and place.
    fn position(&self, date: SettingDate, location: Location) -> (Degrees, Degrees);
}

impl<F> SolarPosition for F
where
    F: Fn(SettingDate, Location) -> (Degrees, Degrees),
{
    #[inline]
    fn position(&self, date: SettingDate, location: Location) -> (Degrees, Degrees) {
        self(date, location)
    }
}

/// Direction of the sun as azimuth and zenith angle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SunVector {
    pub azimuth: Radians,
    /// Angle from the zenith, `π/2 − elevation`.
    pub zenith: Radians,
}

impl SunVector {
    /// Build from horizontal coordinates.
    pub fn from_horizontal(azimuth: Degrees, elevation: Degrees) -> Self {
        Self {
            azimuth: azimuth.to::<Radian>(),
            zenith: Radians::new(FRAC_PI_2) - elevation.to::<Radian>(),
        }
    }

    /// Ask `solar` where the sun is for `setting`.
    pub fn for_setting<P>(setting: &Setting, solar: &P) -> Self
    where
        P: SolarPosition + ?Sized,
    {
        let (azimuth, elevation) = solar.position(setting.date(), setting.location());
        Self::from_horizontal(azimuth, elevation)
    }

    /// Euler XYZ rotation in degrees that points a −Z light along this
    /// direction: `(−zenith, 0, −azimuth)`.
    pub fn rotate_xyz(&self) -> [f64; 3] {
        [
            -self.zenith.to::<Degree>().value(),
            0.0,
            -self.azimuth.to::<Degree>().value(),
        ]
    }

    /// Unit vector `(sin θ sin φ, cos θ sin φ, cos φ)` with θ the azimuth and
    /// φ the zenith angle.
    pub fn cartesian(&self) -> [f64; 3] {
        let (sin_theta, cos_theta) = self.azimuth.value().sin_cos();
        let (sin_phi, cos_phi) = self.zenith.value().sin_cos();
        [sin_theta * sin_phi, cos_theta * sin_phi, cos_phi]
    }

    /// `true` when the sun is above the horizon.
    #[inline]
    pub fn is_daylight(&self) -> bool {
        self.zenith.value() < FRAC_PI_2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn horizontal_to_radians_and_zenith() {
        let sun = SunVector::from_horizontal(Degrees::new(180.0), Degrees::new(30.0));
        assert!((sun.azimuth.value() - PI).abs() < EPS);
        assert!((sun.zenith.value() - PI / 3.0).abs() < EPS);
        assert!(sun.is_daylight());
    }

    #[test]
    fn rotation_negates_angles_in_degrees() {
        let sun = SunVector::from_horizontal(Degrees::new(90.0), Degrees::new(45.0));
        let [x, y, z] = sun.rotate_xyz();
        assert!((x + 45.0).abs() < EPS);
        assert_eq!(y, 0.0);
        assert!((z + 90.0).abs() < EPS);
    }

    #[test]
    fn cartesian_is_unit_length() {
        let overhead = SunVector::from_horizontal(Degrees::new(0.0), Degrees::new(90.0));
        let [x, y, z] = overhead.cartesian();
        assert!(x.abs() < EPS && y.abs() < EPS && (z - 1.0).abs() < EPS);

        let east = SunVector::from_horizontal(Degrees::new(90.0), Degrees::new(0.0));
        let [x, y, z] = east.cartesian();
        assert!((x - 1.0).abs() < EPS && y.abs() < EPS && z.abs() < EPS);
    }

    #[test]
    fn below_horizon_is_night() {
        let sun = SunVector::from_horizontal(Degrees::new(0.0), Degrees::new(-10.0));
        assert!(!sun.is_daylight());
    }

    #[test]
    fn closures_are_solar_models() {
        let model = |date: SettingDate, location: Location| {
            (Degrees::new(location.long), Degrees::new(f64::from(date.hour)))
        };
        let setting = Setting::new(
            Location::new(10.0, 120.0),
            SettingDate::new(2024, 6, 1, 30, 0, 0, 0),
        );
        // Hour 30 is defaulted to noon before the model sees it.
        let sun = SunVector::for_setting(&setting, &model);
        assert!((sun.azimuth.value() - 120f64.to_radians()).abs() < EPS);
        assert!((sun.zenith.value() - (FRAC_PI_2 - 12f64.to_radians())).abs() < EPS);
    }
}
