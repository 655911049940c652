use chrono::{FixedOffset, TimeZone};
use qtty::Degrees;
use sunvec::{
    pipeline, Location, Rgb, SamplingConfig, ScenePlacement, Setting, SettingDate, SettingRange,
    Strategy, SunVector, VisionType,
};

/// Prints each light instead of creating it.
struct Printer;

impl ScenePlacement for Printer {
    fn place(&mut self, name: &str, orientation: SunVector, color: Option<Rgb>, intensity: f64) {
        let [x, y, z] = orientation.rotate_xyz();
        let color = color.map_or_else(|| "white".to_owned(), |c| c.clamped().to_string());
        println!("{name}: rotate=({x:.1}, {y:.1}, {z:.1}) {color} @ {intensity}");
    }

    fn clear_samples(&mut self) {
        println!("-- clear --");
    }
}

fn main() {
    let here = Location::new(42.44, -76.5);
    let Some(offset) = FixedOffset::west_opt(5 * 3600) else {
        return;
    };
    let Some(dawn) = offset.with_ymd_and_hms(2024, 3, 20, 6, 0, 0).single() else {
        return;
    };
    let start = Setting::from_datetime(&dawn, here);
    let end = Setting::new(here, SettingDate::new(2024, 3, 20, 18, 0, 0, -5));
    let range = SettingRange::new(start, end);
    println!("{range}\n");

    // Crude stand-in for a real solar model: sweep east to west, peak at noon.
    let toy_sun = |date: SettingDate, location: Location| {
        let hours = f64::from(date.hour) + f64::from(date.minute) / 60.0;
        let azimuth = 90.0 + (hours - 6.0) * 15.0;
        let elevation = (90.0 - location.lat.abs()) * (1.0 - ((hours - 12.0) / 6.0).powi(2));
        (Degrees::new(azimuth), Degrees::new(elevation))
    };

    let config = SamplingConfig::default()
        .with_strategy(Strategy::Subdivide { divisions: 6 })
        .with_vision(VisionType::Deuteranopia);

    match pipeline::run(&range, &config, &toy_sun, &mut Printer) {
        Ok(samples) => println!("\nplaced {} samples", samples.len()),
        Err(err) => eprintln!("sampling failed: {err}"),
    }
}
