use qtty::Degrees;
use sunvec::{
    generate, place_samples, HueMapping, Location, Rgb, RingColor, SamplingConfig,
    ScenePlacement, Setting, SettingDate, SettingRange, Spectrum, Strategy, SunVector, Timespan,
    UntilAnchor, ValidationWarning, VisionType,
};

const BOULDER: Location = Location::new(40.015, -105.27);

fn setting(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> Setting {
    Setting::new(BOULDER, SettingDate::new(year, month, day, hour, minute, second, -7))
}

#[test]
fn hourly_steps_from_new_year() {
    let range = SettingRange::new(setting(2024, 1, 1, 0, 0, 0), setting(2024, 1, 2, 0, 0, 0));
    let points = range
        .increment_range(Timespan::new(0, 0, 0, 1, 0, 0), 3)
        .unwrap();
    let times: Vec<(i32, i32, i32, i32)> = points
        .iter()
        .map(|s| {
            let d = s.date();
            (d.day, d.hour, d.minute, d.second)
        })
        .collect();
    assert_eq!(times, vec![(1, 1, 0, 0), (1, 2, 0, 0), (1, 3, 0, 0)]);
}

#[test]
fn subdivision_over_a_year_crosses_months() {
    let range = SettingRange::new(setting(2023, 1, 1, 0, 0, 0), setting(2024, 1, 1, 0, 0, 0));
    let points = range.subdiv_range(12);
    assert_eq!(points.len(), 13);
    assert_eq!(points[12], range.end());
    for pair in points.windows(2) {
        assert!(pair[0].precedes(&pair[1]), "{} !< {}", pair[0], pair[1]);
    }
    assert_eq!(points[6].date().month, 7);
}

#[test]
fn reversed_input_still_produces_something_displayable() {
    let start = setting(2024, 5, 1, 12, 0, 0);
    let end = setting(2024, 5, 1, 11, 59, 59);
    let range = SettingRange::new(start, end);
    assert_eq!(range.subdiv_range(3), vec![start; 4]);
    assert!(range.increment_until_range(Timespan::from_minutes(1)).is_empty());
}

#[test]
fn out_of_range_form_values_are_reported() {
    let checked = Setting::validate(BOULDER, SettingDate::new(2023, 2, 29, 12, 0, 0, -7));
    assert_eq!(checked.value.date().day, 12);
    assert_eq!(
        checked.warnings,
        vec![ValidationWarning::Day {
            day: 29,
            month: 2,
            year: 2023
        }]
    );
}

#[test]
fn until_modes_differ_by_one_step() {
    let range = SettingRange::new(setting(2024, 3, 1, 0, 0, 0), setting(2024, 3, 1, 0, 10, 0));
    let step = Timespan::from_minutes(2);
    let lookahead = range.increment_until_range(step);
    let cursor = range.increment_until_range_with(step, UntilAnchor::Cursor);
    assert_eq!(lookahead.len(), cursor.len());
    for (ahead, at) in lookahead.iter().zip(&cursor) {
        assert_eq!(*ahead, *at + step);
    }
    assert_eq!(cursor.last(), Some(&range.end()));
}

#[test]
fn palettes_for_every_vision_type() {
    let spectrum = Spectrum::new(20);
    for vision in VisionType::ALL {
        let ring = RingColor::new(spectrum, vision);
        let colors = ring.color_spectrum();
        assert_eq!(colors.len(), 21);
        assert!(colors.iter().all(|c| c.r.is_finite() && c.g.is_finite() && c.b.is_finite()));
        assert_ne!(colors[0], colors[20], "{vision}");
    }
}

struct Lights(Vec<(String, [f64; 3], Option<Rgb>)>);

impl ScenePlacement for Lights {
    fn place(&mut self, name: &str, orientation: SunVector, color: Option<Rgb>, _intensity: f64) {
        self.0.push((name.to_owned(), orientation.rotate_xyz(), color));
    }

    fn clear_samples(&mut self) {
        self.0.clear();
    }
}

#[test]
fn end_to_end_with_a_fixed_sun() {
    let range = SettingRange::new(setting(2024, 6, 21, 6, 0, 0), setting(2024, 6, 21, 18, 0, 0));
    let config = SamplingConfig::default()
        .with_strategy(Strategy::Subdivide { divisions: 6 })
        .with_vision(VisionType::FullColor);
    let samples = generate(&range, &config).unwrap();

    let fixed_sun = |_: SettingDate, _: Location| (Degrees::new(135.0), Degrees::new(60.0));
    let mut lights = Lights(Vec::new());
    place_samples(&samples, &fixed_sun, &mut lights, config.intensity);

    assert_eq!(lights.0.len(), 7);
    assert_eq!(lights.0[6].0, "sunVector7");
    let [x, _, z] = lights.0[0].1;
    assert!((x + 30.0).abs() < 1e-9);
    assert!((z + 135.0).abs() < 1e-9);
    assert!(lights.0.iter().all(|l| l.2.is_some()));
}

#[cfg(feature = "serde")]
#[test]
fn serde_setting_revalidates_on_load() {
    let json = r#"{"lat":10.0,"long":20.0,"year":2023,"month":2,"day":30,"hour":1,"minute":2,"second":3,"timezone":0}"#;
    let setting: Setting = serde_json::from_str(json).unwrap();
    assert_eq!(setting.date().day, 12);

    let back = serde_json::to_string(&setting).unwrap();
    assert!(back.contains("\"day\":12"));
}

#[cfg(feature = "serde")]
#[test]
fn serde_config_fills_missing_fields() {
    let config: SamplingConfig = serde_json::from_str(r#"{"intensity":7.5}"#).unwrap();
    assert_eq!(config.intensity, 7.5);
    assert_eq!(config.strategy, Strategy::default());

    let json = serde_json::to_string(&config.with_vision(VisionType::Tritanopia)).unwrap();
    let restored: SamplingConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.vision, Some(VisionType::Tritanopia));
}
