use std::f64::consts::{FRAC_PI_4, PI};

use chrono::{DateTime, Duration, TimeZone, Utc};

use shadewalk::config::ShadeConfig;
use shadewalk::forecast::*;
use shadewalk::types::{BuildingFootprint, GeoPoint, Shade, SunPosition};

fn block() -> BuildingFootprint {
    BuildingFootprint::new(
        "block",
        vec![
            GeoPoint::new(25.000, 121.000),
            GeoPoint::new(25.000, 121.001),
            GeoPoint::new(25.001, 121.001),
            GeoPoint::new(25.001, 121.000),
        ],
        30.0,
    )
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 1, 2, 0, 0).unwrap()
}

const SOUTH_SUN: SunPosition = SunPosition {
    altitude: FRAC_PI_4,
    azimuth: PI,
};

const NORTH_SUN: SunPosition = SunPosition {
    altitude: FRAC_PI_4,
    azimuth: 0.0,
};

const BELOW_HORIZON: SunPosition = SunPosition {
    altitude: -0.1,
    azimuth: PI,
};

#[test]
fn test_sample_offsets() {
    assert_eq!(sample_offsets(60, 15), vec![0, 15, 30, 45, 60]);
    assert_eq!(sample_offsets(50, 15), vec![0, 15, 30, 45]);
    assert_eq!(sample_offsets(0, 15), vec![0]);
    assert_eq!(sample_offsets(30, 0), vec![0]);
}

#[test]
fn test_shadows_at_offset() {
    let sunrise = start() + Duration::minutes(30);
    let provider = move |t: DateTime<Utc>, _: GeoPoint| {
        if t >= sunrise {
            SOUTH_SUN
        } else {
            BELOW_HORIZON
        }
    };
    let buildings = vec![block()];
    let config = ShadeConfig::default();
    assert!(shadows_at_offset(&buildings, &start(), 0, &provider, &config).is_empty());
    assert_eq!(shadows_at_offset(&buildings, &start(), 60, &provider, &config).len(), 1);
    assert!(shadows_at_offset(&buildings, &sunrise, -10, &provider, &config).is_empty());
}

#[test]
fn test_timeline_sun_moves_behind_building() {
    let switch = start() + Duration::minutes(30);
    let provider = move |t: DateTime<Utc>, _: GeoPoint| {
        if t < switch {
            SOUTH_SUN
        } else {
            NORTH_SUN
        }
    };
    let north_of_block = GeoPoint::new(25.0011, 121.0005);
    let timeline = shade_timeline(
        north_of_block,
        &[block()],
        &start(),
        60,
        15,
        &provider,
        &ShadeConfig::default(),
    );

    let shades: Vec<Shade> = timeline.entries.iter().map(|e| e.shade).collect();
    assert_eq!(
        shades,
        vec![Shade::Shaded, Shade::Shaded, Shade::Sunlit, Shade::Sunlit, Shade::Sunlit]
    );
    assert_eq!(timeline.interval_minutes, 15);
    assert_eq!(timeline.point, north_of_block);
    assert!((timeline.shaded_fraction() - 0.4).abs() < 1e-12);
    assert_eq!(timeline.first_sunlit(), Some(30));
}

#[test]
fn test_timeline_into_night_counts_as_shade() {
    let sunset = start() + Duration::minutes(20);
    let provider = move |t: DateTime<Utc>, _: GeoPoint| {
        if t < sunset {
            SOUTH_SUN
        } else {
            BELOW_HORIZON
        }
    };
    let south_of_block = GeoPoint::new(24.9995, 121.0005);
    let timeline = shade_timeline(
        south_of_block,
        &[block()],
        &start(),
        40,
        10,
        &provider,
        &ShadeConfig::default(),
    );
    let shades: Vec<Shade> = timeline.entries.iter().map(|e| e.shade).collect();
    assert_eq!(
        shades,
        vec![Shade::Sunlit, Shade::Sunlit, Shade::Night, Shade::Night, Shade::Night]
    );
    assert!((timeline.shaded_fraction() - 0.6).abs() < 1e-12);
    assert_eq!(timeline.first_sunlit(), Some(0));
}

#[test]
fn test_timeline_without_buildings_is_sunlit() {
    let provider = |_: DateTime<Utc>, _: GeoPoint| SOUTH_SUN;
    let timeline = shade_timeline(
        GeoPoint::new(25.0, 121.0),
        &[],
        &start(),
        30,
        0,
        &provider,
        &ShadeConfig::default(),
    );
    assert_eq!(timeline.entries.len(), 1);
    assert_eq!(timeline.shaded_fraction(), 0.0);
}

#[test]
fn test_offset_instant_out_of_range() {
    assert_eq!(offset_instant(&start(), 90), Some(start() + Duration::minutes(90)));
    assert_eq!(offset_instant(&start(), i64::MAX / 2), None);
    assert_eq!(offset_instant(&start(), i64::MIN), None);
    assert_eq!(offset_instant(&DateTime::<Utc>::MAX_UTC, 1), None);
}

#[test]
fn test_huge_offset_gives_no_shadows() {
    let provider = |_: DateTime<Utc>, _: GeoPoint| SOUTH_SUN;
    let buildings = vec![block()];
    let config = ShadeConfig::default();
    assert!(shadows_at_offset(&buildings, &start(), i64::MAX / 2, &provider, &config).is_empty());
    assert!(shadows_at_offset(&buildings, &start(), i64::MIN / 2, &provider, &config).is_empty());
}

#[test]
fn test_timeline_stops_at_calendar_end() {
    let provider = |_: DateTime<Utc>, _: GeoPoint| SOUTH_SUN;
    let near_end = DateTime::<Utc>::MAX_UTC - Duration::minutes(20);
    let timeline = shade_timeline(
        GeoPoint::new(25.0, 121.0),
        &[block()],
        &near_end,
        60,
        15,
        &provider,
        &ShadeConfig::default(),
    );
    let minutes: Vec<i64> = timeline.entries.iter().map(|e| e.minutes).collect();
    assert_eq!(minutes, vec![0, 15]);
}
