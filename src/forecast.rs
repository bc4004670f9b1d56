use chrono::{DateTime, Duration, TimeZone};

use crate::angles::SunPositionProvider;
use crate::config::ShadeConfig;
use crate::shadow::{project_buildings, shade_at};
use crate::types::{BuildingFootprint, GeoPoint, ShadeEntry, ShadeTimeline, ShadowPolygon};

pub fn shadows_at_offset<Tz: TimeZone, P: SunPositionProvider + ?Sized>(
    buildings: &[BuildingFootprint],
    now: &DateTime<Tz>,
    offset_minutes: i64,
    provider: &P,
    config: &ShadeConfig,
) -> Vec<ShadowPolygon> {
    match offset_instant(now, offset_minutes) {
        Some(at) => project_buildings(buildings, &at, provider, config),
        None => {
            log::warn!("offset of {} minutes is outside the calendar range", offset_minutes);
            Vec::new()
        }
    }
}

/// `instant` shifted by `minutes`, or `None` past the representable range.
pub fn offset_instant<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    minutes: i64,
) -> Option<DateTime<Tz>> {
    Duration::try_minutes(minutes).and_then(|delta| instant.clone().checked_add_signed(delta))
}

pub fn sample_offsets(duration_minutes: u32, interval_minutes: u32) -> Vec<i64> {
    if interval_minutes == 0 {
        return vec![0];
    }
    (0..=duration_minutes as i64)
        .step_by(interval_minutes as usize)
        .collect()
}

/// Shade at `point` sampled every `interval_minutes` from `start` through
/// `start + duration_minutes`. Samples past the calendar range are dropped.
pub fn shade_timeline<Tz: TimeZone, P: SunPositionProvider + ?Sized>(
    point: GeoPoint,
    buildings: &[BuildingFootprint],
    start: &DateTime<Tz>,
    duration_minutes: u32,
    interval_minutes: u32,
    provider: &P,
    config: &ShadeConfig,
) -> ShadeTimeline {
    let entries: Vec<ShadeEntry> = sample_offsets(duration_minutes, interval_minutes)
        .into_iter()
        .map_while(|minutes| {
            let at = offset_instant(start, minutes)?;
            Some(ShadeEntry {
                minutes,
                shade: shade_at(point, buildings, &at, provider, config),
            })
        })
        .collect();

    log::trace!(
        "shade timeline at ({:.5}, {:.5}): {} samples",
        point.latitude,
        point.longitude,
        entries.len()
    );

    ShadeTimeline {
        point,
        interval_minutes,
        entries,
    }
}
