use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

use crate::angles::SunPositionProvider;
use crate::config::ShadeConfig;
use crate::types::{BuildingFootprint, GeoPoint, Shade, ShadowPolygon, SunPosition};

/// Altitudes below this are projected as if the sun stood this high.
pub const MIN_SUN_ALTITUDE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("building {id}: footprint has {count} distinct vertices, need at least 3")]
    TooFewVertices { id: String, count: usize },

    #[error("building {id}: footprint has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },

    #[error("building {id}: height is not a finite number")]
    NonFiniteHeight { id: String },

    #[error("sun position is not finite")]
    NonFiniteSun,
}

pub fn shadow_length_m(height_m: f64, sun: &SunPosition) -> f64 {
    let altitude = sun.altitude.clamp(MIN_SUN_ALTITUDE, FRAC_PI_2);
    height_m / altitude.tan()
}

/// Latitude and longitude deltas, in degrees, of a shadow cast away from the sun.
pub fn shadow_offset(length_m: f64, sun_azimuth: f64, meters_per_degree: f64) -> (f64, f64) {
    let length_deg = length_m / meters_per_degree;
    let direction = sun_azimuth + PI;
    (length_deg * direction.cos(), length_deg * direction.sin())
}

/// Validated outline of `footprint` with the closing vertex and repeats removed.
pub fn footprint_ring(footprint: &BuildingFootprint) -> Result<Vec<GeoPoint>, GeometryError> {
    if !footprint.height_m.is_finite() {
        return Err(GeometryError::NonFiniteHeight {
            id: footprint.id.clone(),
        });
    }
    if footprint.vertices.iter().any(|p| !p.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate {
            id: footprint.id.clone(),
        });
    }

    let mut ring: Vec<GeoPoint> = Vec::with_capacity(footprint.vertices.len());
    for &p in &footprint.vertices {
        if ring.last() != Some(&p) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    if ring.len() < 3 {
        return Err(GeometryError::TooFewVertices {
            id: footprint.id.clone(),
            count: ring.len(),
        });
    }
    Ok(ring)
}

pub fn project(
    footprint: &BuildingFootprint,
    sun: &SunPosition,
    meters_per_degree: f64,
) -> Result<Option<ShadowPolygon>, GeometryError> {
    let ring = footprint_ring(footprint)?;
    project_ring(footprint, &ring, sun, meters_per_degree)
}

fn project_ring(
    footprint: &BuildingFootprint,
    ring: &[GeoPoint],
    sun: &SunPosition,
    meters_per_degree: f64,
) -> Result<Option<ShadowPolygon>, GeometryError> {
    if !(sun.altitude.is_finite() && sun.azimuth.is_finite()) {
        return Err(GeometryError::NonFiniteSun);
    }
    if !sun.is_above_horizon() {
        return Ok(None);
    }

    let length_m = shadow_length_m(footprint.height_m, sun);
    let (dlat, dlon) = shadow_offset(length_m, sun.azimuth, meters_per_degree);
    Ok(Some(ShadowPolygon {
        building_id: footprint.id.clone(),
        points: sweep(ring, dlat, dlon),
        length_m,
    }))
}

// Splits the ring at its two silhouette vertices and joins the sun-facing
// chain to the offset far chain, walked backwards. Concave rings have more
// than two silhouette chains, so they get the hull of both copies instead.
fn sweep(ring: &[GeoPoint], dlat: f64, dlon: f64) -> Vec<GeoPoint> {
    if dlat == 0.0 && dlon == 0.0 {
        return ring.to_vec();
    }
    if !is_convex(ring) {
        let mut points = ring.to_vec();
        points.extend(ring.iter().map(|p| p.offset(dlat, dlon)));
        return convex_hull(points);
    }

    let n = ring.len();
    let across = |p: &GeoPoint| dlon * p.latitude - dlat * p.longitude;
    let along = |p: &GeoPoint| dlat * p.latitude + dlon * p.longitude;

    let mut first = 0;
    let mut last = 0;
    for (i, p) in ring.iter().enumerate() {
        if across(p) < across(&ring[first]) {
            first = i;
        }
        if across(p) > across(&ring[last]) {
            last = i;
        }
    }

    if first == last {
        let mut points = ring.to_vec();
        points.extend(ring.iter().rev().map(|p| p.offset(dlat, dlon)));
        return points;
    }

    let walk = |step: usize| {
        let mut chain = vec![first];
        let mut i = first;
        while i != last {
            i = (i + step) % n;
            chain.push(i);
        }
        chain
    };
    let forward = walk(1);
    let backward = walk(n - 1);

    // How far a chain bulges past the segment between the silhouette vertices,
    // measured along the shadow direction. The sun-facing chain bulges backwards.
    let (a, b) = (&ring[first], &ring[last]);
    let span = across(b) - across(a);
    let bulge = |chain: &[usize]| {
        chain
            .iter()
            .map(|&i| {
                let p = &ring[i];
                let t = (across(p) - across(a)) / span;
                along(p) - (along(a) + t * (along(b) - along(a)))
            })
            .sum::<f64>()
    };
    let (near, far) = if bulge(&backward) < bulge(&forward) {
        (backward, forward)
    } else {
        (forward, backward)
    };

    let mut points: Vec<GeoPoint> = near.iter().map(|&i| ring[i]).collect();
    points.extend(far.iter().rev().map(|&i| ring[i].offset(dlat, dlon)));
    points
}

// Turn direction at each vertex, in the lon/lat plane. Near-collinear
// vertices are ignored.
fn is_convex(ring: &[GeoPoint]) -> bool {
    let n = ring.len();
    let mut left = false;
    let mut right = false;
    for i in 0..n {
        let (a, b, c) = (ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        let (ux, uy) = (b.longitude - a.longitude, b.latitude - a.latitude);
        let (vx, vy) = (c.longitude - b.longitude, c.latitude - b.latitude);
        let turn = ux * vy - uy * vx;
        if turn.abs() <= 1e-9 * ux.hypot(uy) * vx.hypot(vy) {
            continue;
        }
        if turn > 0.0 {
            left = true;
        } else {
            right = true;
        }
    }
    !(left && right)
}

// Monotone chain, counter-clockwise in the lon/lat plane.
fn convex_hull(mut points: Vec<GeoPoint>) -> Vec<GeoPoint> {
    points.sort_by(|a, b| {
        a.longitude
            .total_cmp(&b.longitude)
            .then(a.latitude.total_cmp(&b.latitude))
    });
    points.dedup();
    if points.len() < 3 {
        return points;
    }

    let turn = |o: &GeoPoint, a: &GeoPoint, b: &GeoPoint| {
        (a.longitude - o.longitude) * (b.latitude - o.latitude)
            - (a.latitude - o.latitude) * (b.longitude - o.longitude)
    };
    let mut hull: Vec<GeoPoint> = Vec::with_capacity(points.len() + 1);
    for p in &points {
        while hull.len() >= 2 && turn(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    let lower = hull.len() + 1;
    for p in points.iter().rev().skip(1) {
        while hull.len() >= lower && turn(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull
}

/// Sun positions memoised by (unix second, rounded location).
#[derive(Debug, Clone, Default)]
pub struct SunCache {
    decimals: u32,
    entries: HashMap<(i64, i64, i64), SunPosition>,
    hits: usize,
    misses: usize,
}

impl SunCache {
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals,
            ..Self::default()
        }
    }

    pub fn get_or_compute<P: SunPositionProvider + ?Sized>(
        &mut self,
        provider: &P,
        instant: DateTime<Utc>,
        location: GeoPoint,
    ) -> SunPosition {
        let scale = 10f64.powi(self.decimals as i32);
        let lat = (location.latitude * scale).round();
        let lon = (location.longitude * scale).round();
        let key = (instant.timestamp(), lat as i64, lon as i64);

        if let Some(sun) = self.entries.get(&key) {
            self.hits += 1;
            return *sun;
        }
        self.misses += 1;
        let sun = provider.sun_position(instant, GeoPoint::new(lat / scale, lon / scale));
        self.entries.insert(key, sun);
        sun
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Shadows of every usable building at `instant`. Footprints that fail
/// validation are logged and skipped.
pub fn project_buildings<Tz: TimeZone, P: SunPositionProvider + ?Sized>(
    buildings: &[BuildingFootprint],
    instant: &DateTime<Tz>,
    provider: &P,
    config: &ShadeConfig,
) -> Vec<ShadowPolygon> {
    let instant = instant.with_timezone(&Utc);
    let mut cache = SunCache::new(config.sun_cache_decimals);
    let mut shadows = Vec::with_capacity(buildings.len());
    let mut skipped = 0;

    for building in buildings {
        let projected = footprint_ring(building).and_then(|ring| {
            let sun = cache.get_or_compute(provider, instant, ring[0]);
            project_ring(building, &ring, &sun, config.meters_per_degree)
        });
        match projected {
            Ok(Some(shadow)) => shadows.push(shadow),
            Ok(None) => {}
            Err(err) => {
                log::warn!("skipping footprint: {}", err);
                skipped += 1;
            }
        }
    }

    log::debug!(
        "projected {} shadows from {} buildings ({} skipped, {} sun lookups, {} cached)",
        shadows.len(),
        buildings.len(),
        skipped,
        cache.misses(),
        cache.hits()
    );
    shadows
}

pub fn point_in_polygon(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    let (x, y) = (point.longitude, point.latitude);
    let mut inside = false;
    let mut j = match polygon.len() {
        0 => return false,
        n => n - 1,
    };
    for (i, pi) in polygon.iter().enumerate() {
        let pj = polygon[j];
        let (xi, yi) = (pi.longitude, pi.latitude);
        let (xj, yj) = (pj.longitude, pj.latitude);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub fn is_shaded(point: GeoPoint, shadows: &[ShadowPolygon]) -> bool {
    shadows.iter().any(|s| point_in_polygon(point, &s.points))
}

pub fn shade_at<Tz: TimeZone, P: SunPositionProvider + ?Sized>(
    point: GeoPoint,
    buildings: &[BuildingFootprint],
    instant: &DateTime<Tz>,
    provider: &P,
    config: &ShadeConfig,
) -> Shade {
    let sun = provider.sun_position(instant.with_timezone(&Utc), point);
    if !sun.is_above_horizon() {
        return Shade::Night;
    }
    let shadows = project_buildings(buildings, instant, provider, config);
    if is_shaded(point, &shadows) {
        Shade::Shaded
    } else {
        Shade::Sunlit
    }
}
