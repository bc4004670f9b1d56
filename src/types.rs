use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn offset(&self, dlat: f64, dlon: f64) -> Self {
        Self::new(self.latitude + dlat, self.longitude + dlon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingFootprint {
    pub id: String,
    pub vertices: Vec<GeoPoint>,
    pub height_m: f64,
}

impl BuildingFootprint {
    pub fn new(id: impl Into<String>, vertices: Vec<GeoPoint>, height_m: f64) -> Self {
        Self {
            id: id.into(),
            vertices,
            height_m,
        }
    }

    /// Point used for the sun-position lookup of this building.
    pub fn reference_point(&self) -> Option<GeoPoint> {
        self.vertices.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiKind {
    Water,
    Store,
}

impl PoiKind {
    pub fn default_name(self) -> &'static str {
        match self {
            PoiKind::Water => "Drinking water",
            PoiKind::Store => "Convenience store",
        }
    }
}

/// A place to cool down along a walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub location: GeoPoint,
    pub kind: PoiKind,
    pub name: String,
}

/// Sun angles in radians. Azimuth is clockwise from geographic north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    pub altitude: f64,
    pub azimuth: f64,
}

impl SunPosition {
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

/// The intermediate quantities behind a sun position, angles in degrees and
/// solar time in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    pub day_of_year: u32,
    pub declination: f64,
    pub equation_of_time: f64,
    pub local_solar_time: f64,
    pub hour_angle: f64,
    pub zenith: f64,
    pub altitude: f64,
    pub azimuth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowPolygon {
    pub building_id: String,
    pub points: Vec<GeoPoint>,
    pub length_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalColor {
    Green,
    Yellow,
    Red,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalStep {
    pub duration: u32,
    pub display_code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalPlan {
    pub signal_id: Option<String>,
    pub cycle_time: u32,
    pub offset: i64,
    pub steps: Vec<SignalStep>,
}

impl SignalPlan {
    pub fn new(cycle_time: u32, offset: i64, steps: Vec<SignalStep>) -> Self {
        Self {
            signal_id: None,
            cycle_time,
            offset,
            steps,
        }
    }

    pub fn declared_duration(&self) -> u64 {
        self.steps.iter().map(|s| s.duration as u64).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReading {
    pub color: SignalColor,
    pub countdown: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shade {
    Sunlit,
    Shaded,
    Night,
}

impl Shade {
    pub fn is_shaded(self) -> bool {
        !matches!(self, Shade::Sunlit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadeEntry {
    pub minutes: i64,
    pub shade: Shade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadeTimeline {
    pub point: GeoPoint,
    pub interval_minutes: u32,
    pub entries: Vec<ShadeEntry>,
}

impl ShadeTimeline {
    pub fn shaded_fraction(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let shaded = self.entries.iter().filter(|e| e.shade.is_shaded()).count();
        shaded as f64 / self.entries.len() as f64
    }

    pub fn first_sunlit(&self) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.shade == Shade::Sunlit)
            .map(|e| e.minutes)
    }
}
