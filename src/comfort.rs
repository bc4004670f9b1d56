//! Heat-comfort figures shown next to the shade answers: how hot a parked car
//! gets, how hot the air feels, and which bus stop is the coolest wait.

use serde::{Deserialize, Serialize};

use crate::config::ShadeConfig;
use crate::types::Shade;

/// How much cooler a shaded bus stop is taken to be than the open street.
pub const SHADE_COOLING_C: f64 = 3.0;

pub const DEFAULT_AIR_TEMP_C: f64 = 25.0;
pub const DEFAULT_HUMIDITY_PCT: f64 = 70.0;
pub const DEFAULT_WIND_MS: f64 = 2.0;

// Halves round up: 31.5 reads as 32 and -0.5 as 0.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Cabin temperature of a car parked for a while, in the sun and in shade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CabinEstimate {
    pub sun_c: f64,
    pub shade_c: f64,
    pub eco_points: f64,
}

impl CabinEstimate {
    pub fn new(ambient_c: f64, parked_hours: f64) -> Self {
        let sun_c = round_half_up(ambient_c + 15.0 + parked_hours * 4.5);
        let shade_c = round_half_up(ambient_c + 2.0 + parked_hours * 2.2);
        Self {
            sun_c,
            shade_c,
            eco_points: ((sun_c - shade_c) * 0.05).max(0.0),
        }
    }

    pub fn cabin_c(&self, shade: Shade) -> f64 {
        if shade.is_shaded() {
            self.shade_c
        } else {
            self.sun_c
        }
    }

    /// Points are only earned by parking in shade.
    pub fn earned_points(&self, shade: Shade) -> f64 {
        if shade.is_shaded() {
            self.eco_points
        } else {
            0.0
        }
    }
}

/// Felt temperature in whole degrees: humid air feels hotter, wind cooler.
pub fn apparent_temperature(air_temp_c: f64, humidity_pct: f64, wind_ms: f64) -> f64 {
    round_half_up(air_temp_c + (humidity_pct - 50.0) * 0.12 - wind_ms * 0.4)
}

/// A station report. Missing readings fall back to typical summer values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub air_temp_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_ms: Option<f64>,
}

impl WeatherObservation {
    pub fn apparent_temperature(&self) -> f64 {
        apparent_temperature(
            self.air_temp_c.unwrap_or(DEFAULT_AIR_TEMP_C),
            self.humidity_pct.unwrap_or(DEFAULT_HUMIDITY_PCT),
            self.wind_ms.unwrap_or(DEFAULT_WIND_MS),
        )
    }

    pub fn wind_kmh(&self) -> f64 {
        self.wind_ms.unwrap_or(DEFAULT_WIND_MS) * 3.6
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatLevel {
    Comfortable,
    Muggy,
    Extreme,
}

impl HeatLevel {
    pub fn from_apparent(apparent_c: f64) -> Self {
        if apparent_c >= 38.0 {
            HeatLevel::Extreme
        } else if apparent_c >= 32.0 {
            HeatLevel::Muggy
        } else {
            HeatLevel::Comfortable
        }
    }
}

pub fn heat_alert(apparent_c: f64, config: &ShadeConfig) -> bool {
    let alert = apparent_c >= config.heat_alert_c;
    if alert {
        log::info!(
            "apparent temperature {}°C reached the {}°C alert",
            apparent_c,
            config.heat_alert_c
        );
    }
    alert
}

/// Whole minutes until the bus arrives, from an estimate in seconds.
/// Overdue estimates read as 0; a missing estimate means no bus is coming.
pub fn arrival_minutes(estimate_seconds: Option<i64>) -> Option<u32> {
    estimate_seconds.map(|s| s.div_euclid(60).clamp(0, u32::MAX as i64) as u32)
}

pub fn stop_temperature(street_temp_c: f64, shaded: bool) -> f64 {
    if shaded {
        street_temp_c - SHADE_COOLING_C
    } else {
        street_temp_c
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusStop {
    pub name: String,
    pub arrival_minutes: Option<u32>,
    pub temp_c: f64,
    pub shaded: bool,
}

impl BusStop {
    pub fn new(
        name: impl Into<String>,
        estimate_seconds: Option<i64>,
        street_temp_c: f64,
        shaded: bool,
    ) -> Self {
        Self {
            name: name.into(),
            arrival_minutes: arrival_minutes(estimate_seconds),
            temp_c: stop_temperature(street_temp_c, shaded),
            shaded,
        }
    }
}

/// The coolest stop that has a bus on the way. Ties go to the earlier stop.
pub fn coolest_stop(stops: &[BusStop]) -> Option<&BusStop> {
    stops
        .iter()
        .filter(|s| s.arrival_minutes.is_some())
        .min_by(|a, b| a.temp_c.total_cmp(&b.temp_c))
}
