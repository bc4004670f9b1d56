pub mod angles;
pub mod buildings;
pub mod comfort;
pub mod config;
pub mod forecast;
pub mod shadow;
pub mod signal;
pub mod types;

pub use angles::{
    day_of_year, equation_of_time, horizontal_coordinates, hour_angle, local_solar_time,
    normalize_angle, solar_declination, solar_position, sun_position, SolarEphemeris,
    SunPositionProvider, DEGREES_PER_HOUR, EARTH_AXIAL_TILT,
};

pub use buildings::{estimate_height, parse_leading_number, parse_overpass, parse_overpass_pois};

pub use comfort::{
    apparent_temperature, arrival_minutes, coolest_stop, heat_alert, stop_temperature, BusStop,
    CabinEstimate, HeatLevel, WeatherObservation, SHADE_COOLING_C,
};

pub use config::{ConfigError, ShadeConfig};

pub use forecast::{offset_instant, sample_offsets, shade_timeline, shadows_at_offset};

pub use shadow::{
    footprint_ring, is_shaded, point_in_polygon, project, project_buildings, shade_at,
    shadow_length_m, shadow_offset, GeometryError, SunCache, MIN_SUN_ALTITUDE,
};

pub use signal::{
    color_for_code, current_reading, parse_tdx_plans, phase_at, phase_at_seconds,
    seconds_since_midnight, PlanError,
};

pub use types::{
    BuildingFootprint, GeoPoint, Poi, PoiKind, Shade, ShadeEntry, ShadeTimeline, ShadowPolygon,
    SignalColor, SignalPlan, SignalReading, SignalStep, SolarPosition, SunPosition,
};
