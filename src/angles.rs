//! Where the sun stands for an observer, from the calendar day and the clock.
//! Degree-valued helpers use Spencer's equation of time and Cooper's
//! declination; the shadow projector consumes radians via [`sun_position`].

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};

use crate::types::{GeoPoint, SolarPosition, SunPosition};

pub const EARTH_AXIAL_TILT: f64 = 23.45;
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Clock minutes per degree of longitude.
const MINUTES_PER_DEGREE: f64 = 4.0;

/// Wraps a bearing in degrees into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Ordinal day, 1 for January 1st. `None` for dates that do not exist.
pub fn day_of_year(year: i32, month: u32, day: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.ordinal())
}

// Position of day `n` through a 365-day year, in radians.
fn year_fraction(n: u32) -> f64 {
    (360.0 / 365.0 * (n as f64 - 1.0)).to_radians()
}

/// Minutes by which apparent solar time leads mean solar time on day `n`.
pub fn equation_of_time(n: u32) -> f64 {
    let b = year_fraction(n);
    let (sin1, cos1) = b.sin_cos();
    let (sin2, cos2) = (2.0 * b).sin_cos();
    229.18 * (0.000075 + 0.001868 * cos1 - 0.032077 * sin1 - 0.014615 * cos2 - 0.040849 * sin2)
}

pub fn solar_declination(n: u32) -> f64 {
    EARTH_AXIAL_TILT * (360.0 * (284.0 + n as f64) / 365.0).to_radians().sin()
}

/// Apparent solar time in hours, wrapped into `[0, 24)`.
pub fn local_solar_time(utc_hours: f64, longitude: f64, equation_of_time: f64) -> f64 {
    (utc_hours + (MINUTES_PER_DEGREE * longitude + equation_of_time) / 60.0).rem_euclid(24.0)
}

/// Degrees west of the meridian; negative in the morning.
pub fn hour_angle(local_solar_time: f64) -> f64 {
    DEGREES_PER_HOUR * (local_solar_time - 12.0)
}

/// Altitude and azimuth, in degrees. Azimuth is clockwise from north.
pub fn horizontal_coordinates(latitude: f64, declination: f64, hour_angle: f64) -> (f64, f64) {
    let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
    let (sin_dec, cos_dec) = declination.to_radians().sin_cos();
    let (sin_ha, cos_ha) = hour_angle.to_radians().sin_cos();

    let sin_alt = (sin_lat * sin_dec + cos_lat * cos_dec * cos_ha).clamp(-1.0, 1.0);
    let east = -cos_dec * sin_ha;
    let north = sin_dec * cos_lat - cos_dec * sin_lat * cos_ha;
    (
        sin_alt.asin().to_degrees(),
        normalize_angle(east.atan2(north).to_degrees()),
    )
}

pub fn solar_position<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
) -> SolarPosition {
    let utc = dt.with_timezone(&Utc);
    let n = utc.ordinal();
    let utc_hours = utc.num_seconds_from_midnight() as f64 / 3600.0;

    let eot = equation_of_time(n);
    let declination = solar_declination(n);
    let lst = local_solar_time(utc_hours, longitude, eot);
    let ha = hour_angle(lst);
    let (altitude, azimuth) = horizontal_coordinates(latitude, declination, ha);

    SolarPosition {
        day_of_year: n,
        declination,
        equation_of_time: eot,
        local_solar_time: lst,
        hour_angle: ha,
        zenith: 90.0 - altitude,
        altitude,
        azimuth,
    }
}

/// Sun angles at `location`, in radians, as consumed by the shadow projector.
pub fn sun_position<Tz: TimeZone>(dt: &DateTime<Tz>, location: GeoPoint) -> SunPosition {
    let pos = solar_position(location.latitude, location.longitude, dt);
    SunPosition {
        altitude: pos.altitude.to_radians(),
        azimuth: pos.azimuth.to_radians(),
    }
}

pub trait SunPositionProvider {
    fn sun_position(&self, instant: DateTime<Utc>, location: GeoPoint) -> SunPosition;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolarEphemeris;

impl SunPositionProvider for SolarEphemeris {
    fn sun_position(&self, instant: DateTime<Utc>, location: GeoPoint) -> SunPosition {
        sun_position(&instant, location)
    }
}

impl<F> SunPositionProvider for F
where
    F: Fn(DateTime<Utc>, GeoPoint) -> SunPosition,
{
    fn sun_position(&self, instant: DateTime<Utc>, location: GeoPoint) -> SunPosition {
        self(instant, location)
    }
}
