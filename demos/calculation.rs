use chrono::TimeZone;
use chrono_tz::Asia::Taipei;

use shadewalk::{
    heat_alert, phase_at, project_buildings, shade_at, shade_timeline, solar_position,
    BuildingFootprint, CabinEstimate, GeoPoint, HeatLevel, ShadeConfig, SignalPlan, SignalStep,
    SolarEphemeris, WeatherObservation,
};

fn main() {
    env_logger::init();

    let config = ShadeConfig::default();
    let latitude = 25.0330;
    let longitude = 121.5654;

    let dt = Taipei.with_ymd_and_hms(2026, 7, 15, 15, 30, 0).unwrap();
    let pos = solar_position(latitude, longitude, &dt);

    println!("=== Shade and Signal Example ===");
    println!("Location: Taipei ({:.4}°N, {:.4}°E)", latitude, longitude);
    println!("Date/Time: {}", dt);
    println!();
    println!("--- Solar Position ---");
    println!("Altitude: {:.2}°", pos.altitude);
    println!("Azimuth: {:.2}° (0°=N, 90°=E, 180°=S)", pos.azimuth);
    println!();

    let tower = BuildingFootprint::new(
        "tower",
        vec![
            GeoPoint::new(25.0330, 121.5650),
            GeoPoint::new(25.0330, 121.5653),
            GeoPoint::new(25.0333, 121.5653),
            GeoPoint::new(25.0333, 121.5650),
        ],
        40.0,
    );
    let buildings = vec![tower];

    println!("--- Shadows ---");
    for shadow in project_buildings(&buildings, &dt, &SolarEphemeris, &config) {
        println!(
            "{}: {:.1} m, {} vertices",
            shadow.building_id,
            shadow.length_m,
            shadow.points.len()
        );
    }
    println!();

    let corner = GeoPoint::new(25.0332, 121.5655);
    let timeline = shade_timeline(corner, &buildings, &dt, 120, 15, &SolarEphemeris, &config);
    println!("--- Shade at corner, next 2 hours ---");
    for entry in &timeline.entries {
        println!("+{:>3} min: {:?}", entry.minutes, entry.shade);
    }
    println!("Shaded fraction: {:.0}%", timeline.shaded_fraction() * 100.0);
    println!();

    let weather = WeatherObservation {
        air_temp_c: Some(33.0),
        humidity_pct: Some(75.0),
        wind_ms: Some(1.5),
    };
    let apparent = weather.apparent_temperature();
    println!("--- Comfort ---");
    println!(
        "Feels like {}°C ({:?}), alert: {}",
        apparent,
        HeatLevel::from_apparent(apparent),
        heat_alert(apparent, &config)
    );
    let cabin = CabinEstimate::new(33.0, 2.0);
    let shade = shade_at(corner, &buildings, &dt, &SolarEphemeris, &config);
    println!(
        "Car parked 2 h at corner ({:?}): {}°C, {:.2} eco points",
        shade,
        cabin.cabin_c(shade),
        cabin.earned_points(shade)
    );
    println!();

    let plan = SignalPlan::new(
        90,
        0,
        vec![
            SignalStep { duration: 40, display_code: 1 },
            SignalStep { duration: 5, display_code: 3 },
            SignalStep { duration: 45, display_code: 2 },
        ],
    );
    match phase_at(&plan, &dt) {
        Ok(reading) => println!("Signal: {:?}, {} s left", reading.color, reading.countdown),
        Err(err) => println!("Signal: no reading ({})", err),
    }
}
