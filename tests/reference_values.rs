//! Apparent and astrometric places against the worked examples of Meeus,
//! *Astronomical Algorithms* (2nd ed.)

use approx::assert_relative_eq;
use rstest::rstest;

use orrery::coordinates::angle::{Dms, Hms};
use orrery::kepler::OrbitalElements;
use orrery::positions::{minor_body_astrometric, pluto_astrometric};
use orrery::time::{day_of_week, easter_gregorian, julian_day};
use orrery::{Body, EphemerisConfig, GeoLocation, OrreryError, Planet, SkyContext};

fn greenwich() -> GeoLocation {
    GeoLocation::new(51.4769, 0.0, 0.0).unwrap()
}

fn sky_tt(jd: f64) -> SkyContext {
    SkyContext::at_tt(jd, greenwich(), &EphemerisConfig::default()).unwrap()
}

#[test]
fn pluto_1992_october_13() {
    let config = EphemerisConfig::default();
    let place = pluto_astrometric(2448908.5, &config).unwrap();
    let alpha: Hms = "15h 31m 43.7s".parse().unwrap();
    let delta: Dms = "-4° 27′ 29″".parse().unwrap();
    assert_relative_eq!(place.equatorial.alpha, alpha.to_degrees(), epsilon = 1e-3);
    assert_relative_eq!(place.equatorial.delta, delta.to_decimal(), epsilon = 1e-3);
    assert_relative_eq!(place.distance, 30.528, epsilon = 1e-3);

    let apparent = sky_tt(2448908.5).apparent(Body::Pluto).unwrap();
    assert_relative_eq!(apparent.equatorial.alpha, 232.83695, epsilon = 1e-3);
    assert_relative_eq!(apparent.equatorial.delta, -4.43286, epsilon = 1e-3);
}

#[test]
fn pluto_outside_its_theory() {
    let config = EphemerisConfig::default();
    assert!(matches!(
        pluto_astrometric(2_488_070.0 + 365.0, &config),
        Err(OrreryError::Validation(_))
    ));
}

#[test]
fn comet_encke_1990_october_6() {
    let encke = OrbitalElements::from_perihelion(
        2448192.5 + 0.54502,
        0.8502196,
        2.2091404,
        11.94524,
        186.23352,
        334.75006,
    )
    .unwrap();
    let place = minor_body_astrometric(&encke, 2448170.5, &EphemerisConfig::default()).unwrap();
    assert_relative_eq!(place.equatorial.alpha, 158.558965, epsilon = 2e-4);
    assert_relative_eq!(place.equatorial.delta, 19.158496, epsilon = 2e-4);
    assert_relative_eq!(place.distance, 0.82427, epsilon = 2e-5);
    assert!(place.light_time.iterations >= 2);
}

#[test]
fn venus_1992_december_20() {
    // No Venus series installed: mean elements stand in, good to a few arcseconds here
    let venus = sky_tt(2448976.5).planet_apparent(Planet::Venus).unwrap();
    assert_relative_eq!(venus.equatorial.alpha, 316.172725, epsilon = 2e-3);
    assert_relative_eq!(venus.equatorial.delta, -18.888011, epsilon = 2e-3);
    assert_relative_eq!(venus.distance, 0.91095, epsilon = 1e-3);
}

#[test]
fn sun_and_moon() {
    let sun = sky_tt(2448908.5).apparent(Body::Sun).unwrap();
    assert_relative_eq!(sun.equatorial.alpha, 198.378121, epsilon = 2e-4);
    assert_relative_eq!(sun.equatorial.delta, -7.783817, epsilon = 2e-4);

    let moon = sky_tt(2448724.5).apparent(Body::Moon).unwrap();
    assert_relative_eq!(moon.equatorial.alpha, 134.688470, epsilon = 2e-4);
    assert_relative_eq!(moon.equatorial.delta, 13.768368, epsilon = 2e-4);
}

#[test]
fn topocentric_moon_is_displaced_toward_the_horizon() {
    let sky = sky_tt(2448724.5);
    let moon = sky.moon_apparent();
    let topocentric = sky.topocentric(&moon);
    let geocentric_altitude = sky.horizontal(&moon.equatorial).altitude;
    let topocentric_altitude = sky.horizontal(&topocentric).altitude;
    // Parallax lowers the Moon by up to its horizontal parallax
    let drop = geocentric_altitude - topocentric_altitude;
    assert!(drop > 0.0 && drop <= moon.horizontal_parallax + 1e-9, "drop {drop}");
}

#[rstest]
#[case(1957, 10, 4.81, 2436116.31)]
#[case(2000, 1, 1.5, 2451545.0)]
#[case(1987, 6, 19.5, 2446966.0)]
#[case(-1000, 7, 12.5, 1356001.0)]
#[case(-4712, 1, 1.5, 0.0)]
fn julian_days(#[case] year: i32, #[case] month: u32, #[case] day: f64, #[case] expected: f64) {
    assert_relative_eq!(julian_day(year, month, day).unwrap(), expected, epsilon = 1e-6);
}

#[test]
fn calendar_helpers() {
    assert_eq!(day_of_week(2434923.5), chrono::Weekday::Wed);
    let easter = easter_gregorian(2000).unwrap();
    assert_eq!((easter.month, easter.day as u32), (4, 23));
}
