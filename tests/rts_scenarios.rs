//! Rise, transit and set in typical and degenerate geometries

use approx::assert_relative_eq;
use rstest::rstest;

use orrery::almanac::{rise_transit_set, rise_transit_set_fixed, RtsOptions};
use orrery::constants::SIDEREAL_RATE;
use orrery::{Equatorial, GeoLocation, OrreryError};

fn site(latitude: f64) -> GeoLocation {
    GeoLocation::new(latitude, 0.0, 0.0).unwrap()
}

#[test]
fn venus_from_boston_1988_march_20() {
    let boston = GeoLocation::new(42.3333, 71.0833, 0.0).unwrap();
    let positions = [
        Equatorial::new(41.73129, 18.44092),
        Equatorial::new(42.25670, 18.63502),
        Equatorial::new(42.78204, 18.82742),
    ];
    let rts = rise_transit_set(&positions, &boston, 177.74208, &RtsOptions::default()).unwrap();

    assert!(rts.is_complete());
    assert_relative_eq!(rts.rise.unwrap(), 0.51766, epsilon = 3e-4);
    assert_relative_eq!(rts.transit.unwrap(), 0.81980, epsilon = 3e-4);
    assert_relative_eq!(rts.set.unwrap(), 0.12130, epsilon = 3e-4);

    assert_relative_eq!(rts.rise_azimuth.unwrap(), 243.80, epsilon = 0.05);
    assert_relative_eq!(rts.transit_altitude.unwrap(), 66.425, epsilon = 0.05);
    assert_relative_eq!(rts.set_azimuth.unwrap(), 115.98, epsilon = 0.05);
}

#[test]
fn circumpolar_body_only_transits() {
    let rts = rise_transit_set_fixed(
        &Equatorial::new(0.0, 70.0),
        &site(60.0),
        180.0,
        &RtsOptions::geometric(),
    );
    assert_eq!((rts.rise, rts.set), (None, None));
    assert_relative_eq!(rts.transit.unwrap(), 180.0 / SIDEREAL_RATE, epsilon = 2e-4);
    assert_relative_eq!(rts.transit_altitude.unwrap(), 80.0, epsilon = 1e-3);
}

#[test]
fn never_visible_body_has_no_events() {
    let rts = rise_transit_set_fixed(
        &Equatorial::new(0.0, -40.0),
        &site(60.0),
        180.0,
        &RtsOptions::default(),
    );
    assert_eq!(rts, Default::default());
    assert!(rts.julian_days(2451545.0).iter().all(Option::is_none));
}

#[rstest]
#[case(-30.0, -35.0, 85.0)]
#[case(20.0, 40.0, 70.0)]
#[case(60.0, 40.0, 70.0)]
fn culmination_altitude(#[case] delta: f64, #[case] latitude: f64, #[case] altitude: f64) {
    let rts = rise_transit_set_fixed(
        &Equatorial::new(0.0, delta),
        &site(latitude),
        180.0,
        &RtsOptions::geometric(),
    );
    assert_relative_eq!(rts.transit_altitude.unwrap(), altitude, epsilon = 1e-3);
}

#[test]
fn northern_culmination_above_pole_never_sets() {
    let rts = rise_transit_set_fixed(
        &Equatorial::new(0.0, 60.0),
        &site(40.0),
        180.0,
        &RtsOptions::geometric(),
    );
    assert!(rts.transit.is_some());
    assert_eq!((rts.rise, rts.set), (None, None));
}

#[test]
fn horizon_offset_lengthens_the_day() {
    let eq = Equatorial::new(0.0, 0.0);
    let geometric = rise_transit_set_fixed(&eq, &site(45.0), 180.0, &RtsOptions::geometric());
    let refracted = rise_transit_set_fixed(&eq, &site(45.0), 180.0, &RtsOptions::default());
    assert!(refracted.rise.unwrap() < geometric.rise.unwrap());
    assert!(refracted.set.unwrap() > geometric.set.unwrap());
}

#[test]
fn wrong_sample_count() {
    let eq = Equatorial::new(0.0, 0.0);
    let result = rise_transit_set(&[eq; 4], &site(0.0), 0.0, &RtsOptions::default());
    assert!(matches!(result, Err(OrreryError::Validation(_))));
}
