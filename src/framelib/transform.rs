//! Spherical coordinate transformations
//!
//! All angles are degrees. Hour angles follow H = θ₀ − L − α with the
//! observer's longitude L positive west; azimuths are measured westward from
//! the south point.

use crate::constants::{AU_KM, EARTH_FLATTENING, EARTH_RADIUS_KM, SOLAR_PARALLAX_ASEC};
use crate::coordinates::angle::{normalize180, normalize360};
use crate::coordinates::{Ecliptical, Equatorial, GeoLocation, Horizontal};

/// Ecliptical → equatorial for obliquity `epsilon`
pub fn ecliptical_to_equatorial(ecl: &Ecliptical, epsilon: f64) -> Equatorial {
    let (lambda, beta, eps) = (
        ecl.lambda.to_radians(),
        ecl.beta.to_radians(),
        epsilon.to_radians(),
    );
    let alpha = (lambda.sin() * eps.cos() - beta.tan() * eps.sin()).atan2(lambda.cos());
    let delta = (beta.sin() * eps.cos() + beta.cos() * eps.sin() * lambda.sin())
        .clamp(-1.0, 1.0)
        .asin();
    Equatorial::new(alpha.to_degrees(), delta.to_degrees())
}

/// Equatorial → ecliptical for obliquity `epsilon`; `distance` is carried along
pub fn equatorial_to_ecliptical(eq: &Equatorial, epsilon: f64, distance: f64) -> Ecliptical {
    let (alpha, delta, eps) = (
        eq.alpha.to_radians(),
        eq.delta.to_radians(),
        epsilon.to_radians(),
    );
    let lambda = (alpha.sin() * eps.cos() + delta.tan() * eps.sin()).atan2(alpha.cos());
    let beta = (delta.sin() * eps.cos() - delta.cos() * eps.sin() * alpha.sin())
        .clamp(-1.0, 1.0)
        .asin();
    Ecliptical::new(lambda.to_degrees(), beta.to_degrees(), distance)
}

/// Local hour angle in [0, 360) from Greenwich sidereal time `theta0`
pub fn hour_angle(theta0: f64, location: &GeoLocation, alpha: f64) -> f64 {
    normalize360(theta0 - location.longitude - alpha)
}

/// Equatorial → horizontal for an observer, given Greenwich sidereal time
pub fn equatorial_to_horizontal(
    eq: &Equatorial,
    location: &GeoLocation,
    theta0: f64,
) -> Horizontal {
    let h = hour_angle(theta0, location, eq.alpha).to_radians();
    let (phi, delta) = (location.latitude.to_radians(), eq.delta.to_radians());

    let azimuth = h.sin().atan2(h.cos() * phi.sin() - delta.tan() * phi.cos());
    let altitude = (phi.sin() * delta.sin() + phi.cos() * delta.cos() * h.cos())
        .clamp(-1.0, 1.0)
        .asin();
    Horizontal::new(azimuth.to_degrees(), altitude.to_degrees())
}

/// Horizontal → equatorial for an observer, given Greenwich sidereal time
pub fn horizontal_to_equatorial(
    hz: &Horizontal,
    location: &GeoLocation,
    theta0: f64,
) -> Equatorial {
    let (a, alt, phi) = (
        hz.azimuth.to_radians(),
        hz.altitude.to_radians(),
        location.latitude.to_radians(),
    );
    let h = a.sin().atan2(a.cos() * phi.sin() + alt.tan() * phi.cos());
    let delta = (phi.sin() * alt.sin() - phi.cos() * alt.cos() * a.cos())
        .clamp(-1.0, 1.0)
        .asin();
    Equatorial::new(
        theta0 - location.longitude - h.to_degrees(),
        delta.to_degrees(),
    )
}

/// ρ·sin φ′ and ρ·cos φ′ of an observer (geocentric position in Earth radii)
pub fn geocentric_terms(location: &GeoLocation) -> (f64, f64) {
    let ratio = 1.0 - EARTH_FLATTENING;
    let phi = location.latitude.to_radians();
    let u = (ratio * phi.tan()).atan();
    let height = location.elevation / (EARTH_RADIUS_KM * 1000.0);
    (
        ratio * u.sin() + height * phi.sin(),
        u.cos() + height * phi.cos(),
    )
}

/// Equatorial horizontal parallax in degrees for a distance in AU
pub fn parallax_from_au(distance_au: f64) -> f64 {
    ((SOLAR_PARALLAX_ASEC / 3600.0).to_radians().sin() / distance_au)
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

/// Equatorial horizontal parallax in degrees for a distance in km
pub fn parallax_from_km(distance_km: f64) -> f64 {
    (EARTH_RADIUS_KM / distance_km)
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

/// Apparent angular semidiameter in degrees of a sphere of `radius_km`
pub fn semidiameter(radius_km: f64, distance_au: f64) -> f64 {
    (radius_km / (distance_au * AU_KM))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

/// Geocentric → topocentric equatorial coordinates
///
/// `parallax` is the equatorial horizontal parallax of the body in degrees.
pub fn topocentric_equatorial(
    eq: &Equatorial,
    parallax: f64,
    location: &GeoLocation,
    theta0: f64,
) -> Equatorial {
    let (rho_sin, rho_cos) = geocentric_terms(location);
    let sin_pi = parallax.to_radians().sin();
    let h = hour_angle(theta0, location, eq.alpha).to_radians();
    let delta = eq.delta.to_radians();

    let denominator = delta.cos() - rho_cos * sin_pi * h.cos();
    let delta_alpha = (-rho_cos * sin_pi * h.sin()).atan2(denominator);
    let delta_prime = ((delta.sin() - rho_sin * sin_pi) * delta_alpha.cos()).atan2(denominator);

    Equatorial::new(
        eq.alpha + normalize180(delta_alpha.to_degrees()),
        delta_prime.to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPSILON_J2000: f64 = 23.4392911;

    #[test]
    fn test_pollux_ecliptical() {
        let pollux = Equatorial::new(116.328942, 28.026183);
        let ecl = equatorial_to_ecliptical(&pollux, EPSILON_J2000, 0.0);
        assert_relative_eq!(ecl.lambda, 113.215630, epsilon = 1e-5);
        assert_relative_eq!(ecl.beta, 6.684170, epsilon = 1e-5);

        let back = ecliptical_to_equatorial(&ecl, EPSILON_J2000);
        assert_relative_eq!(back.alpha, pollux.alpha, epsilon = 1e-9);
        assert_relative_eq!(back.delta, pollux.delta, epsilon = 1e-9);
    }

    #[test]
    fn test_venus_horizontal() {
        // Venus from the US Naval Observatory, 1987 April 10, 19:21 UT
        let usno = GeoLocation::new(38.921389, 77.065556, 0.0).unwrap();
        let venus = Equatorial::new(347.3193375, -6.719892);
        let theta0 = 128.737_026_5;

        assert_relative_eq!(hour_angle(theta0, &usno, venus.alpha), 64.352133, epsilon = 1e-4);
        let hz = equatorial_to_horizontal(&venus, &usno, theta0);
        assert_relative_eq!(hz.azimuth, 68.0337, epsilon = 1e-4);
        assert_relative_eq!(hz.altitude, 15.1249, epsilon = 1e-4);
    }

    #[test]
    fn test_horizontal_roundtrip() {
        let mut rng = StdRng::seed_from_u64(1987);
        for _ in 0..50 {
            let location =
                GeoLocation::new(rng.gen_range(-80.0..80.0), rng.gen_range(-180.0..180.0), 0.0)
                    .unwrap();
            let eq = Equatorial::new(rng.gen_range(0.0..360.0), rng.gen_range(-85.0..85.0));
            let theta0 = rng.gen_range(0.0..360.0);

            let hz = equatorial_to_horizontal(&eq, &location, theta0);
            let back = horizontal_to_equatorial(&hz, &location, theta0);
            assert!(back.separation(&eq) < 1e-8);
        }
    }

    #[test]
    fn test_mars_topocentric_from_palomar() {
        let palomar = GeoLocation::new(33.356111, 116.8625, 1706.0).unwrap();
        let (rho_sin, rho_cos) = geocentric_terms(&palomar);
        assert_relative_eq!(rho_sin, 0.546861, epsilon = 1e-6);
        assert_relative_eq!(rho_cos, 0.836339, epsilon = 1e-6);

        let mars = Equatorial::new(339.530208, -15.771083);
        let parallax = parallax_from_au(0.37276);
        assert_relative_eq!(parallax * 3600.0, 23.592, epsilon = 1e-3);

        let topo = topocentric_equatorial(&mars, parallax, &palomar, 25.1875);
        assert_relative_eq!(topo.alpha, 339.535583, epsilon = 1e-4);
        assert_relative_eq!(topo.delta, -15.775, epsilon = 1e-4);
    }

    #[test]
    fn test_semidiameter_and_parallax() {
        // Moon at mean distance: HP ≈ 57', SD ≈ 15.5'
        assert_relative_eq!(parallax_from_km(384_400.0) * 60.0, 57.04, epsilon = 0.05);
        assert_relative_eq!(semidiameter(1737.4, 384_400.0 / AU_KM) * 60.0, 15.54, epsilon = 0.05);
    }
}
