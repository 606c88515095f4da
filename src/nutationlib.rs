//! Nutation, obliquity of the ecliptic and annual aberration
//!
//! Nutation uses the short four-term series in the longitude of the Moon's
//! ascending node Ω and the mean longitudes of the Sun and Moon. Accuracy is
//! about 0.5″ in Δψ and 0.1″ in Δε.

use crate::constants::ABERRATION_CONSTANT_ASEC;
use crate::coordinates::angle::normalize360;
use crate::coordinates::{Ecliptical, Equatorial};
use crate::time::julian_centuries;

/// Nutation in longitude and obliquity, degrees, for the instant `jd` (TT)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutationElements {
    pub delta_psi: f64,
    pub delta_epsilon: f64,
    pub jd: f64,
}

impl NutationElements {
    /// Computes nutation for a Julian Day
    pub fn new(jd: f64) -> Self {
        let t = julian_centuries(jd);
        let omega = (125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450_000.0)
            .to_radians();
        let l_sun = (280.4665 + 36000.7698 * t).to_radians();
        let l_moon = (218.3165 + 481267.8813 * t).to_radians();

        let delta_psi = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin()
            - 0.23 * (2.0 * l_moon).sin()
            + 0.21 * (2.0 * omega).sin();
        let delta_epsilon = 9.20 * omega.cos()
            + 0.57 * (2.0 * l_sun).cos()
            + 0.10 * (2.0 * l_moon).cos()
            - 0.09 * (2.0 * omega).cos();

        NutationElements {
            delta_psi: delta_psi / 3600.0,
            delta_epsilon: delta_epsilon / 3600.0,
            jd,
        }
    }

    /// True obliquity ε = ε₀ + Δε
    pub fn true_obliquity(&self) -> f64 {
        mean_obliquity(self.jd) + self.delta_epsilon
    }

    /// Adds Δψ to an ecliptical longitude
    pub fn apply_ecliptical(&self, ecl: &Ecliptical) -> Ecliptical {
        Ecliptical::new(ecl.lambda + self.delta_psi, ecl.beta, ecl.distance)
    }

    /// Corrections (Δα, Δδ) in degrees for an equatorial position
    ///
    /// `epsilon` is the obliquity of the ecliptic. Not valid very close to the
    /// celestial poles, where tan δ diverges.
    pub fn equatorial_correction(&self, eq: &Equatorial, epsilon: f64) -> (f64, f64) {
        let (alpha, delta, eps) = (
            eq.alpha.to_radians(),
            eq.delta.to_radians(),
            epsilon.to_radians(),
        );
        let delta_alpha = (eps.cos() + eps.sin() * alpha.sin() * delta.tan()) * self.delta_psi
            - alpha.cos() * delta.tan() * self.delta_epsilon;
        let delta_delta =
            eps.sin() * alpha.cos() * self.delta_psi + alpha.sin() * self.delta_epsilon;
        (delta_alpha, delta_delta)
    }

    /// Applies [`Self::equatorial_correction`] to a position
    pub fn apply_equatorial(&self, eq: &Equatorial, epsilon: f64) -> Equatorial {
        let (da, dd) = self.equatorial_correction(eq, epsilon);
        Equatorial::new(eq.alpha + da, eq.delta + dd)
    }
}

/// Shorthand for [`NutationElements::new`]
pub fn nutation(jd: f64) -> NutationElements {
    NutationElements::new(jd)
}

/// Mean obliquity of the ecliptic ε₀ (IAU 1980), degrees
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let seconds = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + seconds / 3600.0
}

/// True obliquity of the ecliptic ε₀ + Δε, degrees
pub fn true_obliquity(jd: f64) -> f64 {
    NutationElements::new(jd).true_obliquity()
}

/// Eccentricity of the Earth's orbit
pub fn earth_eccentricity(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    0.016708634 - 0.000042037 * t - 0.0000001267 * t * t
}

/// Longitude of the perihelion of the Earth's orbit, degrees
pub fn earth_perihelion_longitude(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    102.93735 + 1.71946 * t + 0.00046 * t * t
}

/// Geometric true longitude of the Sun from the low-accuracy solar theory, degrees
///
/// Good to about 0.01°, which is enough for the aberration terms.
pub fn sun_true_longitude_low(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    normalize360(l0 + c)
}

/// Aberration in longitude of the Sun, degrees, for a distance `r` in AU
pub fn sun_aberration(r: f64) -> f64 {
    -20.4898 / 3600.0 / r
}

/// Annual aberration corrections (Δλ, Δβ) in degrees for an ecliptical position
pub fn aberration_ecliptical(ecl: &Ecliptical, jd: f64) -> (f64, f64) {
    let kappa = ABERRATION_CONSTANT_ASEC / 3600.0;
    let e = earth_eccentricity(jd);
    let sun = sun_true_longitude_low(jd).to_radians();
    let pi = earth_perihelion_longitude(jd).to_radians();
    let (lambda, beta) = (ecl.lambda.to_radians(), ecl.beta.to_radians());

    let d_lambda = (-kappa * (sun - lambda).cos() + e * kappa * (pi - lambda).cos()) / beta.cos();
    let d_beta = -kappa * beta.sin() * ((sun - lambda).sin() - e * (pi - lambda).sin());
    (d_lambda, d_beta)
}

/// Annual aberration corrections (Δα, Δδ) in degrees for an equatorial position
///
/// `epsilon` is the obliquity of the ecliptic.
pub fn aberration_equatorial(eq: &Equatorial, jd: f64, epsilon: f64) -> (f64, f64) {
    let kappa = ABERRATION_CONSTANT_ASEC / 3600.0;
    let e = earth_eccentricity(jd);
    let sun = sun_true_longitude_low(jd).to_radians();
    let pi = earth_perihelion_longitude(jd).to_radians();
    let (alpha, delta, eps) = (
        eq.alpha.to_radians(),
        eq.delta.to_radians(),
        epsilon.to_radians(),
    );
    let (ca, sa, cd, sd) = (alpha.cos(), alpha.sin(), delta.cos(), delta.sin());
    let tilt = eps.tan() * cd - sa * sd;

    let d_alpha = -kappa * (ca * sun.cos() * eps.cos() + sa * sun.sin()) / cd
        + e * kappa * (ca * pi.cos() * eps.cos() + sa * pi.sin()) / cd;
    let d_delta = -kappa * (sun.cos() * eps.cos() * tilt + ca * sd * sun.sin())
        + e * kappa * (pi.cos() * eps.cos() * tilt + ca * sd * pi.sin());
    (d_alpha, d_delta)
}
