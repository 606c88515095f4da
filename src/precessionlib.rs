//! Precession of equatorial and ecliptical coordinates between epochs
//!
//! Two systems are supported for equatorial positions:
//! - [`PrecessionSystem::Fk5`]: IAU 1976 elements, epochs measured from J2000.0
//!   in Julian centuries
//! - [`PrecessionSystem::Fk4`]: Newcomb elements, epochs measured from
//!   B1900.0 in tropical centuries
//!
//! The elements (ζ, z, θ) belong to a single (from, to) epoch pair and carry
//! that pair with them. Negating the angles does not reverse a precession.
//! [`precess_equatorial`] always evaluates the elements from the earlier epoch
//! to the later one and transposes the rotation when going back in time, so a
//! round trip returns the starting position to rounding error.

use serde::{Deserialize, Serialize};

use crate::constants::{B1900, J2000, JULIAN_CENTURY, TROPICAL_CENTURY};
use crate::coordinates::angle::normalize360;
use crate::coordinates::{Ecliptical, Equatorial, Rectangular};
use crate::framelib::{Axis, Rotation};

/// Catalogue system whose precession constants are used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PrecessionSystem {
    Fk4,
    #[default]
    Fk5,
}

/// Precessional elements ζ, z, θ in degrees for a pair of epochs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionalElements {
    pub zeta: f64,
    pub z: f64,
    pub theta: f64,
    /// Initial epoch (JD)
    pub from: f64,
    /// Target epoch (JD)
    pub to: f64,
}

impl PrecessionalElements {
    /// Elements for precessing from `from` to `to` in the given system
    pub fn new(system: PrecessionSystem, from: f64, to: f64) -> Self {
        match system {
            PrecessionSystem::Fk5 => fk5_elements(from, to),
            PrecessionSystem::Fk4 => fk4_elements(from, to),
        }
    }

    /// Applies the elements to an equatorial position at the initial epoch
    pub fn apply(&self, eq: &Equatorial) -> Equatorial {
        let (alpha, delta) = (eq.alpha.to_radians(), eq.delta.to_radians());
        let (zeta, z, theta) = (
            self.zeta.to_radians(),
            self.z.to_radians(),
            self.theta.to_radians(),
        );

        let a = delta.cos() * (alpha + zeta).sin();
        let b = theta.cos() * delta.cos() * (alpha + zeta).cos() - theta.sin() * delta.sin();
        let c = theta.sin() * delta.cos() * (alpha + zeta).cos() + theta.cos() * delta.sin();

        let delta_new = if delta.abs() > 85f64.to_radians() {
            // asin loses precision near the poles
            let sign = if c < 0.0 { -1.0 } else { 1.0 };
            sign * (a * a + b * b).sqrt().acos()
        } else {
            c.clamp(-1.0, 1.0).asin()
        };

        Equatorial::new((a.atan2(b) + z).to_degrees(), delta_new.to_degrees())
    }

    /// The same precession as a rotation of equatorial rectangular vectors
    pub fn rotation(&self) -> Rotation {
        Rotation::about(Axis::Z, self.z)
            * Rotation::about(Axis::Y, -self.theta)
            * Rotation::about(Axis::Z, self.zeta)
    }
}

/// FK5 precessional elements (IAU 1976)
pub fn fk5_elements(from: f64, to: f64) -> PrecessionalElements {
    let big_t = (from - J2000) / JULIAN_CENTURY;
    let t = (to - from) / JULIAN_CENTURY;
    let (t2, t3) = (t * t, t * t * t);

    let linear = (2306.2181 + 1.39656 * big_t - 0.000139 * big_t * big_t) * t;
    let zeta = linear + (0.30188 - 0.000344 * big_t) * t2 + 0.017998 * t3;
    let z = linear + (1.09468 + 0.000066 * big_t) * t2 + 0.018203 * t3;
    let theta = (2004.3109 - 0.85330 * big_t - 0.000217 * big_t * big_t) * t
        - (0.42665 + 0.000217 * big_t) * t2
        - 0.041833 * t3;

    PrecessionalElements {
        zeta: zeta / 3600.0,
        z: z / 3600.0,
        theta: theta / 3600.0,
        from,
        to,
    }
}

/// FK4 precessional elements (Newcomb)
pub fn fk4_elements(from: f64, to: f64) -> PrecessionalElements {
    let big_t = (from - B1900) / TROPICAL_CENTURY;
    let t = (to - from) / TROPICAL_CENTURY;
    let (t2, t3) = (t * t, t * t * t);

    let linear = (2304.250 + 1.396 * big_t) * t;
    let zeta = linear + 0.302 * t2 + 0.018 * t3;
    let z = linear + 1.093 * t2 + 0.018 * t3;
    let theta = (2004.682 - 0.853 * big_t) * t - 0.426 * t2 - 0.042 * t3;

    PrecessionalElements {
        zeta: zeta / 3600.0,
        z: z / 3600.0,
        theta: theta / 3600.0,
        from,
        to,
    }
}

/// Precesses an equatorial position from epoch `from` to epoch `to`
pub fn precess_equatorial(
    eq: &Equatorial,
    from: f64,
    to: f64,
    system: PrecessionSystem,
) -> Equatorial {
    if from == to {
        return *eq;
    }
    let rotation = if from < to {
        PrecessionalElements::new(system, from, to).rotation()
    } else {
        PrecessionalElements::new(system, to, from).rotation().inverse()
    };
    let v = rotation * Rectangular::from_spherical(eq.alpha, eq.delta, 1.0);
    let (alpha, delta, _) = v.to_spherical();
    Equatorial::new(alpha, delta)
}

/// General precession in longitude p_A from J2000.0 to `jd`, degrees
pub fn general_precession_longitude(jd: f64) -> f64 {
    let t = (jd - J2000) / JULIAN_CENTURY;
    (5029.0966 * t + 1.11113 * t * t - 0.000006 * t * t * t) / 3600.0
}

/// Precesses ecliptical coordinates from the ecliptic and equinox of `from`
/// to those of `to`
///
/// The distance is carried through unchanged.
pub fn precess_ecliptical(ecl: &Ecliptical, from: f64, to: f64) -> Ecliptical {
    if from == to {
        return *ecl;
    }
    let big_t = (from - J2000) / JULIAN_CENTURY;
    let t = (to - from) / JULIAN_CENTURY;
    let (t2, t3) = (t * t, t * t * t);

    let eta = ((47.0029 - 0.06603 * big_t + 0.000598 * big_t * big_t) * t
        + (-0.03302 + 0.000598 * big_t) * t2
        + 0.000060 * t3)
        / 3600.0;
    let pi = 174.876384
        + (3289.4789 * big_t + 0.60622 * big_t * big_t - (869.8089 + 0.50491 * big_t) * t
            + 0.03536 * t2)
            / 3600.0;
    let p = ((5029.0966 + 2.22226 * big_t - 0.000042 * big_t * big_t) * t
        + (1.11113 - 0.000042 * big_t) * t2
        - 0.000006 * t3)
        / 3600.0;

    let (eta, pi_rad) = (eta.to_radians(), pi.to_radians());
    let (lambda, beta) = (ecl.lambda.to_radians(), ecl.beta.to_radians());

    let a = eta.cos() * beta.cos() * (pi_rad - lambda).sin() - eta.sin() * beta.sin();
    let b = beta.cos() * (pi_rad - lambda).cos();
    let c = eta.cos() * beta.sin() + eta.sin() * beta.cos() * (pi_rad - lambda).sin();

    Ecliptical::new(
        normalize360(p + pi - a.atan2(b).to_degrees()),
        c.clamp(-1.0, 1.0).asin().to_degrees(),
        ecl.distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::B1950;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_theta_persei_fk5() {
        // θ Persei, J2000.0 position with proper motion applied, to 2028 Nov 13.19 TD
        let star = Equatorial::new(41.054063, 49.227750);
        let elements = fk5_elements(J2000, 2462088.69);
        assert_relative_eq!(elements.zeta * 3600.0, 665.7627, epsilon = 1e-3);
        assert_relative_eq!(elements.z * 3600.0, 665.8288, epsilon = 1e-3);
        assert_relative_eq!(elements.theta * 3600.0, 578.5489, epsilon = 1e-3);

        let precessed = elements.apply(&star);
        assert_relative_eq!(precessed.alpha, 41.547214, epsilon = 1e-6);
        assert_relative_eq!(precessed.delta, 49.348483, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_matches_spherical_form() {
        let elements = fk5_elements(J2000, 2462088.69);
        let star = Equatorial::new(41.054063, 49.227750);
        let v = elements.rotation()
            * crate::coordinates::Rectangular::from_spherical(star.alpha, star.delta, 1.0);
        let (alpha, delta, _) = v.to_spherical();
        let spherical = elements.apply(&star);
        assert_relative_eq!(alpha, spherical.alpha, epsilon = 1e-10);
        assert_relative_eq!(delta, spherical.delta, epsilon = 1e-10);
    }

    #[test]
    fn test_precession_is_reversible() {
        let mut rng = StdRng::seed_from_u64(2028);
        for system in [PrecessionSystem::Fk4, PrecessionSystem::Fk5] {
            for _ in 0..50 {
                let eq = Equatorial::new(rng.gen_range(0.0..360.0), rng.gen_range(-89.0..89.0));
                let from = J2000 + rng.gen_range(-40_000.0..40_000.0);
                let to = J2000 + rng.gen_range(-40_000.0..40_000.0);

                let there = precess_equatorial(&eq, from, to, system);
                let back = precess_equatorial(&there, to, from, system);
                assert!(back.separation(&eq) < 1e-6, "{system:?} drifted");
            }
        }
    }

    #[test]
    fn test_backward_precession_undoes_forward_elements() {
        let star = Equatorial::new(41.054063, 49.227750);
        let later = fk4_elements(B1950, J2000).apply(&star);
        let back = precess_equatorial(&later, J2000, B1950, PrecessionSystem::Fk4);
        assert!(back.separation(&star) < 1e-9);

        let forward = precess_equatorial(&star, J2000, 2462088.69, PrecessionSystem::Fk5);
        assert_relative_eq!(forward.alpha, 41.547214, epsilon = 1e-6);
        assert_relative_eq!(forward.delta, 49.348483, epsilon = 1e-6);
    }

    #[test]
    fn test_fk4_and_fk5_agree_roughly() {
        // Over half a century the two constant sets differ by well under an arcsecond
        let eq = Equatorial::new(150.0, 20.0);
        let fk4 = precess_equatorial(&eq, B1950, J2000, PrecessionSystem::Fk4);
        let fk5 = precess_equatorial(&eq, B1950, J2000, PrecessionSystem::Fk5);
        assert!(fk4.separation(&fk5) * 3600.0 < 2.0);
        assert!(fk4.separation(&eq) > 0.5);
    }

    #[test]
    fn test_venus_ecliptic_precession() {
        // Venus at J2000.0 precessed to -214 June 30.0
        let venus = Ecliptical::new(149.48194, 1.76549, 0.0);
        let old = precess_ecliptical(&venus, J2000, 1643074.5);
        assert_relative_eq!(old.lambda, 118.704, epsilon = 1e-3);
        assert_relative_eq!(old.beta, 1.615, epsilon = 1e-3);
    }

    #[test]
    fn test_general_precession_rate() {
        assert_eq!(general_precession_longitude(J2000), 0.0);
        assert_relative_eq!(
            general_precession_longitude(J2000 + JULIAN_CENTURY),
            5030.2077 / 3600.0,
            epsilon = 1e-6
        );
    }
}
