//! Kepler orbits
//!
//! Two solvers live here:
//! - [`solve_kepler`], the classical fixed-point iteration E = M + e·sin E,
//!   used for minor bodies described by [`OrbitalElements`]
//! - [`elliptic_to_rectangular`], a Newton iteration on the eccentric
//!   longitude for orbits given as (n, λ, k, h, q, p), used by the satellite
//!   theories
//!
//! Only elliptic orbits (0 ≤ e < 1) are supported. Parabolic and hyperbolic
//! orbits are rejected with [`OrreryError::UnsupportedOrbit`].

use std::f64::consts::TAU;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EphemerisConfig;
use crate::constants::GAUSS_DEG_PER_DAY;
use crate::coordinates::angle::normalize360;
use crate::coordinates::{Heliocentric, Rectangular};
use crate::framelib::{Axis, Rotation};
use crate::{OrreryError, Result};

/// Convergence threshold of the eccentric-longitude iteration, radians
pub const ELLIPTIC_TOLERANCE: f64 = 1e-14;

/// Iteration cap of the eccentric-longitude iteration
pub const ELLIPTIC_MAX_ITERATIONS: usize = 100;

pub(crate) fn check_eccentricity(e: f64) -> Result<()> {
    if e >= 1.0 {
        return Err(OrreryError::UnsupportedOrbit { eccentricity: e });
    }
    if !(e >= 0.0) {
        return Err(OrreryError::Validation(format!(
            "eccentricity must be non-negative, got {e}"
        )));
    }
    Ok(())
}

/// Solves Kepler's equation for the eccentric anomaly
///
/// # Arguments
///
/// * `mean_anomaly` - M in degrees
/// * `e` - eccentricity, 0 ≤ e < 1
/// * `max_iterations` - iteration cap
/// * `tolerance` - stop when successive estimates differ by less (radians)
///
/// # Returns
///
/// The eccentric anomaly E in degrees.
pub fn solve_kepler(mean_anomaly: f64, e: f64, max_iterations: usize, tolerance: f64) -> Result<f64> {
    check_eccentricity(e)?;
    if e == 0.0 {
        return Ok(mean_anomaly);
    }
    let m = mean_anomaly.to_radians();
    let mut ecc_anomaly = m;

    for iteration in 1..=max_iterations {
        let next = m + e * ecc_anomaly.sin();
        if (next - ecc_anomaly).abs() < tolerance {
            debug!("Kepler converged after {iteration} iterations (e = {e})");
            return Ok(next.to_degrees());
        }
        ecc_anomaly = next;
    }
    Err(OrreryError::NotConverged {
        solver: "Kepler",
        iterations: max_iterations,
    })
}

/// [`solve_kepler`] with the cap and tolerance taken from a configuration
pub fn solve_kepler_with(mean_anomaly: f64, e: f64, config: &EphemerisConfig) -> Result<f64> {
    solve_kepler(
        mean_anomaly,
        e,
        config.kepler_max_iterations,
        config.kepler_tolerance,
    )
}

/// True anomaly ν in [0, 360) from the eccentric anomaly (degrees)
pub fn true_anomaly(eccentric_anomaly: f64, e: f64) -> f64 {
    let half = (eccentric_anomaly.to_radians() / 2.0).tan();
    normalize360((2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * half).atan()).to_degrees())
}

/// Radius vector r = a·(1 − e·cos E)
pub fn radius_vector(semi_major_axis: f64, e: f64, eccentric_anomaly: f64) -> f64 {
    semi_major_axis * (1.0 - e * eccentric_anomaly.to_radians().cos())
}

/// Mean daily motion in degrees for a heliocentric orbit of semi-major axis `a` (AU)
pub fn mean_motion(semi_major_axis: f64) -> f64 {
    GAUSS_DEG_PER_DAY / semi_major_axis.powf(1.5)
}

/// Heliocentric elliptic orbital elements
///
/// Angles are degrees, referred to the mean ecliptic and equinox of J2000.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Epoch of the mean anomaly (JD, TT)
    pub epoch: f64,
    pub mean_anomaly: f64,
    pub eccentricity: f64,
    /// AU
    pub semi_major_axis: f64,
    pub inclination: f64,
    /// ω
    pub arg_perihelion: f64,
    /// Ω
    pub long_ascending_node: f64,
}

impl OrbitalElements {
    /// Validated elements
    pub fn new(
        epoch: f64,
        mean_anomaly: f64,
        eccentricity: f64,
        semi_major_axis: f64,
        inclination: f64,
        arg_perihelion: f64,
        long_ascending_node: f64,
    ) -> Result<Self> {
        let elements = OrbitalElements {
            epoch,
            mean_anomaly,
            eccentricity,
            semi_major_axis,
            inclination,
            arg_perihelion,
            long_ascending_node,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Elements from the time of perihelion passage instead of a mean anomaly
    pub fn from_perihelion(
        perihelion: f64,
        eccentricity: f64,
        semi_major_axis: f64,
        inclination: f64,
        arg_perihelion: f64,
        long_ascending_node: f64,
    ) -> Result<Self> {
        Self::new(
            perihelion,
            0.0,
            eccentricity,
            semi_major_axis,
            inclination,
            arg_perihelion,
            long_ascending_node,
        )
    }

    pub fn validate(&self) -> Result<()> {
        check_eccentricity(self.eccentricity)?;
        if !(self.semi_major_axis > 0.0) {
            return Err(OrreryError::Validation(format!(
                "semi-major axis must be positive, got {}",
                self.semi_major_axis
            )));
        }
        Ok(())
    }

    /// Mean daily motion, degrees per day
    pub fn mean_motion(&self) -> f64 {
        mean_motion(self.semi_major_axis)
    }

    /// Mean anomaly at `jd`, degrees in [0, 360)
    pub fn mean_anomaly_at(&self, jd: f64) -> f64 {
        normalize360(self.mean_anomaly + self.mean_motion() * (jd - self.epoch))
    }

    /// Rotation from the orbital plane (x toward the node) to the J2000 ecliptic
    pub fn orientation(&self) -> Rotation {
        Rotation::about(Axis::Z, self.long_ascending_node) * Rotation::about(Axis::X, self.inclination)
    }

    /// Heliocentric rectangular position (AU), J2000 ecliptic
    pub fn heliocentric_position(&self, jd: f64, config: &EphemerisConfig) -> Result<Rectangular> {
        self.validate()?;
        let e = self.eccentricity;
        let ecc_anomaly = solve_kepler_with(self.mean_anomaly_at(jd), e, config)?;
        let nu = true_anomaly(ecc_anomaly, e);
        let r = radius_vector(self.semi_major_axis, e, ecc_anomaly);

        let in_plane = Rectangular::from_spherical(self.arg_perihelion + nu, 0.0, r);
        Ok(self.orientation() * in_plane)
    }

    /// Heliocentric spherical position, J2000 ecliptic
    pub fn heliocentric(&self, jd: f64, config: &EphemerisConfig) -> Result<Heliocentric> {
        Ok(Heliocentric::from_rectangular(&self.heliocentric_position(jd, config)?))
    }
}

/// Orbit given by equinoctial-style elements
///
/// `k + i·h = e·exp(i·ϖ)` and `q + i·p = sin(i/2)·exp(i·Ω)`; `n` is the mean
/// motion (rad / day) and `lambda` the mean longitude (rad).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipticElements {
    pub n: f64,
    pub lambda: f64,
    pub k: f64,
    pub h: f64,
    pub q: f64,
    pub p: f64,
}

impl EllipticElements {
    pub fn eccentricity(&self) -> f64 {
        self.k.hypot(self.h)
    }

    /// Inclination in degrees
    pub fn inclination(&self) -> f64 {
        (2.0 * self.q.hypot(self.p).min(1.0).asin()).to_degrees()
    }

    /// Longitude of the ascending node in degrees
    pub fn node(&self) -> f64 {
        normalize360(self.p.atan2(self.q).to_degrees())
    }

    /// Longitude of the pericentre in degrees
    pub fn pericentre(&self) -> f64 {
        normalize360(self.h.atan2(self.k).to_degrees())
    }
}

/// Position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StateVector {
    pub position: Rectangular,
    pub velocity: Rectangular,
}

/// Position and velocity from (n, λ, k, h, q, p)
///
/// `mu` is the gravitational parameter in units consistent with `n` (length
/// unit of the result per day²·length³). The eccentric longitude F solving
/// λ = F − k·sin F + h·cos F is found by Newton iteration to 1e-14 rad.
pub fn elliptic_to_rectangular(elements: &EllipticElements, mu: f64) -> Result<StateVector> {
    let EllipticElements { n, lambda, k, h, q, p } = *elements;
    check_eccentricity(elements.eccentricity())?;

    let lambda = lambda.rem_euclid(TAU);
    let mut f = lambda;
    let mut converged = false;
    for iteration in 1..=ELLIPTIC_MAX_ITERATIONS {
        let (sf, cf) = f.sin_cos();
        let correction = (lambda - f + k * sf - h * cf) / (1.0 - k * cf - h * sf);
        f += correction;
        if correction.abs() < ELLIPTIC_TOLERANCE {
            debug!("Eccentric longitude converged after {iteration} iterations");
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(OrreryError::NotConverged {
            solver: "elliptic-to-rectangular",
            iterations: ELLIPTIC_MAX_ITERATIONS,
        });
    }

    let a = (mu / (n * n)).cbrt();
    let (sf, cf) = f.sin_cos();
    let dlf = -k * sf + h * cf;
    let rsam1 = -k * cf - h * sf;
    let asr = 1.0 / (1.0 + rsam1);
    let phi = (1.0 - k * k - h * h).sqrt();
    let psi = 1.0 / (1.0 + phi);

    let x1 = a * (cf - k - psi * h * dlf);
    let y1 = a * (sf - h + psi * k * dlf);
    let vx1 = n * asr * a * (-sf - psi * h * rsam1);
    let vy1 = n * asr * a * (cf + psi * k * rsam1);

    let dwho = 2.0 * (1.0 - p * p - q * q).max(0.0).sqrt();
    let (rtp, rtq, rdg) = (1.0 - 2.0 * p * p, 1.0 - 2.0 * q * q, 2.0 * p * q);
    let to_space = |u: f64, v: f64| {
        Rectangular::new(u * rtp + v * rdg, u * rdg + v * rtq, (-u * p + v * q) * dwho)
    };

    Ok(StateVector {
        position: to_space(x1, y1),
        velocity: to_space(vx1, vy1),
    })
}
