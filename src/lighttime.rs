//! Light-time correction
//!
//! A body seen at instant t is where it was at t − τ, τ being the time light
//! takes to reach the observer. τ depends on the distance at the retarded
//! instant, so it is found by fixed-point iteration, capped by
//! [`EphemerisConfig::light_time_max_iterations`].

use log::debug;

use crate::config::EphemerisConfig;
use crate::constants::LIGHT_TIME_DAYS_PER_AU;
use crate::{OrreryError, Result};

/// Converged light-time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTime {
    /// Days
    pub tau: f64,
    /// Number of evaluations of the distance
    pub iterations: usize,
}

/// A value evaluated at the retarded instant, with the light-time that led to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retarded<T> {
    pub value: T,
    pub light_time: LightTime,
}

/// Iterates τ = Δ(jd − τ)·c⁻¹ where `distance` yields Δ in AU
pub fn light_time<F>(jd: f64, config: &EphemerisConfig, mut distance: F) -> Result<LightTime>
where
    F: FnMut(f64) -> Result<f64>,
{
    retarded(jd, config, |t| distance(t).map(|d| ((), d))).map(|r| r.light_time)
}

/// Like [`light_time`], keeping the last value computed by `evaluate`
///
/// `evaluate` returns the value of interest at an instant (a position, say)
/// together with its distance from the observer in AU. The value returned is
/// the one evaluated at `jd − τ` for the converged τ.
pub fn retarded<T, F>(jd: f64, config: &EphemerisConfig, mut evaluate: F) -> Result<Retarded<T>>
where
    F: FnMut(f64) -> Result<(T, f64)>,
{
    let tolerance = config.light_time_tolerance;
    // τ₀ = 1
    let mut step = 1.0;
    let mut tau = 0.0;

    for iteration in 1..=config.light_time_max_iterations {
        let (value, distance) = evaluate(jd - tau)?;
        let next = distance * LIGHT_TIME_DAYS_PER_AU;
        step = (next - tau).abs();
        tau = next;
        if step < tolerance {
            debug!("Light-time converged to {tau:.9} d after {iteration} iterations");
            return Ok(Retarded {
                value,
                light_time: LightTime {
                    tau,
                    iterations: iteration,
                },
            });
        }
    }

    debug!("Light-time stuck at {tau} d (last step {step:e} d)");
    Err(OrreryError::NotConverged {
        solver: "light-time",
        iterations: config.light_time_max_iterations,
    })
}
