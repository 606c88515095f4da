//! Ephemeris configuration
//!
//! Tunables shared by the solvers: which precision tier of the periodic-series
//! theories to use, iteration caps for the fixed-point solvers and the
//! atmospheric refraction assumed at the horizon.

use serde::{Deserialize, Serialize};

use crate::{OrreryError, Result};

/// Precision tier of the VSOP-style planetary theories
///
/// Both tiers run the same summation; they differ in the number of terms and
/// in the dimensional scale of the amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Full tables, amplitudes in radians / AU
    High,
    /// Truncated tables, amplitudes in 1e-8 radians / AU
    #[default]
    Low,
}

impl Precision {
    /// Factor converting table amplitudes into radians (or AU)
    pub fn scale(&self) -> f64 {
        match self {
            Precision::High => 1.0,
            Precision::Low => 1e-8,
        }
    }
}

/// Configuration for ephemeris computations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    /// Preferred tier for planetary series
    pub precision: Precision,
    /// Iteration cap for Kepler's equation
    pub kepler_max_iterations: usize,
    /// Convergence threshold for Kepler's equation, radians
    pub kepler_tolerance: f64,
    /// Iteration cap for the light-time correction
    pub light_time_max_iterations: usize,
    /// Convergence threshold for the light-time correction, days
    pub light_time_tolerance: f64,
    /// Refraction at the horizon, degrees
    pub refraction: f64,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            precision: Precision::Low,
            kepler_max_iterations: 10_000,
            kepler_tolerance: 1e-9,
            light_time_max_iterations: 50,
            light_time_tolerance: 1.0 / 86_400.0,
            refraction: 34.0 / 60.0,
        }
    }
}

impl EphemerisConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EphemerisConfig = serde_json::from_str(json)
            .map_err(|e| OrreryError::Format(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the precision tier
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the Kepler iteration cap
    pub fn with_kepler_max_iterations(mut self, iterations: usize) -> Self {
        self.kepler_max_iterations = iterations;
        self
    }

    /// Set the light-time iteration cap
    pub fn with_light_time_max_iterations(mut self, iterations: usize) -> Self {
        self.light_time_max_iterations = iterations;
        self
    }

    /// Set the horizon refraction in degrees
    pub fn with_refraction(mut self, refraction: f64) -> Self {
        self.refraction = refraction;
        self
    }

    /// Check that caps are non-zero and tolerances positive
    pub fn validate(&self) -> Result<()> {
        if self.kepler_max_iterations == 0 || self.light_time_max_iterations == 0 {
            return Err(OrreryError::Validation(
                "iteration caps must be at least 1".to_string(),
            ));
        }
        if !(self.kepler_tolerance > 0.0) || !(self.light_time_tolerance > 0.0) {
            return Err(OrreryError::Validation(
                "solver tolerances must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
