//! Orrery: apparent positions and visibility of solar-system bodies
//!
//! This crate computes where the Sun, Moon, planets, Pluto, planetary
//! satellites and minor bodies appear for an observer at a given instant,
//! using classical periodic-series theories, Kepler orbits and the usual
//! chain of reductions (precession, nutation, aberration, light-time,
//! parallax). It also finds the rise, transit and set of a body for a day.
//!
//! Term tables are immutable data. The embedded tables cover the Earth
//! (truncated VSOP87), the Moon, Pluto and the Galilean satellites; fuller
//! tables can be supplied once at startup through [`series::install_dataset`].

use thiserror::Error;

pub mod almanac;
pub mod celestial;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod framelib;
pub mod kepler;
pub mod lighttime;
pub mod lunar;
pub mod nutationlib;
pub mod planetlib;
pub mod pluto;
pub mod positions;
pub mod precessionlib;
pub mod satellites;
pub mod series;
pub mod time;

// Re-export commonly used types
pub use almanac::{Rts, RtsOptions};
pub use celestial::{CelestialObject, MinorBody};
pub use config::{EphemerisConfig, Precision};
pub use coordinates::{Ecliptical, Equatorial, GeoLocation, Heliocentric, Horizontal, Rectangular};
pub use planetlib::{Body, Planet};
pub use positions::{ApparentPosition, SkyContext};
pub use satellites::SkyPlane;
pub use time::Date;

/// Main error type for the orrery library
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrreryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Orbit with eccentricity {eccentricity} is not supported (elliptic orbits only)")]
    UnsupportedOrbit { eccentricity: f64 },

    #[error("{solver} did not converge after {iterations} iterations")]
    NotConverged {
        solver: &'static str,
        iterations: usize,
    },

    #[error("Data error: {0}")]
    Data(String),

    #[error("Term dataset has already been installed")]
    AlreadyInitialized,
}

/// Result type for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OrreryError::UnsupportedOrbit { eccentricity: 1.2 };
        assert!(err.to_string().contains("1.2"));

        let err = OrreryError::NotConverged {
            solver: "Kepler",
            iterations: 10,
        };
        assert_eq!(err.to_string(), "Kepler did not converge after 10 iterations");
    }
}
