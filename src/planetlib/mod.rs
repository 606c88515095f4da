//! Planetary positions
//!
//! Heliocentric positions come from the VSOP theory of the term dataset when
//! one is loaded for the planet, otherwise from JPL mean Keplerian elements
//! (good to a few arcminutes between 1800 and 2050). The Earth always has a
//! theory: the embedded low tier.

pub mod elements;

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU16, Ordering};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::EphemerisConfig;
use crate::coordinates::{Ecliptical, Heliocentric, Rectangular};
use crate::series::TermDataset;
use crate::{OrreryError, Result};

/// Planets for which a fallback warning was already logged, one bit each
static FALLBACK_WARNED: AtomicU16 = AtomicU16::new(0);

/// The eight major planets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
        }
    }

    /// Equatorial radius in km
    pub fn equatorial_radius_km(&self) -> f64 {
        match self {
            Planet::Mercury => 2_439.7,
            Planet::Venus => 6_051.8,
            Planet::Earth => 6_378.14,
            Planet::Mars => 3_396.19,
            Planet::Jupiter => 71_492.0,
            Planet::Saturn => 60_268.0,
            Planet::Uranus => 25_559.0,
            Planet::Neptune => 24_764.0,
        }
    }

    fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self> {
        Planet::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OrreryError::Validation(format!("unknown planet '{s}'")))
    }
}

/// Solar-system bodies with a position pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Moon,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// The planet this body is, if it is one
    pub fn planet(&self) -> Option<Planet> {
        match self {
            Body::Mercury => Some(Planet::Mercury),
            Body::Venus => Some(Planet::Venus),
            Body::Mars => Some(Planet::Mars),
            Body::Jupiter => Some(Planet::Jupiter),
            Body::Saturn => Some(Planet::Saturn),
            Body::Uranus => Some(Planet::Uranus),
            Body::Neptune => Some(Planet::Neptune),
            Body::Sun | Body::Moon | Body::Pluto => None,
        }
    }

    /// Mean radius in km
    pub fn radius_km(&self) -> f64 {
        match (self, self.planet()) {
            (_, Some(planet)) => planet.equatorial_radius_km(),
            (Body::Sun, _) => 696_000.0,
            (Body::Moon, _) => 1_737.4,
            _ => 1_188.3,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self> {
        Body::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| OrreryError::Validation(format!("unknown body '{s}'")))
    }
}

/// Heliocentric position, ecliptic and equinox of date, from an explicit dataset
pub fn heliocentric_from(
    dataset: &TermDataset,
    planet: Planet,
    jd: f64,
    config: &EphemerisConfig,
) -> Result<Heliocentric> {
    if let Some(theory) = dataset.theory(planet, config.precision) {
        return Ok(theory.heliocentric(jd));
    }
    if FALLBACK_WARNED.fetch_or(planet.bit(), Ordering::Relaxed) & planet.bit() == 0 {
        warn!(
            "No series loaded for {}; using mean Keplerian elements",
            planet.name()
        );
    }
    elements::mean_elements(planet).heliocentric(jd, config)
}

/// Heliocentric position, ecliptic and equinox of date, from the global dataset
pub fn heliocentric(planet: Planet, jd: f64, config: &EphemerisConfig) -> Result<Heliocentric> {
    heliocentric_from(TermDataset::global(), planet, jd, config)
}

/// Geocentric ecliptical position of a heliocentric point, given the Earth's
/// heliocentric position; the distance is in AU
pub fn geocentric_from_earth(body: &Heliocentric, earth: &Heliocentric) -> Ecliptical {
    let v: Rectangular = body.to_rectangular() - earth.to_rectangular();
    let (lambda, beta, distance) = v.to_spherical();
    Ecliptical::new(lambda, beta, distance)
}

/// Geometric geocentric position of a planet (no light-time), ecliptic of date
pub fn geocentric(planet: Planet, jd: f64, config: &EphemerisConfig) -> Result<Ecliptical> {
    let earth = heliocentric(Planet::Earth, jd, config)?;
    let body = heliocentric(planet, jd, config)?;
    Ok(geocentric_from_earth(&body, &earth))
}

/// Geometric geocentric position of the Sun, ecliptic and equinox of date
pub fn sun_geometric(jd: f64, config: &EphemerisConfig) -> Result<Ecliptical> {
    let earth = heliocentric(Planet::Earth, jd, config)?;
    Ok(Ecliptical::new(earth.l + 180.0, -earth.b, earth.r))
}
