//! Coordinate value types
//!
//! Plain immutable tuples for each frame the crate works in. Conversions
//! between them live in [`crate::framelib`] and take the auxiliary
//! quantities (obliquity, sidereal time, parallax) as explicit arguments.

pub mod angle;
pub mod cartesian;

use serde::{Deserialize, Serialize};

pub use cartesian::Rectangular;

use crate::{OrreryError, Result};

/// Equatorial coordinates (right ascension α, declination δ), degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension in [0, 360)
    pub alpha: f64,
    /// Declination in [-90, 90]
    pub delta: f64,
}

impl Equatorial {
    pub fn new(alpha: f64, delta: f64) -> Self {
        Equatorial {
            alpha: angle::normalize360(alpha),
            delta,
        }
    }

    /// Angular distance to another equatorial position in degrees
    pub fn separation(&self, other: &Equatorial) -> f64 {
        angle::separation(self.alpha, self.delta, other.alpha, other.delta)
    }
}

/// Ecliptical coordinates (longitude λ, latitude β), degrees, with optional distance
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ecliptical {
    /// Longitude in [0, 360)
    pub lambda: f64,
    /// Latitude in [-90, 90]
    pub beta: f64,
    /// Distance (AU or km depending on the body), 0 when unknown
    pub distance: f64,
}

impl Ecliptical {
    pub fn new(lambda: f64, beta: f64, distance: f64) -> Self {
        Ecliptical {
            lambda: angle::normalize360(lambda),
            beta,
            distance,
        }
    }
}

/// Horizontal coordinates, degrees
///
/// Azimuth is measured westward from the south point, in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Horizontal {
    pub azimuth: f64,
    pub altitude: f64,
}

impl Horizontal {
    pub fn new(azimuth: f64, altitude: f64) -> Self {
        Horizontal {
            azimuth: angle::normalize360(azimuth),
            altitude,
        }
    }

    /// Azimuth counted eastward from the north point
    pub fn azimuth_from_north(&self) -> f64 {
        angle::normalize360(self.azimuth + 180.0)
    }
}

/// Heliocentric ecliptical coordinates: L, B in degrees and R in AU
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Heliocentric {
    pub l: f64,
    pub b: f64,
    pub r: f64,
}

impl Heliocentric {
    pub fn new(l: f64, b: f64, r: f64) -> Self {
        Heliocentric {
            l: angle::normalize360(l),
            b,
            r,
        }
    }

    /// Rectangular ecliptical vector in AU
    pub fn to_rectangular(&self) -> Rectangular {
        Rectangular::from_spherical(self.l, self.b, self.r)
    }

    /// Builds heliocentric coordinates from a rectangular ecliptical vector
    pub fn from_rectangular(r: &Rectangular) -> Self {
        let (l, b, distance) = r.to_spherical();
        Heliocentric::new(l, b, distance)
    }
}

/// Geographical location of an observer
///
/// Longitude follows the astronomical convention used throughout the crate:
/// positive WEST of Greenwich, negative east. Elevation is in meters above
/// sea level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl GeoLocation {
    /// Creates a location, validating latitude and longitude ranges
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(OrreryError::Validation(format!(
                "latitude must be in [-90, 90], got {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(OrreryError::Validation(format!(
                "longitude must be in [-180, 180], got {longitude}"
            )));
        }
        Ok(GeoLocation {
            latitude,
            longitude,
            elevation,
        })
    }

    /// Creates a location from the more common east-positive longitude
    pub fn from_east_longitude(latitude: f64, east_longitude: f64, elevation: f64) -> Result<Self> {
        Self::new(latitude, -east_longitude, elevation)
    }

    /// Longitude counted positive east of Greenwich
    pub fn east_longitude(&self) -> f64 {
        -self.longitude
    }
}
