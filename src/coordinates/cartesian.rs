//! # Rectangular Coordinate Module
//!
//! Three-dimensional rectangular coordinates used as the intermediate form for
//! rotations between frames and for heliocentric/planetocentric vectors.
//!
//! ## Coordinate System Convention
//!
//! The axes follow whichever frame the vector is expressed in. For an
//! equatorial frame:
//! - **X-axis**: toward the vernal equinox (α = 0°, δ = 0°)
//! - **Y-axis**: toward α = 90°, δ = 0°
//! - **Z-axis**: toward the north celestial pole
//!
//! For an ecliptic frame the Z-axis points to the north ecliptic pole instead.
//! Units are whatever the producer uses (AU for heliocentric vectors,
//! planet radii for satellites).
//!
//! ## Examples
//!
//! ```rust
//! use orrery::coordinates::Rectangular;
//!
//! let r = Rectangular::from_spherical(90.0, 0.0, 2.0);
//! assert!(r.x.abs() < 1e-12);
//! assert!((r.y - 2.0).abs() < 1e-12);
//! ```

use std::ops::{Add, Neg, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::angle::{normalize360, to_degrees, to_radians};

/// Three-dimensional rectangular coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangular {
    /// X-component
    pub x: f64,
    /// Y-component
    pub y: f64,
    /// Z-component
    pub z: f64,
}

impl Rectangular {
    /// Creates a new rectangular coordinate
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Rectangular { x, y, z }
    }

    /// Creates a vector from spherical coordinates
    ///
    /// # Arguments
    ///
    /// * `lon` - Longitude (or right ascension) in degrees
    /// * `lat` - Latitude (or declination) in degrees
    /// * `distance` - Length of the vector
    pub fn from_spherical(lon: f64, lat: f64, distance: f64) -> Self {
        let (lon, lat) = (to_radians(lon), to_radians(lat));
        let cos_lat = lat.cos();
        Rectangular {
            x: distance * cos_lat * lon.cos(),
            y: distance * cos_lat * lon.sin(),
            z: distance * lat.sin(),
        }
    }

    /// Returns (longitude °, latitude °, distance), longitude in [0, 360)
    pub fn to_spherical(&self) -> (f64, f64, f64) {
        let distance = self.magnitude();
        let rho = (self.x * self.x + self.y * self.y).sqrt();
        let lon = if rho == 0.0 {
            0.0
        } else {
            normalize360(to_degrees(self.y.atan2(self.x)))
        };
        let lat = to_degrees(self.z.atan2(rho));
        (lon, lat, distance)
    }

    /// Converts to a nalgebra vector
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from a nalgebra vector
    pub fn from_vector3(v: Vector3<f64>) -> Self {
        Rectangular::new(v.x, v.y, v.z)
    }

    /// Length of the vector
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &Rectangular) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Multiplies every component by a factor
    pub fn scale(&self, factor: f64) -> Rectangular {
        Rectangular::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Add for Rectangular {
    type Output = Rectangular;

    fn add(self, other: Rectangular) -> Rectangular {
        Rectangular::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Rectangular {
    type Output = Rectangular;

    fn sub(self, other: Rectangular) -> Rectangular {
        Rectangular::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Rectangular {
    type Output = Rectangular;

    fn neg(self) -> Rectangular {
        Rectangular::new(-self.x, -self.y, -self.z)
    }
}

impl From<Vector3<f64>> for Rectangular {
    fn from(v: Vector3<f64>) -> Self {
        Rectangular::from_vector3(v)
    }
}

impl From<Rectangular> for Vector3<f64> {
    fn from(r: Rectangular) -> Self {
        r.to_vector3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_spherical_roundtrip() {
        let mut rng = StdRng::seed_from_u64(424242);
        for _ in 0..100 {
            let lon = rng.gen::<f64>() * 360.0;
            let lat = (rng.gen::<f64>() * 180.0 - 90.0) * 0.99;
            let distance = 0.1 + rng.gen::<f64>() * 40.0;

            let (lon2, lat2, d2) = Rectangular::from_spherical(lon, lat, distance).to_spherical();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
            assert_relative_eq!(d2, distance, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_vector_ops() {
        let a = Rectangular::new(1.0, 2.0, 3.0);
        let b = Rectangular::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Rectangular::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Rectangular::new(0.5, 3.0, 1.0));
        assert_eq!(-a, Rectangular::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(&b), 0.5 - 2.0 + 6.0);
        assert_eq!(Rectangular::from(a.to_vector3()), a);
    }

    #[test]
    fn test_pole_has_zero_longitude() {
        let (lon, lat, _) = Rectangular::new(0.0, 0.0, 1.0).to_spherical();
        assert_eq!(lon, 0.0);
        assert_relative_eq!(lat, 90.0);
    }
}
