use std::ops::Mul;

use nalgebra::{Matrix3, Rotation3, Vector3};
use once_cell::sync::Lazy;

use crate::constants::OBLIQUITY_J2000;
use crate::coordinates::Rectangular;

/// Rotates J2000 ecliptic vectors onto the J2000 equator
pub static ECLIPTIC_J2000_TO_EQUATORIAL: Lazy<Rotation> =
    Lazy::new(|| Rotation::about(Axis::X, OBLIQUITY_J2000));

/// Rotates J2000 equatorial vectors onto the J2000 ecliptic
pub static EQUATORIAL_TO_ECLIPTIC_J2000: Lazy<Rotation> =
    Lazy::new(|| ECLIPTIC_J2000_TO_EQUATORIAL.inverse());

/// Coordinate axis of a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A rotation of rectangular vectors
///
/// `Rotation::about(axis, angle)` turns a vector counterclockwise by `angle`
/// degrees about `axis` (seen from the tip of the axis). Rotating the vector by
/// `+angle` is the same as rotating the frame by `-angle`, so a frame change
/// "rotate the axes by φ" is written `Rotation::about(axis, -φ)`.
///
/// Rotations compose right to left: `(a * b) * v == a * (b * v)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    matrix: Matrix3<f64>,
}

impl Rotation {
    pub fn identity() -> Self {
        Rotation {
            matrix: Matrix3::identity(),
        }
    }

    /// Rotation by `angle` degrees about a coordinate axis
    pub fn about(axis: Axis, angle: f64) -> Self {
        let unit = match axis {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        };
        Rotation {
            matrix: Rotation3::from_axis_angle(&unit, angle.to_radians()).into_inner(),
        }
    }

    /// Wraps an existing orthonormal matrix
    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        Rotation { matrix }
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// The opposite rotation (transpose of an orthonormal matrix)
    pub fn inverse(&self) -> Self {
        Rotation {
            matrix: self.matrix.transpose(),
        }
    }

    pub fn apply(&self, v: &Rectangular) -> Rectangular {
        Rectangular::from_vector3(self.matrix * v.to_vector3())
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::identity()
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Rotation {
        Rotation {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl Mul<Rectangular> for Rotation {
    type Output = Rectangular;

    fn mul(self, rhs: Rectangular) -> Rectangular {
        self.apply(&rhs)
    }
}

impl Mul<Rectangular> for &Rotation {
    type Output = Rectangular;

    fn mul(self, rhs: Rectangular) -> Rectangular {
        self.apply(&rhs)
    }
}

impl From<Rotation> for Matrix3<f64> {
    fn from(r: Rotation) -> Self {
        r.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_about_z_turns_x_into_y() {
        let v = Rotation::about(Axis::Z, 90.0) * Rectangular::new(1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-15);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let r = Rotation::about(Axis::X, 23.4) * Rotation::about(Axis::Z, -71.0);
        let v = Rectangular::new(0.3, -1.2, 0.7);
        let back = r.inverse() * (r * v);
        assert_relative_eq!(back.x, v.x, epsilon = 1e-14);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-14);
        assert_relative_eq!(back.z, v.z, epsilon = 1e-14);
    }

    #[test]
    fn test_ecliptic_pole_maps_to_equatorial() {
        // The north ecliptic pole sits at RA 270°, Dec 90° - ε
        let pole = &*ECLIPTIC_J2000_TO_EQUATORIAL * Rectangular::new(0.0, 0.0, 1.0);
        let (ra, dec, _) = pole.to_spherical();
        assert_relative_eq!(ra, 270.0, epsilon = 1e-10);
        assert_relative_eq!(dec, 90.0 - OBLIQUITY_J2000, epsilon = 1e-10);
    }

    #[test]
    fn test_static_pair_is_consistent() {
        let product = *ECLIPTIC_J2000_TO_EQUATORIAL * *EQUATORIAL_TO_ECLIPTIC_J2000;
        assert_relative_eq!(*product.matrix(), Matrix3::identity(), epsilon = 1e-15);
    }
}
