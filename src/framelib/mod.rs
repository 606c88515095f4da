//! Reference frames and the transformations between them
//!
//! [`rotation`] holds the rotation matrices used to move rectangular vectors
//! between frames (ecliptic, equator, planetary equators). [`transform`]
//! holds the spherical-coordinate conversions: ecliptical ↔ equatorial,
//! equatorial ↔ horizontal and the topocentric corrections.

pub mod rotation;
pub mod transform;

pub use rotation::{Axis, Rotation, ECLIPTIC_J2000_TO_EQUATORIAL, EQUATORIAL_TO_ECLIPTIC_J2000};
pub use transform::{
    ecliptical_to_equatorial, equatorial_to_ecliptical, equatorial_to_horizontal,
    horizontal_to_equatorial, hour_angle, topocentric_equatorial,
};
