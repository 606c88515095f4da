//! Daily visibility of bodies: rise, transit and set

pub mod interpolation;
pub mod rts;

pub use interpolation::{interpolate3, lagrange, Crossing, Parabola};
pub use rts::{
    rise_transit_set, rise_transit_set_fixed, rise_transit_set_for, Rts, RtsOptions,
    STANDARD_REFRACTION,
};
