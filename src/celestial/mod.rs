//! Objects that can be placed on the sky
//!
//! [`CelestialObject`] is the seam between what a body is and the reduction
//! pipeline in [`crate::positions`]: anything able to produce its apparent
//! place in a [`SkyContext`] gets horizontal coordinates and the almanac for
//! free.

use serde::{Deserialize, Serialize};

use crate::almanac::{self, Rts};
use crate::config::EphemerisConfig;
use crate::coordinates::{GeoLocation, Horizontal};
use crate::kepler::OrbitalElements;
use crate::planetlib::Body;
use crate::positions::{ApparentPosition, SkyContext};
use crate::Result;

/// A trait for objects that have a position in the sky
pub trait CelestialObject {
    fn name(&self) -> &str;

    /// Geocentric apparent place at the context's instant
    fn apparent_position(&self, sky: &SkyContext) -> Result<ApparentPosition>;

    /// Topocentric altitude and azimuth for the context's observer
    fn horizontal_position(&self, sky: &SkyContext) -> Result<Horizontal> {
        let apparent = self.apparent_position(sky)?;
        Ok(sky.horizontal(&sky.topocentric(&apparent)))
    }

    /// Rise, transit and set during the day starting at `jd0` (UT)
    fn rise_transit_set(
        &self,
        jd0: f64,
        location: &GeoLocation,
        config: &EphemerisConfig,
    ) -> Result<Rts> {
        almanac::rise_transit_set_for(self, jd0, location, config)
    }
}

impl CelestialObject for Body {
    fn name(&self) -> &str {
        Body::name(self)
    }

    fn apparent_position(&self, sky: &SkyContext) -> Result<ApparentPosition> {
        sky.apparent(*self)
    }
}

/// A comet or asteroid on a heliocentric elliptic orbit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinorBody {
    pub name: String,
    pub elements: OrbitalElements,
}

impl MinorBody {
    /// Validated minor body
    pub fn new(name: &str, elements: OrbitalElements) -> Result<Self> {
        elements.validate()?;
        Ok(Self {
            name: name.to_string(),
            elements,
        })
    }
}

impl CelestialObject for MinorBody {
    fn name(&self) -> &str {
        &self.name
    }

    fn apparent_position(&self, sky: &SkyContext) -> Result<ApparentPosition> {
        sky.minor_body_apparent(&self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrreryError;
    use approx::assert_relative_eq;

    fn encke() -> MinorBody {
        let elements = OrbitalElements::from_perihelion(
            2448192.5 + 0.54502,
            0.8502196,
            2.2091404,
            11.94524,
            186.23352,
            334.75006,
        )
        .unwrap();
        MinorBody::new("Encke", elements).unwrap()
    }

    fn boston() -> GeoLocation {
        GeoLocation::new(42.3333, 71.0833, 0.0).unwrap()
    }

    #[test]
    fn test_minor_body_rejects_open_orbit() {
        let mut elements = encke().elements;
        elements.eccentricity = 1.0;
        assert!(matches!(
            MinorBody::new("C/open", elements),
            Err(OrreryError::UnsupportedOrbit { .. })
        ));
    }

    #[test]
    fn test_trait_objects_share_the_pipeline() {
        let sky = SkyContext::at_tt(2448170.5, boston(), &EphemerisConfig::default()).unwrap();
        let objects: Vec<Box<dyn CelestialObject>> = vec![Box::new(Body::Sun), Box::new(encke())];
        for object in &objects {
            let apparent = object.apparent_position(&sky).unwrap();
            let horizontal = object.horizontal_position(&sky).unwrap();
            assert!(apparent.distance > 0.0, "{}", object.name());
            assert!(horizontal.altitude.abs() <= 90.0);
        }
        assert_eq!(objects[1].name(), "Encke");
    }

    #[test]
    fn test_body_dispatches_to_context() {
        let sky = SkyContext::at_tt(2448908.5, boston(), &EphemerisConfig::default()).unwrap();
        let via_trait = Body::Sun.apparent_position(&sky).unwrap();
        let direct = sky.sun_apparent().unwrap();
        assert_eq!(via_trait, direct);
        assert_relative_eq!(via_trait.equatorial.alpha, 198.378121, epsilon = 2e-4);
    }

    #[test]
    fn test_sun_rises_and_sets_in_boston() {
        // 1988 March 20, near the equinox: about twelve hours of daylight
        let rts = Body::Sun
            .rise_transit_set(2447240.5, &boston(), &EphemerisConfig::default())
            .unwrap();
        assert!(rts.is_complete());
        let (rise, set) = (rts.rise.unwrap(), rts.set.unwrap());
        let daylight = if set > rise { set - rise } else { set + 1.0 - rise };
        assert_relative_eq!(daylight * 24.0, 12.1, epsilon = 0.2);
    }
}
