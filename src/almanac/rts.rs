//! Rise, transit and set
//!
//! The day is scanned hour by hour. For each hour the body's horizontal
//! position is evaluated at the start, middle and end, and parabolas through
//! those samples locate
//!
//! - the transit: sin(azimuth) going from negative to positive with the body
//!   above the horizon (upper culmination, north or south of the zenith);
//! - the rise and the set: altitude + offset going up through zero and down
//!   through zero.
//!
//! Events are kept in the order they are found (ascending hour, then
//! ascending root); the scan stops as soon as all three are known. Events
//! that do not happen during the day are `None`, which is how circumpolar
//! and never-rising bodies show up.

use log::trace;
use serde::{Deserialize, Serialize};

use super::interpolation::{interpolate3, Parabola};
use crate::celestial::CelestialObject;
use crate::config::EphemerisConfig;
use crate::constants::SIDEREAL_RATE;
use crate::coordinates::angle::align;
use crate::coordinates::{Equatorial, GeoLocation, Horizontal};
use crate::framelib::equatorial_to_horizontal;
use crate::positions::SkyContext;
use crate::{OrreryError, Result};

/// Atmospheric refraction at the horizon, 34′
pub const STANDARD_REFRACTION: f64 = 34.0 / 60.0;

const STEPS_PER_DAY: usize = 24;

/// Quantities shifting the apparent horizon, degrees
///
/// A body is taken to rise when its geometric altitude reaches
/// −[`Self::offset`], i.e. when its upper limb clears the refracted horizon
/// as seen from the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtsOptions {
    /// Equatorial horizontal parallax
    pub parallax: f64,
    /// Apparent semidiameter
    pub semidiameter: f64,
    /// Refraction at the horizon
    pub refraction: f64,
}

impl Default for RtsOptions {
    fn default() -> Self {
        Self {
            parallax: 0.0,
            semidiameter: 0.0,
            refraction: STANDARD_REFRACTION,
        }
    }
}

impl RtsOptions {
    /// Geometric horizon: no refraction, no disk, no parallax
    pub fn geometric() -> Self {
        Self {
            refraction: 0.0,
            ..Self::default()
        }
    }

    pub fn with_parallax(mut self, parallax: f64) -> Self {
        self.parallax = parallax;
        self
    }

    pub fn with_semidiameter(mut self, semidiameter: f64) -> Self {
        self.semidiameter = semidiameter;
        self
    }

    pub fn with_refraction(mut self, refraction: f64) -> Self {
        self.refraction = refraction;
        self
    }

    /// refraction + semidiameter − parallax
    pub fn offset(&self) -> f64 {
        self.refraction + self.semidiameter - self.parallax
    }
}

/// Rise, transit and set of a body during one day
///
/// Instants are fractions of the day after the instant whose Greenwich
/// sidereal time was passed as `theta0`. Azimuths follow the crate
/// convention (from the south, westward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rts {
    pub rise: Option<f64>,
    pub transit: Option<f64>,
    pub set: Option<f64>,
    pub rise_azimuth: Option<f64>,
    pub transit_altitude: Option<f64>,
    pub set_azimuth: Option<f64>,
}

impl Rts {
    /// All three events were found
    pub fn is_complete(&self) -> bool {
        self.rise.is_some() && self.transit.is_some() && self.set.is_some()
    }

    /// Rise, transit and set as Julian Days, given the start of the day
    pub fn julian_days(&self, jd0: f64) -> [Option<f64>; 3] {
        [self.rise, self.transit, self.set].map(|event| event.map(|f| jd0 + f))
    }
}

/// Events of a moving body from its positions at day fractions 0, ½ and 1
///
/// `positions` must hold exactly three samples; α is unwrapped across 0°
/// before interpolation. `theta0` is the Greenwich apparent sidereal time at
/// the first sample.
pub fn rise_transit_set(
    positions: &[Equatorial],
    location: &GeoLocation,
    theta0: f64,
    options: &RtsOptions,
) -> Result<Rts> {
    let [first, middle, last] = <[Equatorial; 3]>::try_from(positions).map_err(|_| {
        OrreryError::Validation(format!(
            "rise/transit/set needs 3 positions, got {}",
            positions.len()
        ))
    })?;
    let mut alpha = [first.alpha, middle.alpha, last.alpha];
    align(&mut alpha);
    let delta = [first.delta, middle.delta, last.delta];

    Ok(scan(
        |f| {
            let eq = Equatorial::new(interpolate3(&alpha, f), interpolate3(&delta, f));
            equatorial_to_horizontal(&eq, location, theta0 + SIDEREAL_RATE * f)
        },
        options.offset(),
    ))
}

/// Events of a body whose equatorial position does not change over the day
pub fn rise_transit_set_fixed(
    position: &Equatorial,
    location: &GeoLocation,
    theta0: f64,
    options: &RtsOptions,
) -> Rts {
    scan(
        |f| equatorial_to_horizontal(position, location, theta0 + SIDEREAL_RATE * f),
        options.offset(),
    )
}

/// Events of a solar-system object for the day starting at `jd0` (UT)
///
/// Apparent positions are computed at the start, middle and end of the day;
/// the horizon offset uses the object's parallax and semidiameter at midday
/// and the refraction of `config`.
pub fn rise_transit_set_for<O>(
    object: &O,
    jd0: f64,
    location: &GeoLocation,
    config: &EphemerisConfig,
) -> Result<Rts>
where
    O: CelestialObject + ?Sized,
{
    let start = SkyContext::new(jd0, *location, config)?;
    let middle = SkyContext::new(jd0 + 0.5, *location, config)?;
    let end = SkyContext::new(jd0 + 1.0, *location, config)?;

    let noon = object.apparent_position(&middle)?;
    let positions = [
        object.apparent_position(&start)?.equatorial,
        noon.equatorial,
        object.apparent_position(&end)?.equatorial,
    ];
    let options = RtsOptions {
        parallax: noon.horizontal_parallax,
        semidiameter: noon.semidiameter,
        refraction: config.refraction,
    };
    trace!("{} horizon offset {:.4}°", object.name(), options.offset());
    rise_transit_set(&positions, location, start.sidereal_time, &options)
}

fn scan<F>(horizontal_at: F, offset: f64) -> Rts
where
    F: Fn(f64) -> Horizontal,
{
    let steps = STEPS_PER_DAY as f64;
    let mut rts = Rts::default();
    let mut start = horizontal_at(0.0);

    for hour in 0..STEPS_PER_DAY {
        let h = hour as f64;
        let middle = horizontal_at((h + 0.5) / steps);
        let end = horizontal_at((h + 1.0) / steps);

        if rts.transit.is_none() {
            let meridian = Parabola::through(
                start.azimuth.to_radians().sin(),
                middle.azimuth.to_radians().sin(),
                end.azimuth.to_radians().sin(),
            );
            for crossing in meridian.crossings().into_iter().filter(|c| c.rising) {
                let f = (h + crossing.at) / steps;
                let at = horizontal_at(f);
                if at.altitude > 0.0 {
                    trace!("Transit at {f:.5} d, altitude {:.4}°", at.altitude);
                    rts.transit = Some(f);
                    rts.transit_altitude = Some(at.altitude);
                    break;
                }
            }
        }

        if rts.rise.is_none() || rts.set.is_none() {
            let horizon = Parabola::through(
                start.altitude + offset,
                middle.altitude + offset,
                end.altitude + offset,
            );
            for crossing in horizon.crossings() {
                let f = (h + crossing.at) / steps;
                if crossing.rising && rts.rise.is_none() {
                    let azimuth = horizontal_at(f).azimuth;
                    trace!("Rise at {f:.5} d, azimuth {azimuth:.4}°");
                    rts.rise = Some(f);
                    rts.rise_azimuth = Some(azimuth);
                } else if !crossing.rising && rts.set.is_none() {
                    let azimuth = horizontal_at(f).azimuth;
                    trace!("Set at {f:.5} d, azimuth {azimuth:.4}°");
                    rts.set = Some(f);
                    rts.set_azimuth = Some(azimuth);
                }
            }
        }

        if rts.is_complete() {
            break;
        }
        start = end;
    }
    rts
}
