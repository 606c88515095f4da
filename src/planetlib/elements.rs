//! Approximate Keplerian elements of the planets (JPL, valid 1800–2050)
//!
//! Mean ecliptic and equinox of J2000.0. Each element is a value at J2000.0
//! and a rate per Julian century.

use super::Planet;
use crate::config::EphemerisConfig;
use crate::coordinates::{Ecliptical, Heliocentric};
use crate::kepler::OrbitalElements;
use crate::precessionlib::precess_ecliptical;
use crate::time::julian_centuries;
use crate::constants::J2000;
use crate::Result;

/// Element value at J2000.0 and its rate per century
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Secular {
    pub base: f64,
    pub rate: f64,
}

impl Secular {
    const fn new(base: f64, rate: f64) -> Self {
        Secular { base, rate }
    }

    pub fn at(&self, t: f64) -> f64 {
        self.base + self.rate * t
    }
}

/// a (AU), e, I, L, ϖ, Ω (degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElements {
    pub semi_major_axis: Secular,
    pub eccentricity: Secular,
    pub inclination: Secular,
    pub mean_longitude: Secular,
    pub long_perihelion: Secular,
    pub long_ascending_node: Secular,
}

impl MeanElements {
    /// Osculating-style elements for the instant `jd`
    pub fn at(&self, jd: f64) -> Result<OrbitalElements> {
        let t = julian_centuries(jd);
        let perihelion = self.long_perihelion.at(t);
        let node = self.long_ascending_node.at(t);
        OrbitalElements::new(
            jd,
            self.mean_longitude.at(t) - perihelion,
            self.eccentricity.at(t),
            self.semi_major_axis.at(t),
            self.inclination.at(t),
            perihelion - node,
            node,
        )
    }

    /// Heliocentric position referred to the ecliptic and equinox of date
    pub fn heliocentric(&self, jd: f64, config: &EphemerisConfig) -> Result<Heliocentric> {
        let j2000 = self.at(jd)?.heliocentric(jd, config)?;
        let of_date = precess_ecliptical(&Ecliptical::new(j2000.l, j2000.b, j2000.r), J2000, jd);
        Ok(Heliocentric::new(of_date.lambda, of_date.beta, of_date.distance))
    }
}

const fn elements(table: [(f64, f64); 6]) -> MeanElements {
    MeanElements {
        semi_major_axis: Secular::new(table[0].0, table[0].1),
        eccentricity: Secular::new(table[1].0, table[1].1),
        inclination: Secular::new(table[2].0, table[2].1),
        mean_longitude: Secular::new(table[3].0, table[3].1),
        long_perihelion: Secular::new(table[4].0, table[4].1),
        long_ascending_node: Secular::new(table[5].0, table[5].1),
    }
}

const MERCURY: MeanElements = elements([
    (0.38709927, 0.00000037),
    (0.20563593, 0.00001906),
    (7.00497902, -0.00594749),
    (252.25032350, 149472.67411175),
    (77.45779628, 0.16047689),
    (48.33076593, -0.12534081),
]);

const VENUS: MeanElements = elements([
    (0.72333566, 0.00000390),
    (0.00677672, -0.00004107),
    (3.39467605, -0.00078890),
    (181.97909950, 58517.81538729),
    (131.60246718, 0.00268329),
    (76.67984255, -0.27769418),
]);

/// Earth-Moon barycenter
const EARTH: MeanElements = elements([
    (1.00000261, 0.00000562),
    (0.01671123, -0.00004392),
    (-0.00001531, -0.01294668),
    (100.46457166, 35999.37244981),
    (102.93768193, 0.32327364),
    (0.0, 0.0),
]);

const MARS: MeanElements = elements([
    (1.52371034, 0.00001847),
    (0.09339410, 0.00007882),
    (1.84969142, -0.00813131),
    (-4.55343205, 19140.30268499),
    (-23.94362959, 0.44441088),
    (49.55953891, -0.29257343),
]);

const JUPITER: MeanElements = elements([
    (5.20288700, -0.00011607),
    (0.04838624, -0.00013253),
    (1.30439695, -0.00183714),
    (34.39644051, 3034.74612775),
    (14.72847983, 0.21252668),
    (100.47390909, 0.20469106),
]);

const SATURN: MeanElements = elements([
    (9.53667594, -0.00125060),
    (0.05386179, -0.00050991),
    (2.48599187, 0.00193609),
    (49.95424423, 1222.49362201),
    (92.59887831, -0.41897216),
    (113.66242448, -0.28867794),
]);

const URANUS: MeanElements = elements([
    (19.18916464, -0.00196176),
    (0.04725744, -0.00004397),
    (0.77263783, -0.00242939),
    (313.23810451, 428.48202785),
    (170.95427630, 0.40805281),
    (74.01692503, 0.04240589),
]);

const NEPTUNE: MeanElements = elements([
    (30.06992276, 0.00026291),
    (0.00859048, 0.00005105),
    (1.77004347, 0.00035372),
    (-55.12002969, 218.45945325),
    (44.96476227, -0.32241464),
    (131.78422574, -0.00508664),
]);

/// Mean elements of a planet
pub fn mean_elements(planet: Planet) -> &'static MeanElements {
    match planet {
        Planet::Mercury => &MERCURY,
        Planet::Venus => &VENUS,
        Planet::Earth => &EARTH,
        Planet::Mars => &MARS,
        Planet::Jupiter => &JUPITER,
        Planet::Saturn => &SATURN,
        Planet::Uranus => &URANUS,
        Planet::Neptune => &NEPTUNE,
    }
}
