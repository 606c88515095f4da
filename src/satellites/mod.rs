//! Planetary satellites
//!
//! Satellite positions end up in the sky plane of their planet: X toward the
//! west, Y toward the north, Z toward the observer, all in equatorial radii
//! of the planet ([`SkyPlane`]).
//!
//! The Galilean satellites have a built-in closed-form theory
//! ([`galilean`]). Other systems carry their planet's pole orientation and
//! oblateness as built-in constants ([`PlanetSystem`]) and receive the orbits
//! of their satellites as data, either as mean elements precessing under J2
//! ([`KeplerOrbit`]) or as periodic series in the equinoctial elements
//! ([`SeriesOrbit`]).

pub mod galilean;
pub mod system;

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::EphemerisConfig;
use crate::constants::DAY_S;
use crate::coordinates::{Equatorial, Rectangular};
use crate::framelib::{Axis, Rotation};
use crate::kepler::{
    check_eccentricity, elliptic_to_rectangular, radius_vector, solve_kepler_with, true_anomaly,
    EllipticElements,
};
use crate::series::{self, PeriodicTerm, Trig};
use crate::{OrreryError, Result};

pub use galilean::{galilean_positions, GalileanMoon, GalileanPositions};
pub use system::{PlanetSystem, PoleModel, SatellitePosition, SatelliteSystem};

/// Apparent offset of a satellite from the centre of its planet
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SkyPlane {
    /// Toward the west, planet radii
    pub x: f64,
    /// Toward the north, planet radii
    pub y: f64,
    /// Toward the observer, planet radii
    pub z: f64,
}

impl SkyPlane {
    /// Projects `offset` (J2000 equator, planet radii) onto the sky plane of a
    /// planet seen in the J2000 direction `planet`
    pub fn project(offset: &Rectangular, planet: &Equatorial) -> Self {
        let (sin_a, cos_a) = planet.alpha.to_radians().sin_cos();
        let (sin_d, cos_d) = planet.delta.to_radians().sin_cos();
        let west = Rectangular::new(sin_a, -cos_a, 0.0);
        let north = Rectangular::new(-sin_d * cos_a, -sin_d * sin_a, cos_d);
        let away = Rectangular::new(cos_d * cos_a, cos_d * sin_a, sin_d);
        SkyPlane {
            x: offset.dot(&west),
            y: offset.dot(&north),
            z: -offset.dot(&away),
        }
    }

    /// Apparent distance from the planet's centre, planet radii
    pub fn separation(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Hidden behind the planet's disk
    pub fn is_occulted(&self) -> bool {
        self.z < 0.0 && self.separation() < 1.0
    }

    /// In front of the planet's disk
    pub fn is_transiting(&self) -> bool {
        self.z > 0.0 && self.separation() < 1.0
    }
}

/// Plane an orbit's elements are referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePlane {
    /// Equator of the planet (x toward the node on the Earth's J2000 equator)
    #[default]
    PlanetEquator,
    /// Earth's mean equator of J2000
    EarthEquator,
    /// Mean ecliptic of J2000
    Ecliptic,
}

/// Raw periodic term as stored in element files: `[amplitude, phase, frequency]`
///
/// Phase in radians, frequency in radians per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesTerm(pub f64, pub f64, pub f64);

impl From<SeriesTerm> for PeriodicTerm<0> {
    fn from(SeriesTerm(amplitude, phase, frequency): SeriesTerm) -> Self {
        PeriodicTerm::new([], amplitude, phase, frequency)
    }
}

impl From<PeriodicTerm<0>> for SeriesTerm {
    fn from(term: PeriodicTerm<0>) -> Self {
        SeriesTerm(term.amplitude, term.phase, term.frequency)
    }
}

#[derive(Serialize, Deserialize)]
struct SeriesData {
    #[serde(default)]
    polynomial: Vec<f64>,
    #[serde(default)]
    terms: Vec<SeriesTerm>,
}

/// Secular polynomial plus periodic terms: Σ cⱼ·tʲ + Σ A·sin(φ + ν·t)
///
/// `t` is in days from the orbit's epoch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "SeriesData", into = "SeriesData")]
pub struct ElementSeries {
    pub polynomial: Vec<f64>,
    pub terms: Vec<PeriodicTerm<0>>,
}

impl From<SeriesData> for ElementSeries {
    fn from(data: SeriesData) -> Self {
        ElementSeries {
            polynomial: data.polynomial,
            terms: data.terms.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ElementSeries> for SeriesData {
    fn from(series: ElementSeries) -> Self {
        SeriesData {
            polynomial: series.polynomial,
            terms: series.terms.into_iter().map(Into::into).collect(),
        }
    }
}

impl ElementSeries {
    pub fn new(polynomial: Vec<f64>, terms: Vec<PeriodicTerm<0>>) -> Self {
        ElementSeries { polynomial, terms }
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        series::polynomial(&self.polynomial, t) + series::sum(&self.terms, t, &[], Trig::Sin)
    }
}

/// A complex element pair Σ A·exp(i·(φ + ν·t)), e.g. k + i·h or q + i·p
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<SeriesTerm>", into = "Vec<SeriesTerm>")]
pub struct ComplexSeries {
    pub terms: Vec<PeriodicTerm<0>>,
}

impl From<Vec<SeriesTerm>> for ComplexSeries {
    fn from(terms: Vec<SeriesTerm>) -> Self {
        ComplexSeries {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ComplexSeries> for Vec<SeriesTerm> {
    fn from(series: ComplexSeries) -> Self {
        series.terms.into_iter().map(Into::into).collect()
    }
}

impl ComplexSeries {
    /// (real, imaginary) parts at `t`
    pub fn evaluate(&self, t: f64) -> (f64, f64) {
        (
            series::sum(&self.terms, t, &[], Trig::Cos),
            series::sum(&self.terms, t, &[], Trig::Sin),
        )
    }
}

/// Orbit given as series in the equinoctial elements
///
/// λ is the mean longitude (radians), `(k, h)` the eccentricity vector and
/// `(q, p)` the inclination vector (sin(i/2)), all functions of days since
/// `epoch`. The semi-major axis follows from the planet's GM and the mean
/// motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesOrbit {
    /// JD (TT)
    pub epoch: f64,
    /// Radians per day
    pub mean_motion: f64,
    pub mean_longitude: ElementSeries,
    #[serde(default)]
    pub eccentricity: ComplexSeries,
    #[serde(default)]
    pub inclination: ComplexSeries,
    #[serde(default)]
    pub plane: ReferencePlane,
}

impl SeriesOrbit {
    pub fn elements(&self, jd: f64) -> EllipticElements {
        let t = jd - self.epoch;
        let (k, h) = self.eccentricity.evaluate(t);
        let (q, p) = self.inclination.evaluate(t);
        EllipticElements {
            n: self.mean_motion,
            lambda: self.mean_longitude.evaluate(t),
            k,
            h,
            q,
            p,
        }
    }

    /// Planetocentric position (km) in the orbit's reference plane
    ///
    /// `gm` is the planet's gravitational parameter in km³/s².
    pub fn position(&self, jd: f64, gm: f64) -> Result<Rectangular> {
        let mu = gm * DAY_S * DAY_S;
        Ok(elliptic_to_rectangular(&self.elements(jd), mu)?.position)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.mean_motion > 0.0) {
            return Err(OrreryError::Data(format!(
                "mean motion must be positive, got {}",
                self.mean_motion
            )));
        }
        if self.mean_longitude.polynomial.is_empty() && self.mean_longitude.terms.is_empty() {
            return Err(OrreryError::Data("mean longitude series is empty".to_string()));
        }
        Ok(())
    }
}

/// Mean elements of a satellite orbit, precessing under the planet's J2
///
/// Angles in degrees, referred to `plane`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerOrbit {
    /// JD (TT)
    pub epoch: f64,
    /// km
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    /// Longitude of the ascending node at epoch
    pub node: f64,
    /// Argument of the pericentre at epoch
    pub pericentre: f64,
    /// Mean anomaly at epoch
    pub mean_anomaly: f64,
    /// Sidereal period in days; derived from GM when absent
    #[serde(default)]
    pub period: Option<f64>,
    #[serde(default)]
    pub plane: ReferencePlane,
}

impl KeplerOrbit {
    pub fn validate(&self) -> Result<()> {
        check_eccentricity(self.eccentricity).map_err(|e| OrreryError::Data(e.to_string()))?;
        if !(self.semi_major_axis > 0.0) {
            return Err(OrreryError::Data(format!(
                "semi-major axis must be positive, got {}",
                self.semi_major_axis
            )));
        }
        if let Some(period) = self.period {
            if !(period > 0.0) {
                return Err(OrreryError::Data(format!(
                    "period must be positive, got {period}"
                )));
            }
        }
        Ok(())
    }

    /// Mean motion in radians per day
    pub fn mean_motion(&self, gm: f64) -> f64 {
        match self.period {
            Some(period) => TAU / period,
            None => (gm / self.semi_major_axis.powi(3)).sqrt() * DAY_S,
        }
    }

    /// Planetocentric position (km) in the orbit's reference plane
    pub fn position(&self, jd: f64, system: &PlanetSystem, config: &EphemerisConfig) -> Result<Rectangular> {
        let dt = jd - self.epoch;
        let n = self.mean_motion(system.gm);
        let (node_rate, pericentre_rate) = j2_precession(
            n,
            self.semi_major_axis,
            self.eccentricity,
            self.inclination,
            system.j2,
            system.radius_km,
        );
        let node = self.node + node_rate.to_degrees() * dt;
        let pericentre = self.pericentre + pericentre_rate.to_degrees() * dt;
        let mean_anomaly = self.mean_anomaly + n.to_degrees() * dt;

        let e = self.eccentricity;
        let ecc_anomaly = solve_kepler_with(mean_anomaly, e, config)?;
        let r = radius_vector(self.semi_major_axis, e, ecc_anomaly);
        let in_plane = Rectangular::from_spherical(pericentre + true_anomaly(ecc_anomaly, e), 0.0, r);
        Ok(Rotation::about(Axis::Z, node) * Rotation::about(Axis::X, self.inclination) * in_plane)
    }
}

/// Secular rates of the node and of the pericentre caused by J2
///
/// `n` is the mean motion, `a` and `radius` share a unit and `inclination` is
/// in degrees. Rates come out in the unit of `n`.
pub fn j2_precession(n: f64, a: f64, e: f64, inclination: f64, j2: f64, radius: f64) -> (f64, f64) {
    let cos_i = inclination.to_radians().cos();
    let p = 1.0 - e * e;
    let factor = 1.5 * n * j2 * (radius / a).powi(2) / (p * p);
    (-factor * cos_i, 0.5 * factor * (5.0 * cos_i * cos_i - 1.0))
}

/// How a satellite's orbit is described
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum SatelliteModel {
    Kepler(KeplerOrbit),
    Series(SeriesOrbit),
}

impl SatelliteModel {
    pub fn plane(&self) -> ReferencePlane {
        match self {
            SatelliteModel::Kepler(orbit) => orbit.plane,
            SatelliteModel::Series(orbit) => orbit.plane,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            SatelliteModel::Kepler(orbit) => orbit.validate(),
            SatelliteModel::Series(orbit) => orbit.validate(),
        }
    }

    /// Planetocentric position (km) in the model's reference plane
    pub fn position(&self, jd: f64, system: &PlanetSystem, config: &EphemerisConfig) -> Result<Rectangular> {
        match self {
            SatelliteModel::Kepler(orbit) => orbit.position(jd, system, config),
            SatelliteModel::Series(orbit) => orbit.position(jd, system.gm),
        }
    }
}

/// A named satellite and its orbit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub name: String,
    #[serde(flatten)]
    pub model: SatelliteModel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MARS_GM: f64 = 42_828.37;

    #[test]
    fn test_projection_axes() {
        let planet = Equatorial::new(30.0, 0.0);
        // Toward the observer
        let toward = -Rectangular::from_spherical(30.0, 0.0, 2.0);
        let sky = SkyPlane::project(&toward, &planet);
        assert_relative_eq!(sky.z, 2.0, epsilon = 1e-12);
        assert_relative_eq!(sky.separation(), 0.0, epsilon = 1e-12);

        let north = SkyPlane::project(&Rectangular::new(0.0, 0.0, 1.0), &planet);
        assert_relative_eq!(north.y, 1.0, epsilon = 1e-12);

        // Increasing right ascension is east, i.e. negative X
        let east = SkyPlane::project(&Rectangular::from_spherical(120.0, 0.0, 1.0), &planet);
        assert_relative_eq!(east.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_preserves_length() {
        let offset = Rectangular::new(0.3, -1.2, 0.8);
        let sky = SkyPlane::project(&offset, &Equatorial::new(250.0, -22.0));
        assert_relative_eq!(
            (sky.x * sky.x + sky.y * sky.y + sky.z * sky.z).sqrt(),
            offset.magnitude(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_disk_events() {
        let behind = SkyPlane { x: 0.5, y: 0.1, z: -3.0 };
        assert!(behind.is_occulted() && !behind.is_transiting());
        let front = SkyPlane { x: 0.2, y: 0.0, z: 3.0 };
        assert!(front.is_transiting());
        let clear = SkyPlane { x: 4.0, y: 0.0, z: 3.0 };
        assert!(!clear.is_transiting() && !clear.is_occulted());
    }

    #[test]
    fn test_element_series() {
        let series = ElementSeries::new(
            vec![1.0, 0.5],
            vec![PeriodicTerm::new([], 0.1, std::f64::consts::FRAC_PI_2, 0.0)],
        );
        assert_relative_eq!(series.evaluate(2.0), 2.1, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_series_is_rotating_vector() {
        let series = ComplexSeries::from(vec![SeriesTerm(0.02, 0.3, 0.01)]);
        let (k, h) = series.evaluate(50.0);
        assert_relative_eq!(k.hypot(h), 0.02, epsilon = 1e-15);
        assert_relative_eq!(h.atan2(k), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_series_orbit_circular_radius() {
        let n = 0.1;
        let orbit = SeriesOrbit {
            epoch: 2451545.0,
            mean_motion: n,
            mean_longitude: ElementSeries::new(vec![0.0, n], vec![]),
            eccentricity: ComplexSeries::default(),
            inclination: ComplexSeries::default(),
            plane: ReferencePlane::PlanetEquator,
        };
        let mu = MARS_GM * DAY_S * DAY_S;
        let expected = (mu / (n * n)).cbrt();
        let position = orbit.position(2451545.0 + 7.0, MARS_GM).unwrap();
        assert_relative_eq!(position.magnitude(), expected, max_relative = 1e-12);
        assert_relative_eq!(position.z, 0.0, epsilon = 1e-9);
        // λ = 0.7 rad along the equator
        assert_relative_eq!(position.y.atan2(position.x), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_j2_regression_of_phobos_node() {
        // Phobos regresses by about 0.436° a day
        let period = 0.318_910_2;
        let (node, _) = j2_precession(TAU / period, 9_376.0, 0.0151, 1.08, 1.960_45e-3, 3_396.2);
        assert_relative_eq!(node.to_degrees(), -0.436, epsilon = 3e-3);
    }

    #[test]
    fn test_j2_critical_inclination() {
        let critical = (1.0_f64 / 5.0).sqrt().acos().to_degrees();
        let (_, pericentre) = j2_precession(1.0, 2.0, 0.1, critical, 1e-3, 1.0);
        assert_relative_eq!(pericentre, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_kepler_orbit_validation() {
        let mut orbit = KeplerOrbit {
            epoch: 2451545.0,
            semi_major_axis: 9_376.0,
            eccentricity: 1.2,
            inclination: 1.0,
            node: 0.0,
            pericentre: 0.0,
            mean_anomaly: 0.0,
            period: None,
            plane: ReferencePlane::default(),
        };
        assert!(matches!(orbit.validate(), Err(OrreryError::Data(_))));
        orbit.eccentricity = 0.01;
        orbit.period = Some(-1.0);
        assert!(orbit.validate().is_err());
        orbit.period = None;
        assert!(orbit.validate().is_ok());
    }

    #[test]
    fn test_model_from_json() {
        let json = r#"{
            "name": "Test",
            "model": "series",
            "epoch": 2451545.0,
            "mean_motion": 0.2,
            "mean_longitude": {"polynomial": [1.0, 0.2], "terms": [[0.001, 0.0, 0.05]]},
            "eccentricity": [[0.01, 0.5, 0.0]],
            "plane": "earth_equator"
        }"#;
        let satellite: Satellite = serde_json::from_str(json).unwrap();
        assert_eq!(satellite.name, "Test");
        assert_eq!(satellite.model.plane(), ReferencePlane::EarthEquator);
        let SatelliteModel::Series(orbit) = satellite.model else {
            panic!("expected a series orbit");
        };
        assert_eq!(orbit.mean_longitude.terms.len(), 1);
        assert_relative_eq!(orbit.elements(2451545.0).eccentricity(), 0.01, epsilon = 1e-15);
    }
}
