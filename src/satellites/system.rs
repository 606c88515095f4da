//! Satellite systems of a planet
//!
//! A [`PlanetSystem`] holds the physical constants the orbit models need: the
//! pole orientation, the equatorial radius, J2 and GM. Mars, Uranus and
//! Neptune are built in; other planets come from JSON. A [`SatelliteSystem`]
//! pairs one of these with its satellites and projects them onto the sky
//! plane at light-time-corrected instants.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{ReferencePlane, Satellite, SatelliteModel, SkyPlane};
use crate::config::EphemerisConfig;
use crate::coordinates::{Equatorial, Rectangular};
use crate::framelib::{Axis, Rotation, ECLIPTIC_J2000_TO_EQUATORIAL};
use crate::planetlib::Planet;
use crate::positions::planet_astrometric;
use crate::time::julian_centuries;
use crate::{OrreryError, Result};

/// Orientation of a planet's north pole in the J2000 equatorial frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoleModel {
    /// α₀ + α̇·T, δ₀ + δ̇·T with T in Julian centuries from J2000
    Linear {
        alpha: f64,
        delta: f64,
        #[serde(default)]
        alpha_rate: f64,
        #[serde(default)]
        delta_rate: f64,
    },
    /// Neptune's pole, nodding with the precession of Triton's orbit
    Neptune,
}

impl PoleModel {
    pub const fn fixed(alpha: f64, delta: f64) -> Self {
        PoleModel::Linear {
            alpha,
            delta,
            alpha_rate: 0.0,
            delta_rate: 0.0,
        }
    }

    /// Pole direction at `jd`
    pub fn at(&self, jd: f64) -> Equatorial {
        let t = julian_centuries(jd);
        match *self {
            PoleModel::Linear {
                alpha,
                delta,
                alpha_rate,
                delta_rate,
            } => Equatorial::new(alpha + alpha_rate * t, delta + delta_rate * t),
            PoleModel::Neptune => {
                let n = (357.85 + 52.316 * t).to_radians();
                Equatorial::new(299.36 + 0.70 * n.sin(), 43.46 - 0.51 * n.cos())
            }
        }
    }
}

/// A planet as the centre of a satellite system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetSystem {
    pub planet: Planet,
    /// Equatorial radius, km
    pub radius_km: f64,
    /// Second zonal harmonic, referred to `radius_km`
    pub j2: f64,
    /// Gravitational parameter, km³/s²
    pub gm: f64,
    pub pole: PoleModel,
}

impl PlanetSystem {
    pub const MARS: PlanetSystem = PlanetSystem {
        planet: Planet::Mars,
        radius_km: 3_396.2,
        j2: 1.960_45e-3,
        gm: 42_828.37,
        pole: PoleModel::Linear {
            alpha: 317.681_43,
            delta: 52.886_50,
            alpha_rate: -0.1061,
            delta_rate: -0.0609,
        },
    };

    pub const URANUS: PlanetSystem = PlanetSystem {
        planet: Planet::Uranus,
        radius_km: 25_559.0,
        j2: 3.343_43e-3,
        gm: 5_793_939.0,
        pole: PoleModel::fixed(257.311, -15.175),
    };

    pub const NEPTUNE: PlanetSystem = PlanetSystem {
        planet: Planet::Neptune,
        radius_km: 24_764.0,
        j2: 3.411e-3,
        gm: 6_836_529.0,
        pole: PoleModel::Neptune,
    };

    pub fn validate(&self) -> Result<()> {
        if self.planet == Planet::Earth {
            return Err(OrreryError::Data(
                "the Earth's satellite is handled by the lunar theory".to_string(),
            ));
        }
        if !(self.radius_km > 0.0) || !(self.gm > 0.0) || !(self.j2 >= 0.0) {
            return Err(OrreryError::Data(format!(
                "{} system needs positive radius and GM and non-negative J2",
                self.planet
            )));
        }
        Ok(())
    }

    /// Rotation from the planet's equator (x toward its ascending node on the
    /// Earth's equator) to the Earth's J2000 equator
    pub fn equator_to_earth_equator(&self, jd: f64) -> Rotation {
        let pole = self.pole.at(jd);
        Rotation::about(Axis::Z, pole.alpha + 90.0) * Rotation::about(Axis::X, 90.0 - pole.delta)
    }

    /// Rotation from a reference plane to the Earth's J2000 equator
    pub fn plane_to_earth_equator(&self, plane: ReferencePlane, jd: f64) -> Rotation {
        match plane {
            ReferencePlane::PlanetEquator => self.equator_to_earth_equator(jd),
            ReferencePlane::EarthEquator => Rotation::identity(),
            ReferencePlane::Ecliptic => *ECLIPTIC_J2000_TO_EQUATORIAL,
        }
    }

    /// Planetocentric position of a satellite, km, J2000 equator
    pub fn planetocentric(
        &self,
        model: &SatelliteModel,
        jd: f64,
        config: &EphemerisConfig,
    ) -> Result<Rectangular> {
        let local = model.position(jd, self, config)?;
        Ok(self.plane_to_earth_equator(model.plane(), jd) * local)
    }
}

/// Sky-plane position of one satellite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatellitePosition {
    pub name: String,
    pub sky: SkyPlane,
}

#[derive(Deserialize)]
struct SystemFile {
    system: PlanetSystem,
    satellites: Vec<Satellite>,
}

/// A planet and the satellites whose orbits were supplied for it
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteSystem {
    system: PlanetSystem,
    satellites: Vec<Satellite>,
}

impl SatelliteSystem {
    /// Validated system; satellite names must be unique
    pub fn new(system: PlanetSystem, satellites: Vec<Satellite>) -> Result<Self> {
        system.validate()?;
        let mut names = HashSet::new();
        for satellite in &satellites {
            if satellite.name.trim().is_empty() {
                return Err(OrreryError::Data("satellite without a name".to_string()));
            }
            if !names.insert(satellite.name.as_str()) {
                return Err(OrreryError::Data(format!(
                    "satellite {} is defined twice",
                    satellite.name
                )));
            }
            satellite
                .model
                .validate()
                .map_err(|e| OrreryError::Data(format!("satellite {}: {e}", satellite.name)))?;
        }
        debug!("{} system with {} satellites", system.planet, satellites.len());
        Ok(SatelliteSystem { system, satellites })
    }

    /// Element sets for one of the built-in systems, as a JSON array of
    /// satellites
    pub fn load(system: PlanetSystem, json: &str) -> Result<Self> {
        let satellites: Vec<Satellite> = serde_json::from_str(json)
            .map_err(|e| OrreryError::Data(format!("bad satellite element set: {e}")))?;
        Self::new(system, satellites)
    }

    /// A generic system: `{"system": {...}, "satellites": [...]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SystemFile = serde_json::from_str(json)
            .map_err(|e| OrreryError::Data(format!("bad satellite system: {e}")))?;
        Self::new(file.system, file.satellites)
    }

    pub fn system(&self) -> &PlanetSystem {
        &self.system
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn satellite(&self, name: &str) -> Option<&Satellite> {
        self.satellites
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Sky-plane positions of every satellite at `jd` (TT)
    ///
    /// Satellites are evaluated at the instant light left the planet.
    pub fn sky_plane(&self, jd: f64, config: &EphemerisConfig) -> Result<Vec<SatellitePosition>> {
        let planet = planet_astrometric(self.system.planet, jd, config)?;
        let emitted = jd - planet.light_time.tau;
        let scale = 1.0 / self.system.radius_km;

        self.satellites
            .iter()
            .map(|satellite| {
                let offset = self.system.planetocentric(&satellite.model, emitted, config)?;
                Ok(SatellitePosition {
                    name: satellite.name.clone(),
                    sky: SkyPlane::project(&offset.scale(scale), &planet.equatorial),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000;
    use approx::assert_relative_eq;

    const PHOBOS: &str = r#"[{
        "name": "Phobos",
        "model": "kepler",
        "epoch": 2451545.0,
        "semi_major_axis": 9376.0,
        "eccentricity": 0.0151,
        "inclination": 1.075,
        "node": 164.931,
        "pericentre": 150.057,
        "mean_anomaly": 92.474,
        "period": 0.3189102
    }]"#;

    #[test]
    fn test_pole_rotation_maps_z_to_pole() {
        for system in [PlanetSystem::MARS, PlanetSystem::URANUS, PlanetSystem::NEPTUNE] {
            let jd = 2455197.5;
            let pole = system.pole.at(jd);
            let z = system.equator_to_earth_equator(jd) * Rectangular::new(0.0, 0.0, 1.0);
            let (alpha, delta, r) = z.to_spherical();
            assert_relative_eq!(r, 1.0, epsilon = 1e-12);
            assert_relative_eq!(alpha, pole.alpha, epsilon = 1e-9);
            assert_relative_eq!(delta, pole.delta, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_planet_equator_node_lies_on_earth_equator() {
        let x = PlanetSystem::URANUS.equator_to_earth_equator(J2000) * Rectangular::new(1.0, 0.0, 0.0);
        assert_relative_eq!(x.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pole_models() {
        let mars = PlanetSystem::MARS.pole.at(J2000 + 36_525.0);
        assert_relative_eq!(mars.alpha, 317.681_43 - 0.1061, epsilon = 1e-9);
        assert_relative_eq!(mars.delta, 52.886_50 - 0.0609, epsilon = 1e-9);
        let neptune = PoleModel::Neptune.at(J2000);
        let n = 357.85_f64.to_radians();
        assert_relative_eq!(neptune.alpha, 299.36 + 0.70 * n.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_load_and_lookup() {
        let mars = SatelliteSystem::load(PlanetSystem::MARS, PHOBOS).unwrap();
        assert_eq!(mars.satellites().len(), 1);
        assert!(mars.satellite("phobos").is_some());
        assert!(mars.satellite("Deimos").is_none());
    }

    #[test]
    fn test_rejects_bad_element_sets() {
        let duplicated = format!(
            "[{}, {}]",
            PHOBOS.trim().trim_start_matches('[').trim_end_matches(']'),
            PHOBOS.trim().trim_start_matches('[').trim_end_matches(']')
        );
        assert!(matches!(
            SatelliteSystem::load(PlanetSystem::MARS, &duplicated),
            Err(OrreryError::Data(_))
        ));
        assert!(matches!(
            SatelliteSystem::load(PlanetSystem::MARS, "[{\"name\": \"X\"}]"),
            Err(OrreryError::Data(_))
        ));
        let hyperbolic = PHOBOS.replace("0.0151", "1.5");
        assert!(matches!(
            SatelliteSystem::load(PlanetSystem::MARS, &hyperbolic),
            Err(OrreryError::Data(_))
        ));
    }

    #[test]
    fn test_generic_system_from_json() {
        let json = r#"{
            "system": {
                "planet": "Saturn",
                "radius_km": 60268.0,
                "j2": 0.016298,
                "gm": 37931187.0,
                "pole": {"linear": {"alpha": 40.589, "delta": 83.537, "alpha_rate": -0.036, "delta_rate": -0.004}}
            },
            "satellites": [{
                "name": "Titan",
                "model": "kepler",
                "epoch": 2451545.0,
                "semi_major_axis": 1221870.0,
                "eccentricity": 0.0288,
                "inclination": 0.34854,
                "node": 28.060,
                "pericentre": 180.532,
                "mean_anomaly": 163.310
            }]
        }"#;
        let saturn = SatelliteSystem::from_json(json).unwrap();
        assert_eq!(saturn.system().planet, Planet::Saturn);

        let titan = &saturn.satellites()[0].model;
        let r = saturn
            .system()
            .planetocentric(titan, J2000, &EphemerisConfig::default())
            .unwrap()
            .magnitude();
        assert!(r > 1_221_870.0 * (1.0 - 0.0288) && r < 1_221_870.0 * (1.0 + 0.0288));
        // Period from GM: about 15.95 days
        if let SatelliteModel::Kepler(orbit) = titan {
            let period = std::f64::consts::TAU / orbit.mean_motion(saturn.system().gm);
            assert_relative_eq!(period, 15.945, epsilon = 0.01);
        }
    }

    #[test]
    fn test_phobos_stays_close_to_mars() {
        let mars = SatelliteSystem::load(PlanetSystem::MARS, PHOBOS).unwrap();
        let config = EphemerisConfig::default();
        let positions = mars.sky_plane(2451545.0, &config).unwrap();
        assert_eq!(positions[0].name, "Phobos");
        let sky = positions[0].sky;
        let distance = (sky.x * sky.x + sky.y * sky.y + sky.z * sky.z).sqrt();
        assert_relative_eq!(distance, 9_376.0 / 3_396.2, max_relative = 0.02);
    }
}
