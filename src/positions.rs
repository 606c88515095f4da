//! Apparent positions of solar-system bodies
//!
//! A [`SkyContext`] fixes the instant and the observer and caches what every
//! reduction at that instant needs: ΔT, the dynamical time, nutation,
//! obliquity and the apparent sidereal time at Greenwich. The pipelines then
//! run per body:
//!
//! - Sun: VSOP Earth → FK5 → nutation → aberration (−20.4898″/R)
//! - Moon: lunar series → nutation
//! - planets: VSOP (or mean elements) with light-time → annual aberration →
//!   FK5 → nutation
//! - Pluto and minor bodies: heliocentric J2000 with light-time → astrometric
//!   J2000 → precession → aberration → nutation
//!
//! All pipelines yield geocentric coordinates referred to the true equator
//! and equinox of date; [`SkyContext::topocentric`] and
//! [`SkyContext::horizontal`] take it to the observer.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EphemerisConfig;
use crate::constants::{AU_KM, DAY_S, J2000};
use crate::coordinates::{Ecliptical, Equatorial, GeoLocation, Horizontal, Rectangular};
use crate::framelib::transform::{parallax_from_au, parallax_from_km, semidiameter};
use crate::framelib::{
    ecliptical_to_equatorial, equatorial_to_ecliptical, equatorial_to_horizontal,
    topocentric_equatorial, ECLIPTIC_J2000_TO_EQUATORIAL,
};
use crate::kepler::OrbitalElements;
use crate::lighttime::{retarded, LightTime};
use crate::nutationlib::{aberration_ecliptical, aberration_equatorial, sun_aberration, NutationElements};
use crate::planetlib::{self, Body, Planet};
use crate::precessionlib::{precess_ecliptical, precess_equatorial, PrecessionSystem};
use crate::time::{apparent_sidereal_time, delta_t, julian_centuries};
use crate::{lunar, pluto, OrreryError, Result};

/// Geocentric apparent place of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApparentPosition {
    /// Ecliptic and equinox of date; the distance is in AU
    pub ecliptical: Ecliptical,
    /// True equator and equinox of date
    pub equatorial: Equatorial,
    /// Distance from the centre of the Earth, AU
    pub distance: f64,
    /// Equatorial horizontal parallax, degrees
    pub horizontal_parallax: f64,
    /// Apparent semidiameter, degrees
    pub semidiameter: f64,
}

/// Astrometric place: geometric direction corrected for light-time only,
/// referred to the mean equator and equinox of J2000.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Astrometric {
    pub equatorial: Equatorial,
    /// AU
    pub distance: f64,
    pub light_time: LightTime,
}

/// Instant, observer and the quantities shared by every reduction at that instant
#[derive(Debug, Clone, PartialEq)]
pub struct SkyContext {
    /// Universal time
    pub jd_ut: f64,
    /// Dynamical time, `jd_ut + delta_t`
    pub jd_tt: f64,
    /// TT − UT, seconds
    pub delta_t: f64,
    pub nutation: NutationElements,
    pub mean_obliquity: f64,
    /// Mean obliquity + Δε
    pub true_obliquity: f64,
    /// Apparent sidereal time at Greenwich, degrees
    pub sidereal_time: f64,
    pub location: GeoLocation,
    pub config: EphemerisConfig,
}

impl SkyContext {
    /// Context for a Julian Day in UT
    pub fn new(jd_ut: f64, location: GeoLocation, config: &EphemerisConfig) -> Result<Self> {
        if !jd_ut.is_finite() || jd_ut < 0.0 {
            return Err(OrreryError::Validation(format!(
                "Julian Day must be finite and non-negative, got {jd_ut}"
            )));
        }
        config.validate()?;

        let delta_t = delta_t(jd_ut);
        let jd_tt = jd_ut + delta_t / DAY_S;
        let nutation = NutationElements::new(jd_tt);
        let mean_obliquity = crate::nutationlib::mean_obliquity(jd_tt);
        let true_obliquity = mean_obliquity + nutation.delta_epsilon;
        let sidereal_time = apparent_sidereal_time(jd_ut, nutation.delta_psi, true_obliquity);

        Ok(SkyContext {
            jd_ut,
            jd_tt,
            delta_t,
            nutation,
            mean_obliquity,
            true_obliquity,
            sidereal_time,
            location,
            config: config.clone(),
        })
    }

    /// Context for a Julian Day in TT, UT being derived through ΔT
    pub fn at_tt(jd_tt: f64, location: GeoLocation, config: &EphemerisConfig) -> Result<Self> {
        let mut context = Self::new(jd_tt - delta_t(jd_tt) / DAY_S, location, config)?;
        // ΔT changes by milliseconds over a day; pin TT to the value asked for
        context.jd_tt = jd_tt;
        Ok(context)
    }

    /// Local apparent sidereal time, degrees
    pub fn local_sidereal_time(&self) -> f64 {
        crate::coordinates::angle::normalize360(self.sidereal_time - self.location.longitude)
    }

    /// Apparent place of any body with a pipeline
    pub fn apparent(&self, body: Body) -> Result<ApparentPosition> {
        match body {
            Body::Sun => self.sun_apparent(),
            Body::Moon => Ok(self.moon_apparent()),
            Body::Pluto => self.pluto_apparent(),
            _ => match body.planet() {
                Some(planet) => self.planet_apparent(planet),
                None => Err(OrreryError::Validation(format!("no pipeline for {body}"))),
            },
        }
    }

    pub fn sun_apparent(&self) -> Result<ApparentPosition> {
        let sun = planetlib::sun_geometric(self.jd_tt, &self.config)?;
        let sun = to_fk5(&sun, self.jd_tt);
        let ecliptical = Ecliptical::new(
            sun.lambda + self.nutation.delta_psi + sun_aberration(sun.distance),
            sun.beta,
            sun.distance,
        );
        Ok(self.ecliptical_place(ecliptical, Body::Sun.radius_km()))
    }

    /// The Moon; the ecliptical distance is converted from km to AU
    pub fn moon_apparent(&self) -> ApparentPosition {
        let moon = lunar::moon_geocentric(self.jd_tt);
        let ecliptical = Ecliptical::new(
            moon.lambda + self.nutation.delta_psi,
            moon.beta,
            moon.distance / AU_KM,
        );
        let equatorial = ecliptical_to_equatorial(&ecliptical, self.true_obliquity);
        ApparentPosition {
            ecliptical,
            equatorial,
            distance: ecliptical.distance,
            horizontal_parallax: parallax_from_km(moon.distance),
            semidiameter: semidiameter(Body::Moon.radius_km(), ecliptical.distance),
        }
    }

    pub fn planet_apparent(&self, planet: Planet) -> Result<ApparentPosition> {
        if planet == Planet::Earth {
            return Err(OrreryError::Validation(
                "the Earth has no geocentric position".to_string(),
            ));
        }
        let jd = self.jd_tt;
        let earth = planetlib::heliocentric(Planet::Earth, jd, &self.config)?;

        let geometric = retarded(jd, &self.config, |t| {
            let body = planetlib::heliocentric(planet, t, &self.config)?;
            let geocentric = planetlib::geocentric_from_earth(&body, &earth);
            Ok((geocentric, geocentric.distance))
        })?;
        debug!(
            "{planet} light-time {:.6} d in {} iterations",
            geometric.light_time.tau, geometric.light_time.iterations
        );

        let ecl = geometric.value;
        let (d_lambda, d_beta) = aberration_ecliptical(&ecl, jd);
        let aberrated = to_fk5(
            &Ecliptical::new(ecl.lambda + d_lambda, ecl.beta + d_beta, ecl.distance),
            jd,
        );
        let ecliptical = self.nutation.apply_ecliptical(&aberrated);
        Ok(self.ecliptical_place(ecliptical, planet.equatorial_radius_km()))
    }

    pub fn pluto_apparent(&self) -> Result<ApparentPosition> {
        let astrometric = pluto_astrometric(self.jd_tt, &self.config)?;
        Ok(self.astrometric_place(&astrometric, Body::Pluto.radius_km()))
    }

    /// A body on a heliocentric elliptic orbit; the disk is unknown so the
    /// semidiameter is zero
    pub fn minor_body_apparent(&self, elements: &OrbitalElements) -> Result<ApparentPosition> {
        let astrometric = minor_body_astrometric(elements, self.jd_tt, &self.config)?;
        Ok(self.astrometric_place(&astrometric, 0.0))
    }

    /// Corrects a geocentric apparent place for the observer's position
    pub fn topocentric(&self, position: &ApparentPosition) -> Equatorial {
        topocentric_equatorial(
            &position.equatorial,
            position.horizontal_parallax,
            &self.location,
            self.sidereal_time,
        )
    }

    /// Azimuth and altitude for the observer (no refraction)
    pub fn horizontal(&self, equatorial: &Equatorial) -> Horizontal {
        equatorial_to_horizontal(equatorial, &self.location, self.sidereal_time)
    }

    fn ecliptical_place(&self, ecliptical: Ecliptical, radius_km: f64) -> ApparentPosition {
        ApparentPosition {
            ecliptical,
            equatorial: ecliptical_to_equatorial(&ecliptical, self.true_obliquity),
            distance: ecliptical.distance,
            horizontal_parallax: parallax_from_au(ecliptical.distance),
            semidiameter: semidiameter(radius_km, ecliptical.distance),
        }
    }

    fn astrometric_place(&self, astrometric: &Astrometric, radius_km: f64) -> ApparentPosition {
        let jd = self.jd_tt;
        let mean = precess_equatorial(&astrometric.equatorial, J2000, jd, PrecessionSystem::Fk5);
        let (d_alpha, d_delta) = aberration_equatorial(&mean, jd, self.true_obliquity);
        let aberrated = Equatorial::new(mean.alpha + d_alpha, mean.delta + d_delta);
        let equatorial = self.nutation.apply_equatorial(&aberrated, self.true_obliquity);
        let distance = astrometric.distance;
        ApparentPosition {
            ecliptical: equatorial_to_ecliptical(&equatorial, self.true_obliquity, distance),
            equatorial,
            distance,
            horizontal_parallax: parallax_from_au(distance),
            semidiameter: semidiameter(radius_km, distance),
        }
    }
}

/// Astrometric J2000 place of a body on a heliocentric elliptic orbit
///
/// `jd` is in TT.
pub fn minor_body_astrometric(
    elements: &OrbitalElements,
    jd: f64,
    config: &EphemerisConfig,
) -> Result<Astrometric> {
    elements.validate()?;
    astrometric_j2000(jd, config, |t| elements.heliocentric_position(t, config))
}

/// Astrometric J2000 place of a major planet
///
/// The series position of date is precessed back to J2000 at each retarded
/// instant. `jd` is in TT.
pub fn planet_astrometric(planet: Planet, jd: f64, config: &EphemerisConfig) -> Result<Astrometric> {
    if planet == Planet::Earth {
        return Err(OrreryError::Validation(
            "the Earth has no geocentric position".to_string(),
        ));
    }
    astrometric_j2000(jd, config, |t| {
        let body = planetlib::heliocentric(planet, t, config)?;
        let j2000 = precess_ecliptical(&Ecliptical::new(body.l, body.b, body.r), t, J2000);
        Ok(Rectangular::from_spherical(j2000.lambda, j2000.beta, j2000.distance))
    })
}

/// Astrometric J2000 place of Pluto; `jd` is in TT
pub fn pluto_astrometric(jd: f64, config: &EphemerisConfig) -> Result<Astrometric> {
    astrometric_j2000(jd, config, |t| Ok(pluto::heliocentric(t)?.to_rectangular()))
}

/// Light-time corrected direction from the Earth to a body whose heliocentric
/// position (J2000 ecliptic, AU) is given by `heliocentric`
fn astrometric_j2000<F>(jd: f64, config: &EphemerisConfig, heliocentric: F) -> Result<Astrometric>
where
    F: Fn(f64) -> Result<Rectangular>,
{
    let earth = planetlib::heliocentric(Planet::Earth, jd, config)?;
    let earth = precess_ecliptical(&Ecliptical::new(earth.l, earth.b, earth.r), jd, J2000);
    let earth = Rectangular::from_spherical(earth.lambda, earth.beta, earth.distance);

    let geocentric = retarded(jd, config, |t| {
        let v = heliocentric(t)? - earth;
        Ok((v, v.magnitude()))
    })?;

    let (alpha, delta, distance) = (&*ECLIPTIC_J2000_TO_EQUATORIAL * geocentric.value).to_spherical();
    Ok(Astrometric {
        equatorial: Equatorial::new(alpha, delta),
        distance,
        light_time: geocentric.light_time,
    })
}

/// Converts a position from the VSOP dynamical frame to FK5 (about 0.1″)
fn to_fk5(ecl: &Ecliptical, jd: f64) -> Ecliptical {
    let t = julian_centuries(jd);
    let lambda_prime = (ecl.lambda - 1.397 * t - 0.00031 * t * t).to_radians();
    let (sin, cos) = lambda_prime.sin_cos();
    let d_lambda = -0.09033 + 0.03916 * (cos + sin) * ecl.beta.to_radians().tan();
    let d_beta = 0.03916 * (cos - sin);
    Ecliptical::new(
        ecl.lambda + d_lambda / 3600.0,
        ecl.beta + d_beta / 3600.0,
        ecl.distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn greenwich() -> GeoLocation {
        GeoLocation::new(51.4769, 0.0, 0.0).unwrap()
    }

    fn at_tt(jd: f64) -> SkyContext {
        SkyContext::at_tt(jd, greenwich(), &EphemerisConfig::default()).unwrap()
    }

    #[test]
    fn test_context_time_scales() {
        let sky = SkyContext::new(2451545.0, greenwich(), &EphemerisConfig::default()).unwrap();
        assert_relative_eq!(sky.delta_t, 63.86, epsilon = 0.1);
        // Seconds, since one ulp of a JD near 2.45e6 is already about 40 µs
        assert_relative_eq!((sky.jd_tt - sky.jd_ut) * DAY_S, sky.delta_t, epsilon = 1e-4);
        assert_relative_eq!(sky.true_obliquity, 23.4376, epsilon = 1e-3);
        assert_relative_eq!(sky.local_sidereal_time(), sky.sidereal_time, epsilon = 1e-12);
    }

    #[test]
    fn test_context_rejects_negative_jd() {
        assert!(SkyContext::new(-1.0, greenwich(), &EphemerisConfig::default()).is_err());
        let bad = EphemerisConfig::default().with_kepler_max_iterations(0);
        assert!(SkyContext::new(2451545.0, greenwich(), &bad).is_err());
    }

    #[test]
    fn test_sun_1992_october_13() {
        let sun = at_tt(2448908.5).sun_apparent().unwrap();
        assert_relative_eq!(sun.ecliptical.lambda, 199.906060, epsilon = 1e-4);
        assert_relative_eq!(sun.equatorial.alpha, 198.378121, epsilon = 2e-4);
        assert_relative_eq!(sun.equatorial.delta, -7.783817, epsilon = 2e-4);
        assert_relative_eq!(sun.semidiameter * 3600.0, 959.63 / 0.99760775, epsilon = 0.05);
    }

    #[test]
    fn test_moon_1992_april_12() {
        let moon = at_tt(2448724.5).moon_apparent();
        assert_relative_eq!(moon.ecliptical.lambda, 133.167265, epsilon = 2e-4);
        assert_relative_eq!(moon.equatorial.alpha, 134.688470, epsilon = 2e-4);
        assert_relative_eq!(moon.equatorial.delta, 13.768368, epsilon = 2e-4);
        assert_relative_eq!(moon.horizontal_parallax, 0.991990, epsilon = 1e-6);
        assert_relative_eq!(moon.distance * AU_KM, 368409.7, epsilon = 0.1);
    }

    #[test]
    fn test_earth_has_no_apparent_place() {
        assert!(matches!(
            at_tt(2451545.0).planet_apparent(Planet::Earth),
            Err(OrreryError::Validation(_))
        ));
    }

    #[test]
    fn test_apparent_dispatch_matches_pipelines() {
        let sky = at_tt(2448976.5);
        assert_eq!(sky.apparent(Body::Moon).unwrap(), sky.moon_apparent());
        assert_eq!(
            sky.apparent(Body::Venus).unwrap(),
            sky.planet_apparent(Planet::Venus).unwrap()
        );
    }

    #[test]
    fn test_fk5_correction_is_small() {
        let ecl = Ecliptical::new(200.0, 0.0, 1.0);
        let fk5 = to_fk5(&ecl, 2448908.5);
        assert_relative_eq!((fk5.lambda - ecl.lambda) * 3600.0, -0.09033, epsilon = 1e-4);
    }
}
