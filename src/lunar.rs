//! Geocentric position of the Moon
//!
//! Truncated ELP-2000/82 in the form given by Meeus (chapter 47): 60 terms in
//! longitude and distance, 60 in latitude, plus additive corrections for the
//! action of Venus, Jupiter and the flattening of the Earth. Accuracy is
//! about 10″ in longitude and 4″ in latitude.
//!
//! Positions are referred to the mean equinox of date; add nutation in
//! longitude for apparent positions.

use crate::coordinates::angle::normalize360;
use crate::coordinates::Ecliptical;
use crate::series::{sum_weighted, PeriodicTerm, Trig};
use crate::time::julian_centuries;

/// Mean distance Earth-Moon used as the origin of the distance series, km
pub const MEAN_DISTANCE_KM: f64 = 385_000.56;

const fn term(multipliers: [i32; 4], amplitude: f64) -> PeriodicTerm<4> {
    PeriodicTerm::new(multipliers, amplitude, 0.0, 0.0)
}

/// Σl: sine terms in D, M, M′, F, units of 1e-6 degree
const LONGITUDE: [PeriodicTerm<4>; 59] = [
    term([0, 0, 1, 0], 6288774.0),
    term([2, 0, -1, 0], 1274027.0),
    term([2, 0, 0, 0], 658314.0),
    term([0, 0, 2, 0], 213618.0),
    term([0, 1, 0, 0], -185116.0),
    term([0, 0, 0, 2], -114332.0),
    term([2, 0, -2, 0], 58793.0),
    term([2, -1, -1, 0], 57066.0),
    term([2, 0, 1, 0], 53322.0),
    term([2, -1, 0, 0], 45758.0),
    term([0, 1, -1, 0], -40923.0),
    term([1, 0, 0, 0], -34720.0),
    term([0, 1, 1, 0], -30383.0),
    term([2, 0, 0, -2], 15327.0),
    term([0, 0, 1, 2], -12528.0),
    term([0, 0, 1, -2], 10980.0),
    term([4, 0, -1, 0], 10675.0),
    term([0, 0, 3, 0], 10034.0),
    term([4, 0, -2, 0], 8548.0),
    term([2, 1, -1, 0], -7888.0),
    term([2, 1, 0, 0], -6766.0),
    term([1, 0, -1, 0], -5163.0),
    term([1, 1, 0, 0], 4987.0),
    term([2, -1, 1, 0], 4036.0),
    term([2, 0, 2, 0], 3994.0),
    term([4, 0, 0, 0], 3861.0),
    term([2, 0, -3, 0], 3665.0),
    term([0, 1, -2, 0], -2689.0),
    term([2, 0, -1, 2], -2602.0),
    term([2, -1, -2, 0], 2390.0),
    term([1, 0, 1, 0], -2348.0),
    term([2, -2, 0, 0], 2236.0),
    term([0, 1, 2, 0], -2120.0),
    term([0, 2, 0, 0], -2069.0),
    term([2, -2, -1, 0], 2048.0),
    term([2, 0, 1, -2], -1773.0),
    term([2, 0, 0, 2], -1595.0),
    term([4, -1, -1, 0], 1215.0),
    term([0, 0, 2, 2], -1110.0),
    term([3, 0, -1, 0], -892.0),
    term([2, 1, 1, 0], -810.0),
    term([4, -1, -2, 0], 759.0),
    term([0, 2, -1, 0], -713.0),
    term([2, 2, -1, 0], -700.0),
    term([2, 1, -2, 0], 691.0),
    term([2, -1, 0, -2], 596.0),
    term([4, 0, 1, 0], 549.0),
    term([0, 0, 4, 0], 537.0),
    term([4, -1, 0, 0], 520.0),
    term([1, 0, -2, 0], -487.0),
    term([2, 1, 0, -2], -399.0),
    term([0, 0, 2, -2], -381.0),
    term([1, 1, 1, 0], 351.0),
    term([3, 0, -2, 0], -340.0),
    term([4, 0, -3, 0], 330.0),
    term([2, -1, 2, 0], 327.0),
    term([0, 2, 1, 0], -323.0),
    term([1, 1, -1, 0], 299.0),
    term([2, 0, 3, 0], 294.0),
];

/// Σr: cosine terms in D, M, M′, F, units of 1e-3 km
const DISTANCE: [PeriodicTerm<4>; 46] = [
    term([0, 0, 1, 0], -20905355.0),
    term([2, 0, -1, 0], -3699111.0),
    term([2, 0, 0, 0], -2955968.0),
    term([0, 0, 2, 0], -569925.0),
    term([0, 1, 0, 0], 48888.0),
    term([0, 0, 0, 2], -3149.0),
    term([2, 0, -2, 0], 246158.0),
    term([2, -1, -1, 0], -152138.0),
    term([2, 0, 1, 0], -170733.0),
    term([2, -1, 0, 0], -204586.0),
    term([0, 1, -1, 0], -129620.0),
    term([1, 0, 0, 0], 108743.0),
    term([0, 1, 1, 0], 104755.0),
    term([2, 0, 0, -2], 10321.0),
    term([0, 0, 1, -2], 79661.0),
    term([4, 0, -1, 0], -34782.0),
    term([0, 0, 3, 0], -23210.0),
    term([4, 0, -2, 0], -21636.0),
    term([2, 1, -1, 0], 24208.0),
    term([2, 1, 0, 0], 30824.0),
    term([1, 0, -1, 0], -8379.0),
    term([1, 1, 0, 0], -16675.0),
    term([2, -1, 1, 0], -12831.0),
    term([2, 0, 2, 0], -10445.0),
    term([4, 0, 0, 0], -11650.0),
    term([2, 0, -3, 0], 14403.0),
    term([0, 1, -2, 0], -7003.0),
    term([2, -1, -2, 0], 10056.0),
    term([1, 0, 1, 0], 6322.0),
    term([2, -2, 0, 0], -9884.0),
    term([0, 1, 2, 0], 5751.0),
    term([2, -2, -1, 0], -4950.0),
    term([2, 0, 1, -2], 4130.0),
    term([4, -1, -1, 0], -3958.0),
    term([3, 0, -1, 0], 3258.0),
    term([2, 1, 1, 0], 2616.0),
    term([4, -1, -2, 0], -1897.0),
    term([0, 2, -1, 0], -2117.0),
    term([2, 2, -1, 0], 2354.0),
    term([4, 0, 1, 0], -1423.0),
    term([0, 0, 4, 0], -1117.0),
    term([4, -1, 0, 0], -1571.0),
    term([1, 0, -2, 0], -1739.0),
    term([0, 0, 2, -2], -4421.0),
    term([0, 2, 1, 0], 1165.0),
    term([2, 0, -1, -2], 8752.0),
];

/// Σb: sine terms in D, M, M′, F, units of 1e-6 degree
const LATITUDE: [PeriodicTerm<4>; 60] = [
    term([0, 0, 0, 1], 5128122.0),
    term([0, 0, 1, 1], 280602.0),
    term([0, 0, 1, -1], 277693.0),
    term([2, 0, 0, -1], 173237.0),
    term([2, 0, -1, 1], 55413.0),
    term([2, 0, -1, -1], 46271.0),
    term([2, 0, 0, 1], 32573.0),
    term([0, 0, 2, 1], 17198.0),
    term([2, 0, 1, -1], 9266.0),
    term([0, 0, 2, -1], 8822.0),
    term([2, -1, 0, -1], 8216.0),
    term([2, 0, -2, -1], 4324.0),
    term([2, 0, 1, 1], 4200.0),
    term([2, 1, 0, -1], -3359.0),
    term([2, -1, -1, 1], 2463.0),
    term([2, -1, 0, 1], 2211.0),
    term([2, -1, -1, -1], 2065.0),
    term([0, 1, -1, -1], -1870.0),
    term([4, 0, -1, -1], 1828.0),
    term([0, 1, 0, 1], -1794.0),
    term([0, 0, 0, 3], -1749.0),
    term([0, 1, -1, 1], -1565.0),
    term([1, 0, 0, 1], -1491.0),
    term([0, 1, 1, 1], -1475.0),
    term([0, 1, 1, -1], -1410.0),
    term([0, 1, 0, -1], -1344.0),
    term([1, 0, 0, -1], -1335.0),
    term([0, 0, 3, 1], 1107.0),
    term([4, 0, 0, -1], 1021.0),
    term([4, 0, -1, 1], 833.0),
    term([0, 0, 1, -3], 777.0),
    term([4, 0, -2, 1], 671.0),
    term([2, 0, 0, -3], 607.0),
    term([2, 0, 2, -1], 596.0),
    term([2, -1, 1, -1], 491.0),
    term([2, 0, -2, 1], -451.0),
    term([0, 0, 3, -1], 439.0),
    term([2, 0, 2, 1], 422.0),
    term([2, 0, -3, -1], 421.0),
    term([2, 1, -1, 1], -366.0),
    term([2, 1, 0, 1], -351.0),
    term([4, 0, 0, 1], 331.0),
    term([2, -1, 1, 1], 315.0),
    term([2, -2, 0, -1], 302.0),
    term([0, 0, 1, 3], -283.0),
    term([2, 1, 1, -1], -229.0),
    term([1, 1, 0, -1], 223.0),
    term([1, 1, 0, 1], 223.0),
    term([0, 1, -2, -1], -220.0),
    term([2, 1, -1, -1], -220.0),
    term([1, 0, 1, 1], -185.0),
    term([2, -1, -2, -1], 181.0),
    term([0, 1, 2, 1], -177.0),
    term([4, 0, -2, -1], 176.0),
    term([4, -1, -1, -1], 166.0),
    term([1, 0, 1, -1], -164.0),
    term([4, 0, 1, -1], 132.0),
    term([1, 0, -1, -1], -119.0),
    term([4, -1, 0, -1], 115.0),
    term([2, -2, 0, 1], 107.0),
];

/// Fundamental arguments of the lunar theory, degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarArguments {
    /// Mean longitude of the Moon L′
    pub mean_longitude: f64,
    /// Mean elongation D
    pub elongation: f64,
    /// Mean anomaly of the Sun M
    pub sun_anomaly: f64,
    /// Mean anomaly of the Moon M′
    pub moon_anomaly: f64,
    /// Argument of latitude F
    pub latitude_argument: f64,
}

impl LunarArguments {
    pub fn new(jd: f64) -> Self {
        let t = julian_centuries(jd);
        let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
        LunarArguments {
            mean_longitude: normalize360(
                218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0
                    - t4 / 65_194_000.0,
            ),
            elongation: normalize360(
                297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545_868.0
                    - t4 / 113_065_000.0,
            ),
            sun_anomaly: normalize360(
                357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24_490_000.0,
            ),
            moon_anomaly: normalize360(
                134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69_699.0
                    - t4 / 14_712_000.0,
            ),
            latitude_argument: normalize360(
                93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3_526_000.0
                    + t4 / 863_310_000.0,
            ),
        }
    }

    /// [D, M, M′, F] in radians, the order used by the term tables
    fn radians(&self) -> [f64; 4] {
        [
            self.elongation.to_radians(),
            self.sun_anomaly.to_radians(),
            self.moon_anomaly.to_radians(),
            self.latitude_argument.to_radians(),
        ]
    }
}

/// Geocentric ecliptical position of the Moon; distance in km
pub fn moon_geocentric(jd: f64) -> Ecliptical {
    let t = julian_centuries(jd);
    let args = LunarArguments::new(jd);
    let radians = args.radians();

    // Terms in M are scaled by the decreasing eccentricity of the Earth's orbit
    let e = 1.0 - 0.002516 * t - 0.0000074 * t * t;
    let weight = |term: &PeriodicTerm<4>| e.powi(term.multipliers[1].abs());

    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479264.290 * t).to_radians();
    let a3 = (313.45 + 481266.484 * t).to_radians();
    let l_prime = args.mean_longitude.to_radians();
    let (m_prime, f) = (radians[2], radians[3]);

    let sigma_l = sum_weighted(&LONGITUDE, 0.0, &radians, Trig::Sin, weight)
        + 3958.0 * a1.sin()
        + 1962.0 * (l_prime - f).sin()
        + 318.0 * a2.sin();
    let sigma_r = sum_weighted(&DISTANCE, 0.0, &radians, Trig::Cos, weight);
    let sigma_b = sum_weighted(&LATITUDE, 0.0, &radians, Trig::Sin, weight)
        - 2235.0 * l_prime.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (l_prime - m_prime).sin()
        - 115.0 * (l_prime + m_prime).sin();

    Ecliptical::new(
        args.mean_longitude + sigma_l / 1e6,
        sigma_b / 1e6,
        MEAN_DISTANCE_KM + sigma_r / 1000.0,
    )
}

/// Longitude of the Moon's mean ascending node Ω, degrees
pub fn mean_ascending_node(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    normalize360(
        125.0445479 - 1934.1362891 * t + 0.0020754 * t * t + t * t * t / 467_441.0
            - t * t * t * t / 60_616_000.0,
    )
}

/// Illuminated fraction of the disk from geocentric Moon and Sun positions
///
/// Both positions are ecliptical with distances in km (Moon) and AU (Sun).
pub fn illuminated_fraction(moon: &Ecliptical, sun: &Ecliptical) -> f64 {
    let (beta, dlon) = (
        moon.beta.to_radians(),
        (moon.lambda - sun.lambda).to_radians(),
    );
    let elongation = (beta.cos() * dlon.cos()).clamp(-1.0, 1.0).acos();
    let sun_km = sun.distance * crate::constants::AU_KM;
    let phase_angle = (sun_km * elongation.sin()).atan2(moon.distance - sun_km * elongation.cos());
    (1.0 + phase_angle.cos()) / 2.0
}
