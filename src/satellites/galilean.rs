//! Galilean satellites of Jupiter
//!
//! Low-accuracy closed-form theory: mean longitudes corrected by the main
//! mutual perturbations, with the Earth's and the Sun's positions reduced to
//! a few terms. Good to a few hundredths of a Jupiter radius.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::SkyPlane;
use crate::constants::J2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GalileanMoon {
    Io,
    Europa,
    Ganymede,
    Callisto,
}

impl GalileanMoon {
    pub const ALL: [GalileanMoon; 4] = [
        GalileanMoon::Io,
        GalileanMoon::Europa,
        GalileanMoon::Ganymede,
        GalileanMoon::Callisto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GalileanMoon::Io => "Io",
            GalileanMoon::Europa => "Europa",
            GalileanMoon::Ganymede => "Ganymede",
            GalileanMoon::Callisto => "Callisto",
        }
    }

    /// Mean longitude at the epoch and daily motion, degrees
    fn mean_longitude(&self) -> (f64, f64) {
        match self {
            GalileanMoon::Io => (163.8069, 203.405_864_6),
            GalileanMoon::Europa => (358.4140, 101.291_633_5),
            GalileanMoon::Ganymede => (5.7176, 50.234_518_0),
            GalileanMoon::Callisto => (224.8092, 21.487_980_0),
        }
    }

    fn slot(&self) -> usize {
        match self {
            GalileanMoon::Io => 0,
            GalileanMoon::Europa => 1,
            GalileanMoon::Ganymede => 2,
            GalileanMoon::Callisto => 3,
        }
    }
}

impl fmt::Display for GalileanMoon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sky-plane positions of the four satellites at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GalileanPositions {
    positions: [SkyPlane; 4],
}

impl GalileanPositions {
    pub fn iter(&self) -> impl Iterator<Item = (GalileanMoon, SkyPlane)> + '_ {
        GalileanMoon::ALL.into_iter().map(move |moon| (moon, self[moon]))
    }
}

impl Index<GalileanMoon> for GalileanPositions {
    type Output = SkyPlane;

    fn index(&self, moon: GalileanMoon) -> &SkyPlane {
        &self.positions[moon.slot()]
    }
}

/// Positions of Io, Europa, Ganymede and Callisto at `jd` (TT)
pub fn galilean_positions(jd: f64) -> GalileanPositions {
    let sin = |deg: f64| deg.to_radians().sin();
    let cos = |deg: f64| deg.to_radians().cos();

    let d = jd - J2000;
    // Long-period term in Jupiter's motion
    let v = 172.74 + 0.001_115_88 * d;
    let m = 357.529 + 0.985_600_3 * d;
    let n = 20.020 + 0.083_085_3 * d + 0.329 * sin(v);
    let j = 66.115 + 0.902_517_9 * d - 0.329 * sin(v);

    // Equations of the centre of the Earth and of Jupiter
    let a = 1.915 * sin(m) + 0.020 * sin(2.0 * m);
    let b = 5.555 * sin(n) + 0.168 * sin(2.0 * n);
    let k = j + a - b;

    let earth_r = 1.000_14 - 0.016_71 * cos(m) - 0.000_14 * cos(2.0 * m);
    let jupiter_r = 5.208_72 - 0.252_08 * cos(n) - 0.006_11 * cos(2.0 * n);
    let distance = (jupiter_r * jupiter_r + earth_r * earth_r
        - 2.0 * jupiter_r * earth_r * cos(k))
    .sqrt();
    // Phase angle
    let psi = (earth_r / distance * sin(k)).asin().to_degrees();

    // Light-time, 173 AU per day
    let t = d - distance / 173.0;
    let [u1, u2, u3, u4] = GalileanMoon::ALL.map(|moon| {
        let (l0, rate) = moon.mean_longitude();
        l0 + rate * t + psi - b
    });

    let g = 331.18 + 50.310_482 * t;
    let h = 87.45 + 21.569_231 * t;

    let u = [
        u1 + 0.473 * sin(2.0 * (u1 - u2)),
        u2 + 1.065 * sin(2.0 * (u2 - u3)),
        u3 + 0.165 * sin(g),
        u4 + 0.843 * sin(h),
    ];
    let r = [
        5.9057 - 0.0244 * cos(2.0 * (u1 - u2)),
        9.3966 - 0.0882 * cos(2.0 * (u2 - u3)),
        14.9883 - 0.0216 * cos(g),
        26.3627 - 0.1939 * cos(h),
    ];

    // Jovicentric declination of the Earth
    let lambda = 34.35 + 0.083_091 * d + 0.329 * sin(v) + b;
    let ds = 3.12 * sin(lambda + 42.8);
    let de = ds
        - 2.22 * sin(psi) * cos(lambda + 22.0)
        - 1.30 * (jupiter_r - distance) / distance * sin(lambda - 100.5);

    let mut positions = [SkyPlane::default(); 4];
    for ((slot, &u), &r) in positions.iter_mut().zip(&u).zip(&r) {
        *slot = SkyPlane {
            x: r * sin(u),
            y: -r * cos(u) * sin(de),
            z: r * cos(u) * cos(de),
        };
    }
    GalileanPositions { positions }
}
