//! # Angle Primitives Module
//!
//! Degree/radian conversion, range reduction, unwrapping of angle sequences
//! and sexagesimal (DMS / HMS) representations.
//!
//! All public angles in this crate are plain `f64` degrees. Longitudes,
//! azimuths and right ascensions live in [0, 360); latitudes and declinations
//! in [-90, 90].
//!
//! ## Sexagesimal grammar
//!
//! - DMS: `±DD° MM′ SS.ss″` (ASCII `'` and `"` are accepted as well)
//! - HMS: `HHh MMm SS.sss s`
//!
//! Round trips between decimal and sexagesimal forms compare equal within
//! 0.01″ (DMS) or 0.001 s of time (HMS).
//!
//! ## Examples
//!
//! ```rust
//! use orrery::coordinates::angle::{normalize360, Dms};
//!
//! assert_eq!(normalize360(-30.0), 330.0);
//!
//! let dms: Dms = "-23° 26′ 21.45″".parse().unwrap();
//! assert!((dms.to_decimal() + 23.439291).abs() < 1e-5);
//! ```

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{OrreryError, Result};

lazy_static! {
    static ref DMS_PATTERN: Regex =
        Regex::new(r#"^\s*([+-]?)(\d+)\s*[°d]\s*(\d+)\s*[′']\s*(\d+(?:\.\d+)?)\s*[″"]\s*$"#)
            .expect("DMS pattern is valid");
    static ref HMS_PATTERN: Regex =
        Regex::new(r"^\s*(\d+)\s*h\s*(\d+)\s*m\s*(\d+(?:\.\d+)?)\s*s\s*$")
            .expect("HMS pattern is valid");
}

/// Equality tolerance for DMS values, arcseconds
pub const DMS_TOLERANCE_ASEC: f64 = 0.01;
/// Equality tolerance for HMS values, seconds of time
pub const HMS_TOLERANCE_SEC: f64 = 0.001;

/// Converts degrees to radians
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts radians to degrees
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Reduces an angle to the range [0, 360)
///
/// Defined for negative and very large inputs; the result of reducing an
/// already reduced angle is the angle itself.
pub fn normalize360(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Reduces an angle to the range [-180, 180)
pub fn normalize180(angle: f64) -> f64 {
    let reduced = normalize360(angle);
    if reduced >= 180.0 {
        reduced - 360.0
    } else {
        reduced
    }
}

/// Removes 0°/360° discontinuities from a sequence of angles in place
///
/// Every element after the first is shifted by whole turns so that the step
/// from its predecessor does not exceed 180°. Needed before interpolating
/// right ascensions or longitudes.
pub fn align(values: &mut [f64]) {
    for i in 1..values.len() {
        let previous = values[i - 1];
        while values[i] - previous > 180.0 {
            values[i] -= 360.0;
        }
        while values[i] - previous < -180.0 {
            values[i] += 360.0;
        }
    }
}

/// Returns an aligned copy of a sequence of angles
pub fn aligned(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    align(&mut out);
    out
}

/// Angular separation between two points given as (longitude, latitude) pairs
///
/// Works for any spherical frame (α/δ, λ/β). Inputs and result in degrees.
pub fn separation(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (l1, b1, l2, b2) = (
        to_radians(lon1),
        to_radians(lat1),
        to_radians(lon2),
        to_radians(lat2),
    );
    let dl = l2 - l1;
    // Vincenty form, stable for both tiny and near-antipodal separations
    let num = ((b2.cos() * dl.sin()).powi(2)
        + (b1.cos() * b2.sin() - b1.sin() * b2.cos() * dl.cos()).powi(2))
    .sqrt();
    let den = b1.sin() * b2.sin() + b1.cos() * b2.cos() * dl.cos();
    to_degrees(num.atan2(den))
}

/// Carries rounded seconds/minutes into the next unit
fn carry(mut whole: u32, mut minutes: u32, mut seconds: f64) -> (u32, u32, f64) {
    if seconds >= 60.0 {
        seconds -= 60.0;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        whole += 1;
    }
    (whole, minutes, seconds)
}

/// Splits a non-negative magnitude into whole units, minutes and seconds
fn split_sexagesimal(magnitude: f64) -> (u32, u32, f64) {
    let whole = magnitude.floor();
    let minutes = ((magnitude - whole) * 60.0).floor();
    let seconds = ((magnitude - whole) * 60.0 - minutes) * 60.0;
    carry(whole as u32, minutes as u32, seconds.max(0.0))
}

fn parse_component(value: &str, what: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| OrreryError::Format(format!("invalid {what} component '{value}'")))
}

/// Whole-number component; the patterns only admit digits, so a failure is overflow
fn parse_whole(value: &str, what: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| {
        OrreryError::Validation(format!("{what} component '{value}' exceeds {}", u32::MAX))
    })
}

fn check_sexagesimal_range(minutes: f64, seconds: f64) -> Result<()> {
    if !(0.0..60.0).contains(&minutes) {
        return Err(OrreryError::Validation(format!(
            "minutes must be in [0, 60), got {minutes}"
        )));
    }
    if !(0.0..60.0).contains(&seconds) {
        return Err(OrreryError::Validation(format!(
            "seconds must be in [0, 60), got {seconds}"
        )));
    }
    Ok(())
}

/// Angle in degrees, minutes and seconds of arc
///
/// The sign is stored separately from the magnitude: `-1`, `+1`, or `0`
/// when the angle is exactly zero.
#[derive(Debug, Clone, Copy)]
pub struct Dms {
    pub sign: i8,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    /// Creates a DMS value, rejecting minutes or seconds outside [0, 60)
    pub fn new(sign: i8, degrees: u32, minutes: u32, seconds: f64) -> Result<Self> {
        check_sexagesimal_range(minutes as f64, seconds)?;
        let magnitude_is_zero = degrees == 0 && minutes == 0 && seconds == 0.0;
        let sign = if magnitude_is_zero { 0 } else { sign.signum() };
        if sign == 0 && !magnitude_is_zero {
            return Err(OrreryError::Validation(
                "sign 0 is reserved for a zero angle".to_string(),
            ));
        }
        Ok(Self {
            sign,
            degrees,
            minutes,
            seconds,
        })
    }

    /// Splits decimal degrees into a DMS value
    pub fn from_decimal(degrees: f64) -> Self {
        let sign = if degrees > 0.0 {
            1
        } else if degrees < 0.0 {
            -1
        } else {
            0
        };
        let (d, m, s) = split_sexagesimal(degrees.abs());
        Self {
            sign,
            degrees: d,
            minutes: m,
            seconds: s,
        }
    }

    /// Returns the value in decimal degrees
    pub fn to_decimal(&self) -> f64 {
        self.sign as f64
            * (self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0)
    }
}

impl PartialEq for Dms {
    fn eq(&self, other: &Self) -> bool {
        (self.to_decimal() - other.to_decimal()).abs() * 3600.0 < DMS_TOLERANCE_ASEC
    }
}

impl FromStr for Dms {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = DMS_PATTERN
            .captures(s)
            .ok_or_else(|| OrreryError::Format(format!("'{s}' is not a DMS angle")))?;
        let negative = &caps[1] == "-";
        let degrees = parse_whole(&caps[2], "degrees")?;
        let minutes = parse_whole(&caps[3], "minutes")?;
        let seconds = parse_component(&caps[4], "seconds")?;
        Dms::new(if negative { -1 } else { 1 }, degrees, minutes, seconds)
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.seconds * 100.0).round() / 100.0;
        let (d, m, s) = carry(self.degrees, self.minutes, rounded);
        let sign = if self.sign < 0 { '-' } else { '+' };
        write!(f, "{sign}{d:02}° {m:02}′ {s:05.2}″")
    }
}

/// Angle in hours, minutes and seconds of time (unsigned)
#[derive(Debug, Clone, Copy)]
pub struct Hms {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Hms {
    /// Creates an HMS value, rejecting minutes or seconds outside [0, 60)
    pub fn new(hours: u32, minutes: u32, seconds: f64) -> Result<Self> {
        check_sexagesimal_range(minutes as f64, seconds)?;
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Splits decimal hours into an HMS value
    pub fn from_hours(hours: f64) -> Self {
        let (h, m, s) = split_sexagesimal(hours.rem_euclid(24.0));
        Self {
            hours: h,
            minutes: m,
            seconds: s,
        }
    }

    /// Converts an angle in degrees (e.g. a right ascension) to HMS
    pub fn from_degrees(degrees: f64) -> Self {
        Self::from_hours(normalize360(degrees) / 15.0)
    }

    /// Returns the value in decimal hours
    pub fn to_hours(&self) -> f64 {
        self.hours as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0
    }

    /// Returns the value in degrees
    pub fn to_degrees(&self) -> f64 {
        self.to_hours() * 15.0
    }
}

impl PartialEq for Hms {
    fn eq(&self, other: &Self) -> bool {
        (self.to_hours() - other.to_hours()).abs() * 3600.0 < HMS_TOLERANCE_SEC
    }
}

impl FromStr for Hms {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = HMS_PATTERN
            .captures(s)
            .ok_or_else(|| OrreryError::Format(format!("'{s}' is not an HMS angle")))?;
        let hours = parse_whole(&caps[1], "hours")?;
        let minutes = parse_whole(&caps[2], "minutes")?;
        let seconds = parse_component(&caps[3], "seconds")?;
        Hms::new(hours, minutes, seconds)
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.seconds * 1000.0).round() / 1000.0;
        let (h, m, s) = carry(self.hours, self.minutes, rounded);
        write!(f, "{h:02}h {m:02}m {s:06.3}s")
    }
}
