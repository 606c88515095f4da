//! Physical and astronomical constants, epochs and calendar landmarks

// Astronomical distances
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;
/// Earth's equatorial radius in kilometers (IAU 1976, as used by Meeus)
pub const EARTH_RADIUS_KM: f64 = 6_378.14;
/// Earth's flattening (IAU 1976)
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257;
/// Equatorial horizontal parallax of the Sun at 1 AU, arcseconds
pub const SOLAR_PARALLAX_ASEC: f64 = 8.794;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// B1950 epoch as Julian date
pub const B1950: f64 = 2_433_282.423_5;
/// B1900 epoch as Julian date (origin of the FK4 precession polynomials)
pub const B1900: f64 = 2_415_020.313_5;
/// Days in a Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;
/// Days in a Julian millennium
pub const JULIAN_MILLENNIUM: f64 = 365_250.0;
/// Days in a tropical century (FK4 precession)
pub const TROPICAL_CENTURY: f64 = 36_524.219_9;
/// Light travel time for one astronomical unit, in days
pub const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

// Angles
/// Mean obliquity of the ecliptic at J2000.0, degrees
pub const OBLIQUITY_J2000: f64 = 23.439_291_1;
/// Constant of aberration, arcseconds
pub const ABERRATION_CONSTANT_ASEC: f64 = 20.495_52;
/// Rotation of the Earth relative to the stars, degrees of sidereal time per solar day
pub const SIDEREAL_RATE: f64 = 360.985_647_366_29;

// Physics
/// Gaussian gravitational constant, degrees per day for a = 1 AU
pub const GAUSS_DEG_PER_DAY: f64 = 0.985_607_668_6;

// Calendar constants
/// First day of Gregorian calendar in Julian day number (1582-10-15)
pub const GREGORIAN_START: i32 = 2_299_161;
