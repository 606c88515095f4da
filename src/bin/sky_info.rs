//! Sky information tool
//!
//! Prints the apparent place, the altitude/azimuth and the day's rise,
//! transit and set of the Sun, the Moon and the planets for an observer.
//!
//! Usage:
//!   cargo run --bin sky_info -- --lat 42.3333 --lon -71.0833 --date 1988-03-20T12:00:00 [venus]

use std::fs;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{ArgAction, Parser};
use orrery::coordinates::angle::{Dms, Hms};
use orrery::satellites::galilean_positions;
use orrery::time::{datetime_to_jd, jd_to_datetime, midnight};
use orrery::{
    Body, CelestialObject, EphemerisConfig, GeoLocation, Planet, SkyContext,
};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Apparent positions and rise/transit/set of solar-system bodies",
    long_about = None
)]
struct Args {
    /// Observer latitude, degrees north
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Observer longitude, degrees EAST of Greenwich
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Observer elevation, metres
    #[arg(long, default_value_t = 0.0)]
    elevation: f64,

    /// UTC instant (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS); defaults to now
    #[arg(short, long)]
    date: Option<String>,

    /// Ephemeris configuration (JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Also list the Galilean satellites
    #[arg(long, action = ArgAction::SetTrue)]
    jupiter_moons: bool,

    /// Body to report (all when omitted)
    body: Option<Body>,
}

fn parse_instant(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")?;
    let dt = date.and_hms_opt(0, 0, 0).ok_or("invalid date")?;
    Ok(dt.and_utc())
}

fn format_event(jd0: f64, event: Option<f64>) -> String {
    match event.and_then(|f| jd_to_datetime(jd0 + f)) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

fn format_angle(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}°"))
}

fn print_body(body: Body, sky: &SkyContext, jd0: f64, config: &EphemerisConfig) -> Result<()> {
    let rts = body.rise_transit_set(jd0, &sky.location, config)?;
    let apparent = body.apparent_position(sky)?;
    let horizontal = body.horizontal_position(sky)?;
    println!(
        "{:<8} {:>14} {:>15} {:>11.6} {:>8.2} {:>8.2}  {} {} {}  ({} / {} / {})",
        body.name(),
        Hms::from_degrees(apparent.equatorial.alpha).to_string(),
        Dms::from_decimal(apparent.equatorial.delta).to_string(),
        apparent.distance,
        horizontal.azimuth_from_north(),
        horizontal.altitude,
        format_event(jd0, rts.rise),
        format_event(jd0, rts.transit),
        format_event(jd0, rts.set),
        format_angle(rts.rise_azimuth),
        format_angle(rts.transit_altitude),
        format_angle(rts.set_azimuth),
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EphemerisConfig::from_json(&fs::read_to_string(path)?)?,
        None => EphemerisConfig::default(),
    };
    let location = GeoLocation::from_east_longitude(args.lat, args.lon, args.elevation)?;
    let instant = match &args.date {
        Some(text) => parse_instant(text)?,
        None => Utc::now(),
    };
    let jd = datetime_to_jd(&instant);
    let jd0 = midnight(jd);
    let sky = SkyContext::new(jd, location, &config)?;

    println!("Instant: {} (JD {:.5} UT, ΔT {:.1} s)", instant, jd, sky.delta_t);
    println!(
        "Observer: {} {}, {} m",
        Dms::from_decimal(location.latitude),
        Dms::from_decimal(location.east_longitude()),
        location.elevation
    );
    println!(
        "Local sidereal time: {}\n",
        Hms::from_degrees(sky.local_sidereal_time())
    );
    println!(
        "{:<8} {:>14} {:>15} {:>11} {:>8} {:>8}  {:<17}  {}",
        "Body", "RA", "Dec", "Dist (AU)", "Az", "Alt", "Rise  Tran  Set", "(azimuths, altitude)"
    );
    println!("-------------------------------------------------------------------------------------------------------");

    let bodies: Vec<Body> = match args.body {
        Some(body) => vec![body],
        None => Body::ALL
            .into_iter()
            .filter(|b| b.planet() != Some(Planet::Earth))
            .collect(),
    };
    for body in bodies {
        if let Err(e) = print_body(body, &sky, jd0, &config) {
            println!("{:<8} unavailable: {e}", body.name());
        }
    }

    if args.jupiter_moons {
        println!("\nGalilean satellites (Jupiter radii; X west, Y north):");
        for (moon, position) in galilean_positions(sky.jd_tt).iter() {
            let side = if position.z > 0.0 { "near" } else { "far" };
            println!(
                "{:<9} X {:>7.2}  Y {:>6.2}  {side} side",
                moon.name(),
                position.x,
                position.y
            );
        }
    }

    Ok(())
}
