//! VSOP87-style planetary theories
//!
//! A theory is three series (L, B, R), each a polynomial in τ (Julian
//! millennia from J2000.0) whose coefficients are sums of A·cos(B + C·τ).

use std::borrow::Cow;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::{sum, PeriodicTerm, Trig};
use crate::config::Precision;
use crate::coordinates::angle::normalize360;
use crate::coordinates::Heliocentric;
use crate::time::julian_millennia;
use crate::{OrreryError, Result};

/// A VSOP term: amplitude, phase (rad), frequency (rad / millennium)
pub type VsopTerm = PeriodicTerm<0>;

/// Highest power of τ in VSOP87
pub const MAX_POWER: usize = 5;

lazy_static! {
    static ref HEADER: Regex = Regex::new(
        r"VARIABLE\s+(\d)\s+\((\w+)\)\s+\*T\*\*(\d)\s+(\d+)\s+TERMS"
    )
    .expect("VSOP87 header pattern is valid");
}

/// One coordinate of a theory: term buckets for τ⁰ … τ⁵
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VsopSeries {
    buckets: Vec<Cow<'static, [VsopTerm]>>,
}

impl VsopSeries {
    pub fn new(buckets: Vec<Cow<'static, [VsopTerm]>>) -> Self {
        VsopSeries { buckets }
    }

    /// Series borrowing embedded tables
    pub fn from_static(buckets: &[&'static [VsopTerm]]) -> Self {
        VsopSeries {
            buckets: buckets.iter().map(|&b| Cow::Borrowed(b)).collect(),
        }
    }

    /// Σⱼ τʲ · Σᵢ Aᵢ cos(Bᵢ + Cᵢ τ), in table units
    pub fn evaluate(&self, tau: f64) -> f64 {
        self.buckets
            .iter()
            .rev()
            .fold(0.0, |acc, bucket| acc * tau + sum(bucket, tau, &[], Trig::Cos))
    }

    pub fn buckets(&self) -> &[Cow<'static, [VsopTerm]>] {
        &self.buckets
    }

    pub fn term_count(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    /// Copy keeping only terms with |A| ≥ `min_amplitude` (table units)
    pub fn truncate(&self, min_amplitude: f64) -> Self {
        VsopSeries {
            buckets: self
                .buckets
                .iter()
                .map(|bucket| {
                    Cow::Owned(
                        bucket
                            .iter()
                            .filter(|term| term.amplitude.abs() >= min_amplitude)
                            .copied()
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    fn rescaled(&self, factor: f64) -> Self {
        VsopSeries {
            buckets: self
                .buckets
                .iter()
                .map(|bucket| {
                    Cow::Owned(
                        bucket
                            .iter()
                            .map(|term| {
                                PeriodicTerm::new([], term.amplitude * factor, term.phase, term.frequency)
                            })
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

/// A complete heliocentric theory for one planet
#[derive(Debug, Clone, PartialEq)]
pub struct VsopTheory {
    pub l: VsopSeries,
    pub b: VsopSeries,
    pub r: VsopSeries,
    /// Tier, which fixes the unit of the amplitudes
    pub precision: Precision,
}

impl VsopTheory {
    pub fn new(l: VsopSeries, b: VsopSeries, r: VsopSeries, precision: Precision) -> Self {
        VsopTheory { l, b, r, precision }
    }

    /// Heliocentric position for the instant `jd` (TT)
    pub fn heliocentric(&self, jd: f64) -> Heliocentric {
        let tau = julian_millennia(jd);
        let scale = self.precision.scale();
        Heliocentric::new(
            normalize360((self.l.evaluate(tau) * scale).to_degrees()),
            (self.b.evaluate(tau) * scale).to_degrees(),
            self.r.evaluate(tau) * scale,
        )
    }

    pub fn term_count(&self) -> usize {
        self.l.term_count() + self.b.term_count() + self.r.term_count()
    }

    /// Copy keeping only terms with |A| ≥ `min_amplitude` (table units)
    pub fn truncate(&self, min_amplitude: f64) -> Self {
        VsopTheory {
            l: self.l.truncate(min_amplitude),
            b: self.b.truncate(min_amplitude),
            r: self.r.truncate(min_amplitude),
            precision: self.precision,
        }
    }

    /// Same terms expressed in the amplitude unit of another tier
    pub fn with_precision(&self, precision: Precision) -> Self {
        if precision == self.precision {
            return self.clone();
        }
        let factor = self.precision.scale() / precision.scale();
        VsopTheory {
            l: self.l.rescaled(factor),
            b: self.b.rescaled(factor),
            r: self.r.rescaled(factor),
            precision,
        }
    }

    /// Derives the low tier: rescales to 1e-8 units and drops terms below
    /// `min_amplitude` in those units
    pub fn low_tier(&self, min_amplitude: f64) -> Self {
        self.with_precision(Precision::Low).truncate(min_amplitude)
    }
}

/// Parses a spherical VSOP87 file (versions B or D, or the barycentric
/// spherical variants) into a high-precision theory
///
/// Each block starts with a header line naming the variable (1 = L, 2 = B,
/// 3 = R), the power of τ and the number of terms. Term lines end with the
/// three numbers A, B, C.
pub fn parse_vsop87(text: &str) -> Result<VsopTheory> {
    let mut series: [Vec<Vec<VsopTerm>>; 3] = Default::default();
    let mut current: Option<(usize, usize, usize)> = None;

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = HEADER.captures(line) {
            finish_block(&series, current)?;
            let variable: usize = parse_field(&caps[1], line_no)?;
            let kind = &caps[2];
            let power: usize = parse_field(&caps[3], line_no)?;
            let count: usize = parse_field(&caps[4], line_no)?;

            if kind != "LBR" {
                return Err(OrreryError::Format(format!(
                    "line {}: only spherical (LBR) VSOP87 versions are supported, got {kind}",
                    line_no + 1
                )));
            }
            if !(1..=3).contains(&variable) || power > MAX_POWER {
                return Err(OrreryError::Format(format!(
                    "line {}: unexpected variable {variable} or power {power}",
                    line_no + 1
                )));
            }
            let coordinate = &mut series[variable - 1];
            if coordinate.len() <= power {
                coordinate.resize_with(power + 1, Vec::new);
            }
            coordinate[power].reserve(count);
            current = Some((variable - 1, power, count));
            continue;
        }

        let (variable, power, _) = current.ok_or_else(|| {
            OrreryError::Format(format!("line {}: term before any header", line_no + 1))
        })?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(OrreryError::Format(format!(
                "line {}: expected amplitude, phase and frequency",
                line_no + 1
            )));
        }
        let tail = &fields[fields.len() - 3..];
        let term = PeriodicTerm::new(
            [],
            parse_field(tail[0], line_no)?,
            parse_field(tail[1], line_no)?,
            parse_field(tail[2], line_no)?,
        );
        series[variable][power].push(term);
    }
    finish_block(&series, current)?;

    if series.iter().any(|s| s.is_empty()) {
        return Err(OrreryError::Format(
            "VSOP87 text must contain L, B and R series".to_string(),
        ));
    }

    let [l, b, r] = series.map(|buckets| {
        VsopSeries::new(buckets.into_iter().map(Cow::Owned).collect())
    });
    let theory = VsopTheory::new(l, b, r, Precision::High);
    debug!("Parsed VSOP87 theory with {} terms", theory.term_count());
    Ok(theory)
}

fn finish_block(
    series: &[Vec<Vec<VsopTerm>>; 3],
    current: Option<(usize, usize, usize)>,
) -> Result<()> {
    if let Some((variable, power, expected)) = current {
        let found = series[variable][power].len();
        if found != expected {
            return Err(OrreryError::Format(format!(
                "variable {} power {power}: header announces {expected} terms, found {found}",
                variable + 1
            )));
        }
    }
    Ok(())
}

fn parse_field<T: std::str::FromStr>(field: &str, line_no: usize) -> Result<T> {
    // VSOP87 files occasionally use Fortran 'D' exponents
    let normalized = field.replace(['D', 'd'], "E");
    normalized.parse().map_err(|_| {
        OrreryError::Format(format!("line {}: cannot parse number '{field}'", line_no + 1))
    })
}
