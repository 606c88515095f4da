//! Periodic-series evaluation
//!
//! Every body theory in the crate is a table of periodic terms
//!
//! ```text
//!     A · trig(B + C·t + k₁·arg₁ + … + kₙ·argₙ)
//! ```
//!
//! summed by the same routine. VSOP-style planetary theories use the
//! plain A·cos(B + C·t) form grouped by power of time ([`vsop`]); the lunar,
//! Pluto and satellite theories use integer multipliers of fundamental
//! arguments. All angles handed to the summation are radians.

pub mod dataset;
mod earth_vsop87d;
pub mod vsop;

pub use dataset::{install_dataset, TermDataset};
pub use vsop::{parse_vsop87, VsopSeries, VsopTerm, VsopTheory};

/// Trigonometric function applied to a term's argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trig {
    Sin,
    Cos,
}

impl Trig {
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Trig::Sin => x.sin(),
            Trig::Cos => x.cos(),
        }
    }
}

/// One term of a periodic series
///
/// `N` is the number of fundamental arguments the term combines through
/// integer multipliers (0 for VSOP-style terms).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicTerm<const N: usize> {
    pub multipliers: [i32; N],
    pub amplitude: f64,
    pub phase: f64,
    pub frequency: f64,
}

impl<const N: usize> PeriodicTerm<N> {
    pub const fn new(multipliers: [i32; N], amplitude: f64, phase: f64, frequency: f64) -> Self {
        PeriodicTerm {
            multipliers,
            amplitude,
            phase,
            frequency,
        }
    }

    /// Argument B + C·t + Σ kⱼ·argⱼ in radians
    #[inline]
    pub fn argument(&self, t: f64, args: &[f64; N]) -> f64 {
        self.multipliers
            .iter()
            .zip(args.iter())
            .fold(self.phase + self.frequency * t, |acc, (&k, &arg)| {
                acc + k as f64 * arg
            })
    }

    #[inline]
    pub fn evaluate(&self, t: f64, args: &[f64; N], trig: Trig) -> f64 {
        self.amplitude * trig.apply(self.argument(t, args))
    }
}

/// Σ A·trig(argument) over a table
pub fn sum<const N: usize>(terms: &[PeriodicTerm<N>], t: f64, args: &[f64; N], trig: Trig) -> f64 {
    terms.iter().map(|term| term.evaluate(t, args, trig)).sum()
}

/// Like [`sum`], with each term's amplitude multiplied by `weight(term)`
///
/// Used where a theory scales some terms by a time-dependent factor, such as
/// the decreasing eccentricity of the Earth's orbit in the lunar series.
pub fn sum_weighted<const N: usize, F>(
    terms: &[PeriodicTerm<N>],
    t: f64,
    args: &[f64; N],
    trig: Trig,
    weight: F,
) -> f64
where
    F: Fn(&PeriodicTerm<N>) -> f64,
{
    terms
        .iter()
        .map(|term| weight(term) * term.evaluate(t, args, trig))
        .sum()
}

/// Evaluates c₀ + c₁·t + c₂·t² + … by Horner's scheme
pub fn polynomial(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}
