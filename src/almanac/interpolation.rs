//! Interpolation and root finding over evenly spaced samples
//!
//! The rise/transit/set search works on short stretches of a smooth
//! function known at three points. Positions are interpolated with a
//! Lagrange polynomial; crossings are located on the parabola through the
//! start, middle and end of each stretch.

use crate::{OrreryError, Result};

/// Values of the interpolating polynomial through `(xs[i], ys[i])` at `x`
///
/// Nodes need not be evenly spaced but must be distinct.
pub fn lagrange(xs: &[f64], ys: &[f64], x: f64) -> Result<f64> {
    if xs.len() != ys.len() || xs.is_empty() {
        return Err(OrreryError::Validation(format!(
            "Lagrange interpolation needs matching, non-empty nodes and values ({} vs {})",
            xs.len(),
            ys.len()
        )));
    }

    let mut value = 0.0;
    for (i, (&xi, &yi)) in xs.iter().zip(ys).enumerate() {
        let mut basis = 1.0;
        for (j, &xj) in xs.iter().enumerate() {
            if i == j {
                continue;
            }
            let span = xi - xj;
            if span == 0.0 {
                return Err(OrreryError::Validation(format!(
                    "Lagrange nodes must be distinct, {xi} appears twice"
                )));
            }
            basis *= (x - xj) / span;
        }
        value += basis * yi;
    }
    Ok(value)
}

/// Three-point interpolation at nodes 0, ½ and 1
///
/// The quadratic form of [`lagrange`] for the half-day and half-hour
/// sampling used throughout the almanac.
pub fn interpolate3(y: &[f64; 3], n: f64) -> f64 {
    let c = y[0];
    let b = 4.0 * y[1] - 3.0 * y[0] - y[2];
    let a = 2.0 * (y[2] - 2.0 * y[1] + y[0]);
    (a * n + b) * n + c
}

/// y(r) = a·r² + b·r + c through samples at r = 0, ½, 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parabola {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// A zero of a [`Parabola`] and the direction it is crossed in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Position of the zero, in [0, 1)
    pub at: f64,
    /// True when the function goes from negative to positive
    pub rising: bool,
}

impl Parabola {
    /// Fits the parabola through (0, y0), (½, y1), (1, y2)
    pub fn through(y0: f64, y1: f64, y2: f64) -> Self {
        Parabola {
            a: 2.0 * (y2 - 2.0 * y1 + y0),
            b: 4.0 * y1 - 3.0 * y0 - y2,
            c: y0,
        }
    }

    pub fn value(&self, r: f64) -> f64 {
        (self.a * r + self.b) * r + self.c
    }

    pub fn slope(&self, r: f64) -> f64 {
        2.0 * self.a * r + self.b
    }

    /// Position of the extremum, if the curve is not a line
    pub fn vertex(&self) -> Option<f64> {
        (self.a.abs() > f64::EPSILON).then(|| -self.b / (2.0 * self.a))
    }

    /// Zeros in [0, 1), ascending
    pub fn crossings(&self) -> Vec<Crossing> {
        let scale = self.a.abs().max(self.b.abs()).max(self.c.abs());
        let mut roots = Vec::with_capacity(2);

        if self.a.abs() <= 1e-12 * scale {
            // Degenerates to b·r + c
            if self.b != 0.0 {
                roots.push(-self.c / self.b);
            }
        } else {
            let discriminant = self.b * self.b - 4.0 * self.a * self.c;
            if discriminant >= 0.0 {
                let root = discriminant.sqrt();
                // Cancellation-free form of the quadratic formula
                let q = -0.5 * (self.b + self.b.signum() * root);
                if q != 0.0 {
                    roots.push(q / self.a);
                    roots.push(self.c / q);
                } else {
                    roots.push(0.0);
                }
            }
        }

        roots.retain(|r| (0.0..1.0).contains(r));
        roots.sort_by(|x, y| x.total_cmp(y));
        roots.dedup();
        roots
            .into_iter()
            .map(|at| Crossing {
                at,
                rising: self.slope(at) > 0.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_lagrange_reproduces_cubic() {
        let f = |x: f64| 2.0 * x * x * x - x + 3.0;
        let xs = [-1.0, 0.0, 1.5, 2.0];
        let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
        assert_relative_eq!(lagrange(&xs, &ys, 0.7).unwrap(), f(0.7), epsilon = 1e-12);
    }

    #[test]
    fn test_lagrange_rejects_bad_nodes() {
        assert!(lagrange(&[0.0, 1.0], &[1.0], 0.5).is_err());
        assert!(lagrange(&[1.0, 1.0], &[1.0, 2.0], 0.5).is_err());
        assert!(lagrange(&[], &[], 0.5).is_err());
    }

    #[test]
    fn test_interpolate3_matches_lagrange() {
        // Venus right ascension, 1988 March 19–21 (hours, aligned)
        let y = [2.782_079_2, 2.852_197_6, 2.922_106_2];
        for n in [0.0, 0.25, 0.51766, 1.0] {
            assert_relative_eq!(
                interpolate3(&y, n),
                lagrange(&[0.0, 0.5, 1.0], &y, n).unwrap(),
                epsilon = 1e-12
            );
        }
    }

    #[rstest]
    #[case(-1.0, 0.0, 1.0, 0.5, true)]
    #[case(1.0, 0.0, -1.0, 0.5, false)]
    #[case(-0.4, 0.1, 0.6, 0.4, true)]
    #[case(-0.75, 0.0, 1.25, 0.5, true)]
    fn test_single_crossing(
        #[case] y0: f64,
        #[case] y1: f64,
        #[case] y2: f64,
        #[case] expected: f64,
        #[case] rising: bool,
    ) {
        let crossings = Parabola::through(y0, y1, y2).crossings();
        assert_eq!(crossings.len(), 1);
        assert_relative_eq!(crossings[0].at, expected, epsilon = 1e-12);
        assert_eq!(crossings[0].rising, rising);
    }

    #[test]
    fn test_double_crossing_in_order() {
        // (r - 0.2)(r - 0.7) sampled at 0, ½, 1
        let f = |r: f64| (r - 0.2) * (r - 0.7);
        let crossings = Parabola::through(f(0.0), f(0.5), f(1.0)).crossings();
        assert_eq!(crossings.len(), 2);
        assert_relative_eq!(crossings[0].at, 0.2, epsilon = 1e-12);
        assert!(!crossings[0].rising);
        assert_relative_eq!(crossings[1].at, 0.7, epsilon = 1e-12);
        assert!(crossings[1].rising);
    }

    #[test]
    fn test_no_crossing_and_half_open_interval() {
        assert!(Parabola::through(1.0, 2.0, 1.5).crossings().is_empty());
        // A zero at r = 1 belongs to the next interval
        assert!(Parabola::through(-1.0, -0.5, 0.0).crossings().is_empty());
        let at_start = Parabola::through(0.0, 0.5, 1.0).crossings();
        assert_eq!(at_start.len(), 1);
        assert_eq!(at_start[0].at, 0.0);
    }

    #[test]
    fn test_vertex() {
        let p = Parabola::through(0.0, 1.0, 0.0);
        assert_relative_eq!(p.vertex().unwrap(), 0.5);
        assert_relative_eq!(p.value(0.5), 1.0);
        assert!(Parabola::through(0.0, 0.5, 1.0).vertex().is_none());
    }
}
