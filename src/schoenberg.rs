use nalgebra::DVector;

use crate::error::{Result, SplineError};
use crate::interpolant::Interpolant;
use crate::knot::check_query;

/// Schoenberg quadratic quasi-interpolant of a function on a uniform grid over `[a, b]`.
///
/// The coefficients are samples of the function at the grid points `a, a + h, ..., b`,
/// guarded by one linearly extrapolated value on each side. Knot values are not reproduced
/// exactly in general, but linear functions are reproduced everywhere.
/// # Example
/// ```
/// use piecewise_spline::{Interpolant, Schoenberg};
/// use assert_approx_eq::assert_approx_eq;
///
/// let spline = Schoenberg::new(|x| 3.0 * x - 1.0, 0.0, 2.0, 4).unwrap();
/// assert_approx_eq!(spline.interpolate(1.3).unwrap(), 2.9, 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Schoenberg {
    lower: f64,
    upper: f64,
    intervals: usize,
    step: f64,
    coefficients: DVector<f64>,
}

impl Schoenberg {
    /// Samples `f` exactly `n + 1` times, once per grid point.
    /// Sample `d[i]` is taken at `a + (i - 1) h`, so `d[1] = f(a)` and `d[n + 1] = f(b)`.
    /// # Errors
    /// [SplineError::InvalidDomain] when `n == 0`, `a >= b`, a bound is not finite or `f`
    /// returns a non-finite sample.
    pub fn new<F>(mut f: F, a: f64, b: f64, n: usize) -> Result<Self>
    where
        F: FnMut(f64) -> f64,
    {
        if !a.is_finite() || !b.is_finite() {
            return Err(SplineError::InvalidDomain(format!("bounds [{a}, {b}] must be finite")));
        }
        if a >= b {
            return Err(SplineError::InvalidDomain(format!("lower bound {a} must be below upper bound {b}")));
        }
        if n == 0 {
            return Err(SplineError::InvalidDomain("grid needs at least one interval".to_string()));
        }

        let step = (b - a) / n as f64;
        let mut d = DVector::<f64>::zeros(n + 3);
        for i in 1..=n + 1 {
            let x = a + (i - 1) as f64 * step;
            d[i] = f(x);
            if !d[i].is_finite() {
                return Err(SplineError::InvalidDomain(format!("f({x}) = {} is not finite", d[i])));
            }
        }
        d[0] = 2.0 * d[1] - d[2];
        d[n + 2] = 2.0 * d[n + 1] - d[n];

        log::debug!("sampled Schoenberg quasi-interpolant on {} grid points over [{}, {}]", n + 1, a, b);
        Ok(Schoenberg { lower: a, upper: b, intervals: n, step, coefficients: d })
    }

    /// Coefficients `d[0..=n+2]`; `d[0]` and `d[n+2]` are the extrapolated guards.
    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    pub fn intervals(&self) -> usize {
        self.intervals
    }

    /// Grid spacing `h = (b - a) / n`.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Range covered by the coefficients, `[a - h/2, b + h/2)`.
    pub fn support(&self) -> (f64, f64) {
        (self.lower - self.step / 2.0, self.upper + self.step / 2.0)
    }

    /// Cell index `k = floor((x - a)/h + 3/2)` and offset `p` of `x` from the cell start.
    /// Cell `k` spans `[a + (k - 3/2) h, a + (k - 1/2) h)` and blends `d[k-1]`, `d[k]`, `d[k+1]`.
    fn locate(&self, x: f64) -> Result<(usize, f64)> {
        let h = self.step;
        let cell = ((x - self.lower) / h + 1.5).floor();
        if !(cell >= 1.0 && cell <= (self.intervals + 1) as f64) {
            let (min, max) = self.support();
            return Err(SplineError::OutOfRange { x, min, max });
        }

        let k = cell as usize;
        let p = x - self.lower - (cell - 1.5) * h;
        Ok((k, p))
    }

    fn evaluate_cell(&self, k: usize, p: f64) -> f64 {
        let d = &self.coefficients;
        let h = self.step;

        let c = (d[k + 1] * p + d[k] * (2.0 * h - p)) / (2.0 * h);
        let e = (d[k] * (p + h) + d[k - 1] * (h - p)) / (2.0 * h);
        (c * p + e * (h - p)) / h
    }
}

impl Interpolant for Schoenberg {
    fn domain(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    fn interpolate(&self, x: f64) -> Result<f64> {
        if !(self.lower <= x && x <= self.upper) {
            return Err(SplineError::OutOfRange { x, min: self.lower, max: self.upper });
        }
        let (k, p) = self.locate(x)?;
        Ok(self.evaluate_cell(k, p))
    }

    /// Evaluates anywhere on [Schoenberg::support]; fails with `OutOfRange` beyond it.
    fn extrapolate(&self, x: f64) -> Result<f64> {
        check_query(x, self.support())?;
        let (k, p) = self.locate(x)?;
        Ok(self.evaluate_cell(k, p))
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn identity_guards() {
        let spline = Schoenberg::new(|x| x, 0.0, 10.0, 10).unwrap();
        let d = spline.coefficients();

        assert_eq!(13, d.len());
        for i in 1..=11 {
            assert_eq!((i - 1) as f64, d[i]);
        }
        assert_eq!(2.0 * d[1] - d[2], d[0]);
        assert_eq!(2.0 * d[11] - d[10], d[12]);
        assert_eq!(-1.0, d[0]);
        assert_eq!(11.0, d[12]);
    }

    #[test]
    fn reproduces_linear_functions() {
        let eps = 1e-9;
        let spline = Schoenberg::new(|x| -0.5 * x + 4.0, -1.0, 3.0, 7).unwrap();

        for x in [-1.0, -0.99, 0.0, 0.4, 1.234, 2.5, 3.0] {
            assert_approx_eq!(spline.interpolate(x).unwrap(), -0.5 * x + 4.0, eps);
        }
        let (min, max) = spline.support();
        for x in [min + 0.01, max - 0.01] {
            assert_approx_eq!(spline.extrapolate(x).unwrap(), -0.5 * x + 4.0, eps);
        }
    }

    #[test]
    fn quadratic_is_shifted_by_quarter_step_squared() {
        let eps = 1e-9;
        let spline = Schoenberg::new(|x| x * x, 0.0, 4.0, 8).unwrap();
        let h = spline.step();

        // cells touching the guards are excluded, they see linearly extrapolated samples
        for x in [0.25, 1.0, 2.3, 3.6] {
            assert_approx_eq!(spline.interpolate(x).unwrap(), x * x + h * h / 4.0, eps);
        }
    }

    #[test]
    fn samples_each_grid_point_once() {
        let mut sampled = Vec::new();
        Schoenberg::new(
            |x| {
                sampled.push(x);
                x.sin()
            },
            1.0,
            2.0,
            4,
        )
        .unwrap();

        assert_eq!(vec![1.0, 1.25, 1.5, 1.75, 2.0], sampled);
    }

    #[test]
    fn continuous_across_cells() {
        let eps = 1e-12;
        let spline = Schoenberg::new(|x: f64| x.sin() + x.powi(3), 0.0, 3.0, 12).unwrap();
        let h = spline.step();

        for k in 1..=spline.intervals() {
            let end_of_cell = spline.evaluate_cell(k, h);
            let start_of_next = spline.evaluate_cell(k + 1, 0.0);
            assert_approx_eq!(end_of_cell, start_of_next, eps);
        }
    }

    #[test]
    fn cell_location() {
        let spline = Schoenberg::new(|x| x, 0.0, 10.0, 10).unwrap();

        assert_eq!((1, 0.5), spline.locate(0.0).unwrap());
        assert_eq!((2, 0.0), spline.locate(0.5).unwrap());
        assert_eq!((11, 0.5), spline.locate(10.0).unwrap());
        assert_eq!((1, 0.0), spline.locate(-0.5).unwrap());
        assert!(spline.locate(-0.6).is_err());
        assert!(spline.locate(10.5).is_err());
    }

    #[test]
    fn out_of_range() {
        let spline = Schoenberg::new(|x| x, 0.0, 10.0, 10).unwrap();

        assert_eq!(
            Err(SplineError::OutOfRange { x: -0.1, min: 0.0, max: 10.0 }),
            spline.interpolate(-0.1)
        );
        assert_approx_eq!(spline.extrapolate(-0.1).unwrap(), -0.1, 1e-9);
        assert!(matches!(spline.extrapolate(11.0), Err(SplineError::OutOfRange { .. })));
        assert!(spline.extrapolate(f64::NAN).is_err());
        assert!(spline.batch_interpolate(&[1.0, 10.5]).is_err());
        assert_eq!(2, spline.batch_extrapolate(&[-0.4, 10.4]).unwrap().len());
        assert!(spline.batch_extrapolate(&[1.0, 11.0]).is_err());
    }

    #[test]
    fn invalid_domain() {
        assert!(matches!(Schoenberg::new(|x| x, 0.0, 1.0, 0), Err(SplineError::InvalidDomain(_))));
        assert!(matches!(Schoenberg::new(|x| x, 1.0, 1.0, 4), Err(SplineError::InvalidDomain(_))));
        assert!(matches!(Schoenberg::new(|x| x, 2.0, 1.0, 4), Err(SplineError::InvalidDomain(_))));
        assert!(matches!(Schoenberg::new(|x| x, f64::NAN, 1.0, 4), Err(SplineError::InvalidDomain(_))));
        assert!(matches!(
            Schoenberg::new(|x| 1.0 / x, 0.0, 1.0, 4),
            Err(SplineError::InvalidDomain(_))
        ));
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let spline = Schoenberg::new(|x: f64| x.exp(), -1.0, 1.0, 16).unwrap();

        for x in [-1.0, -0.3, 0.77, 1.0] {
            let first = spline.interpolate(x).unwrap();
            let second = spline.interpolate(x).unwrap();
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}
