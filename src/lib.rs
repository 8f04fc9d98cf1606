//! Library of piecewise-polynomial interpolation of sampled functions.
//! Coefficients are built once from knots (or from a function, for Schoenberg) and then
//! evaluated at any number of points.
//!
//! Families:
//! - [first_degree_eval] and [PiecewiseLinear] - piecewise-linear interpolation,
//! - [CubicSpline] - natural cubic spline,
//! - [BSpline] - quadratic interpolating B-spline,
//! - [Schoenberg] - quadratic quasi-interpolant on a uniform grid.
//!
//! All fitted families implement [Interpolant].
//!
//! # Example
//! ```
//! use piecewise_spline::{CubicSpline, Interpolant};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let spline = CubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 0.0, 1.0]).unwrap();
//!
//! assert_approx_eq!(1.0, spline.interpolate(1.0).unwrap(), 1e-9);
//! assert_approx_eq!(0.75, spline.interpolate(0.5).unwrap(), 1e-9);
//! assert!(spline.interpolate(4.0).is_err());
//! ```

mod bspline;
mod error;
mod interpolant;
mod knot;
mod linear;
mod polynomial;
mod schoenberg;
mod spline;

pub use bspline::BSpline;
pub use error::{Result, SplineError};
pub use interpolant::Interpolant;
pub use knot::Knots;
pub use linear::{first_degree_eval, PiecewiseLinear};
pub use schoenberg::Schoenberg;
pub use spline::CubicSpline;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn fitted_splines_are_shareable() {
        assert_send_sync::<PiecewiseLinear>();
        assert_send_sync::<CubicSpline>();
        assert_send_sync::<BSpline>();
        assert_send_sync::<Schoenberg>();
    }

    #[test]
    fn families_agree_on_knot_values() {
        let t = vec![0.0, 0.5, 1.5, 2.0, 3.0];
        let y = vec![1.0, -1.0, 2.0, 0.0, 0.5];

        let fitted: Vec<Box<dyn Interpolant>> = vec![
            Box::new(PiecewiseLinear::new(t.clone(), y.clone()).unwrap()),
            Box::new(CubicSpline::new(t.clone(), y.clone()).unwrap()),
            Box::new(BSpline::new(t.clone(), y.clone()).unwrap()),
        ];

        for spline in &fitted {
            assert_eq!((0.0, 3.0), spline.domain());
            let values = spline.batch_interpolate(&t).unwrap();
            for i in 0..t.len() {
                assert!((values[i] - y[i]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn degenerate_knots_never_build() {
        let t = vec![0.0, 0.0, 1.0];
        let y = vec![0.0, 1.0, 2.0];

        assert!(PiecewiseLinear::new(t.clone(), y.clone()).is_err());
        assert!(CubicSpline::new(t.clone(), y.clone()).is_err());
        assert!(BSpline::new(t, y).is_err());
    }
}
