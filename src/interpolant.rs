use crate::error::Result;

/// Common evaluation surface of every fitted spline family.
///
/// Implementors are built once and only read afterwards, so a fitted value can be shared
/// between threads and swapped behind `&dyn Interpolant` without touching call sites.
/// # Example
/// ```
/// use piecewise_spline::{BSpline, CubicSpline, Interpolant, PiecewiseLinear};
///
/// let t = vec![0.0, 1.0, 2.0, 3.0];
/// let y = vec![0.0, 1.0, 0.0, 1.0];
/// let fitted: Vec<Box<dyn Interpolant>> = vec![
///     Box::new(PiecewiseLinear::new(t.clone(), y.clone()).unwrap()),
///     Box::new(CubicSpline::new(t.clone(), y.clone()).unwrap()),
///     Box::new(BSpline::new(t, y).unwrap()),
/// ];
///
/// for spline in &fitted {
///     assert!((spline.interpolate(2.0).unwrap() - 0.0).abs() < 1e-9);
///     assert!(spline.interpolate(3.5).is_err());
/// }
/// ```
pub trait Interpolant {
    /// Closed range on which [Interpolant::interpolate] is defined.
    fn domain(&self) -> (f64, f64);

    /// Value at `x`. Fails with `OutOfRange` when `x` is outside [Interpolant::domain].
    fn interpolate(&self, x: f64) -> Result<f64>;

    /// Value at `x`, continuing the boundary pieces outside [Interpolant::domain].
    fn extrapolate(&self, x: f64) -> Result<f64>;

    /// Interpolates every query; fails on the first one outside the domain.
    fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        x_vector.iter().map(|x| self.interpolate(*x)).collect()
    }

    /// Extrapolates every query; fails on the first one the family cannot evaluate.
    fn batch_extrapolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        x_vector.iter().map(|x| self.extrapolate(*x)).collect()
    }
}
