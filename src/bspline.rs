use nalgebra::DVector;

use crate::error::{check_divisor, Result, SplineError};
use crate::interpolant::Interpolant;
use crate::knot::{check_query, Knots};

/// Quadratic B-spline interpolating `y` at every knot.
///
/// The knots double as the B-spline breakpoints, padded by one spacing on each side. With `n`
/// intervals there are `n + 2` control points and one degree of freedom left after the
/// interpolation conditions; it is fixed by taking the control points of least squared norm.
/// That choice does not keep constant data flat: the curve passes through every knot value but
/// may oscillate between knots.
#[derive(Debug, Clone)]
pub struct BSpline {
    knots: Knots,
    control_points: DVector<f64>,
    spacings: DVector<f64>,
}

impl BSpline {
    /// # Errors
    /// [SplineError::InvalidDomain] for invalid knots,
    /// [SplineError::SingularSystem] when the recurrence meets a zero divisor.
    pub fn new(t: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        let knots = Knots::new(t, y)?;
        let n = knots.intervals();
        let y = knots.values();

        let mut h = DVector::<f64>::zeros(n + 2);
        for i in 1..=n {
            h[i] = knots.spacing(i - 1);
        }
        h[0] = h[1];
        h[n + 1] = h[n];

        // a[i] = gam + del * a[0], accumulated into the least-squares seed -p/q
        let mut del = -1.0;
        let mut gam = 2.0 * y[0];
        let mut p = del * gam;
        let mut q = 2.0;
        for i in 1..=n {
            let r = h[i + 1] / check_divisor(h[i], "knot spacing")?;
            del = -r * del;
            gam = -r * gam + (r + 1.0) * y[i];
            p += gam * del;
            q += del * del;
        }

        let mut a = DVector::<f64>::zeros(n + 2);
        a[0] = -p / check_divisor(q, "recurrence norm")?;
        for i in 1..=n + 1 {
            let divisor = check_divisor(h[i - 1], "knot spacing")?;
            a[i] = ((h[i - 1] + h[i]) * y[i - 1] - h[i] * a[i - 1]) / divisor;
        }
        if a.iter().any(|v| !v.is_finite()) {
            return Err(SplineError::SingularSystem(
                "control point recurrence overflowed".to_string(),
            ));
        }

        log::debug!("fitted quadratic B-spline over {} knots", knots.len());
        Ok(BSpline { knots, control_points: a, spacings: h })
    }

    pub fn knots(&self) -> &Knots {
        &self.knots
    }

    /// Control points `a[0..=n+1]`.
    pub fn control_points(&self) -> &DVector<f64> {
        &self.control_points
    }

    /// Knot spacings `h[0..=n+1]`, with `h[0] = h[1]` and `h[n+1] = h[n]` as padding.
    pub fn spacings(&self) -> &DVector<f64> {
        &self.spacings
    }

    /// Evaluates the quadratic piece over interval `index` at `x` by two rounds of blending.
    fn evaluate_piece(&self, index: usize, x: f64) -> Result<f64> {
        let t = self.knots.positions();
        let a = &self.control_points;
        let h = &self.spacings;
        let i = index + 1;

        let d = (a[i + 1] * (x - t[i - 1]) + a[i] * (t[i] - x + h[i + 1]))
            / check_divisor(h[i] + h[i + 1], "combined spacing")?;
        let e = (a[i] * (x - t[i - 1] + h[i - 1]) + a[i - 1] * (t[i - 1] - x + h[i]))
            / check_divisor(h[i - 1] + h[i], "combined spacing")?;

        Ok((d * (x - t[i - 1]) + e * (t[i] - x)) / check_divisor(h[i], "knot spacing")?)
    }
}

impl Interpolant for BSpline {
    fn domain(&self) -> (f64, f64) {
        self.knots.domain()
    }

    fn interpolate(&self, x: f64) -> Result<f64> {
        self.knots.check_in_range(x)?;
        self.evaluate_piece(self.knots.find_interval_index(x), x)
    }

    fn extrapolate(&self, x: f64) -> Result<f64> {
        check_query(x, self.domain())?;
        self.evaluate_piece(self.knots.find_interval_index(x), x)
    }

    fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            self.knots.check_in_range(*x)?;
            index = self.knots.find_interval_index_with_hint(index, *x);
            results.push(self.evaluate_piece(index, *x)?);
        }
        Ok(results)
    }
}
