use nalgebra::DVector;

use crate::error::{check_divisor, Result, SplineError};
use crate::interpolant::Interpolant;
use crate::knot::{check_query, Knots};
use crate::polynomial::LocalPolynomial;

/// Natural cubic spline through every knot.
///
/// The second derivatives `z` at the knots solve the tridiagonal continuity system with
/// `z[0] = z[last] = 0`. Value, first and second derivative are continuous across knots.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    knots: Knots,
    second_derivatives: DVector<f64>,
    polynomials: Vec<LocalPolynomial>,
}

impl CubicSpline {
    /// Fits natural cubic spline through `(t[i], y[i])`.
    /// # Errors
    /// [SplineError::InvalidDomain] for invalid knots or fewer than 3 of them,
    /// [SplineError::SingularSystem] when an elimination pivot vanishes.
    pub fn new(t: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        let knots = Knots::new(t, y)?;
        if knots.len() < 3 {
            return Err(SplineError::InvalidDomain(
                "natural cubic spline needs at least 3 knots".to_string(),
            ));
        }
        warn_on_spacing_ratio(&knots);

        let second_derivatives = natural_second_derivatives(&knots)?;
        let polynomials = calculate_polynomials(&knots, &second_derivatives);

        log::debug!("fitted natural cubic spline over {} knots", knots.len());
        Ok(CubicSpline { knots, second_derivatives, polynomials })
    }

    /// Rebuilds spline from precomputed second derivatives, one per knot.
    /// # Errors
    /// [SplineError::UnfittedSpline] when `z` is empty or its length differs from the knot count.
    pub fn from_second_derivatives(t: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        let knots = Knots::new(t, y)?;
        if z.is_empty() || z.len() != knots.len() {
            return Err(SplineError::UnfittedSpline);
        }
        if z.iter().any(|v| !v.is_finite()) {
            return Err(SplineError::InvalidDomain("second derivatives must be finite".to_string()));
        }

        let second_derivatives = DVector::from_vec(z);
        let polynomials = calculate_polynomials(&knots, &second_derivatives);

        log::debug!("rebuilt natural cubic spline over {} knots", knots.len());
        Ok(CubicSpline { knots, second_derivatives, polynomials })
    }

    pub fn knots(&self) -> &Knots {
        &self.knots
    }

    /// Second derivative of the spline at each knot.
    pub fn second_derivatives(&self) -> &DVector<f64> {
        &self.second_derivatives
    }

    /// First derivative at `x`; the boundary pieces are continued outside the knots.
    pub fn derivative(&self, x: f64) -> Result<f64> {
        check_query(x, self.domain())?;
        let index = self.knots.find_interval_index(x);
        Ok(self.polynomials[index].derivative(x))
    }
}

impl Interpolant for CubicSpline {
    fn domain(&self) -> (f64, f64) {
        self.knots.domain()
    }

    fn interpolate(&self, x: f64) -> Result<f64> {
        self.knots.check_in_range(x)?;
        let index = self.knots.find_interval_index(x);
        Ok(self.polynomials[index].evaluate(x))
    }

    fn extrapolate(&self, x: f64) -> Result<f64> {
        check_query(x, self.domain())?;
        let index = self.knots.find_interval_index(x);
        Ok(self.polynomials[index].evaluate(x))
    }

    fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        if let Some(x) = x_vector.iter().find(|x| !self.knots.is_in_range(**x)) {
            return Err(self.knots.out_of_range(*x));
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.knots.find_interval_index_with_hint(index, *x);
            results.push(self.polynomials[index].evaluate(*x));
        }
        Ok(results)
    }

    fn batch_extrapolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            check_query(*x, self.domain())?;
            index = self.knots.find_interval_index_with_hint(index, *x);
            results.push(self.polynomials[index].evaluate(*x));
        }
        Ok(results)
    }
}

/// Forward elimination and back substitution over the implicit tridiagonal system
/// `h[i-1] z[i-1] + 2 (h[i-1] + h[i]) z[i] + h[i] z[i+1] = 6 (b[i] - b[i-1])`.
fn natural_second_derivatives(knots: &Knots) -> Result<DVector<f64>> {
    let size = knots.len();
    let y = knots.values();

    let h: Vec<f64> = (0..size - 1).map(|i| knots.spacing(i)).collect();
    let b: Vec<f64> = (0..size - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    // u, v are indexed by knot; entry 0 is unused
    let mut u = vec![0.0; size - 1];
    let mut v = vec![0.0; size - 1];

    u[1] = 2.0 * (h[0] + h[1]);
    v[1] = 6.0 * (b[1] - b[0]);

    for i in 2..size - 1 {
        let pivot = check_divisor(u[i - 1], "elimination pivot")?;
        u[i] = 2.0 * (h[i - 1] + h[i]) - h[i - 1].powi(2) / pivot;
        v[i] = 6.0 * (b[i] - b[i - 1]) - h[i - 1] * v[i - 1] / pivot;
    }

    let mut z = DVector::<f64>::zeros(size);
    for i in (1..size - 1).rev() {
        let pivot = check_divisor(u[i], "back substitution pivot")?;
        z[i] = (v[i] - h[i] * z[i + 1]) / pivot;
    }
    Ok(z)
}

fn calculate_polynomials(knots: &Knots, z: &DVector<f64>) -> Vec<LocalPolynomial> {
    let t = knots.positions();
    let y = knots.values();

    (0..knots.intervals())
        .map(|i| {
            let h = knots.spacing(i);
            let slope = (y[i + 1] - y[i]) / h;
            let linear = -h * z[i + 1] / 6.0 - h * z[i] / 3.0 + slope;
            LocalPolynomial::new(
                t[i],
                vec![y[i], linear, z[i] / 2.0, (z[i + 1] - z[i]) / (6.0 * h)],
            )
        })
        .collect()
}

fn warn_on_spacing_ratio(knots: &Knots) {
    let spacings = (0..knots.intervals()).map(|i| knots.spacing(i));
    let (min, max) = spacings.fold((f64::INFINITY, 0.0_f64), |(min, max), h| (min.min(h), max.max(h)));
    if max / min > 1e8 {
        log::warn!(
            "knot spacings range from {} to {}; second derivatives may lose precision",
            min,
            max
        );
    }
}
