use crate::error::{Result, SplineError};
use crate::interpolant::Interpolant;
use crate::knot::{check_query, locate_interval, Knots};
use crate::polynomial::LocalPolynomial;

/// Evaluates the first degree spline through `(t[i], y[i])` at `x`.
///
/// Queries outside `[t[0], t[n]]` continue the nearest segment. Only the located interval is
/// checked, so unsorted or repeated knots elsewhere in `t` go unnoticed.
/// # Example
/// ```
/// use piecewise_spline::first_degree_eval;
///
/// assert_eq!(5.0, first_degree_eval(&[0.0, 1.0], &[0.0, 10.0], 0.5).unwrap());
/// assert_eq!(-10.0, first_degree_eval(&[0.0, 1.0], &[0.0, 10.0], -1.0).unwrap());
/// ```
/// # Errors
/// [SplineError::InvalidDomain] for fewer than 2 knots or mismatched lengths,
/// [SplineError::DegenerateInterval] when the located interval has zero width.
pub fn first_degree_eval(t: &[f64], y: &[f64], x: f64) -> Result<f64> {
    if t.len() != y.len() {
        return Err(SplineError::InvalidDomain(format!(
            "{} knot positions but {} values",
            t.len(),
            y.len()
        )));
    }
    if t.len() < 2 {
        return Err(SplineError::InvalidDomain("at least 2 knots are required".to_string()));
    }
    check_query(x, (t[0], t[t.len() - 1]))?;

    let i = locate_interval(t, x);
    let width = t[i + 1] - t[i];
    if width == 0.0 {
        return Err(SplineError::DegenerateInterval { index: i });
    }

    let slope = (y[i + 1] - y[i]) / width;
    Ok(y[i] + (x - t[i]) * slope)
}

/// Piecewise-linear interpolant fitted once over validated knots.
#[derive(Debug, Clone)]
pub struct PiecewiseLinear {
    knots: Knots,
    segments: Vec<LocalPolynomial>,
}

impl PiecewiseLinear {
    pub fn new(t: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        let knots = Knots::new(t, y)?;

        let segments = (0..knots.intervals())
            .map(|i| {
                let t = knots.positions();
                let y = knots.values();
                let slope = (y[i + 1] - y[i]) / knots.spacing(i);
                LocalPolynomial::new(t[i], vec![y[i], slope])
            })
            .collect();

        log::debug!("fitted piecewise-linear spline over {} knots", knots.len());
        Ok(PiecewiseLinear { knots, segments })
    }

    pub fn knots(&self) -> &Knots {
        &self.knots
    }
}

impl Interpolant for PiecewiseLinear {
    fn domain(&self) -> (f64, f64) {
        self.knots.domain()
    }

    fn interpolate(&self, x: f64) -> Result<f64> {
        self.knots.check_in_range(x)?;
        let index = self.knots.find_interval_index(x);
        Ok(self.segments[index].evaluate(x))
    }

    fn extrapolate(&self, x: f64) -> Result<f64> {
        check_query(x, self.domain())?;
        let index = self.knots.find_interval_index(x);
        Ok(self.segments[index].evaluate(x))
    }

    fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>> {
        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            self.knots.check_in_range(*x)?;
            index = self.knots.find_interval_index_with_hint(index, *x);
            results.push(self.segments[index].evaluate(*x));
        }
        Ok(results)
    }
}
