use crate::error::{Result, SplineError};

/// Knot sequence of a fitted spline: strictly increasing positions `t` and the sampled values `y`.
/// Validated once on construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Knots {
    positions: Vec<f64>,
    values: Vec<f64>,
    is_spacing_uniform: bool,
}

impl Knots {
    /// Creates knot sequence from positions and values.
    /// # Example
    /// ```
    /// use piecewise_spline::Knots;
    ///
    /// let knots = Knots::new(vec![0.0, 1.0, 2.0], vec![4.0, 2.0, 6.0]).unwrap();
    /// assert_eq!((0.0, 2.0), knots.domain());
    /// assert!(knots.is_spacing_uniform());
    /// ```
    /// # Errors
    /// [SplineError::InvalidDomain] is returned when lengths differ, fewer than 2 knots are given,
    /// any coordinate is not finite or positions are not strictly increasing.
    /// ```
    /// use piecewise_spline::Knots;
    ///
    /// assert!(Knots::new(vec![0.0, 0.0, 1.0], vec![1.0, 2.0, 3.0]).is_err());
    /// ```
    pub fn new(positions: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if positions.len() != values.len() {
            return Err(SplineError::InvalidDomain(format!(
                "{} knot positions but {} values",
                positions.len(),
                values.len()
            )));
        }
        if positions.len() < 2 {
            return Err(SplineError::InvalidDomain("at least 2 knots are required".to_string()));
        }
        if positions.iter().chain(values.iter()).any(|v| !v.is_finite()) {
            return Err(SplineError::InvalidDomain("knots must be finite".to_string()));
        }

        let spacings: Vec<f64> = positions.windows(2).map(|w| w[1] - w[0]).collect();

        if let Some(index) = spacings.iter().position(|spacing| *spacing <= 0.0) {
            return Err(SplineError::InvalidDomain(format!(
                "knot positions must be strictly increasing, t[{}] = {} >= t[{}] = {}",
                index,
                positions[index],
                index + 1,
                positions[index + 1]
            )));
        }

        let first = spacings[0];
        let is_spacing_uniform = spacings
            .iter()
            .all(|spacing| (spacing - first).abs() <= 1e-12 * first);

        Ok(Knots { positions, values, is_spacing_uniform })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Number of intervals between consecutive knots.
    pub fn intervals(&self) -> usize {
        self.positions.len() - 1
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.positions[0], self.positions[self.positions.len() - 1])
    }

    pub fn is_spacing_uniform(&self) -> bool {
        self.is_spacing_uniform
    }

    pub fn is_in_range(&self, x: f64) -> bool {
        let (min, max) = self.domain();
        min <= x && x <= max
    }

    /// Width of interval `index`, `t[index + 1] - t[index]`.
    pub fn spacing(&self, index: usize) -> f64 {
        self.positions[index + 1] - self.positions[index]
    }

    pub(crate) fn out_of_range(&self, x: f64) -> SplineError {
        let (min, max) = self.domain();
        SplineError::OutOfRange { x, min, max }
    }

    /// Fails for queries outside the knots.
    pub(crate) fn check_in_range(&self, x: f64) -> Result<()> {
        if self.is_in_range(x) {
            Ok(())
        } else {
            Err(self.out_of_range(x))
        }
    }

    /// Index `i` of the interval with `t[i] <= x < t[i+1]`, clamped to the first and last interval
    /// for queries outside the knots. `x == t[last]` belongs to the last interval.
    pub(crate) fn find_interval_index(&self, x: f64) -> usize {
        if self.is_spacing_uniform {
            self.find_interval_index_uniform(x)
        } else {
            locate_interval(&self.positions, x)
        }
    }

    fn find_interval_index_uniform(&self, x: f64) -> usize {
        let last = self.intervals() - 1;
        let (min, max) = self.domain();
        let relative_x = (x - min) / (max - min);
        if !(relative_x > 0.0) {
            return 0;
        }
        if relative_x >= 1.0 {
            return last;
        }

        let mut index = ((relative_x * self.intervals() as f64).floor() as usize).min(last);
        // rounding in the scaled position may land one interval off
        if x < self.positions[index] {
            index -= 1;
        } else if index < last && x >= self.positions[index + 1] {
            index += 1;
        }
        index
    }

    /// Like [Knots::find_interval_index], but checks `index_hint` and its successor first.
    /// Monotone batches therefore cost O(1) per query.
    pub(crate) fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {
        if index_hint < self.intervals() {
            if self.is_in_interval_range(index_hint, x) {
                return index_hint;
            }
            if index_hint + 1 < self.intervals() && self.is_in_interval_range(index_hint + 1, x) {
                return index_hint + 1;
            }
        }
        self.find_interval_index(x)
    }

    fn is_in_interval_range(&self, interval_index: usize, x: f64) -> bool {
        let upper = self.positions[interval_index + 1];
        let is_last = interval_index + 1 == self.intervals();
        self.positions[interval_index] <= x && (x < upper || (is_last && x == upper))
    }
}

/// Bisection over an ascending slice: returns `i` with `t[i] <= x < t[i+1]`, clamped to
/// `[0, t.len() - 2]`. Requires `t.len() >= 2`.
pub(crate) fn locate_interval(t: &[f64], x: f64) -> usize {
    let mut min = 0;
    let mut max = t.len() - 1;

    while max - min > 1 {
        let mid = (min + max) / 2;
        if x < t[mid] {
            max = mid;
        } else {
            min = mid;
        }
    }
    min
}

/// Rejects NaN queries, which no interval can contain.
pub(crate) fn check_query(x: f64, domain: (f64, f64)) -> Result<()> {
    if x.is_nan() {
        return Err(SplineError::OutOfRange { x, min: domain.0, max: domain.1 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let knots = Knots::new(vec![0.0, 0.5, 2.0], vec![1.0, 2.0, 3.0]).unwrap();

        assert_eq!(3, knots.len());
        assert_eq!(2, knots.intervals());
        assert_eq!((0.0, 2.0), knots.domain());
        assert_eq!(1.5, knots.spacing(1));
        assert!(!knots.is_spacing_uniform());
    }

    #[test]
    fn test_uniform_detection() {
        let positions: Vec<f64> = (0..=10).map(|i| i as f64 * 0.1).collect();
        let values = vec![0.0; positions.len()];
        let knots = Knots::new(positions, values).unwrap();

        assert!(knots.is_spacing_uniform());
    }

    #[test]
    fn test_length_mismatch() {
        let knots = Knots::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0]);
        assert!(matches!(knots, Err(SplineError::InvalidDomain(_))));
    }

    #[test]
    fn test_too_few_knots() {
        let knots = Knots::new(vec![0.0], vec![1.0]);
        assert!(matches!(knots, Err(SplineError::InvalidDomain(_))));
    }

    #[test]
    fn test_repeated_knot() {
        let knots = Knots::new(vec![0.0, 0.0, 1.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(knots, Err(SplineError::InvalidDomain(_))));
    }

    #[test]
    fn test_decreasing_knots() {
        let knots = Knots::new(vec![0.0, 2.0, 1.0], vec![1.0, 2.0, 3.0]);
        assert!(matches!(knots, Err(SplineError::InvalidDomain(_))));
    }

    #[test]
    fn test_not_finite() {
        let knots = Knots::new(vec![0.0, 1.0, f64::INFINITY], vec![1.0, 2.0, 3.0]);
        assert!(matches!(knots, Err(SplineError::InvalidDomain(_))));

        let knots = Knots::new(vec![0.0, 1.0, 2.0], vec![1.0, f64::NAN, 3.0]);
        assert!(matches!(knots, Err(SplineError::InvalidDomain(_))));
    }

    #[test]
    fn find_interval_bisect() {
        let knots = Knots::new(vec![0.0, 0.9, 1.1, 1.7, 2.0], vec![0.0; 5]).unwrap();

        assert_eq!(0, knots.find_interval_index(-3.0));
        assert_eq!(0, knots.find_interval_index(0.0));
        assert_eq!(0, knots.find_interval_index(0.5));
        assert_eq!(1, knots.find_interval_index(0.9));
        assert_eq!(2, knots.find_interval_index(1.5));
        assert_eq!(3, knots.find_interval_index(1.7));
        assert_eq!(3, knots.find_interval_index(2.0));
        assert_eq!(3, knots.find_interval_index(7.0));
    }

    #[test]
    fn find_interval_uniform() {
        let positions: Vec<f64> = (0..=10).map(|i| i as f64 * 0.1).collect();
        let knots = Knots::new(positions.clone(), vec![0.0; 11]).unwrap();

        assert_eq!(0, knots.find_interval_index(-1.0));
        assert_eq!(9, knots.find_interval_index(1.0));
        assert_eq!(9, knots.find_interval_index(4.0));

        for (i, t) in positions.iter().enumerate().take(10) {
            assert_eq!(i, knots.find_interval_index(*t));
            assert_eq!(i, locate_interval(&positions, *t));
        }
    }

    #[test]
    fn find_interval_with_hint() {
        let knots = Knots::new(vec![0.0, 0.9, 1.1, 1.7, 2.0], vec![0.0; 5]).unwrap();

        assert_eq!(0, knots.find_interval_index_with_hint(0, 0.3));
        assert_eq!(1, knots.find_interval_index_with_hint(0, 1.0));
        assert_eq!(3, knots.find_interval_index_with_hint(0, 1.9));
        assert_eq!(0, knots.find_interval_index_with_hint(3, 0.1));
        assert_eq!(3, knots.find_interval_index_with_hint(3, 2.0));
        assert_eq!(3, knots.find_interval_index_with_hint(7, 2.5));
    }

    #[test]
    fn nan_query_is_rejected() {
        assert!(check_query(f64::NAN, (0.0, 1.0)).is_err());
        assert!(check_query(5.0, (0.0, 1.0)).is_ok());
    }
}
