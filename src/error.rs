use thiserror::Error;

/// Errors returned by spline construction and evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplineError {
    /// Malformed input: too few knots, mismatched lengths, non-increasing knots, empty grid.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// A zero divisor was met while eliminating or running a recurrence.
    #[error("singular system: {0}")]
    SingularSystem(String),

    #[error("x = {x} is out of range [{min}, {max}]")]
    OutOfRange { x: f64, min: f64, max: f64 },

    #[error("interval {index} has zero width")]
    DegenerateInterval { index: usize },

    /// Coefficients are missing or were not built for the given knots.
    #[error("spline coefficients have not been fitted for these knots")]
    UnfittedSpline,
}

pub type Result<T> = std::result::Result<T, SplineError>;

/// Fails with [SplineError::SingularSystem] when `divisor` is zero or not finite.
pub(crate) fn check_divisor(divisor: f64, what: &str) -> Result<f64> {
    if divisor == 0.0 || !divisor.is_finite() {
        return Err(SplineError::SingularSystem(format!("{what} is {divisor}")));
    }
    Ok(divisor)
}
