/// Polynomial in powers of `(x - origin)`: `c[0] + c[1] dx + c[2] dx^2 + ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPolynomial {
    origin: f64,
    coefficients: Vec<f64>,
}

impl LocalPolynomial {
    pub fn new(origin: f64, coefficients: Vec<f64>) -> Self {
        LocalPolynomial { origin, coefficients }
    }

    /// Horner evaluation at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let dx = x - self.origin;
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * dx + c)
    }

    /// Value of the first derivative at `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        let dx = x - self.origin;
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (power, c)| acc * dx + power as f64 * c)
    }
}
