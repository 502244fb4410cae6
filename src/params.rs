//! Model parameters
//!
//! Scalar parameter sets for the linear and logistic sample models

use serde::{Deserialize, Serialize};

/// Parameters of the linear model `y = a*x + b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    /// Slope
    pub a: f64,
    /// Intercept
    pub b: f64,
}

impl LinearParams {
    /// Create new linear parameters
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Noise-free model value at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * x + self.b
    }
}

/// Parameters of the logistic model
/// `y = max_value / (1 + exp(-steepness * (x - mid_point)))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Point where the curve reaches half of `max_value`
    pub mid_point: f64,
    /// Asymptotic maximum
    pub max_value: f64,
    /// Growth rate; negative values give a falling curve
    pub steepness: f64,
}

impl LogisticParams {
    /// Create new logistic parameters
    pub fn new(mid_point: f64, max_value: f64, steepness: f64) -> Self {
        Self {
            mid_point,
            max_value,
            steepness,
        }
    }

    /// Noise-free model value at `x`
    ///
    /// No overflow handling: `exp` saturating to infinity yields 0 and
    /// underflowing to 0 yields `max_value`.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.max_value / (1.0 + (-self.steepness * (x - self.mid_point)).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_evaluate() {
        let params = LinearParams::new(2.0, 1.0);
        assert_eq!(params.evaluate(0.0), 1.0);
        assert_eq!(params.evaluate(2.0), 5.0);
    }

    #[test]
    fn test_logistic_midpoint_is_half_max() {
        let params = LogisticParams::new(100.0, 22.0, -0.15);
        assert_eq!(params.evaluate(100.0), 11.0);
    }

    #[test]
    fn test_logistic_saturates() {
        let params = LogisticParams::new(0.0, 5.0, 1.0);
        assert_eq!(params.evaluate(1e6), 5.0);
        assert_eq!(params.evaluate(-1e6), 0.0);
    }
}
