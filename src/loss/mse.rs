use crate::loss::cost::Cost;

#[derive(Debug, Clone, Copy, Default)]
pub struct MseLoss;

impl Cost for MseLoss {
    /// ½·(p − y)²
    fn cost(&self, predicted: f64, expected: f64) -> f64 {
        0.5 * (predicted - expected).powi(2)
    }

    /// p − y
    fn derivative(&self, predicted: f64, expected: f64) -> f64 {
        predicted - expected
    }
}
