use crate::loss::cost::Cost;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaeLoss;

impl Cost for MaeLoss {
    fn cost(&self, predicted: f64, expected: f64) -> f64 {
        (predicted - expected).abs()
    }

    /// Subgradient sign(p − y), 0 when equal.
    fn derivative(&self, predicted: f64, expected: f64) -> f64 {
        let diff = predicted - expected;
        if diff > 0.0 { 1.0 } else if diff < 0.0 { -1.0 } else { 0.0 }
    }
}
