use crate::loss::cost::Cost;

const EPS: f64 = 1e-12;

/// Binary cross-entropy for sigmoid outputs, one independent unit at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct BceLoss;

impl Cost for BceLoss {
    /// −(y·ln(p+ε) + (1−y)·ln(1−p+ε))
    fn cost(&self, predicted: f64, expected: f64) -> f64 {
        -(expected * (predicted + EPS).ln() + (1.0 - expected) * (1.0 - predicted + EPS).ln())
    }

    /// (p − y) / ((p + ε)·(1 − p + ε))
    fn derivative(&self, predicted: f64, expected: f64) -> f64 {
        (predicted - expected) / ((predicted + EPS) * (1.0 - predicted + EPS))
    }
}
