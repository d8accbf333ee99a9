use serde::{Serialize, Deserialize};

use crate::loss::{BceLoss, Cost, HuberLoss, MaeLoss, MseLoss};

/// Selects a built-in cost from configuration.
///
/// - `Mse`: ½·(p − y)²; pair with Identity, Sigmoid or ReLU output.
/// - `Mae`: |p − y|; pair with Identity output.
/// - `Huber`: Huber loss (δ = 1.0); pair with Identity output.
/// - `BinaryCrossEntropy`: per-unit binary cross-entropy; pair with Sigmoid output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    Mse,
    Mae,
    Huber,
    BinaryCrossEntropy,
}

impl LossType {
    pub fn boxed(self) -> Box<dyn Cost> {
        match self {
            LossType::Mse                => Box::new(MseLoss),
            LossType::Mae                => Box::new(MaeLoss),
            LossType::Huber              => Box::new(HuberLoss::default()),
            LossType::BinaryCrossEntropy => Box::new(BceLoss),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_dispatch() {
        assert_eq!(LossType::Mse.boxed().derivative(3.0, 1.0), 2.0);
        assert_eq!(LossType::Mae.boxed().derivative(3.0, 1.0), 1.0);
    }

    #[test]
    fn test_snake_case_names() {
        let parsed: LossType = serde_json::from_str("\"binary_cross_entropy\"").unwrap();
        assert_eq!(parsed, LossType::BinaryCrossEntropy);
    }
}
