use crate::loss::cost::Cost;

#[derive(Debug, Clone, Copy)]
pub struct HuberLoss {
    pub delta: f64,
}

impl Default for HuberLoss {
    fn default() -> Self {
        HuberLoss { delta: 1.0 }
    }
}

impl Cost for HuberLoss {
    /// h(x) = 0.5·x²  if |x| ≤ δ
    ///        δ·(|x| − 0.5·δ)  otherwise
    fn cost(&self, predicted: f64, expected: f64) -> f64 {
        let x = predicted - expected;
        if x.abs() <= self.delta {
            0.5 * x * x
        } else {
            self.delta * (x.abs() - 0.5 * self.delta)
        }
    }

    fn derivative(&self, predicted: f64, expected: f64) -> f64 {
        let x = predicted - expected;
        if x.abs() <= self.delta { x } else { self.delta * x.signum() }
    }
}
