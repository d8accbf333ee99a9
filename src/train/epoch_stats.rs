use serde::{Serialize, Deserialize};

/// Per-epoch training statistics returned by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean per-example cost over the training set after this epoch.
    pub train_loss: f64,
    /// Fraction of training examples classified correctly, in [0, 1].
    pub train_accuracy: f64,
    pub elapsed_ms: u64,
}
