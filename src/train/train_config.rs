use crate::error::{Error, Result};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`: total number of shuffled passes over the dataset
/// - `batch_size`: examples handed to one `Network::train` call
/// - `epochs_per_batch`: the `epochs` argument of each `Network::train` call
/// - `shuffle`: reshuffle the example order at every epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub epochs_per_batch: usize,
    pub shuffle: bool,
}

impl TrainConfig {
    /// Shuffled run with one `Network::train` epoch per batch.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            epochs_per_batch: 1,
            shuffle: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::config("batch_size must be at least 1"));
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(10, 32)
    }
}
