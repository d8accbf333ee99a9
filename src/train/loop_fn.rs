use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::evaluate::evaluate;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on `dataset` for `config.epochs` epochs and returns one
/// `EpochStats` per epoch.
///
/// Each epoch optionally shuffles the example order with `rng`, cuts it into
/// `config.batch_size` chunks (the trailing partial chunk is kept) and calls
/// `Network::train` once per chunk.
///
/// # Errors
/// - `Error::Config` if `batch_size == 0` or the dataset is empty
/// - `Error::Data` if the dataset's inputs, targets and labels differ in count
/// - whatever `Network::train` reports for mis-shaped examples
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    dataset: &Dataset,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>> {
    config.validate()?;
    dataset.validate()?;
    if dataset.is_empty() {
        return Err(Error::config("cannot train on an empty dataset"));
    }

    info!(
        examples = dataset.len(),
        epochs = config.epochs,
        batch_size = config.batch_size,
        learning_rate = network.learning_rate(),
        "starting training"
    );

    let mut history = Vec::with_capacity(config.epochs);
    let mut indices: Vec<usize> = (0..dataset.len()).collect();

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if config.shuffle {
            indices.shuffle(rng);
        }

        for (batch_idx, batch) in indices.chunks(config.batch_size).enumerate() {
            let (inputs, targets) = dataset.select(batch);
            network.train(&inputs, &targets, config.epochs_per_batch)?;
            debug!(epoch, batch = batch_idx + 1, size = batch.len(), "batch done");
        }

        let eval = evaluate(network, dataset)?;
        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: eval.loss,
            train_accuracy: eval.accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        info!(
            epoch,
            total = config.epochs,
            loss = stats.train_loss,
            accuracy = stats.train_accuracy,
            elapsed_ms = stats.elapsed_ms,
            "epoch done"
        );
        history.push(stats);
    }

    Ok(history)
}
