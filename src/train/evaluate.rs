use serde::{Serialize, Deserialize};

use crate::data::dataset::Dataset;
use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::network::Network;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Mean per-example cost.
    pub loss: f64,
    /// Fraction of examples whose predicted class matches the label.
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
}

/// Index of the largest element; the first one wins ties. Returns 0 for an
/// empty matrix.
pub fn argmax(output: &Matrix) -> usize {
    output.as_slice()
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map_or(0, |(i, _)| i)
}

/// Class predicted from a network output: argmax for multi-unit outputs,
/// a 0.5 threshold for a single unit.
pub fn predicted_class(output: &Matrix) -> usize {
    match output.as_slice() {
        [single] => usize::from(*single >= 0.5),
        _ => argmax(output),
    }
}

/// Mean loss and accuracy over `dataset` (forward passes only).
pub fn evaluate(network: &mut Network, dataset: &Dataset) -> Result<Evaluation> {
    dataset.validate()?;
    let total = dataset.len();
    if total == 0 {
        return Ok(Evaluation { loss: 0.0, accuracy: 0.0, correct: 0, total: 0 });
    }

    let mut loss = 0.0;
    let mut correct = 0usize;
    for ((input, target), &label) in dataset.inputs.iter().zip(&dataset.targets).zip(&dataset.labels) {
        let output = network.forward(input)?;
        loss += network.cost().mean(&output, target)?;
        if predicted_class(&output) == label {
            correct += 1;
        }
    }

    Ok(Evaluation {
        loss: loss / total as f64,
        accuracy: correct as f64 / total as f64,
        correct,
        total,
    })
}
