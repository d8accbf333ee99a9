use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Column-vector examples with their one-hot targets and class labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub inputs: Vec<Matrix>,
    pub targets: Vec<Matrix>,
    pub labels: Vec<usize>,
}

impl Dataset {
    /// Builds a dataset from raw feature rows and class labels, one-hot
    /// encoding each label into `n_classes` outputs.
    pub fn from_labelled(features: Vec<Vec<f64>>, labels: Vec<usize>, n_classes: usize) -> Result<Dataset> {
        if features.len() != labels.len() {
            return Err(Error::Data(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let mut targets = Vec::with_capacity(labels.len());
        for &label in &labels {
            targets.push(one_hot(label, n_classes)?);
        }
        let inputs = features.into_iter().map(Matrix::column).collect();
        Ok(Dataset { inputs, targets, labels })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// `Error::Data` unless `inputs`, `targets` and `labels` have one entry
    /// per example.
    pub fn validate(&self) -> Result<()> {
        if self.targets.len() != self.inputs.len() || self.labels.len() != self.inputs.len() {
            return Err(Error::Data(format!(
                "{} inputs, {} targets and {} labels",
                self.inputs.len(),
                self.targets.len(),
                self.labels.len()
            )));
        }
        Ok(())
    }

    /// Number of features per example (0 for an empty dataset).
    pub fn input_size(&self) -> usize {
        self.inputs.first().map_or(0, Matrix::rows)
    }

    pub fn output_size(&self) -> usize {
        self.targets.first().map_or(0, Matrix::rows)
    }

    /// Copies the examples at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> (Vec<Matrix>, Vec<Matrix>) {
        let inputs = indices.iter().map(|&i| self.inputs[i].clone()).collect();
        let targets = indices.iter().map(|&i| self.targets[i].clone()).collect();
        (inputs, targets)
    }
}

/// `n_classes x 1` column with a single 1.0 at `label`.
pub fn one_hot(label: usize, n_classes: usize) -> Result<Matrix> {
    if label >= n_classes {
        return Err(Error::Data(format!("class label {label} >= n_classes {n_classes}")));
    }
    let mut target = Matrix::zeros(n_classes, 1);
    target.set(label, 0, 1.0)?;
    Ok(target)
}
