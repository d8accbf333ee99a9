use std::fmt;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// A pointwise-separable cost: the gradient for output unit `i` depends only
/// on that unit's prediction and target.
pub trait Cost: Send + Sync + fmt::Debug {
    fn cost(&self, predicted: f64, expected: f64) -> f64;

    /// ∂cost/∂predicted for one output unit.
    fn derivative(&self, predicted: f64, expected: f64) -> f64;

    /// Mean cost over all units of two same-shape matrices.
    fn mean(&self, predicted: &Matrix, expected: &Matrix) -> Result<f64> {
        check_shapes("cost", predicted, expected)?;
        let n = predicted.as_slice().len();
        if n == 0 {
            return Ok(0.0);
        }
        let total: f64 = predicted.as_slice().iter().zip(expected.as_slice())
            .map(|(&p, &y)| self.cost(p, y))
            .sum();
        Ok(total / n as f64)
    }

    /// Per-unit gradient vector, same shape as `predicted`.
    fn gradient(&self, predicted: &Matrix, expected: &Matrix) -> Result<Matrix> {
        check_shapes("cost gradient", predicted, expected)?;
        let data = predicted.as_slice().iter().zip(expected.as_slice())
            .map(|(&p, &y)| self.derivative(p, y))
            .collect();
        Matrix::from_vec(predicted.rows(), predicted.cols(), data)
    }
}

fn check_shapes(op: &'static str, predicted: &Matrix, expected: &Matrix) -> Result<()> {
    if predicted.shape() != expected.shape() {
        return Err(Error::shape(op, predicted.shape(), expected.shape()));
    }
    Ok(())
}
