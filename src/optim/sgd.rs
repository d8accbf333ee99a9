use crate::{
    error::{Error, Result},
    layers::dense::Layer,
};

/// Plain stochastic gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    learning_rate: f64,
}

impl Sgd {
    /// Fails with `Error::Config` unless `learning_rate` is positive and finite.
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::config(format!(
                "learning rate must be a positive finite number, got {learning_rate}"
            )));
        }
        Ok(Sgd { learning_rate })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Applies one update to a layer from the delta cached by its last `backward`.
    pub fn step(&self, layer: &mut Layer) {
        layer.update(self.learning_rate);
    }
}
