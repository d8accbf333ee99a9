use rand::Rng;

use crate::{
    activation::activation::Activation,
    error::{Error, Result},
    layers::dense::Layer,
    loss::cost::Cost,
    math::matrix::Matrix,
    optim::sgd::Sgd,
};

/// Feedforward network: an ordered chain of dense layers trained by per-example SGD.
#[derive(Debug)]
pub struct Network {
    layers: Vec<Layer>,
    optimizer: Sgd,
    cost: Box<dyn Cost>,
}

impl Network {
    /// Builds one layer per consecutive pair in `sizes`, e.g. `[2, 3, 1]`
    /// gives a 2→3 layer and a 3→1 layer. `activations[i]` belongs to the
    /// i-th transition.
    pub fn new<R: Rng + ?Sized>(
        sizes: &[usize],
        activations: Vec<Box<dyn Activation>>,
        cost: Box<dyn Cost>,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Network> {
        if sizes.len() < 2 {
            return Err(Error::config(format!(
                "network needs at least an input and an output width, got {} width(s)",
                sizes.len()
            )));
        }
        if activations.len() != sizes.len() - 1 {
            return Err(Error::config(format!(
                "expected {} activations (one per layer transition), got {}",
                sizes.len() - 1,
                activations.len()
            )));
        }
        if let Some(pos) = sizes.iter().position(|&s| s == 0) {
            return Err(Error::config(format!("layer width at position {pos} is zero")));
        }
        let optimizer = Sgd::new(learning_rate)?;

        let layers = sizes.windows(2).zip(activations)
            .map(|(pair, activation)| Layer::new(pair[0], pair[1], activation, &mut *rng))
            .collect::<Result<Vec<_>>>()?;

        Ok(Network { layers, optimizer, cost })
    }

    /// Assembles a network from prebuilt layers, checking that each layer's
    /// input width matches the previous layer's output width.
    pub fn from_layers(layers: Vec<Layer>, cost: Box<dyn Cost>, learning_rate: f64) -> Result<Network> {
        if layers.is_empty() {
            return Err(Error::config("network needs at least one layer"));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_size() != pair[1].input_size() {
                return Err(Error::config(format!(
                    "layer {} outputs {} values but layer {} expects {}",
                    i,
                    pair[0].output_size(),
                    i + 1,
                    pair[1].input_size()
                )));
            }
        }
        let optimizer = Sgd::new(learning_rate)?;
        Ok(Network { layers, optimizer, cost })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }

    pub fn learning_rate(&self) -> f64 {
        self.optimizer.learning_rate()
    }

    pub fn cost(&self) -> &dyn Cost {
        self.cost.as_ref()
    }

    /// Forward pass; every layer caches its activations for backprop.
    pub fn forward(&mut self, input: &Matrix) -> Result<Matrix> {
        let mut current = input.clone();
        for layer in &mut self.layers {
            current = layer.forward(&current)?;
        }
        Ok(current)
    }

    /// Mean pointwise cost of the network's prediction for one example.
    pub fn loss(&mut self, input: &Matrix, target: &Matrix) -> Result<f64> {
        let predicted = self.forward(input)?;
        self.cost.mean(&predicted, target)
    }

    /// Runs `epochs` passes over the pairs in order, updating every layer
    /// after each example.
    ///
    /// All inputs and targets are validated before the first update, so an
    /// error leaves the parameters untouched.
    pub fn train(&mut self, inputs: &[Matrix], targets: &[Matrix], epochs: usize) -> Result<()> {
        if inputs.len() != targets.len() {
            return Err(Error::config(format!(
                "got {} inputs but {} targets",
                inputs.len(),
                targets.len()
            )));
        }
        let input_shape = (self.input_size(), 1);
        let target_shape = (self.output_size(), 1);
        for (input, target) in inputs.iter().zip(targets) {
            if input.shape() != input_shape {
                return Err(Error::shape("train input", input_shape, input.shape()));
            }
            if target.shape() != target_shape {
                return Err(Error::shape("train target", target_shape, target.shape()));
            }
        }

        for _ in 0..epochs {
            for (input, target) in inputs.iter().zip(targets) {
                self.train_example(input, target)?;
            }
        }
        Ok(())
    }

    fn train_example(&mut self, input: &Matrix, target: &Matrix) -> Result<()> {
        let predicted = self.forward(input)?;

        // ∂L/∂a for the output layer, one unit at a time.
        let mut grad = self.cost.gradient(&predicted, target)?;

        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad)?;
        }

        let optimizer = self.optimizer;
        for layer in &mut self.layers {
            optimizer.step(layer);
        }
        Ok(())
    }
}
