use rand::Rng;

use crate::{
    activation::activation::Activation,
    error::{Error, Result},
    math::matrix::Matrix,
};

/// Fully connected layer: `a = φ(W·x + b)` on column vectors.
///
/// The layer caches its last input, pre-activation, output and delta. Callers
/// must run `forward`, then `backward`, then `update`, once each per example;
/// `Network::train` follows that order.
#[derive(Debug)]
pub struct Layer {
    weights: Matrix,        // (out, in)
    biases: Matrix,         // (out, 1)
    inputs: Matrix,         // (in, 1)  last forward input
    pre_activation: Matrix, // (out, 1) z = W·x + b
    outputs: Matrix,        // (out, 1) a = φ(z)
    deltas: Matrix,         // (out, 1)
    activation: Box<dyn Activation>,
}

impl Layer {
    /// New layer with weights drawn uniformly from [-1, 1] and zero biases.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: Box<dyn Activation>,
        rng: &mut R,
    ) -> Result<Layer> {
        let weights = Matrix::random_uniform(output_size, input_size, -1.0, 1.0, rng)?;
        let biases = Matrix::zeros(output_size, 1);
        Ok(Layer::with_caches(weights, biases, activation))
    }

    /// Layer with explicit parameters. `biases` must be `(weights.rows, 1)`.
    pub fn from_parameters(
        weights: Matrix,
        biases: Matrix,
        activation: Box<dyn Activation>,
    ) -> Result<Layer> {
        if biases.shape() != (weights.rows(), 1) {
            return Err(Error::shape("layer biases", (weights.rows(), 1), biases.shape()));
        }
        Ok(Layer::with_caches(weights, biases, activation))
    }

    fn with_caches(weights: Matrix, biases: Matrix, activation: Box<dyn Activation>) -> Layer {
        let (output_size, input_size) = weights.shape();
        Layer {
            weights,
            biases,
            inputs: Matrix::zeros(input_size, 1),
            pre_activation: Matrix::zeros(output_size, 1),
            outputs: Matrix::zeros(output_size, 1),
            deltas: Matrix::zeros(output_size, 1),
            activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn output_size(&self) -> usize {
        self.weights.rows()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Matrix {
        &self.biases
    }

    /// Input cached by the last `forward`.
    pub fn input(&self) -> &Matrix {
        &self.inputs
    }

    pub fn pre_activation(&self) -> &Matrix {
        &self.pre_activation
    }

    /// Post-activation output of the last `forward`.
    pub fn output(&self) -> &Matrix {
        &self.outputs
    }

    /// Delta computed by the last `backward`.
    pub fn delta(&self) -> &Matrix {
        &self.deltas
    }

    /// Forward pass on an `(input_size, 1)` column vector.
    pub fn forward(&mut self, input: &Matrix) -> Result<Matrix> {
        if !input.is_column() || input.rows() != self.input_size() {
            return Err(Error::shape("layer forward", (self.input_size(), 1), input.shape()));
        }

        let mut z = self.weights.multiply(input)?;
        z.add_assign(&self.biases)?;
        let a = z.map(|x| self.activation.apply(x));

        self.inputs = input.clone();
        self.pre_activation = z;
        self.outputs = a.clone();
        Ok(a)
    }

    /// Backward pass. `d_output` is ∂L/∂a, shape `(output_size, 1)`.
    ///
    /// Stores δ_i = φ′(a_i)·∂L/∂a_i, with φ′ evaluated at the cached
    /// post-activation output, and returns ∂L/∂x = Wᵀ·δ.
    pub fn backward(&mut self, d_output: &Matrix) -> Result<Matrix> {
        if !d_output.is_column() || d_output.rows() != self.output_size() {
            return Err(Error::shape("layer backward", (self.output_size(), 1), d_output.shape()));
        }

        let data = self.outputs.as_slice().iter().zip(d_output.as_slice())
            .map(|(&a, &g)| self.activation.derivative(a) * g)
            .collect();
        let deltas = Matrix::from_vec(self.output_size(), 1, data)?;

        let d_input = self.weights.transpose().multiply(&deltas)?;
        self.deltas = deltas;
        Ok(d_input)
    }

    /// Gradient-descent step from the cached delta and input:
    /// W ← W − lr·δ·xᵀ, b ← b − lr·δ.
    pub fn update(&mut self, learning_rate: f64) {
        let cols = self.weights.cols();
        let delta = self.deltas.as_slice();
        let input = self.inputs.as_slice();

        for (idx, w) in self.weights.as_mut_slice().iter_mut().enumerate() {
            *w -= learning_rate * delta[idx / cols] * input[idx % cols];
        }
        for (b, d) in self.biases.as_mut_slice().iter_mut().zip(delta) {
            *b -= learning_rate * d;
        }
    }
}
