use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::fmt;

/// A pointwise nonlinearity paired with its derivative.
///
/// `Layer::backward` evaluates `derivative` at the cached post-activation
/// value, so a pair must express the derivative in whichever quantity the
/// caller intends to feed it.
pub trait Activation: Send + Sync + fmt::Debug {
    fn apply(&self, x: f64) -> f64;
    fn derivative(&self, x: f64) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Identity,
    Sigmoid,
    ReLU,
    Tanh,
    LeakyReLU { alpha: f64 },
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
        }
    }

    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
        }
    }

    pub fn boxed(self) -> Box<dyn Activation> {
        Box::new(self)
    }
}

impl Activation for ActivationFunction {
    fn apply(&self, x: f64) -> f64 {
        self.function(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        ActivationFunction::derivative(self, x)
    }
}

/// Activation built from two closures, for nonlinearities not covered by
/// [`ActivationFunction`].
pub struct FnActivation<F, D> {
    name: &'static str,
    function: F,
    derivative: D,
}

impl<F, D> FnActivation<F, D>
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
    D: Fn(f64) -> f64 + Send + Sync + 'static,
{
    pub fn new(name: &'static str, function: F, derivative: D) -> Self {
        FnActivation { name, function, derivative }
    }

    pub fn boxed(self) -> Box<dyn Activation> {
        Box::new(self)
    }
}

impl<F, D> fmt::Debug for FnActivation<F, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnActivation").field("name", &self.name).finish()
    }
}

impl<F, D> Activation for FnActivation<F, D>
where
    F: Fn(f64) -> f64 + Send + Sync,
    D: Fn(f64) -> f64 + Send + Sync,
{
    fn apply(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        (self.derivative)(x)
    }
}
