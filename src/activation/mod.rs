pub mod activation;

pub use activation::{Activation, ActivationFunction, FnActivation};
