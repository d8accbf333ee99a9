pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::activation::{Activation, ActivationFunction, FnActivation};
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use loss::{Cost, LossType, MseLoss};
pub use optim::sgd::Sgd;
pub use data::dataset::Dataset;
pub use train::{evaluate, train_loop, TrainConfig};
