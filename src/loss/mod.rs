pub mod cost;
pub mod mse;
pub mod mae;
pub mod huber;
pub mod bce;
pub mod loss_type;

pub use cost::Cost;
pub use mse::MseLoss;
pub use mae::MaeLoss;
pub use huber::HuberLoss;
pub use bce::BceLoss;
pub use loss_type::LossType;
