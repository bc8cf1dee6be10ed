pub mod bce;
pub mod loss_type;
pub mod mae;
pub mod mse;
pub mod softmax_cross_entropy;

pub use bce::BceLoss;
pub use loss_type::LossType;
pub use mae::MaeLoss;
pub use mse::MseLoss;
pub use softmax_cross_entropy::SoftmaxCrossEntropyLoss;
