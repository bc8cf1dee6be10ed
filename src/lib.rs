pub mod activation;
pub mod data;
pub mod error;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::activation::Activation;
pub use error::{Error, Result};
pub use layers::dense::Layer;
pub use loss::loss_type::LossType;
pub use math::matrix::Matrix;
pub use network::network::Network;
pub use train::loop_fn::{compute_accuracy, train_loop};
pub use train::train_config::TrainConfig;
