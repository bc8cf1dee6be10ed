use crate::loss::loss_type::LossType;

/// Hyperparameters for a `train_loop` run.
///
/// - `epochs`        — full passes over the training data
/// - `batch_size`    — sample columns per gradient step; `1` for online SGD
/// - `learning_rate` — plain gradient-descent step scale
/// - `loss`          — loss function dispatched each batch
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub loss: LossType,
}

impl TrainConfig {
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f64, loss: LossType) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            loss,
        }
    }
}
