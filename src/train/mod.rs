pub mod epoch_stats;
pub mod loop_fn;
pub mod train_config;

pub use epoch_stats::EpochStats;
pub use loop_fn::{compute_accuracy, train_loop};
pub use train_config::TrainConfig;
