use std::time::Instant;

use log::info;
use rand::seq::SliceRandom;

use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Trains `network` with mini-batch gradient descent and returns the mean
/// per-sample training loss of the last completed epoch.
///
/// `inputs` and `references` hold one sample per column and must have the
/// same column count. Sample order is reshuffled every epoch; batches are
/// drawn as column subsets. One `EpochStats` line is logged per epoch.
///
/// # Panics
/// Panics if `inputs` has no columns, the column counts differ, or
/// `batch_size` is zero.
pub fn train_loop(
    network: &mut Network,
    inputs: &Matrix,
    references: &Matrix,
    config: &TrainConfig,
) -> f64 {
    assert!(inputs.cols > 0, "inputs must contain at least one sample");
    assert_eq!(
        inputs.cols, references.cols,
        "inputs and references must have equal sample counts"
    );
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let n = inputs.cols;
    let mut indices: Vec<usize> = (0..n).collect();
    let mut last_train_loss = 0.0;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        indices.shuffle(&mut rand::thread_rng());

        let mut epoch_loss = 0.0;
        for batch in indices.chunks(config.batch_size) {
            let batch_inputs = inputs.select_columns(batch);
            let batch_refs = references.select_columns(batch);

            // Accumulate the batch loss inside the gradient closure so the
            // forward sweep is not repeated for bookkeeping.
            network.train(
                &batch_inputs,
                |outputs| {
                    epoch_loss += config.loss.loss(outputs, &batch_refs);
                    config.loss.derivative(outputs, &batch_refs)
                },
                config.learning_rate,
            );
        }

        last_train_loss = epoch_loss / n as f64;

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: last_train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {}/{}: loss {:.6} ({} ms)",
            stats.epoch, stats.total_epochs, stats.train_loss, stats.elapsed_ms
        );
    }

    last_train_loss
}

/// Fraction of samples whose argmax output matches the argmax reference.
pub fn compute_accuracy(network: &Network, inputs: &Matrix, references: &Matrix) -> f64 {
    if inputs.cols == 0 {
        return 0.0;
    }

    let outputs = network.feed(inputs);
    let correct = (0..inputs.cols)
        .filter(|&j| argmax(&outputs.column(j)) == argmax(&references.column(j)))
        .count();

    correct as f64 / inputs.cols as f64
}

/// Index of the maximum element in a slice.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::Activation;
    use crate::layers::dense::Layer;
    use crate::loss::loss_type::LossType;

    #[test]
    fn xor_network_learns_with_mini_batches() {
        let mut network = Network::new(vec![
            Layer::xavier(2, 8, Activation::Tanh),
            Layer::xavier(8, 1, Activation::Sigmoid),
        ]);

        let inputs = Matrix::from_data(vec![
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0],
        ]);
        let refs = Matrix::from_data(vec![vec![0.0, 1.0, 1.0, 0.0]]);

        let config = TrainConfig::new(5000, 4, 2.0, LossType::Mse);
        let final_loss = train_loop(&mut network, &inputs, &refs, &config);

        assert!(final_loss < 0.1, "final loss {} too high", final_loss);
    }

    #[test]
    fn accuracy_counts_argmax_matches() {
        // Identity-ish single layer: output mirrors input.
        let network = Network::new(vec![Layer {
            weights: Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
            biases: vec![0.0, 0.0],
            activation: Activation::Linear,
        }]);

        let inputs = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let right = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let wrong = Matrix::from_data(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);

        assert_eq!(compute_accuracy(&network, &inputs, &right), 1.0);
        assert_eq!(compute_accuracy(&network, &inputs, &wrong), 0.0);
    }

    #[test]
    #[should_panic(expected = "equal sample counts")]
    fn mismatched_sample_counts_fail_fast() {
        let mut network = Network::new(vec![Layer::random(1, 1, Activation::Linear)]);
        let config = TrainConfig::new(1, 1, 0.1, LossType::Mse);
        train_loop(
            &mut network,
            &Matrix::zeros(1, 2),
            &Matrix::zeros(1, 3),
            &config,
        );
    }
}
