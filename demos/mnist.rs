/// MNIST digit classification demo.
///
/// Architecture: 784 → 512 (ReLU) → 256 (ReLU) → 10 (Softmax)
/// The output layer applies softmax, so the backward pass is seeded with the
/// combined cross-entropy gradient `probabilities - labels` directly and the
/// softmax activation's pass-through derivative leaves it untouched.
///
/// Run with:
///   cargo run --example mnist --release -- \
///     train-images train-labels test-images test-labels
use std::process::ExitCode;

use log::info;

use dense_nn::data::idx;
use dense_nn::{compute_accuracy, Activation, Layer, Matrix, Network};

const EPOCHS: usize = 10;
const BATCH_SIZE: usize = 64;
const LEARNING_RATE: f64 = 0.01;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        eprintln!(
            "Usage: {} <train-images> <train-labels> <test-images> <test-labels>",
            args[0]
        );
        return ExitCode::FAILURE;
    }

    match run(&args[1], &args[2], &args[3], &args[4]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    train_images: &str,
    train_labels: &str,
    test_images: &str,
    test_labels: &str,
) -> dense_nn::Result<()> {
    let inputs = idx::load_images(train_images)?;
    let labels = idx::one_hot_encode(&idx::load_labels(train_labels)?);
    let test_inputs = idx::load_images(test_images)?;
    let test_labels = idx::one_hot_encode(&idx::load_labels(test_labels)?);

    info!(
        "loaded {} training and {} test samples",
        inputs.cols, test_inputs.cols
    );

    let mut network = Network::new(vec![
        Layer::xavier(inputs.rows, 512, Activation::ReLU),
        Layer::xavier(512, 256, Activation::ReLU),
        Layer::xavier(256, labels.rows, Activation::Softmax),
    ]);

    let batch_columns: Vec<Vec<usize>> = (0..inputs.cols)
        .collect::<Vec<_>>()
        .chunks(BATCH_SIZE)
        .map(|chunk| chunk.to_vec())
        .collect();

    for epoch in 1..=EPOCHS {
        for batch in &batch_columns {
            let batch_inputs = inputs.select_columns(batch);
            let batch_labels = labels.select_columns(batch);

            network.train(
                &batch_inputs,
                |outputs| outputs.clone() - batch_labels.clone(),
                LEARNING_RATE,
            );
        }

        let accuracy = compute_accuracy(&network, &test_inputs, &test_labels);
        println!("epoch {epoch}: accuracy {:.2} %", accuracy * 100.0);
    }

    network.save_json("mnist_model.json")?;
    println!("model saved to mnist_model.json");

    // Sanity check the round trip before trusting the file.
    let restored = Network::load_json("mnist_model.json")?;
    let sample = Matrix::from_column(test_inputs.column(0));
    let a = network.feed(&sample).column(0);
    let b = restored.feed(&sample).column(0);
    assert!(a
        .iter()
        .zip(&b)
        .all(|(x, y)| (x - y).abs() < 1e-6));

    Ok(())
}
