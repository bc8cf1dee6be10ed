use dense_nn::{train_loop, Activation, Layer, LossType, Matrix, Network, TrainConfig};

fn main() {
    env_logger::init();

    let mut network = Network::new(vec![
        Layer::xavier(2, 4, Activation::Tanh),
        Layer::xavier(4, 1, Activation::Sigmoid),
    ]);

    // One column per sample.
    let inputs = Matrix::from_data(vec![
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0.0, 1.0, 0.0, 1.0],
    ]);
    let references = Matrix::from_data(vec![vec![0.0, 1.0, 1.0, 0.0]]);

    let config = TrainConfig::new(5000, 4, 1.0, LossType::Mse);
    let final_loss = train_loop(&mut network, &inputs, &references, &config);
    println!("final loss = {final_loss:.6}");

    for j in 0..inputs.cols {
        let sample = inputs.column(j);
        let output = network.infer(sample.clone());
        println!("Input: {:?} -> Output: {:.4}", sample, output[0]);
    }
}
