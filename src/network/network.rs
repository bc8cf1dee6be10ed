use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::record::LayerRecord;

/// An ordered stack of dense layers.
///
/// Layer order defines the composition order of the forward pass and is
/// fixed at construction; `train` is the only thing that mutates parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Builds a network and checks the chain invariant: each layer's output
    /// width must equal the next layer's input width.
    ///
    /// # Panics
    /// Panics on a width mismatch; wiring layers together wrongly is a
    /// programming error, not a recoverable condition.
    pub fn new(layers: Vec<Layer>) -> Network {
        for window in layers.windows(2) {
            assert_eq!(
                window[0].output_size(),
                window[1].input_size(),
                "layer output width {} does not match next layer input width {}",
                window[0].output_size(),
                window[1].input_size()
            );
        }
        Network { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Forward pass over a batch (one sample per column). Read-only.
    pub fn feed(&self, inputs: &Matrix) -> Matrix {
        let mut current = inputs.clone();
        for layer in &self.layers {
            current = layer.feed(&current);
        }
        current
    }

    /// Forward pass for a single sample vector.
    pub fn infer(&self, input: Vec<f64>) -> Vec<f64> {
        self.feed(&Matrix::from_column(input)).column(0)
    }

    /// One backpropagation step over a batch.
    ///
    /// `loss_derivative` is invoked once on the final activations and must
    /// return ∂L/∂outputs (same shape); it is expected to close over the
    /// batch's reference labels. Updates every layer in place with plain
    /// gradient descent, normalizing the step by the batch size so the
    /// learning rate is portable across batch sizes.
    ///
    /// Returns the error propagated past the first layer (∂L/∂inputs
    /// through the weights), mainly useful for composing nested calls and
    /// for tests.
    pub fn train<F>(&mut self, inputs: &Matrix, loss_derivative: F, learning_rate: f64) -> Matrix
    where
        F: FnOnce(&Matrix) -> Matrix,
    {
        let batch_size = inputs.cols as f64;

        // Forward sweep, retaining each layer's pre-activation and output.
        let mut linears = Vec::with_capacity(self.layers.len());
        let mut outputs = Vec::with_capacity(self.layers.len());
        let mut current = inputs.clone();
        for layer in &self.layers {
            let z = layer.linear(&current);
            current = layer.activation.apply(&z);
            linears.push(z);
            outputs.push(current.clone());
        }

        let mut delta = loss_derivative(outputs.last().unwrap_or(inputs));

        // Backward sweep: chain rule through each layer in reverse.
        for i in (0..self.layers.len()).rev() {
            let layer_inputs = if i == 0 { inputs } else { &outputs[i - 1] };

            delta = delta.hadamard(&self.layers[i].activation.derivative(&linears[i]));

            // Propagate before mutating the weights.
            let prev_delta = &self.layers[i].weights.transpose() * &delta;

            let weights_step = (&delta * &layer_inputs.transpose())
                .map(|g| g * learning_rate / batch_size);
            self.layers[i].weights = self.layers[i].weights.clone() - weights_step;

            for (bias, delta_sum) in self.layers[i].biases.iter_mut().zip(delta.row_sums()) {
                *bias -= learning_rate * delta_sum / batch_size;
            }

            delta = prev_delta;
        }

        delta
    }

    /// Serializes the layer stack to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        let records: Vec<LayerRecord> = self.layers.iter().map(LayerRecord::from_layer).collect();
        serde_json::to_writer_pretty(writer, &records)?;
        Ok(())
    }

    /// Loads a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let records: Vec<LayerRecord> = serde_json::from_reader(reader)?;
        Network::from_records(records)
    }

    /// Serializes the layer stack to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let records: Vec<LayerRecord> = self.layers.iter().map(LayerRecord::from_layer).collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Reconstructs a network from a JSON string of layer records.
    pub fn from_json(json: &str) -> Result<Network> {
        let records: Vec<LayerRecord> = serde_json::from_str(json)?;
        Network::from_records(records)
    }

    fn from_records(records: Vec<LayerRecord>) -> Result<Network> {
        let layers = records
            .into_iter()
            .map(|record| record.into_layer())
            .collect::<Result<Vec<_>>>()?;
        Ok(Network::new(layers))
    }
}
