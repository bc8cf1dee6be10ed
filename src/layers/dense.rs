use crate::activation::activation::Activation;
use crate::math::matrix::Matrix;

/// One affine transform plus its activation.
///
/// `weights` is `outputs × inputs`, `biases` has one entry per output row.
/// Parameters are only ever mutated in place by `Network::train`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activation: Activation,
}

impl Layer {
    /// Uniform random weights in [-1, 1], zero biases.
    pub fn random(input_size: usize, output_size: usize, activation: Activation) -> Layer {
        Layer {
            weights: Matrix::random(output_size, input_size),
            biases: vec![0.0; output_size],
            activation,
        }
    }

    /// Xavier-initialized weights, zero biases.
    pub fn xavier(input_size: usize, output_size: usize, activation: Activation) -> Layer {
        Layer {
            weights: Matrix::xavier(output_size, input_size),
            biases: vec![0.0; output_size],
            activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols
    }

    pub fn output_size(&self) -> usize {
        self.weights.rows
    }

    /// Pre-activation for a batch: `W·X` with the bias broadcast over columns.
    pub fn linear(&self, inputs: &Matrix) -> Matrix {
        (&self.weights * inputs).add_column_broadcast(&self.biases)
    }

    /// Full layer output: `activation(W·X + b)`.
    pub fn feed(&self, inputs: &Matrix) -> Matrix {
        self.activation.apply(&self.linear(inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializers_zero_the_biases() {
        let layer = Layer::xavier(4, 3, Activation::Tanh);
        assert_eq!(layer.weights.rows, 3);
        assert_eq!(layer.weights.cols, 4);
        assert_eq!(layer.biases, vec![0.0; 3]);
    }

    #[test]
    fn linear_applies_bias_per_row() {
        let layer = Layer {
            weights: Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
            biases: vec![10.0, -10.0],
            activation: Activation::Linear,
        };
        let x = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let z = layer.linear(&x);
        assert_eq!(z.data, vec![vec![11.0, 12.0], vec![-7.0, -6.0]]);
        assert_eq!(layer.feed(&x), z);
    }
}
