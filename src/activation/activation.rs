use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// The closed set of activation functions a layer can carry.
///
/// Each variant is a pair of pure, shape-preserving transforms:
/// `apply` on the pre-activation matrix and `derivative` on the same
/// matrix during the backward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    Sigmoid,
    Tanh,
    ReLU,
    /// Softmax is column-wise (one distribution per sample), not element-wise.
    /// Its `derivative` is all-ones: the combined softmax + cross-entropy
    /// gradient (`softmax(o) - refs`, see `SoftmaxCrossEntropyLoss`) already
    /// folds the softmax Jacobian in, so the backward pass must pass the
    /// delta through unchanged. Pairing Softmax with any other loss is
    /// unsupported and will produce wrong gradients.
    Softmax,
}

impl Activation {
    /// Applies the activation to a whole batch (one sample per column).
    pub fn apply(&self, x: &Matrix) -> Matrix {
        match self {
            Activation::Linear => x.clone(),
            Activation::Sigmoid => x.map(sigmoid),
            Activation::Tanh => x.map(f64::tanh),
            Activation::ReLU => x.map(|v| v.max(0.0)),
            Activation::Softmax => softmax(x),
        }
    }

    /// Derivative evaluated at the pre-activation values, element-wise.
    pub fn derivative(&self, x: &Matrix) -> Matrix {
        match self {
            Activation::Linear => x.map(|_| 1.0),
            Activation::Sigmoid => x.map(|v| {
                let s = sigmoid(v);
                s * (1.0 - s)
            }),
            Activation::Tanh => x.map(|v| {
                let t = v.tanh();
                1.0 - t * t
            }),
            // Sub-gradient at exactly 0 is defined as 0.
            Activation::ReLU => x.map(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Softmax => x.map(|_| 1.0),
        }
    }

    /// Short token stored in model files.
    pub fn token(&self) -> &'static str {
        match self {
            Activation::Linear => "linear",
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::ReLU => "relu",
            Activation::Softmax => "softmax",
        }
    }

    /// Maps a model-file token back to an activation; unknown tokens are a
    /// format error.
    pub fn from_token(token: &str) -> Result<Activation> {
        match token {
            "linear" => Ok(Activation::Linear),
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "relu" => Ok(Activation::ReLU),
            "softmax" => Ok(Activation::Softmax),
            other => Err(Error::UnknownActivation(other.to_owned())),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Column-wise softmax. Subtracts each column's max before exponentiating so
/// large logits cannot overflow `exp`.
pub fn softmax(x: &Matrix) -> Matrix {
    let mut res = Matrix::zeros(x.rows, x.cols);

    for j in 0..x.cols {
        let max = (0..x.rows)
            .map(|i| x.data[i][j])
            .fold(f64::NEG_INFINITY, f64::max);

        let mut sum = 0.0;
        for i in 0..x.rows {
            let e = (x.data[i][j] - max).exp();
            res.data[i][j] = e;
            sum += e;
        }
        for i in 0..x.rows {
            res.data[i][j] /= sum;
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_basic_values() {
        let x = Matrix::from_data(vec![vec![0.0, 10.0, -10.0]]);
        let y = Activation::Sigmoid.apply(&x);
        assert!((y.data[0][0] - 0.5).abs() < 1e-9);
        assert!(y.data[0][1] > 0.999);
        assert!(y.data[0][2] < 0.001);
    }

    #[test]
    fn relu_derivative_is_zero_at_origin() {
        let x = Matrix::from_data(vec![vec![-1.0, 0.0, 2.0]]);
        let d = Activation::ReLU.derivative(&x);
        assert_eq!(d.data[0], vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn tanh_derivative_matches_identity() {
        let x = Matrix::from_data(vec![vec![0.7]]);
        let d = Activation::Tanh.derivative(&x);
        let t = 0.7_f64.tanh();
        assert!((d.data[0][0] - (1.0 - t * t)).abs() < 1e-12);
    }

    #[test]
    fn softmax_columns_sum_to_one() {
        let x = Matrix::from_data(vec![
            vec![1.0, -3.0],
            vec![2.0, 0.5],
            vec![3.0, 0.5],
        ]);
        let s = softmax(&x);

        for j in 0..s.cols {
            let col_sum: f64 = (0..s.rows).map(|i| s.data[i][j]).sum();
            assert!((col_sum - 1.0).abs() < 1e-12);
            for i in 0..s.rows {
                assert!(s.data[i][j] >= 0.0);
            }
        }
        // Largest logit wins within each column.
        assert!(s.data[2][0] > s.data[1][0]);
        assert!(s.data[1][0] > s.data[0][0]);
    }

    #[test]
    fn softmax_survives_large_logits() {
        let x = Matrix::from_data(vec![vec![1000.0], vec![1001.0]]);
        let s = softmax(&x);
        assert!(s.data[0][0].is_finite());
        assert!((s.data[0][0] + s.data[1][0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn token_round_trip_and_rejection() {
        for act in [
            Activation::Linear,
            Activation::Sigmoid,
            Activation::Tanh,
            Activation::ReLU,
            Activation::Softmax,
        ] {
            assert_eq!(Activation::from_token(act.token()).unwrap(), act);
        }
        assert!(Activation::from_token("mish").is_err());
    }
}
