use crate::activation::activation::softmax;
use crate::math::matrix::Matrix;

/// Combined softmax + categorical cross-entropy over **raw logits**.
///
/// Both functions apply softmax internally, so the network output fed to
/// them must not already be softmaxed: pair this loss with a `Linear`
/// output layer. (With a `Softmax` output layer, seed the backward pass
/// with `activations - references` directly instead; the layer's
/// pass-through derivative makes that the same combined gradient.)
pub struct SoftmaxCrossEntropyLoss;

impl SoftmaxCrossEntropyLoss {
    /// Scalar loss: `-Σ refs · ln(softmax(outputs))`, probabilities floored
    /// at machine epsilon before the log.
    pub fn loss(outputs: &Matrix, references: &Matrix) -> f64 {
        let probs = softmax(outputs);

        let mut total = 0.0;
        for i in 0..outputs.rows {
            for j in 0..outputs.cols {
                total -= references.data[i][j] * probs.data[i][j].max(f64::EPSILON).ln();
            }
        }
        total
    }

    /// Combined gradient w.r.t. the logits: `softmax(outputs) - references`.
    ///
    /// This already folds in the softmax Jacobian, which is why
    /// `Activation::Softmax::derivative` is a pass-through.
    pub fn derivative(outputs: &Matrix, references: &Matrix) -> Matrix {
        softmax(outputs) - references.clone()
    }
}
