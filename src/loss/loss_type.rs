use serde::{Deserialize, Serialize};

use crate::loss::bce::BceLoss;
use crate::loss::mae::MaeLoss;
use crate::loss::mse::MseLoss;
use crate::loss::softmax_cross_entropy::SoftmaxCrossEntropyLoss;
use crate::math::matrix::Matrix;

/// Selects which loss function the training loop uses.
///
/// - `Mse`                 — mean squared error; pair with Linear or Sigmoid output.
/// - `Mae`                 — mean absolute error; pair with Linear output.
/// - `BinaryCrossEntropy`  — pair with Sigmoid output.
/// - `SoftmaxCrossEntropy` — expects raw logits; pair with a Linear output
///   layer (the loss applies softmax itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    Mse,
    Mae,
    BinaryCrossEntropy,
    SoftmaxCrossEntropy,
}

impl LossType {
    /// Scalar loss for a batch of outputs against references.
    pub fn loss(&self, outputs: &Matrix, references: &Matrix) -> f64 {
        match self {
            LossType::Mse => MseLoss::loss(outputs, references),
            LossType::Mae => MaeLoss::loss(outputs, references),
            LossType::BinaryCrossEntropy => BceLoss::loss(outputs, references),
            LossType::SoftmaxCrossEntropy => SoftmaxCrossEntropyLoss::loss(outputs, references),
        }
    }

    /// Gradient of the loss w.r.t. the outputs, same shape as `outputs`.
    pub fn derivative(&self, outputs: &Matrix, references: &Matrix) -> Matrix {
        match self {
            LossType::Mse => MseLoss::derivative(outputs, references),
            LossType::Mae => MaeLoss::derivative(outputs, references),
            LossType::BinaryCrossEntropy => BceLoss::derivative(outputs, references),
            LossType::SoftmaxCrossEntropy => {
                SoftmaxCrossEntropyLoss::derivative(outputs, references)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_direct_calls() {
        let outputs = Matrix::from_column(vec![0.8, 0.2]);
        let refs = Matrix::from_column(vec![1.0, 0.0]);

        assert_eq!(
            LossType::Mse.loss(&outputs, &refs),
            MseLoss::loss(&outputs, &refs)
        );
        assert_eq!(
            LossType::SoftmaxCrossEntropy.derivative(&outputs, &refs).data,
            SoftmaxCrossEntropyLoss::derivative(&outputs, &refs).data
        );
    }

    #[test]
    fn serde_tokens_are_snake_case() {
        let json = serde_json::to_string(&LossType::SoftmaxCrossEntropy).unwrap();
        assert_eq!(json, "\"softmax_cross_entropy\"");
        let back: LossType = serde_json::from_str("\"binary_cross_entropy\"").unwrap();
        assert_eq!(back, LossType::BinaryCrossEntropy);
    }
}
