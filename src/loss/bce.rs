use crate::math::matrix::Matrix;

/// Binary cross-entropy loss; pair with a Sigmoid output layer.
pub struct BceLoss;

impl BceLoss {
    /// Scalar BCE: `-Σ(r·ln(p) + (1-r)·ln(1-p))` with outputs floored at
    /// machine epsilon so `ln(0)` can never occur.
    pub fn loss(outputs: &Matrix, references: &Matrix) -> f64 {
        let clipped = outputs.map(|p| p.max(f64::EPSILON));

        let mut total = 0.0;
        for i in 0..outputs.rows {
            for j in 0..outputs.cols {
                let p = clipped.data[i][j];
                let r = references.data[i][j];
                total -= r * p.ln() + (1.0 - r) * (1.0 - p).ln();
            }
        }
        total
    }

    /// Element-wise gradient: `-r/p + (1-r)/(1-p)`, with the same clipping.
    pub fn derivative(outputs: &Matrix, references: &Matrix) -> Matrix {
        let clipped = outputs.map(|p| p.max(f64::EPSILON));

        let mut res = Matrix::zeros(outputs.rows, outputs.cols);
        for i in 0..outputs.rows {
            for j in 0..outputs.cols {
                let p = clipped.data[i][j];
                let r = references.data[i][j];
                res.data[i][j] = -(r / p) + (1.0 - r) / (1.0 - p);
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_confident_outputs_give_near_zero_loss() {
        let outputs = Matrix::from_column(vec![0.9999, 0.0001]);
        let refs = Matrix::from_column(vec![1.0, 0.0]);
        assert!(BceLoss::loss(&outputs, &refs) < 0.001);
    }

    #[test]
    fn zero_output_does_not_produce_infinity() {
        let outputs = Matrix::from_column(vec![0.0]);
        let refs = Matrix::from_column(vec![1.0]);
        let loss = BceLoss::loss(&outputs, &refs);
        assert!(loss.is_finite());
        assert!(BceLoss::derivative(&outputs, &refs).data[0][0].is_finite());
    }

    #[test]
    fn gradient_pushes_outputs_toward_references() {
        let outputs = Matrix::from_column(vec![0.3, 0.7]);
        let refs = Matrix::from_column(vec![1.0, 0.0]);
        let grad = BceLoss::derivative(&outputs, &refs);
        // Output below a 1-reference: negative gradient (increase it).
        assert!(grad.data[0][0] < 0.0);
        // Output above a 0-reference: positive gradient (decrease it).
        assert!(grad.data[1][0] > 0.0);
    }
}
