use crate::math::matrix::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: per-sample mean of squared error, summed over the batch.
    pub fn loss(outputs: &Matrix, references: &Matrix) -> f64 {
        let diff = references.clone() - outputs.clone();
        let n_rows = outputs.rows as f64;
        diff.map(|x| x * x).row_sums().iter().sum::<f64>() / n_rows
    }

    /// Gradient w.r.t. outputs: `2 * (outputs - references) / output_dim`,
    /// matching the per-sample mean in `loss`. Averaging over the batch is
    /// the trainer's job (`Network::train` divides the update by the column
    /// count), not the loss's.
    pub fn derivative(outputs: &Matrix, references: &Matrix) -> Matrix {
        let n_rows = outputs.rows as f64;
        (outputs.clone() - references.clone()).map(|x| 2.0 * x / n_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_is_zero_for_exact_outputs() {
        let y = Matrix::from_data(vec![vec![0.5, 1.0], vec![0.0, -2.0]]);
        assert_eq!(MseLoss::loss(&y, &y), 0.0);
    }

    #[test]
    fn loss_and_gradient_on_known_values() {
        let outputs = Matrix::from_column(vec![1.0, 0.0]);
        let refs = Matrix::from_column(vec![0.0, 0.0]);
        // mean over the 2 rows of [1, 0] squared error = 0.5
        assert!((MseLoss::loss(&outputs, &refs) - 0.5).abs() < 1e-12);

        // 2 * (1 - 0) / 2 rows = 1
        let grad = MseLoss::derivative(&outputs, &refs);
        assert_eq!(grad.data, vec![vec![1.0], vec![0.0]]);
    }
}
