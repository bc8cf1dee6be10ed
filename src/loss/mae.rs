use crate::math::matrix::Matrix;

pub struct MaeLoss;

impl MaeLoss {
    /// Scalar MAE: per-sample mean of absolute error, summed over the batch.
    pub fn loss(outputs: &Matrix, references: &Matrix) -> f64 {
        let diff = references.clone() - outputs.clone();
        let n_rows = outputs.rows as f64;
        diff.map(f64::abs).row_sums().iter().sum::<f64>() / n_rows
    }

    /// Subgradient w.r.t. outputs: `sign(outputs - references)`, 0 at equality.
    pub fn derivative(outputs: &Matrix, references: &Matrix) -> Matrix {
        (outputs.clone() - references.clone()).map(|x| {
            if x > 0.0 {
                1.0
            } else if x < 0.0 {
                -1.0
            } else {
                0.0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_averages_rows_and_sums_columns() {
        let outputs = Matrix::from_data(vec![vec![1.0, 0.0], vec![-1.0, 0.0]]);
        let refs = Matrix::zeros(2, 2);
        // column 0 contributes mean(1, 1) = 1, column 1 contributes 0
        assert!((MaeLoss::loss(&outputs, &refs) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn gradient_is_sign_of_error() {
        let outputs = Matrix::from_column(vec![2.0, -3.0]);
        let refs = Matrix::from_column(vec![0.0, 0.0]);
        let grad = MaeLoss::derivative(&outputs, &refs);
        assert_eq!(grad.data, vec![vec![1.0], vec![-1.0]]);
    }
}
