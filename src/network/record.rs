use serde::{Deserialize, Serialize};

use crate::activation::activation::Activation;
use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;

/// On-disk form of one layer: the model file is a JSON array of these, in
/// layer order.
///
/// ```json
/// { "weights": [[…], …], "biases": […], "activation": "sigmoid" }
/// ```
///
/// The weight array's shape is authoritative: rows = outer length, columns =
/// inner length. `into_layer` rejects ragged rows, bias-length mismatches
/// and unknown activation tokens instead of coercing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRecord {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
    pub activation: String,
}

impl LayerRecord {
    pub fn from_layer(layer: &Layer) -> LayerRecord {
        LayerRecord {
            weights: layer.weights.data.clone(),
            biases: layer.biases.clone(),
            activation: layer.activation.token().to_owned(),
        }
    }

    pub fn into_layer(self) -> Result<Layer> {
        let rows = self.weights.len();
        if rows == 0 {
            return Err(Error::MalformedRecord(
                "weights array must have at least one row".to_owned(),
            ));
        }

        let cols = self.weights[0].len();
        if cols == 0 {
            return Err(Error::MalformedRecord(
                "weight rows must not be empty".to_owned(),
            ));
        }
        for (i, row) in self.weights.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::MalformedRecord(format!(
                    "weight row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
        }

        if self.biases.len() != rows {
            return Err(Error::MalformedRecord(format!(
                "biases length {} does not match weight row count {}",
                self.biases.len(),
                rows
            )));
        }

        let activation = Activation::from_token(&self.activation)?;

        Ok(Layer {
            weights: Matrix::from_data(self.weights),
            biases: self.biases,
            activation,
        })
    }
}
