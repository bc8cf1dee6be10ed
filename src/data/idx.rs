use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// IDX binary dataset codec (the MNIST family format).
///
/// Layout: a 4-byte magic number, big-endian u32 dimension fields, then raw
/// uint8 payload. Image streams use magic 2051 followed by sample count, row
/// count and column count; label streams use magic 2049 followed by the
/// sample count. All header fields are big-endian regardless of host
/// endianness.
pub const IMAGE_MAGIC: u32 = 2051;
pub const LABEL_MAGIC: u32 = 2049;

fn read_u32_be<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Reads an IDX image stream into a `(rows·cols) × samples` matrix with each
/// pixel normalized to [0, 1]. Each column is one flattened sample in
/// row-major pixel order.
pub fn read_images<R: Read>(reader: &mut R) -> Result<Matrix> {
    let magic = read_u32_be(reader)?;
    if magic != IMAGE_MAGIC {
        return Err(Error::MagicMismatch {
            expected: IMAGE_MAGIC,
            found: magic,
        });
    }

    let n_samples = read_u32_be(reader)? as usize;
    let n_rows = read_u32_be(reader)? as usize;
    let n_cols = read_u32_be(reader)? as usize;
    let n_pixels = n_rows * n_cols;

    let mut pixels = vec![0u8; n_samples * n_pixels];
    reader.read_exact(&mut pixels)?;

    let mut images = Matrix::zeros(n_pixels, n_samples);
    for (j, sample) in pixels.chunks_exact(n_pixels).enumerate() {
        for (i, &px) in sample.iter().enumerate() {
            images.data[i][j] = px as f64 / 255.0;
        }
    }

    Ok(images)
}

/// Reads an IDX label stream into the raw class-index vector.
pub fn read_labels<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    let magic = read_u32_be(reader)?;
    if magic != LABEL_MAGIC {
        return Err(Error::MagicMismatch {
            expected: LABEL_MAGIC,
            found: magic,
        });
    }

    let n_samples = read_u32_be(reader)? as usize;
    let mut labels = vec![0u8; n_samples];
    reader.read_exact(&mut labels)?;

    Ok(labels)
}

/// One-hot encodes class indices into a `(max_class + 1) × samples` matrix:
/// a single 1.0 per column at the row equal to that sample's class index.
/// The class count is derived from the observed maximum index.
pub fn one_hot_encode(labels: &[u8]) -> Matrix {
    let n_classes = labels.iter().max().map_or(0, |&max| max as usize + 1);

    let mut one_hot = Matrix::zeros(n_classes, labels.len());
    for (j, &class) in labels.iter().enumerate() {
        one_hot.data[class as usize][j] = 1.0;
    }

    one_hot
}

/// Loads an IDX image file from disk.
pub fn load_images<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let file = File::open(path)?;
    read_images(&mut BufReader::new(file))
}

/// Loads an IDX label file from disk as raw class indices.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    read_labels(&mut BufReader::new(file))
}
