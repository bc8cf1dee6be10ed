use thiserror::Error;

/// Errors produced by the dataset and model codecs.
///
/// Shape mismatches inside the numeric kernel are programming errors and
/// panic instead (see `math::matrix`); only I/O and format problems are
/// recoverable enough to hand back to the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An IDX stream opened fine but did not start with the expected magic.
    #[error("magic number mismatch: expected {expected}, got {found}")]
    MagicMismatch { expected: u32, found: u32 },

    /// A model file parsed as JSON but violated the layer-record layout.
    #[error("malformed model record: {0}")]
    MalformedRecord(String),

    #[error("unknown activation token: {0:?}")]
    UnknownActivation(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
