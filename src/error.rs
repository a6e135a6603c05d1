// WHY: one typed error for the pure model core; I/O and CLI layers wrap it in anyhow

use thiserror::Error;

/// Errors raised by alphabet construction, training, calibration and model loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GibberishError {
    #[error("alphabet must contain at least one character")]
    EmptyAlphabet,

    #[error("alphabet contains duplicate character {0:?}")]
    DuplicateCharacter(char),

    #[error("smoothing prior must be finite and positive, got {0}")]
    InvalidPrior(f64),

    #[error("{side} calibration corpus produced no scores")]
    EmptyCalibrationCorpus { side: &'static str },

    #[error("matrix dimension mismatch: alphabet has {expected} characters, matrix has {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("non-finite weight at ({row}, {col})")]
    NonFiniteWeight { row: usize, col: usize },

    #[error("row {row} does not sum to 1 in probability space (sum = {sum})")]
    RowNotNormalized { row: usize, sum: f64 },

    #[error("unsupported model format version {0}")]
    UnsupportedFormat(u32),
}

pub type GibberishResult<T> = Result<T, GibberishError>;
