pub mod corpus;
pub mod error;
pub mod markov;
pub mod model;
pub mod persistence;
pub mod pipeline;
pub mod reader;

// Re-export main types for convenient access
pub use error::{GibberishError, GibberishResult};
pub use markov::{
    Alphabet, Bigram, Calibration, CountMatrix, TransitionMatrix, DEFAULT_ACCEPTED_CHARS,
    DEFAULT_PRIOR,
};
pub use model::{Classification, Model};

// Re-export corpus reading and training entry points
pub use pipeline::{train_from_lines, train_model, TrainingConfig, TrainingReport};
pub use reader::{AsyncFileReader, ReadStats, ReaderConfig};

// Re-export model file helpers
pub use persistence::{default_model_path, load_model, load_model_async, model_exists, save_model};
