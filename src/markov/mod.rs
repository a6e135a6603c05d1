// WHY: character-bigram Markov core, leaf-first
// Alphabet -> normalization -> bigrams -> transition matrix -> scorer -> calibration

pub mod alphabet;
pub mod normalization;
pub mod bigrams;
pub mod transition;
pub mod scorer;
pub mod calibration;

// Re-export core types
pub use alphabet::{Alphabet, DEFAULT_ACCEPTED_CHARS};
pub use normalization::{normalize, normalize_into};
pub use bigrams::{bigrams, Bigram, Bigrams};
pub use transition::{CountMatrix, TransitionMatrix, DEFAULT_PRIOR};
pub use scorer::{score, score_lines, score_with_buffer};
pub use calibration::{calibrate, calibrate_from_scores, threshold_from_scores, Calibration};
