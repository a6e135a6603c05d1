// WHY: the end product of training, a frozen matrix paired with its calibrated threshold
// Read-only after construction, so it can be shared across threads without locking

use serde::Serialize;

use crate::markov::{score, Alphabet, Calibration, TransitionMatrix};

/// Outcome of classifying one string
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub score: f64,
    pub plausible: bool,
}

/// Trained gibberish model: frozen log-probability matrix plus decision threshold
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    matrix: TransitionMatrix,
    threshold: f64,
}

impl Model {
    pub fn new(matrix: TransitionMatrix, threshold: f64) -> Self {
        Self { matrix, threshold }
    }

    /// Pair a matrix with the threshold of a finished calibration
    pub fn from_calibration(matrix: TransitionMatrix, calibration: &Calibration) -> Self {
        Self::new(matrix, calibration.threshold)
    }

    /// Geometric-mean transition probability of `text`
    pub fn score(&self, text: &str) -> f64 {
        score(text, &self.matrix)
    }

    /// True when `text` scores strictly above the threshold
    pub fn is_plausible(&self, text: &str) -> bool {
        self.score(text) > self.threshold
    }

    pub fn classify(&self, text: &str) -> Classification {
        let score = self.score(text);
        Classification {
            score,
            plausible: score > self.threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.matrix.alphabet()
    }
}
