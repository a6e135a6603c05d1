// WHY: threshold derivation plus an explicit separation signal
// Overlapping good/bad scores are reported to the caller instead of failing training

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::scorer::score_lines;
use super::transition::TransitionMatrix;
use crate::error::{GibberishError, GibberishResult};

/// Result of scoring the reference corpora against a trained matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Decision threshold: midpoint between worst good and best bad score
    pub threshold: f64,
    /// Lowest score among known-good lines
    pub min_good: f64,
    /// Highest score among known-bad lines
    pub max_bad: f64,
    pub good_samples: usize,
    pub bad_samples: usize,
}

impl Calibration {
    /// Gap between the worst good and best bad score; negative or zero means overlap
    pub fn margin(&self) -> f64 {
        self.min_good - self.max_bad
    }

    /// True when every good line outscores every bad line
    pub fn is_separated(&self) -> bool {
        self.margin() > 0.0
    }
}

/// Score both reference corpora and derive the decision threshold
pub fn calibrate<G, B, S, T>(
    matrix: &TransitionMatrix,
    good_lines: G,
    bad_lines: B,
) -> GibberishResult<Calibration>
where
    G: IntoIterator<Item = S>,
    B: IntoIterator<Item = T>,
    S: AsRef<str>,
    T: AsRef<str>,
{
    let good_scores = score_lines(matrix, good_lines);
    let bad_scores = score_lines(matrix, bad_lines);
    calibrate_from_scores(&good_scores, &bad_scores)
}

/// Build a calibration from precomputed score sequences
pub fn calibrate_from_scores(
    good_scores: &[f64],
    bad_scores: &[f64],
) -> GibberishResult<Calibration> {
    let min_good = good_scores
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or(GibberishError::EmptyCalibrationCorpus { side: "good" })?;
    let max_bad = bad_scores
        .iter()
        .copied()
        .reduce(f64::max)
        .ok_or(GibberishError::EmptyCalibrationCorpus { side: "bad" })?;

    let calibration = Calibration {
        threshold: (min_good + max_bad) / 2.0,
        min_good,
        max_bad,
        good_samples: good_scores.len(),
        bad_samples: bad_scores.len(),
    };

    if calibration.is_separated() {
        info!(
            threshold = calibration.threshold,
            margin = calibration.margin(),
            "Calibration separates good and bad samples"
        );
    } else {
        warn!(
            min_good,
            max_bad,
            margin = calibration.margin(),
            "Calibration overlap: worst good score does not exceed best bad score"
        );
    }

    Ok(calibration)
}

/// Midpoint threshold between the worst good and the best bad score
pub fn threshold_from_scores(good_scores: &[f64], bad_scores: &[f64]) -> GibberishResult<f64> {
    calibrate_from_scores(good_scores, bad_scores).map(|c| c.threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markov::alphabet::Alphabet;
    use crate::markov::scorer::score;
    use crate::markov::transition::DEFAULT_PRIOR;

    #[test]
    fn test_threshold_midpoint() {
        let threshold = threshold_from_scores(&[0.05, 0.08], &[0.01, 0.02]).unwrap();
        assert!((threshold - 0.035).abs() < 1e-15);
    }

    #[test]
    fn test_separated_calibration() {
        let calibration = calibrate_from_scores(&[0.05, 0.08], &[0.01, 0.02]).unwrap();
        assert_eq!(calibration.min_good, 0.05);
        assert_eq!(calibration.max_bad, 0.02);
        assert_eq!(calibration.good_samples, 2);
        assert_eq!(calibration.bad_samples, 2);
        assert!(calibration.is_separated());
        assert!((calibration.margin() - 0.03).abs() < 1e-15);
    }

    #[test]
    fn test_overlap_is_reported_not_fatal() {
        let calibration = calibrate_from_scores(&[0.03, 0.09], &[0.01, 0.04]).unwrap();
        assert!(!calibration.is_separated());
        assert!(calibration.margin() < 0.0);
        assert!((calibration.threshold - 0.035).abs() < 1e-15);

        // Touching distributions are not separated either
        let touching = calibrate_from_scores(&[0.02], &[0.02]).unwrap();
        assert!(!touching.is_separated());
    }

    #[test]
    fn test_empty_corpus_rejected() {
        assert_eq!(
            calibrate_from_scores(&[], &[0.01]),
            Err(GibberishError::EmptyCalibrationCorpus { side: "good" })
        );
        assert_eq!(
            calibrate_from_scores(&[0.5], &[]),
            Err(GibberishError::EmptyCalibrationCorpus { side: "bad" })
        );
    }

    #[test]
    fn test_calibrate_against_trained_matrix() {
        let corpus = [
            "the quick brown fox jumps over the lazy dog",
            "a quick movement of the enemy will jeopardize six gunboats",
            "the five boxing wizards jump quickly",
            "how vexingly quick daft zebras jump",
        ];
        let matrix = TransitionMatrix::build(Alphabet::default(), corpus, DEFAULT_PRIOR).unwrap();
        let calibration = calibrate(&matrix, ["the quick brown fox"], ["xqzjk qxzjp"]).unwrap();

        let good = score("the quick brown fox", &matrix);
        let bad = score("xqzjk qxzjp", &matrix);
        assert!(good > bad);
        assert!(good > calibration.threshold);
        assert!(bad < calibration.threshold);
        assert!(calibration.is_separated());
    }
}
