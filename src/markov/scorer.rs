// WHY: geometric-mean transition probability puts short and long strings on one scale

use super::bigrams::Bigrams;
use super::normalization::normalize_into;
use super::transition::TransitionMatrix;

/// Plausibility score in (0, 1] for `text`
///
/// Averages the log-probability of every bigram and exponentiates back to
/// probability space. Input with fewer than two alphabet characters has no
/// transitions; the divisor is then 1 and the score is exactly `exp(0) = 1.0`.
pub fn score(text: &str, matrix: &TransitionMatrix) -> f64 {
    let mut buffer = Vec::with_capacity(text.len());
    score_with_buffer(text, matrix, &mut buffer)
}

/// Score using a caller-supplied normalization buffer
/// WHY: calibration scores whole corpora, one buffer avoids per-line allocation
pub fn score_with_buffer(text: &str, matrix: &TransitionMatrix, buffer: &mut Vec<char>) -> f64 {
    let alphabet = matrix.alphabet();
    normalize_into(text, alphabet, buffer);

    let mut log_prob = 0.0;
    let mut transitions = 0usize;
    for pair in Bigrams::new(buffer.as_slice()) {
        if let Some(lp) = matrix.log_prob(pair.left, pair.right) {
            log_prob += lp;
            transitions += 1;
        }
    }

    // Zero transitions is a defined edge case, not an error
    let divisor = transitions.max(1) as f64;
    (log_prob / divisor).exp()
}

/// Score every line, preserving order
pub fn score_lines<I, S>(matrix: &TransitionMatrix, lines: I) -> Vec<f64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buffer = Vec::new();
    lines
        .into_iter()
        .map(|line| score_with_buffer(line.as_ref(), matrix, &mut buffer))
        .collect()
}
