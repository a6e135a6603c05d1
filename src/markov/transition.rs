// WHY: two-stage matrix, mutable counts during training then frozen log-probabilities
// Types enforce that scoring never sees raw counts and training never mutates a frozen model

use super::alphabet::Alphabet;
use super::bigrams::Bigrams;
use super::normalization::normalize_into;
use crate::error::{GibberishError, GibberishResult};

/// Pseudo-count every cell starts with before training
/// Must stay at 10 for scores to match calibration data produced with it
pub const DEFAULT_PRIOR: f64 = 10.0;

/// Allowed drift of a row's probability sum from 1 when loading a frozen matrix
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

fn check_prior(prior: f64) -> GibberishResult<()> {
    if !prior.is_finite() || prior <= 0.0 {
        return Err(GibberishError::InvalidPrior(prior));
    }
    Ok(())
}

/// K×K transition counts, row-major, seeded with a uniform smoothing prior
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix {
    alphabet: Alphabet,
    prior: f64,
    counts: Vec<f64>,
    // WHY: scratch buffer so observe_line does not allocate per line
    scratch: Vec<char>,
}

impl CountMatrix {
    /// Create a count matrix with every cell set to `prior`
    pub fn with_prior(alphabet: Alphabet, prior: f64) -> GibberishResult<Self> {
        check_prior(prior)?;
        let k = alphabet.len();
        Ok(Self {
            alphabet,
            prior,
            counts: vec![prior; k * k],
            scratch: Vec::new(),
        })
    }

    /// Count matrix with the default prior of 10
    pub fn new(alphabet: Alphabet) -> Self {
        let k = alphabet.len();
        Self {
            alphabet,
            prior: DEFAULT_PRIOR,
            counts: vec![DEFAULT_PRIOR; k * k],
            scratch: Vec::new(),
        }
    }

    /// Add one count per bigram found in `line`
    /// Lines are independent; observation order does not change the final counts
    pub fn observe_line(&mut self, line: &str) {
        let mut scratch = std::mem::take(&mut self.scratch);
        normalize_into(line, &self.alphabet, &mut scratch);

        let k = self.alphabet.len();
        for pair in Bigrams::new(&scratch) {
            // Normalized characters are always in the alphabet
            if let (Some(i), Some(j)) = (
                self.alphabet.index_of(pair.left),
                self.alphabet.index_of(pair.right),
            ) {
                self.counts[i * k + j] += 1.0;
            }
        }

        self.scratch = scratch;
    }

    pub fn observe_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.observe_line(line.as_ref());
        }
    }

    pub fn count(&self, row: usize, col: usize) -> f64 {
        let k = self.alphabet.len();
        self.counts[row * k + col]
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }

    /// Total bigrams observed beyond the prior
    pub fn observed_transitions(&self) -> u64 {
        let seeded = self.prior * self.counts.len() as f64;
        (self.counts.iter().sum::<f64>() - seeded).round() as u64
    }

    /// Convert counts row-wise into natural-log probabilities
    /// Every row sum is positive because every cell holds at least the prior
    pub fn normalize(self) -> TransitionMatrix {
        let k = self.alphabet.len();
        let mut log_probs = self.counts;

        for row in log_probs.chunks_mut(k) {
            let sum: f64 = row.iter().sum();
            for cell in row.iter_mut() {
                *cell = (*cell / sum).ln();
            }
        }

        TransitionMatrix {
            alphabet: self.alphabet,
            prior: self.prior,
            log_probs,
        }
    }
}

/// Frozen K×K log-probability matrix used for scoring
/// Row `i` holds ln P(next = j | current = i); each row sums to 1 in probability space
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    alphabet: Alphabet,
    prior: f64,
    log_probs: Vec<f64>,
}

impl TransitionMatrix {
    /// Train a matrix from corpus lines in one shot
    pub fn build<I, S>(alphabet: Alphabet, lines: I, prior: f64) -> GibberishResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = CountMatrix::with_prior(alphabet, prior)?;
        counts.observe_lines(lines);
        Ok(counts.normalize())
    }

    /// Rebuild a frozen matrix from rows of log-probabilities (e.g. a loaded model file)
    /// Every row must be finite and sum to 1 in probability space, so scores stay in (0, 1]
    pub fn from_rows(alphabet: Alphabet, prior: f64, rows: &[Vec<f64>]) -> GibberishResult<Self> {
        check_prior(prior)?;
        let k = alphabet.len();
        if rows.len() != k {
            return Err(GibberishError::DimensionMismatch {
                expected: k,
                found: rows.len(),
            });
        }

        let mut log_probs = Vec::with_capacity(k * k);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != k {
                return Err(GibberishError::DimensionMismatch {
                    expected: k,
                    found: row.len(),
                });
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(GibberishError::NonFiniteWeight { row: i, col: j });
            }
            let sum: f64 = row.iter().map(|lp| lp.exp()).sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(GibberishError::RowNotNormalized { row: i, sum });
            }
            log_probs.extend_from_slice(row);
        }

        Ok(Self {
            alphabet,
            prior,
            log_probs,
        })
    }

    /// Log-probability that `right` follows `left`, by character
    pub fn log_prob(&self, left: char, right: char) -> Option<f64> {
        let i = self.alphabet.index_of(left)?;
        let j = self.alphabet.index_of(right)?;
        Some(self.get(i, j))
    }

    /// Log-probability by alphabet index
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.log_probs[row * self.dimension() + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let k = self.dimension();
        &self.log_probs[row * k..(row + 1) * k]
    }

    /// Rows as owned vectors, for serialization
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.log_probs
            .chunks(self.dimension())
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Matrix side length (K)
    pub fn dimension(&self) -> usize {
        self.alphabet.len()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn prior(&self) -> f64 {
        self.prior
    }
}
