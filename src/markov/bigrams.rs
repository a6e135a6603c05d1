// WHY: lazy adjacent-pair iterator shared by counting and scoring
// Both sides walk the same normalized buffer, so neither needs a Vec of pairs

use super::alphabet::Alphabet;
use super::normalization::normalize;

/// One observed adjacency of two alphabet characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bigram {
    pub left: char,
    pub right: char,
}

impl Bigram {
    pub fn new(left: char, right: char) -> Self {
        Self { left, right }
    }
}

/// Iterator over adjacent pairs of a normalized character slice, left to right
/// Yields `len - 1` pairs, or none when the slice has fewer than two characters
#[derive(Debug, Clone)]
pub struct Bigrams<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Bigrams<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }
}

impl Iterator for Bigrams<'_> {
    type Item = Bigram;

    fn next(&mut self) -> Option<Bigram> {
        let pair = self.chars.get(self.pos..self.pos + 2)?;
        self.pos += 1;
        Some(Bigram::new(pair[0], pair[1]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chars.len().saturating_sub(self.pos + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bigrams<'_> {}

/// Normalize `text` and collect its bigrams in extraction order
pub fn bigrams(text: &str, alphabet: &Alphabet) -> Vec<Bigram> {
    let normalized = normalize(text, alphabet);
    Bigrams::new(&normalized).collect()
}
