// WHY: explicit immutable alphabet value instead of a process-wide lookup table
// Lets tests and callers swap in larger character sets without global state

use crate::error::{GibberishError, GibberishResult};

/// Characters accepted by the default model: 26 lowercase letters followed by a space
pub const DEFAULT_ACCEPTED_CHARS: &str = "abcdefghijklmnopqrstuvwxyz ";

const ASCII_TABLE_SIZE: usize = 128;

/// Ordered set of accepted characters, each mapped to a dense index in `[0, len)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
    // WHY: O(1) lookup for the hot ASCII path, alphabet order defines the index
    ascii_index: [Option<u8>; ASCII_TABLE_SIZE],
}

impl Alphabet {
    /// Build an alphabet from an ordered character sequence
    /// Order is significant: the n-th character gets index n
    pub fn new(accepted: &str) -> GibberishResult<Self> {
        let mut chars = Vec::with_capacity(accepted.len());
        let mut ascii_index = [None; ASCII_TABLE_SIZE];

        for ch in accepted.chars() {
            if chars.contains(&ch) {
                return Err(GibberishError::DuplicateCharacter(ch));
            }
            if ch.is_ascii() && chars.len() <= u8::MAX as usize {
                ascii_index[ch as usize] = Some(chars.len() as u8);
            }
            chars.push(ch);
        }

        if chars.is_empty() {
            return Err(GibberishError::EmptyAlphabet);
        }

        Ok(Self { chars, ascii_index })
    }

    /// Index of `ch`, or `None` when the character is not accepted
    pub fn index_of(&self, ch: char) -> Option<usize> {
        if ch.is_ascii() {
            if let Some(idx) = self.ascii_index[ch as usize] {
                return Some(idx as usize);
            }
            // Only alphabets longer than 256 chars can leave an accepted ASCII char unindexed
            if self.chars.len() <= u8::MAX as usize {
                return None;
            }
        }
        self.chars.iter().position(|&c| c == ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.index_of(ch).is_some()
    }

    /// Number of accepted characters (K), which fixes the matrix dimension
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Character at `index`
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Alphabet as a string, in index order
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        // WHY: the default set is a compile-time constant with no duplicates
        let chars: Vec<char> = DEFAULT_ACCEPTED_CHARS.chars().collect();
        let mut ascii_index = [None; ASCII_TABLE_SIZE];
        for (idx, &ch) in chars.iter().enumerate() {
            ascii_index[ch as usize] = Some(idx as u8);
        }
        Self { chars, ascii_index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet_indices() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 27);
        assert_eq!(alphabet.index_of('a'), Some(0));
        assert_eq!(alphabet.index_of('z'), Some(25));
        assert_eq!(alphabet.index_of(' '), Some(26));
    }

    #[test]
    fn test_default_matches_constructed() {
        let built = Alphabet::new(DEFAULT_ACCEPTED_CHARS).unwrap();
        assert_eq!(built, Alphabet::default());
    }

    #[test]
    fn test_rejects_unsupported_characters() {
        let alphabet = Alphabet::default();
        for ch in ['A', 'Z', '0', '9', '.', ',', '\n', '\t', 'é', '世'] {
            assert_eq!(alphabet.index_of(ch), None, "{ch:?} should not be accepted");
        }
    }

    #[test]
    fn test_indices_are_contiguous() {
        let alphabet = Alphabet::default();
        for (expected, &ch) in alphabet.chars().iter().enumerate() {
            assert_eq!(alphabet.index_of(ch), Some(expected));
            assert_eq!(alphabet.char_at(expected), Some(ch));
        }
        assert_eq!(alphabet.char_at(27), None);
    }

    #[test]
    fn test_custom_alphabet_with_non_ascii() {
        let alphabet = Alphabet::new("ab éß").unwrap();
        assert_eq!(alphabet.len(), 5);
        assert_eq!(alphabet.index_of('é'), Some(3));
        assert_eq!(alphabet.index_of('ß'), Some(4));
        assert_eq!(alphabet.index_of('c'), None);
        assert_eq!(alphabet.as_string(), "ab éß");
    }

    #[test]
    fn test_duplicate_character_rejected() {
        assert_eq!(
            Alphabet::new("abca"),
            Err(GibberishError::DuplicateCharacter('a'))
        );
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        assert_eq!(Alphabet::new(""), Err(GibberishError::EmptyAlphabet));
    }
}
