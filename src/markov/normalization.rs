// WHY: standalone normalization so training and scoring share one lossy filter
// Separates character filtering from bigram extraction and enables buffer reuse

use super::alphabet::Alphabet;

/// Lowercase `text` and keep only characters accepted by `alphabet`, in order
/// Unsupported characters are dropped silently; this is a filter, not a validator
pub fn normalize(text: &str, alphabet: &Alphabet) -> Vec<char> {
    let mut result = Vec::with_capacity(text.len());
    normalize_into(text, alphabet, &mut result);
    result
}

/// Normalize into supplied buffer to avoid allocation
/// WHY: training walks every corpus line, reusing one buffer keeps that allocation-free
pub fn normalize_into(text: &str, alphabet: &Alphabet, buffer: &mut Vec<char>) {
    buffer.clear();
    buffer.reserve(text.len());

    for ch in text.chars() {
        if ch.is_ascii() {
            // Fast path: ASCII lowercasing is a single char
            let lower = ch.to_ascii_lowercase();
            if alphabet.contains(lower) {
                buffer.push(lower);
            }
        } else {
            // WHY: Unicode lowercasing is locale-independent but may expand (e.g. 'İ')
            for lower in ch.to_lowercase() {
                if alphabet.contains(lower) {
                    buffer.push(lower);
                }
            }
        }
    }
}
