// Test fixtures with known English and gibberish texts
// WHY: deterministic corpora keep calibration outcomes reproducible

/// Training corpus: plain English prose, one paragraph per line
pub const TRAINING_TEXT: &str = "It was the best of times, it was the worst of times, it was the age of wisdom,
it was the age of foolishness, it was the epoch of belief, it was the epoch of incredulity,
it was the season of Light, it was the season of Darkness, it was the spring of hope,
it was the winter of despair, we had everything before us, we had nothing before us,
we were all going direct to Heaven, we were all going direct the other way.
There were a king with a large jaw and a queen with a plain face, on the throne of England;
there were a king with a large jaw and a queen with a fair face, on the throne of France.
The quick brown fox jumps over the lazy dog while the farmer watches from the porch.
She thought about the long journey home and smiled at the memory of her mother.
They walked together through the quiet streets until the lights of the town appeared.";

/// Known-good calibration lines
pub const GOOD_LINES: &str = "the quick brown fox
it was the best of times
we were all going home together
she smiled at the memory of her mother";

/// Known-gibberish calibration lines
pub const BAD_LINES: &str = "xqzjk qxzjp
zxcvbn mnbvcx
qwfpgj luyqwk
kjhgfd vbnmzx";
