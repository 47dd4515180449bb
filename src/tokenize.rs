//! Character-level tokenizer — phoneme string → token id sequence.
//!
//! Each character maps to its index in the shared symbol vocabulary. The
//! tokenizer is the final validation gate before inference: characters the
//! phonemizer should have filtered are reported as errors, never dropped.

use crate::error::{Error, Result};
use crate::vocab::{ID_TO_SYMBOL, VOCAB};

/// Hard upper bound on the phoneme string accepted by the model context.
pub const MAX_PHONEME_LENGTH: usize = 512;

/// Token id used to pad both ends of every sequence.
pub const PAD_ID: i64 = 0;

/// Map `phonemes` to token ids.
///
/// Fails with [`Error::LengthExceeded`] above [`MAX_PHONEME_LENGTH`]
/// characters (exactly the maximum is accepted), and with
/// [`Error::UnknownSymbol`] for any character outside the vocabulary.
pub fn tokenize(phonemes: &str) -> Result<Vec<i64>> {
    let len = phonemes.chars().count();
    if len > MAX_PHONEME_LENGTH {
        return Err(Error::LengthExceeded { len, max: MAX_PHONEME_LENGTH });
    }

    phonemes
        .chars()
        .map(|c| VOCAB.get(&c).copied().ok_or(Error::UnknownSymbol(c)))
        .collect()
}

/// Wrap a token sequence with the padding id at both ends.
pub fn pad(tokens: &[i64]) -> Vec<i64> {
    let mut padded = Vec::with_capacity(tokens.len() + 2);
    padded.push(PAD_ID);
    padded.extend_from_slice(tokens);
    padded.push(PAD_ID);
    padded
}

/// Inverse of the id map, for diagnostics and round-trip checks.
///
/// The symbol list carries the apostrophe twice and the id map keeps the
/// later index, so the first apostrophe's id has no symbol and returns
/// `None`; [`tokenize`] never emits that id.
pub fn symbol_for(id: i64) -> Option<char> {
    ID_TO_SYMBOL.get(&id).copied()
}
