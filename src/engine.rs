//! Synthesis-request assembly and the inference-engine boundary.
//!
//! The neural engine itself is an external collaborator: it takes a padded
//! int64 token sequence, a 256-float style vector and a speed scalar, and
//! returns raw audio samples at [`SAMPLE_RATE`]. This module only builds the
//! request and defines the trait the engine plugs into.

use crate::error::{Error, Result};
use crate::style::STYLE_DIM;
use crate::tokenize::{pad, tokenize, MAX_PHONEME_LENGTH};

/// Sample rate of the audio the engine produces, in Hz.
pub const SAMPLE_RATE: u32 = 22_050;

/// Phoneme strings are truncated to this length before tokenization, leaving
/// generous room for the padding ids inside the model context.
pub const MAX_INPUT_PHONEMES: usize = 400;

/// One synthesis request: everything the engine needs for a single utterance.
pub struct SynthesisRequest {
    /// Token ids, already wrapped with the padding id at both ends.
    pub tokens: Vec<i64>,
    /// 256-float conditioning vector.
    pub style: Vec<f32>,
    /// Speech-rate multiplier, 1.0 = trained rate.
    pub speed: f32,
}

impl SynthesisRequest {
    /// Assemble a request from a phoneme string.
    ///
    /// Over-long phoneme strings are truncated to [`MAX_INPUT_PHONEMES`]
    /// characters with a warning. The padded token sequence must fit the
    /// model context; a violation means the surrounding configuration is
    /// broken and is reported as a precondition error, not recovered.
    pub fn new(phonemes: &str, style: Vec<f32>, speed: f32) -> Result<Self> {
        if style.len() != STYLE_DIM {
            return Err(Error::ShapeValidation(format!(
                "style vector has {} dimensions, expected {STYLE_DIM}",
                style.len()
            )));
        }

        let char_count = phonemes.chars().count();
        let truncated: String = if char_count > MAX_INPUT_PHONEMES {
            tracing::warn!(
                len = char_count,
                max = MAX_INPUT_PHONEMES,
                "phoneme sequence too long, truncating"
            );
            phonemes.chars().take(MAX_INPUT_PHONEMES).collect()
        } else {
            phonemes.to_string()
        };

        let tokens = tokenize(&truncated)?;
        if tokens.len() + 2 > MAX_PHONEME_LENGTH {
            return Err(Error::Precondition(format!(
                "{} tokens leave no room for padding in a {MAX_PHONEME_LENGTH}-token context",
                tokens.len()
            )));
        }

        Ok(Self { tokens: pad(&tokens), style, speed })
    }
}

/// The external inference boundary.
///
/// This crate ships no implementation; the surrounding application provides
/// one backed by its neural runtime and receives a flat f32 sample buffer at
/// [`SAMPLE_RATE`] back.
pub trait SynthesisEngine {
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<f32>>;
}
