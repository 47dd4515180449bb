//! Error types for kokoro-tts.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
///
/// Dictionary-load problems are deliberately *not* represented here: malformed
/// dictionary lines and a missing dictionary file are logged and skipped during
/// [`Lexicon`](crate::lexicon::Lexicon) construction, never surfaced as errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A named resource (style preset) is not present in the store.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// A loaded array does not have the expected dimensions.
    #[error("shape validation failed: {0}")]
    ShapeValidation(String),

    /// An index or argument is outside its valid range.
    #[error("index {index} out of range, must be below {limit}")]
    Range { index: usize, limit: usize },

    /// A phoneme string exceeds the model context length.
    #[error("phoneme sequence is {len} characters long, maximum is {max}")]
    LengthExceeded { len: usize, max: usize },

    /// A character outside the symbol vocabulary reached the tokenizer.
    /// The phonemizer filters its output against the same vocabulary, so this
    /// indicates a post-processing defect upstream.
    #[error("unknown symbol {0:?}")]
    UnknownSymbol(char),

    /// A caller-side precondition was violated (empty mix, missing weight,
    /// zero weight sum, oversized token count).
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Malformed NPY / NPZ bytes.
    #[error("malformed array data: {0}")]
    Parse(String),

    /// I/O error.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// WAV encoding error.
    #[error("wav: {0}")]
    Wav(#[from] hound::Error),
}
