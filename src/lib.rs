//! # kokoro-tts
//!
//! Text-to-synthesis-input pipeline for the Kokoro-82M speech model:
//! turns raw text into the padded token id sequence and blended 256-float
//! style vector its neural engine consumes. The engine itself (and audio
//! playback) live behind the [`engine::SynthesisEngine`] boundary and are
//! not part of this crate.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use kokoro_tts::{InterpolationMode, Lexicon, Phonemizer, StyleStore, SynthesisRequest, mix};
//!
//! // One-time startup loads; both are read-only afterwards.
//! let lexicon = Lexicon::load(Path::new("resources/cmudict_ipa.txt"));
//! let styles = StyleStore::from_dir(Path::new("resources/voices"))?;
//!
//! let phonemizer = Phonemizer::new(lexicon);
//! let phonemes = phonemizer.phonemize("Dr. Smith has 1,000 cats.");
//!
//! // Blend two presets half and half.
//! let weights = [("af_sarah".to_string(), 0.5), ("am_adam".to_string(), 0.5)]
//!     .into_iter()
//!     .collect();
//! let style = mix(&styles, &["af_sarah", "am_adam"], &weights, InterpolationMode::Linear)?;
//!
//! // Everything the inference engine needs for one utterance.
//! let request = SynthesisRequest::new(&phonemes, style, 1.0)?;
//! # Ok::<(), kokoro_tts::Error>(())
//! ```
//!
//! ## Pipeline
//! 1. **Normalization** — quote/punctuation unification, title expansion,
//!    numeric rewrites ([`normalize`]).
//! 2. **Phonemization** — dictionary lookup with transliteration fallback,
//!    stress repositioning, closed-vocabulary filtering ([`phonemize`]).
//! 3. **Tokenization** — phoneme characters → int64 ids, padded with 0 at
//!    both ends ([`tokenize`]).
//! 4. **Style** — preset vectors loaded from packed float32 arrays, blended
//!    linearly or spherically ([`style`]).
//!
//! The phonemizer and tokenizer validate against one shared symbol table
//! ([`vocab`]); a character that survives phonemization but misses the
//! tokenizer map is reported, never dropped.

pub mod audio;
pub mod engine;
pub mod error;
pub mod fallback;
pub mod lexicon;
pub mod normalize;
pub mod npy;
pub mod phonemize;
pub mod style;
pub mod tokenize;
pub mod vocab;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use engine::{SynthesisEngine, SynthesisRequest, MAX_INPUT_PHONEMES, SAMPLE_RATE};
pub use error::{Error, Result};
pub use fallback::Transcriber;
pub use lexicon::Lexicon;
pub use phonemize::Phonemizer;
pub use style::{mix, InterpolationMode, StyleStore, PRESET_NAMES};
