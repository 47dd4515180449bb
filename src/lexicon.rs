//! Pronunciation dictionary loading and lookup.
//!
//! The dictionary is tab-separated text, one entry per line:
//!
//! ```text
//! ;;; comment lines are skipped
//! HELLO	həˈloʊ, hɛˈloʊ
//! WORLD	wˈɝːld
//! ```
//!
//! The key is an uppercase ARPABET-style spelling with stress digits turned
//! into the primary stress marker; the value is a comma-separated list of
//! transcription variants (only the first is ever used). The map is built once
//! and read-only afterwards, so shared references can be handed to concurrent
//! readers without synchronisation.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

/// Lines starting with this marker are dictionary comments.
const COMMENT_MARKER: &str = ";;;";

static RE_NON_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z']").unwrap());
static RE_STRESS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

/// Build the dictionary key for a word: uppercase, non-letter characters
/// stripped, any stress digit replaced by the primary stress marker `ˈ`.
pub fn lexicon_key(word: &str) -> String {
    let cleaned = RE_NON_KEY.replace_all(word, "").to_uppercase();
    RE_STRESS_DIGIT.replace_all(&cleaned, "ˈ").into_owned()
}

/// In-memory word → transcription map.
pub struct Lexicon {
    entries: HashMap<String, String>,
}

impl Lexicon {
    /// Load the dictionary from a file.
    ///
    /// A missing or unreadable file is logged and yields an empty lexicon —
    /// every word then degrades to the fallback transcriber. Never fatal.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_text(&text),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "cannot read dictionary, lexicon will be empty");
                Self { entries: HashMap::new() }
            }
        }
    }

    /// Parse dictionary text. Malformed lines (not exactly two tab-separated
    /// fields) are logged and dropped; the lexicon just ends up sparser.
    pub fn from_text(text: &str) -> Self {
        let mut entries = HashMap::new();
        for line in text.lines() {
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }
            let mut fields = line.splitn(2, '\t');
            match (fields.next(), fields.next()) {
                (Some(key), Some(value)) => {
                    entries.insert(key.to_string(), value.to_string());
                }
                _ => {
                    tracing::warn!(line, "malformed dictionary line, skipping");
                }
            }
        }
        tracing::info!(entries = entries.len(), "pronunciation dictionary loaded");
        Self { entries }
    }

    /// Look up a transcription by dictionary key (see [`lexicon_key`]).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of dictionary entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no entries loaded — every word will use the fallback.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
