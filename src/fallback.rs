//! Fallback grapheme-to-IPA transliteration for out-of-dictionary words.
//!
//! The phonemizer only consults the transcriber for words the lexicon does
//! not know. The built-in [`RuleTranscriber`] is a transliteration heuristic
//! (digraph rules first, then single letters), not a full G2P model — good
//! enough to keep synthesis going for names, typos and neologisms.

/// Best-effort word → IPA transcription.
///
/// Implementations must be total: a non-empty word always produces a
/// non-empty transcription.
pub trait Transcriber {
    fn transcribe(&self, word: &str) -> String;
}

/// Rule-based English transliterator.
pub struct RuleTranscriber;

/// Two-letter sequences checked before single letters.
fn digraph(a: char, b: char) -> Option<&'static str> {
    Some(match (a, b) {
        ('t', 'h') => "θ",
        ('s', 'h') => "ʃ",
        ('c', 'h') => "ʧ",
        ('n', 'g') => "ŋ",
        ('p', 'h') => "f",
        ('w', 'h') => "w",
        ('c', 'k') => "k",
        ('q', 'u') => "kw",
        ('e', 'e') | ('e', 'a') => "iː",
        ('o', 'o') => "uː",
        ('o', 'u') => "aʊ",
        ('o', 'w') => "oʊ",
        ('a', 'i') | ('a', 'y') => "eɪ",
        ('o', 'i') | ('o', 'y') => "ɔɪ",
        _ => return None,
    })
}

fn single(c: char) -> Option<&'static str> {
    Some(match c {
        'a' => "æ",
        'b' => "b",
        'c' | 'k' | 'q' => "k",
        'd' => "d",
        'e' => "ɛ",
        'f' => "f",
        'g' => "ɡ",
        'h' => "h",
        'i' => "ɪ",
        'j' => "ʤ",
        'l' => "l",
        'm' => "m",
        'n' => "n",
        'o' => "ɑ",
        'p' => "p",
        'r' => "ɹ",
        's' => "s",
        't' => "t",
        'u' => "ʌ",
        'v' => "v",
        'w' => "w",
        'x' => "ks",
        'y' => "j",
        'z' => "z",
        _ => return None,
    })
}

impl Transcriber for RuleTranscriber {
    fn transcribe(&self, word: &str) -> String {
        let lowered = word.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();
        let mut out = String::new();
        let mut i = 0;
        while i < chars.len() {
            if i + 1 < chars.len() {
                if let Some(ipa) = digraph(chars[i], chars[i + 1]) {
                    out.push_str(ipa);
                    i += 2;
                    continue;
                }
            }
            if let Some(ipa) = single(chars[i]) {
                out.push_str(ipa);
            }
            // apostrophes and unmapped characters are dropped
            i += 1;
        }
        if out.is_empty() && !lowered.is_empty() {
            // keep the contract: non-empty in, non-empty out
            return lowered;
        }
        out
    }
}
