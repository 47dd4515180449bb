//! The closed symbol vocabulary shared by the phonemizer and the tokenizer.
//!
//! The vocabulary is the ordered list:
//!   `[pad] + punctuation + ASCII letters + IPA extension set`
//!
//! The phonemizer filters its output against this table and the tokenizer maps
//! characters to indices through it. Both use the *same* `Lazy` map — the two
//! tables must stay byte-for-byte identical or token ids become meaningless,
//! so there is exactly one definition.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Padding symbol, always id 0. The padding id is prepended and appended to
/// every token sequence before inference.
pub const PAD: char = '$';

/// Punctuation set (space at the end).
const PUNCTUATION: &str = ";:,.!?¡¿—…\"«»“” ";

/// ASCII letters A–Z a–z.
const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// IPA extension set. The ASCII apostrophe appears twice in the trained
/// model's symbol list (around the combining U+0329); the map below is built
/// last-wins so `'` resolves to the id of its second occurrence, matching the
/// id table the model was trained with.
const IPA_LETTERS: &str =
    "ɑɐɒæɓʙβɔɕçɗɖðʤəɘɚɛɜɝɞɟʄɡɠɢʛɦɧħɥʜɨɪʝɭɬɫɮʟɱɯɰŋɳɲɴøɵɸθœɶʘɹɺɾɻʀʁɽʂʃʈʧʉʊʋⱱʌɣɤʍχʎʏʑʐʒʔʡʕʢǀǁǂǃˈˌːˑʼʴʰʱʲʷˠˤ˞↓↑→↗↘'̩'ᵻ";

/// Ordered symbol list, pad first.
pub static SYMBOLS: Lazy<Vec<char>> = Lazy::new(|| {
    std::iter::once(PAD)
        .chain(PUNCTUATION.chars())
        .chain(LETTERS.chars())
        .chain(IPA_LETTERS.chars())
        .collect()
});

/// Character → token id. Later occurrences overwrite earlier ones.
pub static VOCAB: Lazy<HashMap<char, i64>> = Lazy::new(|| {
    SYMBOLS
        .iter()
        .enumerate()
        .map(|(i, &c)| (c, i as i64))
        .collect()
});

/// Token id → character, the inverse of [`VOCAB`].
pub static ID_TO_SYMBOL: Lazy<HashMap<i64, char>> =
    Lazy::new(|| VOCAB.iter().map(|(&c, &i)| (i, c)).collect());

/// Pass-through class: tokens made entirely of characters outside `[a-zA-Z']`
/// (punctuation, digits, whitespace, symbols) skip phonetic lookup.
static RE_NON_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^a-zA-Z']+$").unwrap());

/// Returns `true` if `token` contains only non-letter characters.
/// Empty tokens are not in the class.
pub fn is_non_letter(token: &str) -> bool {
    RE_NON_LETTER.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_is_zero() {
        assert_eq!(VOCAB.get(&PAD), Some(&0));
    }

    #[test]
    fn ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for &id in VOCAB.values() {
            assert!(seen.insert(id), "duplicate id {}", id);
        }
    }

    #[test]
    fn known_symbols_present() {
        for c in ";:,.!? ".chars() {
            assert!(VOCAB.contains_key(&c), "{:?} missing from vocabulary", c);
        }
        for c in "azAZ".chars() {
            assert!(VOCAB.contains_key(&c), "{:?} missing from vocabulary", c);
        }
        for c in "ɹˈˌːθʃŋᵻ".chars() {
            assert!(VOCAB.contains_key(&c), "{:?} missing from vocabulary", c);
        }
    }

    #[test]
    fn apostrophe_resolves_to_last_occurrence() {
        // The symbol list contains ' twice; the map must keep the later id.
        let first = SYMBOLS.iter().position(|&c| c == '\'').unwrap();
        let id = VOCAB[&'\''];
        assert!(id as usize > first);
    }

    #[test]
    fn inverse_map_round_trips() {
        for (&c, &id) in VOCAB.iter() {
            assert_eq!(ID_TO_SYMBOL.get(&id), Some(&c));
        }
    }

    #[test]
    fn non_letter_class() {
        assert!(is_non_letter("!"));
        assert!(is_non_letter("1000"));
        assert!(is_non_letter(" "));
        assert!(is_non_letter("、"));
        assert!(!is_non_letter("word"));
        assert!(!is_non_letter("don't"));
        assert!(!is_non_letter("a1"));
        assert!(!is_non_letter(""));
    }
}
