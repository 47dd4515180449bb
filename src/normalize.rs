//! Text normalisation — cleans raw input before phonetic lookup.
//!
//! Every step is a no-op when its pattern does not match; normalisation
//! cannot fail.

use fancy_regex::Regex;
use once_cell::sync::Lazy;

static RE_SINGLE_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[‘’]").unwrap());
static RE_DOUBLE_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[“”«»]").unwrap());

// Titles expand case-insensitively, but the guard on the following word
// stays capital-only: "Dr. Smith" → "Doctor Smith", "dr. who" untouched.
static RE_TITLE_DR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?i:dr)\.(?= [A-Z])").unwrap());
static RE_TITLE_MR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?i:mr)\.(?= [A-Z])").unwrap());
static RE_TITLE_MS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?i:ms)\.(?= [A-Z])").unwrap());
static RE_TITLE_MRS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?i:mrs)\.(?= [A-Z])").unwrap());
// "etc." keeps its dot only when a capitalised word follows (sentence end).
static RE_ETC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?i:etc)\.(?! [A-Z])").unwrap());

static RE_DIGIT_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?<=\d),(?=\d)").unwrap());
static RE_DIGIT_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?<=\d)-(?=\d)").unwrap());

/// CJK punctuation and its spoken-text equivalent, each followed by a space.
const CJK_PUNCTUATION: &[(char, &str)] = &[
    ('、', ", "),
    ('。', ". "),
    ('！', "! "),
    ('，', ", "),
    ('：', ": "),
    ('；', "; "),
    ('？', "? "),
];

/// Unify curly single/double quotes and guillemets to ASCII `'` / `"`.
pub fn unify_quotes(text: &str) -> String {
    let text = RE_SINGLE_QUOTES.replace_all(text, "'");
    RE_DOUBLE_QUOTES.replace_all(&text, "\"").into_owned()
}

/// Map CJK punctuation to its Latin equivalent plus an inserted space.
pub fn map_cjk_punctuation(text: &str) -> String {
    let mut out = text.to_string();
    for &(cjk, latin) in CJK_PUNCTUATION {
        out = out.replace(cjk, latin);
    }
    out
}

/// Expand title abbreviations ("Dr." → "Doctor" etc.), guarded by the
/// capitalisation of the following word.
pub fn expand_titles(text: &str) -> String {
    let text = RE_TITLE_DR.replace_all(text, "Doctor");
    let text = RE_TITLE_MRS.replace_all(&text, "Mrs");
    let text = RE_TITLE_MR.replace_all(&text, "Mister");
    let text = RE_TITLE_MS.replace_all(&text, "Miss");
    RE_ETC.replace_all(&text, "etc").into_owned()
}

/// Remove comma digit-group separators: `1,000` → `1000`.
pub fn strip_digit_group_separators(text: &str) -> String {
    RE_DIGIT_COMMA.replace_all(text, "").into_owned()
}

/// Rewrite numeric ranges as spoken: `5-10` → `5 to 10`.
pub fn expand_numeric_ranges(text: &str) -> String {
    RE_DIGIT_RANGE.replace_all(text, " to ").into_owned()
}

/// Full normalisation pipeline, applied in order.
pub fn normalize(text: &str) -> String {
    let trimmed_lines = text
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    let text = unify_quotes(&trimmed_lines);
    let text = map_cjk_punctuation(&text);
    let text = expand_titles(&text);
    let text = strip_digit_group_separators(&text);
    let text = expand_numeric_ranges(&text);
    text.trim().to_string()
}
