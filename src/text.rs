//! Text helpers shared by the pipeline stages.
//!
//! Bullet glyphs and enumeration markers, the `text_base` comparison form,
//! filler-word removal and the final sentence tidy-up.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Glyphs recognised as a bare bullet marker.
pub const BULLETS: &[&str] = &[
    "•", "●", "○", "■", "□", "◆", "◇", "▪", "▫", "►", "▻", "▸", "➢", "➤", "✓", "✔", "·",
    "\u{F0B7}", "-", "–", "*",
];

/// Canonical glyph used when re-prefixing bulleted items.
pub const CANONICAL_BULLET: &str = "•";

/// Words ignored when comparing texts against the inline-merge exclusion set.
const FILLER_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "to", "in", "on", "for", "with", "by", "at", "from",
];

// Non-ASCII glyphs may touch the following text; ASCII dashes, asterisks and
// enumerations ("a)", "1.", "(iv)") must be followed by whitespace or the end.
const MARKER: &str = r"(?:[•●○■□◆◇▪▫►▻▸➢➤✓✔·\x{F0B7}]|(?:[\-–*]|\(?(?:[a-z]|[0-9]{1,2}|[ivx]{1,5})[.)])(?:\s|$))";

static BULLETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^\s*{MARKER}")).expect("bullet marker pattern"));

static BULLET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^\s*{MARKER}\s*")).expect("bullet prefix pattern"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,.;:!?)\]])").expect("punctuation pattern"));

static SPACE_AFTER_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([(\[])\s+").expect("bracket pattern"));

const LIGATURES: &[(&str, &str)] = &[
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

/// Check if the stripped text is a bare bullet glyph.
pub fn is_bullet(text: &str) -> bool {
    BULLETS.contains(&text.trim())
}

/// Check if the text starts with a bullet glyph or an enumeration marker.
pub fn is_bulleted(text: &str) -> bool {
    BULLETED.is_match(text)
}

/// Remove a leading bullet glyph or enumeration marker.
pub fn remove_bullet(text: &str) -> String {
    BULLET_PREFIX.replace(text, "").into_owned()
}

/// Lower-case, alphanumeric-and-space-only, whitespace-collapsed form of a text.
pub fn text_base(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop filler words ("the", "of", ...) from an already normalised text.
pub fn remove_filler_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalise an entry of the inline-merge exclusion set.
pub fn exclusion_key(text: &str) -> String {
    remove_filler_words(&text_base(text))
}

/// Normalise a span text for lookup in the exclusion set.
///
/// Digits are dropped too, so "Lessons learned 2020" matches "Lessons learned".
pub fn candidate_exclusion_key(text: &str) -> String {
    let letters: String = text_base(text)
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect();
    remove_filler_words(&letters)
}

/// Check if the text is non-empty and made only of ASCII digits.
pub fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// True when the text has a cased character and no lower-case one.
pub fn is_uppercase(text: &str) -> bool {
    let mut has_upper = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

/// A title starts, after any bullet marker, with an upper-case letter.
pub fn is_text_title(text: &str) -> bool {
    remove_bullet(text.trim())
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() && c.is_uppercase())
}

/// Normalise an item string: NFC, ligatures, whitespace and punctuation spacing.
pub fn tidy_sentence(text: &str) -> String {
    let mut result: String = text.nfc().collect();
    for (ligature, replacement) in LIGATURES {
        result = result.replace(ligature, replacement);
    }
    let result = WHITESPACE.replace_all(&result, " ");
    let result = SPACE_BEFORE_PUNCT.replace_all(&result, "$1");
    let result = SPACE_AFTER_OPEN.replace_all(&result, "$1");
    result.trim().to_string()
}
