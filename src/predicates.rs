//! Stateless classifiers over a single line or a group of span records.
//!
//! Group predicates (`is_page_label`, `is_reference`) look only at records
//! with a non-empty `text_base`, ordered by `(line_number, span_number)`.

use crate::model::Span;
use crate::text;

/// Texts ending in one of these are not sentence ends.
const SENTENCE_END_EXCEPTIONS: &[&str] = &["e.g.", "i.e."];

/// Emphasis score: size dominates, then boldness, then upper case.
pub fn font_importance(double_size_int: i64, bold: bool, text: &str) -> i64 {
    let mut score = double_size_int * 100;
    if bold {
        score += 10;
    }
    if text::is_uppercase(text) {
        score += 1;
    }
    score
}

/// Whether a line starts a sentence.
///
/// Looks at the first alphabetic character after any bullet marker:
/// upper case starts a sentence, lower case does not. `None` when the line
/// has no letters at all; callers treat that as a sentence start.
pub fn is_sentence_start(text: &str) -> Option<bool> {
    text::remove_bullet(text)
        .chars()
        .find(|c| c.is_alphabetic())
        .map(char::is_uppercase)
}

/// Whether a line ends a sentence with `.`, `?` or `!`, abbreviations aside.
pub fn is_sentence_end(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    if SENTENCE_END_EXCEPTIONS
        .iter()
        .any(|exception| text.ends_with(exception))
    {
        return false;
    }
    text.ends_with(['.', '?', '!'])
}

fn significant<'a>(spans: &[&'a Span]) -> Vec<&'a Span> {
    let mut spans: Vec<&Span> = spans
        .iter()
        .copied()
        .filter(|s| !s.text_base.is_empty())
        .collect();
    spans.sort_by_key(|s| (s.line_number, s.span_number));
    spans
}

/// Check if a block or line is a page label ("Page 3", "3", "page 3 of 10").
pub fn is_page_label(spans: &[&Span]) -> bool {
    let spans = significant(spans);
    if spans.is_empty() {
        return false;
    }

    let with_letters: Vec<&str> = spans
        .iter()
        .map(|s| s.text_base.as_str())
        .filter(|t| t.chars().any(|c| c.is_ascii_lowercase()))
        .collect();

    if with_letters.first().is_some_and(|t| t.starts_with("page")) {
        return true;
    }

    if spans.len() == 1 && text::is_digits(&spans[0].text_base) {
        return true;
    }

    // Nothing left but digits and the word "page"
    let combined: String = with_letters
        .join(" ")
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect();
    combined.replace("page", "").trim().is_empty()
}

/// Check if a block or line is a footnote reference: a lone number, or a
/// number followed by text at least one point larger.
pub fn is_reference(spans: &[&Span]) -> bool {
    let spans = significant(spans);
    match spans.as_slice() {
        [] => false,
        [only] => text::is_digits(&only.text_base),
        [first, second, ..] => {
            text::is_digits(&first.text_base) && second.size - first.size >= 1.0
        }
    }
}
