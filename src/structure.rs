//! Titles, headings and paragraph/bullet items from cleaned lines.

use std::collections::HashMap;

use crate::model::{Item, Span};
use crate::options::BulletPrefix;
use crate::predicates::{is_sentence_end, is_sentence_start};
use crate::text;

/// Punctuation that ends a line introducing what follows.
const LINE_ENDERS: &[char] = &[':'];

/// Lines that start a line, begin with an upper-case letter and are not
/// part of an image.
pub fn titles(lines: &[Span]) -> Vec<&Span> {
    lines
        .iter()
        .filter(|l| l.span_number == 0 && !l.img && text::is_text_title(&l.text))
        .collect()
}

/// The most frequent `font_importance`, assumed to be body text.
///
/// Ties go to the value seen first. `None` for an empty document.
pub fn body_font_importance(lines: &[Span]) -> Option<i64> {
    let mut counts: HashMap<i64, (usize, usize)> = HashMap::new();
    for (position, line) in lines.iter().enumerate() {
        counts
            .entry(line.font_importance)
            .or_insert((0, position))
            .0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(importance, _)| importance)
}

/// Titles whose font importance is above the body text's.
pub fn headings(lines: &[Span], body_font_importance: Option<i64>) -> Vec<&Span> {
    let Some(body) = body_font_importance else {
        return Vec::new();
    };
    titles(lines)
        .into_iter()
        .filter(|l| l.font_importance > body)
        .collect()
}

/// Per-line cues used to find item boundaries.
#[derive(Debug, Clone, Copy)]
struct LineCues {
    bullet_start: bool,
    sentence_start: bool,
    sentence_end: bool,
    ends_with_line_ender: bool,
    end_gap: f64,
    first_word_size: f64,
}

/// Segment cleaned lines into paragraph and bullet items.
///
/// A new item starts on a line that starts a sentence and either follows a
/// bullet marker, follows a visibly short line that ended a sentence, or sits
/// below a vertical gap larger than normal line spacing.
pub fn to_items(lines: &[Span], bullet_prefix: BulletPrefix) -> Vec<Item> {
    if lines.len() <= 1 {
        return lines
            .iter()
            .map(|l| l.text.trim())
            .filter(|t| has_letters(t))
            .map(|t| Item::new(text::tidy_sentence(t), false))
            .collect();
    }

    let bullet_starts: Vec<bool> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let marker = line.span_number == 0 && text::is_bulleted(line.text.trim());
            let after_bullet = i > 0
                && lines[i - 1].total_y == line.total_y
                && text::is_bullet(&lines[i - 1].text);
            marker || after_bullet
        })
        .collect();

    // Bare bullet glyphs carry no text once their start has been recorded
    let kept: Vec<(&Span, bool)> = lines
        .iter()
        .zip(bullet_starts)
        .filter(|(line, _)| !(line.span_number == 0 && text::is_bullet(&line.text)))
        .collect();
    if kept.is_empty() {
        return Vec::new();
    }

    let right_edge = kept
        .iter()
        .map(|(line, _)| line.bbox.x2)
        .fold(f64::NEG_INFINITY, f64::max);

    let cues: Vec<LineCues> = kept
        .iter()
        .map(|&(line, bullet_start)| LineCues {
            bullet_start,
            sentence_start: is_sentence_start(&line.text).unwrap_or(true),
            sentence_end: is_sentence_end(&line.text),
            ends_with_line_ender: line.text.trim_end().ends_with(LINE_ENDERS),
            end_gap: right_edge - line.bbox.x2,
            first_word_size: first_word_size(line),
        })
        .collect();

    let min_spacing = kept
        .windows(2)
        .map(|pair| pair[1].0.total_y - pair[0].0.total_y)
        .min_by(f64::total_cmp);

    let mut groups: Vec<(Vec<&str>, bool)> = Vec::new();
    for (i, &(line, _)) in kept.iter().enumerate() {
        let starts_item = i == 0 || {
            let (prev, _) = kept[i - 1];
            starts_new_item(line, &cues[i], prev, &cues[i - 1], min_spacing)
        };

        match groups.last_mut() {
            Some((texts, _)) if !starts_item => texts.push(line.text.trim()),
            _ => groups.push((vec![line.text.trim()], cues[i].bullet_start)),
        }
    }

    let all_bulleted = groups.iter().all(|(_, bulleted)| *bulleted);
    let prefix_bullets = match bullet_prefix {
        BulletPrefix::Always => true,
        BulletPrefix::WhenMixed => !all_bulleted,
    };

    let items: Vec<Item> = groups
        .into_iter()
        .filter_map(|(texts, bulleted)| {
            let body = text::remove_bullet(&texts.join(" "));
            let body = if bulleted && prefix_bullets {
                format!("{} {}", text::CANONICAL_BULLET, body)
            } else {
                body
            };
            let body = body.trim();
            has_letters(body).then(|| Item::new(text::tidy_sentence(body), bulleted))
        })
        .collect();

    log::debug!("Segmented {} lines into {} items", lines.len(), items.len());
    items
}

fn starts_new_item(
    line: &Span,
    cues: &LineCues,
    prev: &Span,
    prev_cues: &LineCues,
    min_spacing: Option<f64>,
) -> bool {
    if !cues.sentence_start {
        return false;
    }
    let gap = line.total_y - prev.total_y;

    let after_bullet = cues.bullet_start;

    let after_short_line = (prev_cues.sentence_end || prev_cues.ends_with_line_ender)
        && gap >= line.size * 0.1
        && prev_cues.end_gap >= cues.first_word_size * 1.2;

    let spacing = min_spacing.map_or(line.size, |s| s.max(line.size));
    let after_vertical_gap = line.page_number == prev.page_number && gap > spacing * 1.5;

    after_bullet || after_short_line || after_vertical_gap
}

/// Approximate rendered width of the first word of a line.
fn first_word_size(line: &Span) -> f64 {
    let total = line.text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let first = line.text.split(' ').next().map_or(0, |w| w.chars().count());
    line.bbox.width() * first as f64 / total as f64
}

fn has_letters(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawSpan;

    fn line(number: u32, span: u32, text: &str, x2: f64, y: f64) -> RawSpan {
        RawSpan::new(0, 0, number, span, text)
            .with_bbox(if span == 0 { 50.0 } else { 62.0 }, y - 9.0, x2, y + 2.0)
            .with_origin(50.0, y)
            .with_total_y(y)
    }

    fn item_texts(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn test_titles_and_headings() {
        let lines = Span::decorate_all(vec![
            line(0, 0, "Introduction", 200.0, 50.0).with_size(16.0),
            line(1, 0, "Body text starts here and runs on", 500.0, 80.0),
            line(2, 0, "continues in lower case", 500.0, 94.0),
            line(3, 0, "Another body sentence here.", 500.0, 108.0),
            line(4, 0, "Chart label", 120.0, 300.0).in_image(true),
        ]);

        let titles: Vec<&str> = titles(&lines).iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Introduction",
                "Body text starts here and runs on",
                "Another body sentence here."
            ]
        );

        let body = body_font_importance(&lines);
        assert_eq!(body, Some(2200));
        let headings = headings(&lines, body);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Introduction");
    }

    #[test]
    fn test_body_font_importance_tie_goes_to_first_seen() {
        let lines = Span::decorate_all(vec![
            line(0, 0, "Large", 100.0, 10.0).with_size(14.0),
            line(1, 0, "Small", 100.0, 30.0),
        ]);
        assert_eq!(body_font_importance(&lines), Some(2800));
        assert_eq!(body_font_importance(&[]), None);
        assert!(headings(&[], None).is_empty());
    }

    #[test]
    fn test_bullet_items() {
        let lines = Span::decorate_all(vec![
            line(0, 0, "• ", 56.0, 100.0),
            line(0, 1, "First item text.", 300.0, 100.0),
            line(1, 0, "• ", 56.0, 120.0),
            line(1, 1, "Second item.", 250.0, 120.0),
        ]);
        let items = to_items(&lines, BulletPrefix::Always);
        assert_eq!(item_texts(&items), vec!["• First item text.", "• Second item."]);
        assert!(items.iter().all(|i| i.bulleted));

        let plain = to_items(&lines, BulletPrefix::WhenMixed);
        assert_eq!(item_texts(&plain), vec!["First item text.", "Second item."]);
    }

    #[test]
    fn test_paragraph_continuation_joins_lines() {
        let lines = Span::decorate_all(vec![
            line(0, 0, "The programme reached many", 500.0, 100.0),
            line(1, 0, "households in the region and", 500.0, 114.0),
            line(2, 0, "Families were supported too.", 480.0, 128.0),
        ]);
        let items = to_items(&lines, BulletPrefix::Always);
        assert_eq!(
            item_texts(&items),
            vec![
                "The programme reached many households in the region and Families were supported too."
            ]
        );
    }

    #[test]
    fn test_short_line_ends_paragraph() {
        let lines = Span::decorate_all(vec![
            line(0, 0, "The first paragraph runs across the", 500.0, 100.0),
            line(1, 0, "whole page width.", 200.0, 114.0),
            line(2, 0, "Second paragraph starts directly below", 500.0, 128.0),
        ]);
        let items = to_items(&lines, BulletPrefix::Always);
        assert_eq!(
            item_texts(&items),
            vec![
                "The first paragraph runs across the whole page width.",
                "Second paragraph starts directly below"
            ]
        );
    }

    #[test]
    fn test_vertical_gap_starts_item() {
        let lines = Span::decorate_all(vec![
            line(0, 0, "Results", 150.0, 100.0),
            line(1, 0, "Most targets were met in the first", 500.0, 140.0),
            line(2, 0, "half of the year", 500.0, 154.0),
        ]);
        let items = to_items(&lines, BulletPrefix::Always);
        assert_eq!(
            item_texts(&items),
            vec!["Results", "Most targets were met in the first half of the year"]
        );
    }

    #[test]
    fn test_mixed_items_prefix_only_bullets() {
        let lines = Span::decorate_all(vec![
            line(0, 0, "Key findings:", 200.0, 100.0),
            line(1, 0, "a) Water access improved.", 300.0, 130.0),
            line(2, 0, "b) Schools reopened.", 300.0, 150.0),
        ]);
        let items = to_items(&lines, BulletPrefix::WhenMixed);
        assert_eq!(
            item_texts(&items),
            vec!["Key findings:", "• Water access improved.", "• Schools reopened."]
        );
        assert_eq!(
            items.iter().map(|i| i.bulleted).collect::<Vec<_>>(),
            vec![false, true, true]
        );
    }

    #[test]
    fn test_items_without_letters_are_dropped() {
        let lines = Span::decorate_all(vec![
            line(0, 0, "Summary.", 150.0, 100.0),
            line(1, 0, "2023", 100.0, 114.0),
            line(2, 0, "A long closing sentence sits here.", 500.0, 200.0),
        ]);
        let items = to_items(&lines, BulletPrefix::Always);
        assert_eq!(
            item_texts(&items),
            vec!["Summary.", "A long closing sentence sits here."]
        );
    }

    #[test]
    fn test_single_line_document() {
        let lines = Span::decorate_all(vec![line(0, 0, "  Only  line . ", 100.0, 10.0)]);
        let items = to_items(&lines, BulletPrefix::Always);
        assert_eq!(item_texts(&items), vec!["Only line."]);
        assert!(to_items(&[], BulletPrefix::Always).is_empty());
    }
}
