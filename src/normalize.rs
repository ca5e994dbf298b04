//! Line normalisation.
//!
//! Layout decoders split visually continuous text into several fragments and
//! do not emit blocks in reading order. These stages merge inline fragments,
//! restore top-to-bottom block order, join same-style fragments on a line and
//! re-attach bullet glyphs to the text they introduce.

use std::collections::{HashMap, HashSet};

use crate::model::Span;
use crate::options::StructureOptions;
use crate::text;

/// Merge consecutive fragments that continue the same line inline.
///
/// A fragment joins its predecessor when both sit on the same page, block and
/// line, their vertical offsets differ by less than `merge_y_tolerance`, they
/// share a `double_size_int`, the fragment is not the first of its line, and
/// it starts strictly to the right of the predecessor within `merge_gap`.
/// Fragments matching `exclude_texts` neither join nor get joined.
pub fn merge_inline_text(spans: Vec<Span>, options: &StructureOptions) -> Vec<Span> {
    let excluded: HashSet<String> = options
        .exclude_texts
        .iter()
        .map(|t| text::exclusion_key(t))
        .filter(|t| !t.is_empty())
        .collect();
    let ignored: Vec<bool> = spans
        .iter()
        .map(|s| {
            !excluded.is_empty() && excluded.contains(&text::candidate_exclusion_key(&s.text))
        })
        .collect();

    let before = spans.len();
    let mut merged: Vec<Span> = Vec::with_capacity(before);

    for (i, span) in spans.iter().enumerate() {
        let joins = i > 0
            && !ignored[i]
            && !ignored[i - 1]
            && continues_inline(&spans[i - 1], span, options);

        match merged.last_mut() {
            Some(group) if joins => absorb(group, span),
            _ => merged.push(span.clone()),
        }
    }

    log::debug!(
        "Merged {} inline fragments ({} -> {} spans)",
        before - merged.len(),
        before,
        merged.len()
    );
    merged
}

fn continues_inline(prev: &Span, span: &Span, options: &StructureOptions) -> bool {
    let h_gap = span.bbox.x1 - prev.bbox.x2;
    span.line_key() == prev.line_key()
        && (span.total_y - prev.total_y).abs() < options.merge_y_tolerance
        && span.double_size_int == prev.double_size_int
        && span.span_number != 0
        && h_gap > 0.0
        && h_gap < options.merge_gap
}

fn absorb(group: &mut Span, span: &Span) {
    let text = format!("{} {}", group.text, span.text);
    group.set_text(text);
    group.index = group.index.min(span.index);
    group.span_number = group.span_number.min(span.span_number);
    group.origin.x = group.origin.x.min(span.origin.x);
    group.bbox.x1 = group.bbox.x1.min(span.bbox.x1);
    group.bbox.y1 = group.bbox.y1.min(span.bbox.y1);
    group.bbox.x2 = group.bbox.x2.max(span.bbox.x2);
    group.bbox.y2 = group.bbox.y2.max(span.bbox.y2);
}

/// Sort records into reading order.
///
/// Blocks are ordered by their topmost `total_y`, records within a block by
/// their own `total_y`. Ties keep the incoming order.
pub fn sort_blocks_by_y(mut spans: Vec<Span>) -> Vec<Span> {
    let mut block_y: HashMap<(u32, u32), f64> = HashMap::new();
    for span in &spans {
        block_y
            .entry(span.block_key())
            .and_modify(|y| *y = y.min(span.total_y))
            .or_insert(span.total_y);
    }

    spans.sort_by(|a, b| {
        let a_key = a.block_key();
        let b_key = b.block_key();
        block_y[&a_key]
            .total_cmp(&block_y[&b_key])
            .then_with(|| a_key.cmp(&b_key))
            .then_with(|| a.total_y.total_cmp(&b.total_y))
    });
    spans
}

/// Join the text of all records on one line that share a style signature.
///
/// The first record of each `(page, block, line, style)` group is kept with
/// the space-joined text of the whole group.
pub fn combine_spans_same_style(spans: Vec<Span>) -> Vec<Span> {
    let before = spans.len();
    let mut combined: Vec<Span> = Vec::with_capacity(before);
    let mut first_of: HashMap<(u32, u32, u32, String), usize> = HashMap::new();

    for span in spans {
        let key = (
            span.page_number,
            span.block_number,
            span.line_number,
            span.style.clone(),
        );
        match first_of.get(&key) {
            Some(&pos) => {
                let text = format!("{} {}", combined[pos].text, span.text);
                combined[pos].set_text(text);
            }
            None => {
                first_of.insert(key, combined.len());
                combined.push(span);
            }
        }
    }

    log::debug!("Combined {} same-style spans", before - combined.len());
    combined
}

/// Move the text that sits beside an isolated bullet glyph onto the bullet's line.
///
/// Decoders often emit a bullet and its text as two lines of one block at the
/// same height. The first span-zero record of another line at exactly the
/// bullet's `total_y` is renumbered onto the bullet's line, after its last span.
pub fn combine_bullet_spans(mut spans: Vec<Span>) -> Vec<Span> {
    let bullets: Vec<(u32, u32, u32, f64)> = spans
        .iter()
        .filter(|s| s.span_number == 0 && text::is_bullet(&s.text))
        .map(|s| (s.page_number, s.block_number, s.line_number, s.total_y))
        .collect();

    let mut moved = 0;
    for (page, block, line, total_y) in bullets {
        let in_block = |s: &Span| s.page_number == page && s.block_number == block;

        let Some(target) = spans.iter().position(|s| {
            in_block(s) && s.line_number != line && s.span_number == 0 && s.total_y == total_y
        }) else {
            continue;
        };

        let last_span = spans
            .iter()
            .filter(|s| in_block(s) && s.line_number == line)
            .map(|s| s.span_number)
            .max()
            .unwrap_or(0);

        spans[target].line_number = line;
        spans[target].span_number = last_span + 1;
        moved += 1;
    }

    log::debug!("Attached {} bullet texts to their bullets", moved);
    spans
}
