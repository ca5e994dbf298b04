//! Layout noise removal.
//!
//! Headers and footers are assumed to be the vertically outermost elements
//! of a page. Removal only ever drops records, so every loop here shrinks its
//! input and terminates; the iteration cap is a guard against malformed input.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Span;
use crate::options::StructureOptions;
use crate::predicates::{is_page_label, is_reference};
use crate::text;

/// Caption marker identifying photo blocks.
const PHOTO_MARKER: &str = "Photo: ";

/// Ordinal suffixes typeset as superscripts in dates ("1st", "4th").
const DATE_SUPERSCRIPTS: &[&str] = &["th", "st", "nd"];

/// Page edge scanned for headers or footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top of the page (headers)
    Top,
    /// Bottom of the page (footers)
    Bottom,
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Edge::Top),
            "bottom" => Ok(Edge::Bottom),
            other => Err(Error::UnrecognizedEdge(other.to_string())),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
        }
    }
}

/// Unit compared when looking for repeating headers and footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Whole `(page, block)` groups
    Block,
    /// Single `(page, block, line)` groups
    Line,
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "block" => Ok(Granularity::Block),
            "line" => Ok(Granularity::Line),
            other => Err(Error::UnrecognizedGranularity(other.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Block => write!(f, "block"),
            Granularity::Line => write!(f, "line"),
        }
    }
}

/// Drop every block containing a photo caption.
pub fn remove_photo_blocks(spans: Vec<Span>) -> Vec<Span> {
    let photo_blocks: HashSet<(u32, u32)> = spans
        .iter()
        .filter(|s| s.text.contains(PHOTO_MARKER))
        .map(Span::block_key)
        .collect();

    if photo_blocks.is_empty() {
        return spans;
    }

    log::debug!("Removing {} photo blocks", photo_blocks.len());
    spans
        .into_iter()
        .filter(|s| !photo_blocks.contains(&s.block_key()))
        .collect()
}

/// Remove page labels and footnote references from page headers and footers.
///
/// Blocks of each page are scanned from the edge inward. Within a block,
/// lines are scanned from the edge inward too and dropped while they match
/// [`is_page_label`] or [`is_reference`]; the first line that matches neither
/// ends the scan of that page. Only at the bottom edge may a block matching as
/// a whole be dropped entirely, after which the scan moves on to the next block.
pub fn remove_page_labels_references(spans: Vec<Span>) -> Vec<Span> {
    let mut dropped: HashSet<usize> = HashSet::new();

    for edge in [Edge::Top, Edge::Bottom] {
        let remaining: Vec<&Span> = spans
            .iter()
            .filter(|s| !dropped.contains(&s.index))
            .collect();

        let mut pages: BTreeMap<u32, Vec<&Span>> = BTreeMap::new();
        for span in remaining {
            pages.entry(span.page_number).or_default().push(span);
        }

        for page_spans in pages.values() {
            scan_page(page_spans, edge, &mut dropped);
        }
    }

    if dropped.is_empty() {
        return spans;
    }

    log::debug!("Removed {} page label and reference spans", dropped.len());
    spans
        .into_iter()
        .filter(|s| !dropped.contains(&s.index))
        .collect()
}

fn scan_page(page_spans: &[&Span], edge: Edge, dropped: &mut HashSet<usize>) {
    for block in blocks_from_edge(page_spans, edge) {
        if edge == Edge::Bottom && (is_page_label(&block) || is_reference(&block)) {
            dropped.extend(block.iter().map(|s| s.index));
            continue;
        }

        for line in lines_from_edge(&block, edge) {
            if !(is_page_label(&line) || is_reference(&line)) {
                return;
            }
            dropped.extend(line.iter().map(|s| s.index));
        }
    }
}

fn blocks_from_edge<'a>(page_spans: &[&'a Span], edge: Edge) -> Vec<Vec<&'a Span>> {
    let mut ordered: Vec<&Span> = page_spans.to_vec();
    ordered.sort_by(|a, b| match edge {
        Edge::Top => a.origin.y.total_cmp(&b.origin.y),
        Edge::Bottom => b.origin.y.total_cmp(&a.origin.y),
    });

    let mut block_order: Vec<u32> = Vec::new();
    for span in &ordered {
        if !block_order.contains(&span.block_number) {
            block_order.push(span.block_number);
        }
    }

    block_order
        .into_iter()
        .map(|block| {
            page_spans
                .iter()
                .copied()
                .filter(|s| s.block_number == block)
                .collect()
        })
        .collect()
}

fn lines_from_edge<'a>(block: &[&'a Span], edge: Edge) -> Vec<Vec<&'a Span>> {
    let mut lines: BTreeMap<u32, Vec<&Span>> = BTreeMap::new();
    for &span in block {
        lines.entry(span.line_number).or_default().push(span);
    }

    let mut lines: Vec<(u32, f64, Vec<&Span>)> = lines
        .into_iter()
        .map(|(number, spans)| {
            let extreme = spans.iter().map(|s| s.origin.y).fold(
                match edge {
                    Edge::Top => f64::INFINITY,
                    Edge::Bottom => f64::NEG_INFINITY,
                },
                |acc, y| match edge {
                    Edge::Top => acc.min(y),
                    Edge::Bottom => acc.max(y),
                },
            );
            (number, extreme, spans)
        })
        .collect();

    lines.sort_by(|a, b| match edge {
        Edge::Top => a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)),
        Edge::Bottom => b.1.total_cmp(&a.1).then(b.0.cmp(&a.0)),
    });
    lines.into_iter().map(|(_, _, spans)| spans).collect()
}

/// Drop repeating headers and footers until none remain.
///
/// Runs four fixed-point loops in order: top blocks, top lines, bottom
/// blocks, bottom lines. Removing a footer can expose a new repeating header,
/// so the whole cycle repeats until one full cycle drops nothing.
pub fn drop_all_repeating_headers_footers(
    mut spans: Vec<Span>,
    options: &StructureOptions,
) -> Result<Vec<Span>> {
    let mut cycles = 0;
    loop {
        let before = spans.len();
        for (granularity, edge) in [
            (Granularity::Block, Edge::Top),
            (Granularity::Line, Edge::Top),
            (Granularity::Block, Edge::Bottom),
            (Granularity::Line, Edge::Bottom),
        ] {
            spans = drop_repeating(spans, granularity, edge, options)?;
        }
        if spans.len() == before {
            return Ok(spans);
        }

        cycles += 1;
        if cycles > options.max_fixed_point_iterations {
            log::warn!(
                "Repeating headers and footers still found after {} cycles",
                options.max_fixed_point_iterations
            );
            return Err(Error::FixedPointNotReached {
                stage: "repeating header and footer removal".to_string(),
                iterations: options.max_fixed_point_iterations,
            });
        }
        log::trace!("Cycle {}: dropped {} spans", cycles, before - spans.len());
    }
}

/// Repeatedly drop the repeating elements at one page edge.
pub fn drop_repeating(
    mut spans: Vec<Span>,
    granularity: Granularity,
    edge: Edge,
    options: &StructureOptions,
) -> Result<Vec<Span>> {
    let mut iterations = 0;
    loop {
        let repeating = find_repeating(&spans, granularity, edge, options.repeat_threshold);
        if repeating.is_empty() {
            return Ok(spans);
        }

        iterations += 1;
        if iterations > options.max_fixed_point_iterations {
            log::warn!(
                "Repeating {} {}s still found after {} iterations",
                edge,
                granularity,
                options.max_fixed_point_iterations
            );
            return Err(Error::FixedPointNotReached {
                stage: format!("repeating {} {} removal", edge, granularity),
                iterations: options.max_fixed_point_iterations,
            });
        }

        log::trace!(
            "Iteration {}: dropping {} spans of repeating {} {}s",
            iterations,
            repeating.len(),
            edge,
            granularity
        );
        spans.retain(|s| !repeating.contains(&s.index));
    }
}

/// Indexes of the records forming a repeating header or footer.
///
/// Each page contributes its outermost record: the whole block holding it at
/// block granularity, the record alone at line granularity. Elements are
/// compared by their (joined) `text_base`; a text found on more than
/// `threshold` pages repeats. A bare bullet glyph never repeats.
pub fn find_repeating(
    spans: &[Span],
    granularity: Granularity,
    edge: Edge,
    threshold: usize,
) -> HashSet<usize> {
    let mut extremes: BTreeMap<u32, &Span> = BTreeMap::new();
    for span in spans {
        let replace = match extremes.get(&span.page_number) {
            None => true,
            Some(current) => match edge {
                Edge::Top => span.origin.y < current.origin.y,
                Edge::Bottom => span.origin.y > current.origin.y,
            },
        };
        if replace {
            extremes.insert(span.page_number, span);
        }
    }

    let mut by_text: HashMap<String, (usize, Vec<usize>)> = HashMap::new();

    for extreme in extremes.values() {
        let members: Vec<&Span> = match granularity {
            Granularity::Block => spans
                .iter()
                .filter(|s| s.block_key() == extreme.block_key())
                .collect(),
            Granularity::Line if text::is_bullet(&extreme.text) => continue,
            Granularity::Line => vec![*extreme],
        };

        let joined = members
            .iter()
            .map(|s| s.text_base.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            continue;
        }

        let (pages, indexes) = by_text.entry(joined).or_default();
        *pages += 1;
        indexes.extend(members.iter().map(|s| s.index));
    }

    by_text
        .into_values()
        .filter(|(pages, _)| *pages > threshold)
        .flat_map(|(_, indexes)| indexes)
        .collect()
}

/// Drop small numeric spans (superscript footnote markers).
pub fn remove_reference_labels(spans: Vec<Span>, max_size: f64) -> Vec<Span> {
    let before = spans.len();
    let kept: Vec<Span> = spans
        .into_iter()
        .filter(|s| !(s.size <= max_size && text::is_digits(&s.text_base)))
        .collect();
    log::debug!("Removed {} reference labels", before - kept.len());
    kept
}

/// Drop small ordinal suffixes ("th", "st", "nd") typeset as superscripts.
pub fn remove_date_superscripts(spans: Vec<Span>, max_size: f64) -> Vec<Span> {
    let before = spans.len();
    let kept: Vec<Span> = spans
        .into_iter()
        .filter(|s| !(s.size <= max_size && DATE_SUPERSCRIPTS.contains(&s.text_base.trim())))
        .collect();
    log::debug!("Removed {} date superscripts", before - kept.len());
    kept
}
