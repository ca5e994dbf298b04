//! Record types flowing through the structure pipeline.
//!
//! A [`RawSpan`] is one positioned text fragment as emitted by the page-layout
//! decoder. [`Span`] is the decorated record (derived style, font importance,
//! comparison text) that every pipeline stage consumes and produces. An
//! [`Item`] is a finished paragraph or bullet entry, and [`Structure`] bundles
//! the cleaned lines with the derived titles, headings and items.

mod item;
mod span;

pub use item::{Item, Structure};
pub use span::{BBox, Point, RawSpan, Span};
