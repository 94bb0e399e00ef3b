//! Windowed line-break cache and page navigation for fixed-viewport text
//! readers.
//!
//! `pageturn` paginates a flat character stream without ever laying out the
//! whole document: line breaks are computed into a contiguous cached window
//! around the current page and the window is extended one bounded step at a
//! time as the reader scrolls. Per-action cost stays proportional to one
//! page regardless of document length.
//!
//! Glyph measurement and drawing stay on the host side behind
//! [`GlyphMetrics`] and the emitted [`RenderedPage`] command stream; document
//! storage concerns (cover art, persistence, chapter offsets) sit behind
//! [`DocumentSource`].
//!
//! # Usage
//!
//! ```rust
//! use pageturn::{LayoutParams, Pager, PlainDocument, Rect, UniformMetrics};
//!
//! let mut pager = Pager::new();
//! pager.set_text("The quick brown fox\njumps over the lazy dog.");
//! pager.bind_layout(LayoutParams::default());
//! pager.set_viewport(Rect::new(0, 0, 120, 64));
//!
//! let doc = PlainDocument::new();
//! let metrics = UniformMetrics::new(6, 12);
//! let page = pager.render_page(&doc, &metrics).expect("pager is ready");
//! assert!(!page.lines.is_empty());
//! assert_eq!(pager.cursor(), 0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

extern crate alloc;

mod buffer;
mod config;
mod document;
mod error;
mod line_break;
mod line_cache;
mod metrics;
mod page_ir;
mod pager;
mod position;
mod tags;

pub use buffer::TextBuffer;
pub use config::{Insets, LayoutParams, LineEnding, Rect};
pub use document::{CoverArt, DocumentSource, PlainDocument};
pub use error::{DocumentError, EditError, EditOutcome};
pub use line_cache::LineSpan;
pub use metrics::{GlyphMetrics, UniformMetrics, INDENT_PROBE, UNIT_PROBE};
pub use page_ir::{CoverCommand, DrawCommand, GlyphCommand, PageMetrics, RenderedPage};
pub use pager::Pager;
pub use position::ReadingPosition;
pub use tags::{TagId, TagItem, TagStyle, TagTable, MAX_TAGS};
