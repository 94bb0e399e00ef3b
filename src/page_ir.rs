//! Backend-neutral draw commands for one laid-out page.
//!
//! A [`RenderedPage`] is the pager's whole output: executors replay the
//! command list against their own canvas and never re-measure text.

use alloc::vec::Vec;

use crate::line_cache::LineSpan;
use crate::tags::TagId;

/// One glyph at an absolute viewport position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphCommand {
    /// Left edge of the glyph cell, after the leading half-gap.
    pub x: i32,
    /// Top edge of the glyph cell.
    pub y: i32,
    pub ch: char,
    /// Highlight tag covering this glyph, if any.
    pub tag: Option<TagId>,
}

/// Cover art placement, aspect-fitted into the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverCommand {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Glyph(GlyphCommand),
    Cover(CoverCommand),
}

/// Page-level figures reported alongside the command list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageMetrics {
    /// Offset of the first character on the page.
    pub first_char: usize,
    /// Characters consumed by the page, newlines included.
    pub char_count: usize,
    /// Line records emitted on this page.
    pub line_count: usize,
    /// Line capacity of the bound viewport.
    pub lines_per_page: usize,
    pub is_cover: bool,
    /// Share of the document read through the end of this page.
    pub progress_percent: f32,
}

/// One laid-out page: the line records it covers plus the commands that
/// draw it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPage {
    pub lines: Vec<LineSpan>,
    pub commands: Vec<DrawCommand>,
    pub metrics: PageMetrics,
}

impl RenderedPage {
    /// Iterates the glyph commands, skipping cover placements.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphCommand> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Glyph(g) => Some(g),
            DrawCommand::Cover(_) => None,
        })
    }

    /// The cover placement, when this page is the cover page.
    pub fn cover(&self) -> Option<&CoverCommand> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Cover(c) => Some(c),
            DrawCommand::Glyph(_) => None,
        })
    }
}
