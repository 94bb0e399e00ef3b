//! Glyph measurement capability supplied by the rendering host.

use crate::tags::{TagId, TagTable};

/// Representative glyph used to estimate characters per line for the cache
/// unit size.
pub const UNIT_PROBE: char = '.';

/// Ideographic space; the paragraph indent reserve measures two of these.
pub const INDENT_PROBE: char = '\u{3000}';

/// Pixel measurement for the host's current font settings.
///
/// Implementations measure with the base face when `tag` is `None` and with
/// the matching keyword-tag face otherwise; providers without distinct tag
/// faces ignore `tag`. Implementations must tolerate any character,
/// newlines included.
pub trait GlyphMetrics {
    /// Advance width in pixels for `ch`.
    fn char_width(&self, ch: char, tag: Option<TagId>) -> i32;

    /// Font cell height in pixels, excluding any line gap.
    fn line_height(&self, tag: Option<TagId>) -> i32;
}

/// Fixed-advance metrics for tests and simple monospaced hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformMetrics {
    advance: i32,
    height: i32,
}

impl UniformMetrics {
    pub const fn new(advance: i32, height: i32) -> Self {
        Self { advance, height }
    }
}

impl GlyphMetrics for UniformMetrics {
    fn char_width(&self, _ch: char, _tag: Option<TagId>) -> i32 {
        self.advance
    }

    fn line_height(&self, _tag: Option<TagId>) -> i32 {
        self.height
    }
}

/// Indent reserve charged against the budget of indented lines.
pub(crate) fn indent_reserve<M: GlyphMetrics + ?Sized>(metrics: &M) -> i32 {
    metrics.char_width(INDENT_PROBE, None).saturating_mul(2)
}

/// Unit-probe width, floored at one pixel so the unit size never collapses.
pub(crate) fn unit_probe_width<M: GlyphMetrics + ?Sized>(metrics: &M) -> i32 {
    metrics.char_width(UNIT_PROBE, None).max(1)
}

/// Tallest line height across the base face and every enabled tag face.
pub(crate) fn effective_line_height<M: GlyphMetrics + ?Sized>(
    metrics: &M,
    tags: &TagTable,
) -> i32 {
    let mut height = metrics.line_height(None);
    for id in tags.enabled_ids() {
        height = height.max(metrics.line_height(Some(id)));
    }
    height
}
