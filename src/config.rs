//! Host-injected layout parameters and viewport geometry.

use crate::tags::TagTable;

/// Border insets applied inside the viewport, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(px: i32) -> Self {
        Self::new(px, px, px, px)
    }

    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Viewport rectangle in pixels. Draw commands are emitted relative to its
/// origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Line-ending convention used when materializing page text for the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `"\r\n"`, the convention of the classic reader shells.
    #[default]
    CrLf,
    /// `"\n"`.
    Lf,
}

impl LineEnding {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Layout parameters bound by the host.
///
/// Rebinding through [`Pager::bind_layout`](crate::Pager::bind_layout)
/// always resets the line cache; there is no partial update path because
/// every field can move line breakpoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutParams {
    /// Extra horizontal pixels charged per character, split around the glyph
    /// when drawing.
    pub char_gap: i32,
    /// Extra vertical pixels between line cells.
    pub line_gap: i32,
    /// Lines kept visible across a page turn.
    pub overlap_lines: usize,
    /// Break at word boundaries instead of mid-word.
    pub word_wrap: bool,
    /// Detect paragraph-start lines and reserve leading indent space.
    pub indent_paragraphs: bool,
    /// Border insets inside the viewport.
    pub padding: Insets,
    /// Convention for page text handed to the host.
    pub line_ending: LineEnding,
    /// Keyword highlight table; empty means no tag styling.
    pub tags: TagTable,
}

impl LayoutParams {
    /// Word-wrapping parameters with no gaps, no padding and no tags.
    pub fn wrapped() -> Self {
        Self {
            word_wrap: true,
            ..Self::default()
        }
    }
}
