//! The pager: a windowed line cache over the text buffer, scroll state and
//! page assembly.
//!
//! Layout is demand-driven. The cache only ever grows in one direction per
//! render: upward when scrolling moved the current line above the window,
//! downward otherwise, and the downward scan stops as soon as one page past
//! the current line is covered. Breakpoints depend on the content width
//! alone, so height-only viewport changes keep the cache.

use alloc::string::String;
use alloc::vec::Vec;

use crate::buffer::TextBuffer;
use crate::config::{LayoutParams, LineEnding, Rect};
use crate::document::{CoverArt, DocumentSource};
use crate::error::{EditError, EditOutcome};
use crate::line_break::{break_window, BreakParams, ScanEnd};
use crate::line_cache::{LineCache, LineSpan};
use crate::metrics::{effective_line_height, indent_reserve, unit_probe_width, GlyphMetrics};
use crate::page_ir::{CoverCommand, DrawCommand, GlyphCommand, PageMetrics, RenderedPage};
use crate::position::ReadingPosition;
use crate::tags::TagMatcher;

/// Paginates a character buffer into viewport-sized pages.
///
/// The pager holds no pixel state of its own: glyph geometry comes from a
/// [`GlyphMetrics`] provider and document capabilities from a
/// [`DocumentSource`], both passed into the operations that need them.
pub struct Pager {
    buf: TextBuffer,
    params: Option<LayoutParams>,
    viewport: Rect,
    cache: LineCache,
    /// Offset of the first character on the last rendered page.
    cursor: usize,
    /// Characters consumed by the last rendered page, newlines included.
    page_size: usize,
    /// Line capacity computed by the last render.
    lines_per_page: usize,
}

impl Pager {
    pub fn new() -> Self {
        Self {
            buf: TextBuffer::new(),
            params: None,
            viewport: Rect::default(),
            cache: LineCache::new(),
            cursor: 0,
            page_size: 0,
            lines_per_page: 0,
        }
    }

    /// Replaces the document text. The cursor survives when it still lands
    /// inside the new text, otherwise it returns to the start.
    pub fn set_text(&mut self, text: &str) {
        self.buf = TextBuffer::from(text);
        self.cache.clear();
        self.page_size = 0;
        if self.cursor >= self.buf.len() {
            self.cursor = 0;
        }
    }

    /// Binds layout parameters, invalidating all cached breakpoints.
    pub fn bind_layout(&mut self, params: LayoutParams) {
        self.params = Some(params);
        if self.cursor >= self.buf.len() {
            self.cursor = 0;
        }
        self.cache.clear();
    }

    pub fn layout(&self) -> Option<&LayoutParams> {
        self.params.as_ref()
    }

    /// Moves or resizes the viewport. Only a width change invalidates the
    /// cache; breakpoints do not depend on height.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport == self.viewport {
            return;
        }
        let width_changed = viewport.width != self.viewport.width;
        self.viewport = viewport;
        if width_changed {
            self.cache.clear();
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Drops cached layout; the next render rebuilds around the cursor.
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Jumps to an absolute character offset, clamped into the document.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = if self.buf.is_empty() {
            0
        } else {
            offset.min(self.buf.len() - 1)
        };
        self.cache.clear();
        self.page_size = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Characters in the document buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The document as raw characters, newline-only form.
    pub fn text(&self) -> &[char] {
        self.buf.chars()
    }

    /// Cached line records, for inspection.
    pub fn lines(&self) -> &[LineSpan] {
        self.cache.lines()
    }

    /// Line capacity of the last render; zero before the first render.
    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page
    }

    /// Characters on the last rendered page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether a render can produce a page right now.
    pub fn is_ready<D: DocumentSource + ?Sized>(&self, doc: &D) -> bool {
        self.params.is_some()
            && self.viewport.has_area()
            && !self.buf.is_empty()
            && !doc.is_loading()
    }

    /// Scrolls `n` lines toward the document start. A no-op at the first
    /// line, before the first render, or while not ready.
    pub fn line_up<D: DocumentSource + ?Sized>(&mut self, doc: &D, n: usize) {
        if !self.is_ready(doc) || n == 0 || self.cache.is_empty() || self.cursor == 0 {
            return;
        }
        self.cache.shift_current(-(n as isize));
        self.clamp_upward(doc);
    }

    /// Scrolls `n` lines toward the document end. A no-op on the last page.
    pub fn line_down<D: DocumentSource + ?Sized>(&mut self, doc: &D, n: usize) {
        if !self.is_ready(doc) || n == 0 || self.cache.is_empty() {
            return;
        }
        if self.cursor + self.page_size == self.buf.len() {
            return;
        }
        self.cache.shift_current(n as isize);
    }

    /// One page up, keeping the configured overlap lines visible.
    pub fn page_up<D: DocumentSource + ?Sized>(&mut self, doc: &D) {
        let overlap = self.params.as_ref().map_or(0, |p| p.overlap_lines);
        self.line_up(doc, self.lines_per_page.saturating_sub(overlap));
    }

    /// One page down, keeping the configured overlap lines visible.
    pub fn page_down<D: DocumentSource + ?Sized>(&mut self, doc: &D) {
        let overlap = self.params.as_ref().map_or(0, |p| p.overlap_lines);
        self.line_down(doc, self.lines_per_page.saturating_sub(overlap));
    }

    /// Clamps an upward overshoot once the window reaches the document
    /// start. With a cover, scrolling up from the first text page lands on
    /// the cover line, and any other overshoot stops below it.
    fn clamp_upward<D: DocumentSource + ?Sized>(&mut self, doc: &D) {
        let at_doc_start = self.cache.first().map_or(false, |line| line.start == 0);
        if doc.cover().is_some() {
            if self.cursor == 1 && at_doc_start {
                self.cache.set_current(0);
            } else if self.cache.current() < 1 && at_doc_start {
                self.cache.set_current(1);
            }
        } else if self.cache.current() < 0 && at_doc_start {
            self.cache.set_current(0);
        }
    }

    /// Lays out and returns the current page, extending the line cache as
    /// needed. Returns `None` while not ready.
    pub fn render_page<D, M>(&mut self, doc: &D, metrics: &M) -> Option<RenderedPage>
    where
        D: DocumentSource + ?Sized,
        M: GlyphMetrics + ?Sized,
    {
        if !self.is_ready(doc) {
            return None;
        }
        let params = self.params.as_ref()?;

        let line_h = effective_line_height(metrics, &params.tags)
            .saturating_add(params.line_gap)
            .max(1);
        let usable_h = self.viewport.height + params.line_gap - params.padding.vertical();
        self.lines_per_page = if usable_h > 0 {
            (usable_h / line_h) as usize
        } else {
            0
        };

        let maxw = self.viewport.width - params.padding.horizontal();
        let char_gap = params.char_gap;
        let padding = params.padding;
        let word_wrap = params.word_wrap;
        let indent_paragraphs = params.indent_paragraphs;
        let matcher = TagMatcher::new(&params.tags);
        let break_params = BreakParams {
            maxw,
            char_gap,
            word_wrap,
            indent_paragraphs,
            indent_width: indent_reserve(metrics),
            tags: &matcher,
        };

        if self.needs_extension() {
            self.extend_cache(doc, metrics, &break_params);
        }
        if self.cache.is_empty() {
            return None;
        }
        self.debug_validate_cache();

        if let Some(cover) = doc.cover() {
            let on_cover_line = self
                .cache
                .current_index()
                .and_then(|idx| self.cache.get(idx))
                .is_some_and(|line| line.start == 0);
            if on_cover_line {
                return Some(self.assemble_cover_page(cover));
            }
        }

        let start_idx = self.cache.current_index()?;
        let indent_width = indent_reserve(metrics);
        let mut commands = Vec::new();
        let mut page_lines = Vec::new();
        let mut page_size = 0usize;
        let mut y = padding.top;
        for i in 0..self.lines_per_page {
            let Some(line) = self.cache.get(start_idx + i) else {
                break;
            };
            let mut x = padding.left + if line.indent { indent_width } else { 0 };
            for j in 0..line.len {
                let Some(ch) = self.buf.char_at(line.start + j) else {
                    break;
                };
                if ch == '\n' {
                    continue;
                }
                let tag = matcher.tag_at(self.buf.chars(), line.start + j);
                x += char_gap / 2;
                commands.push(DrawCommand::Glyph(GlyphCommand { x, y, ch, tag }));
                x += metrics.char_width(ch, tag) + char_gap - char_gap / 2;
            }
            page_size += line.len;
            page_lines.push(*line);
            y += line_h;
        }

        if let Some(first) = self.cache.get(start_idx) {
            self.cursor = first.start;
        }
        self.page_size = page_size;

        Some(RenderedPage {
            metrics: PageMetrics {
                first_char: self.cursor,
                char_count: self.page_size,
                line_count: page_lines.len(),
                lines_per_page: self.lines_per_page,
                is_cover: false,
                progress_percent: self.progress_percent(),
            },
            lines: page_lines,
            commands,
        })
    }

    /// Whether the cache must grow before the current page can be drawn.
    fn needs_extension(&self) -> bool {
        if self.cache.is_empty() || self.cache.current() < 0 {
            return true;
        }
        match self.cache.last() {
            Some(last) => {
                last.end() != self.buf.len()
                    && self.cache.current() + self.lines_per_page as isize
                        >= self.cache.len() as isize
            }
            None => true,
        }
    }

    /// Grows the cache one direction: upward by one unit when the current
    /// line lies above the window, downward toward the document end (bounded
    /// by the one-page stop) otherwise.
    fn extend_cache<D, M>(&mut self, doc: &D, metrics: &M, break_params: &BreakParams<'_>)
    where
        D: DocumentSource + ?Sized,
        M: GlyphMetrics + ?Sized,
    {
        let unit = self.cache_unit(metrics, break_params.char_gap);
        if self.cache.current() < 0 {
            let window_start = self.cache.window().map_or(self.cursor, |(start, _)| start);
            let scan_start = window_start.saturating_sub(unit);
            let spans = break_window(
                self.buf.chars(),
                break_params,
                metrics,
                scan_start..window_start,
                ScanEnd::CacheFront,
                |_| false,
            );
            self.cache.splice_front(&spans);
            self.clamp_upward(doc);
            if self.cache.current() < 0 {
                log::warn!(
                    "upward scroll outran the cache extension unit; clamping to the window start"
                );
                self.cache.set_current(0);
            }
        } else {
            let window_end = self.cache.window().map_or(self.cursor, |(_, end)| end);
            let base = self.cache.len();
            let current = self.cache.current();
            let capacity = self.lines_per_page as isize;
            let spans = break_window(
                self.buf.chars(),
                break_params,
                metrics,
                window_end..self.buf.len(),
                ScanEnd::DocumentEnd,
                |done| current + capacity <= (base + done) as isize,
            );
            self.cache.append(spans);
        }
    }

    /// Characters scanned per upward extension: one page worth of unit-probe
    /// columns across the full viewport width.
    fn cache_unit<M: GlyphMetrics + ?Sized>(&self, metrics: &M, char_gap: i32) -> usize {
        let column = (unit_probe_width(metrics) + char_gap).max(1);
        let columns_per_line = (self.viewport.width / column).max(0) as usize;
        columns_per_line.saturating_mul(self.lines_per_page)
    }

    fn assemble_cover_page(&mut self, cover: CoverArt) -> RenderedPage {
        self.cursor = 0;
        self.page_size = 1;
        self.cache.set_current(0);
        self.lines_per_page = 1;
        let dest = cover_dest(self.viewport, cover);
        let lines = match self.cache.first() {
            Some(line) => alloc::vec![*line],
            None => Vec::new(),
        };
        RenderedPage {
            metrics: PageMetrics {
                first_char: 0,
                char_count: 1,
                line_count: lines.len(),
                lines_per_page: 1,
                is_cover: true,
                progress_percent: self.progress_percent(),
            },
            lines,
            commands: alloc::vec![DrawCommand::Cover(dest)],
        }
    }

    fn debug_validate_cache(&self) {
        if cfg!(debug_assertions) {
            debug_assert!(self.cache.current() >= 0);
            debug_assert!((self.cache.current() as usize) < self.cache.len());
            if self.cache.current() + self.lines_per_page as isize > self.cache.len() as isize {
                let covered = self
                    .cache
                    .last()
                    .map_or(false, |line| line.end() == self.buf.len());
                debug_assert!(covered, "short window must reach the document end");
            }
            debug_assert!(self.cache.spans_consistent(self.buf.len()));
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.cursor + self.page_size == self.buf.len()
    }

    pub fn is_cover_page<D: DocumentSource + ?Sized>(&self, doc: &D) -> bool {
        doc.cover().is_some() && self.cursor == 0
    }

    /// Share of the document read through the end of the current page.
    pub fn progress_percent(&self) -> f32 {
        if self.buf.is_empty() {
            return 0.0;
        }
        (self.cursor + self.page_size) as f32 * 100.0 / self.buf.len() as f32
    }

    /// Text of the last rendered page in the host line-ending convention.
    /// `None` before the first render.
    pub fn current_page_text(&self) -> Option<String> {
        if self.page_size == 0 {
            return None;
        }
        let ending = self
            .params
            .as_ref()
            .map_or(LineEnding::default(), |p| p.line_ending);
        self.buf.page_text(self.cursor, self.page_size, ending)
    }

    /// Snapshot of the reading position for persistence.
    pub fn position(&self) -> ReadingPosition {
        ReadingPosition::new(self.cursor, self.progress_percent())
    }

    /// Jumps to a previously captured position.
    pub fn restore_position(&mut self, position: &ReadingPosition) {
        self.set_cursor(position.resolve(self.buf.len()));
    }

    /// Replaces the text of the current page.
    ///
    /// The replacement arrives in the host line-ending convention and is
    /// normalized through [`DocumentSource::format_text`] before it enters
    /// the buffer. Cached layout is invalidated the moment the buffer
    /// changes; persistence and chapter bookkeeping failures surface as
    /// errors with the in-memory edit already applied.
    pub fn replace_page_text<D>(
        &mut self,
        doc: &mut D,
        replacement: &str,
    ) -> Result<EditOutcome, EditError>
    where
        D: DocumentSource + ?Sized,
    {
        if doc.is_loading() {
            return Err(EditError::NoPage);
        }
        let current = self.current_page_text().ok_or(EditError::NoPage)?;
        if replacement == current {
            return Ok(EditOutcome::Unchanged);
        }

        let formatted = doc.format_text(replacement);
        let delta = self
            .buf
            .splice(self.cursor, self.page_size, &formatted)
            .ok_or(EditError::NoPage)?;
        self.cache.clear();
        self.page_size = 0;

        doc.persist(&self.buf.to_text()).map_err(EditError::Persist)?;
        doc.update_chapters(delta).map_err(EditError::Chapters)?;
        Ok(EditOutcome::Applied)
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

/// Aspect-fits cover art into the viewport, centered. Art with exactly the
/// viewport's aspect ratio keeps its native size.
fn cover_dest(viewport: Rect, art: CoverArt) -> CoverCommand {
    let w = viewport.width;
    let h = viewport.height;
    let mut bw = art.width as i32;
    let mut bh = art.height as i32;
    let view_ratio = w as f64 / h as f64;
    let art_ratio = bw as f64 / bh as f64;
    if art_ratio > view_ratio {
        bw = w;
        bh = (bw as f64 / art_ratio) as i32;
    } else if art_ratio < view_ratio {
        bh = h;
        bw = (art_ratio * bh as f64) as i32;
    }
    CoverCommand {
        x: (w - bw) / 2,
        y: (h - bh) / 2,
        width: bw.max(0) as u32,
        height: bh.max(0) as u32,
    }
}
