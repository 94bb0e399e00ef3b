//! Cached line records over one contiguous window of the document.

use alloc::vec::Vec;

/// One laid-out line's span of the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSpan {
    /// Offset of the line's first character.
    pub start: usize,
    /// Character count, including the terminating newline when present.
    pub len: usize,
    /// Paragraph-start line carrying the indent reserve.
    pub indent: bool,
}

impl LineSpan {
    pub const fn new(start: usize, len: usize, indent: bool) -> Self {
        Self { start, len, indent }
    }

    /// Offset one past the line's last character.
    pub const fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Contiguous window of line records plus the index of the page's first line.
///
/// `current` is signed: an upward scroll may push it below zero, which is the
/// trigger for backward extension on the next render. Front insertion shifts
/// it so it keeps naming the same logical line.
#[derive(Clone, Debug, Default)]
pub(crate) struct LineCache {
    lines: Vec<LineSpan>,
    current: isize,
}

impl LineCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn lines(&self) -> &[LineSpan] {
        &self.lines
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&LineSpan> {
        self.lines.get(idx)
    }

    pub(crate) fn first(&self) -> Option<&LineSpan> {
        self.lines.first()
    }

    pub(crate) fn last(&self) -> Option<&LineSpan> {
        self.lines.last()
    }

    pub(crate) fn current(&self) -> isize {
        self.current
    }

    pub(crate) fn set_current(&mut self, value: isize) {
        self.current = value;
    }

    pub(crate) fn shift_current(&mut self, delta: isize) {
        self.current += delta;
    }

    /// `current` as a cache index, when it is in range.
    pub(crate) fn current_index(&self) -> Option<usize> {
        if self.current < 0 {
            return None;
        }
        let idx = self.current as usize;
        (idx < self.lines.len()).then_some(idx)
    }

    /// Full invalidation; `current` returns to line zero.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
        self.current = 0;
    }

    pub(crate) fn append(&mut self, spans: impl IntoIterator<Item = LineSpan>) {
        self.lines.extend(spans);
    }

    /// Inserts `spans` before the existing window and shifts `current` by the
    /// inserted count so it still names the same logical line.
    pub(crate) fn splice_front(&mut self, spans: &[LineSpan]) {
        if spans.is_empty() {
            return;
        }
        self.lines.splice(0..0, spans.iter().copied());
        self.current += spans.len() as isize;
    }

    /// Document span covered by the window, `(start, end)`.
    pub(crate) fn window(&self) -> Option<(usize, usize)> {
        match (self.lines.first(), self.lines.last()) {
            (Some(first), Some(last)) => Some((first.start, last.end())),
            _ => None,
        }
    }

    /// Ordering, contiguity and bounds of the cached spans against a document
    /// of `doc_len` characters. Only the final record of the whole document
    /// may end exactly at `doc_len`.
    pub(crate) fn spans_consistent(&self, doc_len: usize) -> bool {
        for (idx, line) in self.lines.iter().enumerate() {
            if line.end() > doc_len {
                return false;
            }
            match self.lines.get(idx + 1) {
                Some(next) => {
                    if line.end() != next.start {
                        return false;
                    }
                    if line.end() == doc_len {
                        return false;
                    }
                }
                None => {}
            }
        }
        true
    }
}
