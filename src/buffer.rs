//! Owned document text and the splice operation backing edits.

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::LineEnding;

/// Flat character storage for one document.
///
/// Newlines are single `'\n'` characters. Hosts are expected to normalize
/// platform line endings on load (see
/// [`DocumentSource::format_text`](crate::DocumentSource::format_text));
/// page-text materialization translates back to the configured convention.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self { chars: Vec::new() }
    }

    /// Number of characters (not bytes).
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// Materializes `[start, start+len)` with newlines translated to
    /// `ending`. `None` when the range is out of bounds.
    pub fn page_text(&self, start: usize, len: usize, ending: LineEnding) -> Option<String> {
        let end = start.checked_add(len)?;
        let span = self.chars.get(start..end)?;
        let mut out = String::with_capacity(len);
        for &ch in span {
            if ch == '\n' {
                out.push_str(ending.as_str());
            } else {
                out.push(ch);
            }
        }
        Some(out)
    }

    /// The whole buffer in internal (`'\n'`) form.
    pub fn to_text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replaces `[start, start+len)` with `replacement`, reallocating the
    /// whole buffer. Returns the signed character-count delta, or `None`
    /// when the range is out of bounds.
    pub fn splice(&mut self, start: usize, len: usize, replacement: &str) -> Option<isize> {
        let end = start.checked_add(len)?;
        if end > self.chars.len() {
            return None;
        }
        let inserted = replacement.chars().count();
        let mut next = Vec::with_capacity(self.chars.len() - len + inserted);
        next.extend_from_slice(&self.chars[..start]);
        next.extend(replacement.chars());
        next.extend_from_slice(&self.chars[end..]);
        self.chars = next;
        Some(inserted as isize - len as isize)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }
}
