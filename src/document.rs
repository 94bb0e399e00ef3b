//! Host-side document capabilities the pager calls back into.

use alloc::string::String;

use crate::error::DocumentError;

/// Native pixel dimensions of a document's cover art. The pager only
/// computes placement; pixel data stays with the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverArt {
    pub width: u32,
    pub height: u32,
}

impl CoverArt {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// What a document backing the pager must be able to do.
///
/// Every method has a default, so a minimal host implements nothing and
/// gets a coverless, always-ready, non-persisting document.
pub trait DocumentSource {
    /// Cover art dimensions, when the document has a cover.
    fn cover(&self) -> Option<CoverArt> {
        None
    }

    /// Whether the document body is still streaming in. A loading
    /// document renders nothing and refuses edits.
    fn is_loading(&self) -> bool {
        false
    }

    /// Normalizes host text before it enters the buffer. The default
    /// folds CRLF and bare CR to LF.
    fn format_text(&self, text: &str) -> String {
        normalize_newlines(text)
    }

    /// Writes the edited document back to its backing store.
    fn persist(&mut self, _text: &str) -> Result<(), DocumentError> {
        Ok(())
    }

    /// Shifts chapter offset bookkeeping after an edit changed the
    /// document length by `_delta` characters.
    fn update_chapters(&mut self, _delta: isize) -> Result<(), DocumentError> {
        Ok(())
    }
}

fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut iter = text.chars().peekable();
    while let Some(ch) = iter.next() {
        if ch == '\r' {
            if iter.peek() == Some(&'\n') {
                iter.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    out
}

/// In-memory document with no backing store.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainDocument {
    cover: Option<CoverArt>,
}

impl PlainDocument {
    pub const fn new() -> Self {
        Self { cover: None }
    }

    pub const fn with_cover(cover: CoverArt) -> Self {
        Self { cover: Some(cover) }
    }
}

impl DocumentSource for PlainDocument {
    fn cover(&self) -> Option<CoverArt> {
        self.cover
    }
}
