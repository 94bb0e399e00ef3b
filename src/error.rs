//! Error types crossing the pager's host boundary.

use alloc::boxed::Box;
use core::fmt;

/// Failure reported by a [`DocumentSource`](crate::DocumentSource)
/// callback. Hosts fill in a stable code plus free-form detail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentError {
    code: &'static str,
    detail: Box<str>,
}

impl DocumentError {
    pub fn new(code: &'static str, detail: impl Into<Box<str>>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.detail)
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DocumentError {}

/// Page edit error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditError {
    /// No page is currently rendered, so there is no text to replace.
    NoPage,
    /// The document refused to persist the edited text. The in-memory
    /// buffer keeps the edit; cached layout is already invalidated.
    Persist(DocumentError),
    /// Chapter bookkeeping could not absorb the length change.
    Chapters(DocumentError),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPage => write!(f, "no rendered page to edit"),
            Self::Persist(err) => write!(f, "persist failed: {}", err),
            Self::Chapters(err) => write!(f, "chapter update failed: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EditError {}

/// What a page edit did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// Replacement text matched the page; nothing changed.
    Unchanged,
    /// The buffer was updated and cached layout discarded.
    Applied,
}
