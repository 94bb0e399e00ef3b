//! Bounded keyword-highlight table and the per-character occurrence matcher.
//!
//! Tag styling itself is the host's business: the core only decides *which*
//! tag covers a character, feeds that id to measurement, and carries the
//! style payload through to the emitted glyph commands.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Index of a [`TagItem`] within its [`TagTable`].
pub type TagId = u8;

/// Fixed number of keyword slots.
pub const MAX_TAGS: usize = 8;

/// Foreground/background colors as packed `0xRRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagStyle {
    pub fg: u32,
    pub bg: u32,
}

impl Default for TagStyle {
    fn default() -> Self {
        Self {
            fg: 0x000000,
            bg: 0xFFFFFF,
        }
    }
}

/// One keyword-highlight entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagItem {
    pub keyword: String,
    pub enabled: bool,
    pub style: TagStyle,
}

impl TagItem {
    pub fn new(keyword: impl Into<String>, style: TagStyle) -> Self {
        Self {
            keyword: keyword.into(),
            enabled: true,
            style,
        }
    }
}

/// Bounded table of keyword tags; slots beyond [`MAX_TAGS`] are rejected.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagTable {
    items: heapless::Vec<TagItem, MAX_TAGS>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, handing it back when the table is full.
    pub fn push(&mut self, item: TagItem) -> Result<(), TagItem> {
        self.items.push(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TagId) -> Option<&TagItem> {
        self.items.get(usize::from(id))
    }

    pub fn iter(&self) -> core::slice::Iter<'_, TagItem> {
        self.items.iter()
    }

    /// Ids of entries that can actually match (enabled, non-empty keyword).
    pub fn enabled_ids(&self) -> impl Iterator<Item = TagId> + '_ {
        self.items.iter().enumerate().filter_map(|(idx, item)| {
            if item.enabled && !item.keyword.is_empty() {
                Some(idx as TagId)
            } else {
                None
            }
        })
    }
}

/// Occurrence matcher precomputed from a [`TagTable`] for one layout pass.
pub(crate) struct TagMatcher {
    keys: Vec<(TagId, Box<[char]>)>,
}

impl TagMatcher {
    pub(crate) fn new(table: &TagTable) -> Self {
        let mut keys = Vec::with_capacity(table.len());
        for id in table.enabled_ids() {
            if let Some(item) = table.get(id) {
                keys.push((id, item.keyword.chars().collect()));
            }
        }
        Self { keys }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// First tag whose keyword has an occurrence covering `index`.
    pub(crate) fn tag_at(&self, text: &[char], index: usize) -> Option<TagId> {
        if self.keys.is_empty() || index >= text.len() {
            return None;
        }
        for (id, keyword) in &self.keys {
            let len = keyword.len();
            if len == 0 || len > text.len() {
                continue;
            }
            let lo = index.saturating_sub(len - 1);
            let hi = index.min(text.len() - len);
            for start in lo..=hi {
                if text[start..start + len] == keyword[..] {
                    return Some(*id);
                }
            }
        }
        None
    }
}
