//! The windowed line-break scan shared by both cache-extension directions.

use smallvec::SmallVec;

use crate::line_cache::LineSpan;
use crate::metrics::GlyphMetrics;
use crate::tags::TagMatcher;

/// Lines produced by one bounded scan.
pub(crate) type BrokenLines = SmallVec<[LineSpan; 16]>;

/// Flush behavior for the trailing partial line at the end of a scan range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScanEnd {
    /// The range stops where the cached window begins. A partial line is
    /// kept when it fits the budget or runs up to the boundary.
    CacheFront,
    /// The range stops at the true document end; accumulated characters
    /// always form the final line.
    DocumentEnd,
}

/// Width budget and layout flags for one scan.
pub(crate) struct BreakParams<'a> {
    /// Content-width budget in pixels.
    pub maxw: i32,
    pub char_gap: i32,
    pub word_wrap: bool,
    pub indent_paragraphs: bool,
    /// Reserve charged to indented lines, measured by the caller.
    pub indent_width: i32,
    pub tags: &'a TagMatcher,
}

/// Whitespace that ends a word for wrapping. Newlines are excluded: they
/// break lines themselves and stop whitespace-run consumption.
pub(crate) fn is_wrap_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{0B}' | '\u{0C}')
}

/// Layout whitespace that suppresses paragraph-indent detection.
pub(crate) fn is_indent_space(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\u{3000}' | '\u{A0}' | '\t' | '\n' | '\u{2028}' | '\u{2029}' | '\u{0B}' | '\u{0C}'
    )
}

/// Paragraph-start probe. `index` is the position of the character before
/// the candidate line start (`None` at document start); the probe may read
/// past the scan range, never past the document. Overflow breaks pass the
/// new line's own start instead, which clears the flag unless the line
/// itself begins with a newline.
fn indent_after(text: &[char], index: Option<usize>, enabled: bool) -> bool {
    if !enabled {
        return false;
    }
    let Some(idx) = index else {
        return false;
    };
    if text.get(idx).copied() != Some('\n') {
        return false;
    }
    match text.get(idx + 1) {
        Some(&next) => !is_indent_space(next),
        None => false,
    }
}

/// Breaks `text[range]` into line records under `params.maxw`.
///
/// `stop` sees the number of completed lines immediately after each break;
/// returning `true` abandons the scan and drops the in-progress partial line
/// (the bounded forward stop). Partial-line handling at a natural range end
/// follows `end_kind`.
pub(crate) fn break_window<M, F>(
    text: &[char],
    params: &BreakParams<'_>,
    metrics: &M,
    range: core::ops::Range<usize>,
    end_kind: ScanEnd,
    mut stop: F,
) -> BrokenLines
where
    M: GlyphMetrics + ?Sized,
    F: FnMut(usize) -> bool,
{
    let range_start = range.start;
    let range_end = range.end.min(text.len());
    let mut out = BrokenLines::new();
    if range_start > range_end {
        return out;
    }

    let gap = params.char_gap;
    let mut start = range_start;
    let mut length: usize = 0;
    let mut width: i32 = 0;
    let mut indent = indent_after(text, range_start.checked_sub(1), params.indent_paragraphs);
    if indent {
        width = params.indent_width;
    }
    let mut word_start = start;
    let mut word_width: i32 = 0;

    let mut i = range_start;
    while i < range_end {
        let ch = text[i];

        if ch == '\n' {
            // The newline belongs to the ending line.
            length += 1;
            out.push(LineSpan::new(start, length, indent));
            start = i + 1;
            length = 0;
            width = 0;
            indent = indent_after(text, Some(i), params.indent_paragraphs);
            if indent {
                width = params.indent_width;
            }
            word_start = start;
            word_width = 0;
            if stop(out.len()) {
                return out;
            }
            i += 1;
            continue;
        }

        let cw = metrics.char_width(ch, params.tags.tag_at(text, i));
        if params.word_wrap {
            if is_wrap_space(ch) || ch == '-' {
                word_start = i + 1;
                word_width = 0;
            } else {
                word_width = word_width.saturating_add(cw.saturating_add(gap));
            }
        }
        width = width.saturating_add(cw.saturating_add(gap));

        if width > params.maxw {
            if params.word_wrap && is_wrap_space(ch) {
                // The trailing whitespace run rides out on the ending line;
                // the next line starts at the first non-space character.
                while i < range_end && is_wrap_space(text[i]) {
                    length += 1;
                    i += 1;
                }
                out.push(LineSpan::new(start, length, indent));
                start = i;
                if i == range_end {
                    length = 0;
                    width = 0;
                } else {
                    length = 1;
                    width = metrics
                        .char_width(text[i], params.tags.tag_at(text, i))
                        .saturating_add(gap);
                }
                word_start = start;
                word_width = width;
                indent = indent_after(text, Some(i), params.indent_paragraphs);
                if indent {
                    width = width.saturating_add(params.indent_width);
                }
            } else if params.word_wrap && word_start == start {
                // A single token exceeds the budget: forced character break.
                out.push(LineSpan::new(start, length, indent));
                start = i;
                length = 1;
                width = cw.saturating_add(gap);
                word_start = start;
                word_width = width;
                indent = indent_after(text, Some(i), params.indent_paragraphs);
                if indent {
                    width = width.saturating_add(params.indent_width);
                }
            } else if params.word_wrap {
                // Retract the in-progress token to the next line.
                length = length + word_start - i;
                out.push(LineSpan::new(start, length, indent));
                start = word_start;
                length = i - word_start + 1;
                width = word_width;
                word_start = start;
                word_width = width;
                indent = indent_after(text, Some(i), params.indent_paragraphs);
                if indent {
                    width = width.saturating_add(params.indent_width);
                }
                if width > params.maxw && length > 0 {
                    // The relocated token alone overflows; fall back to a
                    // forced break before the current character.
                    length -= 1;
                    out.push(LineSpan::new(start, length, indent));
                    start = i;
                    length = 1;
                    width = cw.saturating_add(gap);
                    word_start = start;
                    word_width = width;
                    indent = indent_after(text, Some(i), params.indent_paragraphs);
                    if indent {
                        width = width.saturating_add(params.indent_width);
                    }
                }
            } else {
                out.push(LineSpan::new(start, length, indent));
                start = i;
                length = 1;
                width = cw.saturating_add(gap);
                indent = indent_after(text, Some(i), params.indent_paragraphs);
                if indent {
                    width = width.saturating_add(params.indent_width);
                }
            }
            if stop(out.len()) {
                return out;
            }
            i += 1;
            continue;
        }

        length += 1;
        i += 1;
    }

    match end_kind {
        ScanEnd::CacheFront => {
            if (width > 0 && width <= params.maxw) || (length > 0 && start + length == range_end)
            {
                out.push(LineSpan::new(start, length, indent));
            }
        }
        ScanEnd::DocumentEnd => {
            if length > 0 {
                out.push(LineSpan::new(start, length, indent));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::UniformMetrics;
    use crate::tags::{TagId, TagItem, TagStyle, TagTable};
    use alloc::vec::Vec;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn no_tags() -> TagMatcher {
        TagMatcher::new(&TagTable::new())
    }

    fn line(start: usize, len: usize) -> LineSpan {
        LineSpan::new(start, len, false)
    }

    /// Full forward scan with unit-wide characters, no gap, no indent.
    fn break_all(text: &str, maxw: i32, wrap: bool) -> Vec<LineSpan> {
        let tags = no_tags();
        let params = BreakParams {
            maxw,
            char_gap: 0,
            word_wrap: wrap,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &tags,
        };
        let text = chars(text);
        break_window(
            &text,
            &params,
            &UniformMetrics::new(1, 10),
            0..text.len(),
            ScanEnd::DocumentEnd,
            |_| false,
        )
        .into_vec()
    }

    #[test]
    fn newline_break_without_wrap() {
        assert_eq!(
            break_all("Hello\nWorld", 100, false),
            [line(0, 6), line(6, 5)]
        );
    }

    #[test]
    fn empty_range_produces_nothing() {
        assert_eq!(break_all("", 10, true), []);
    }

    #[test]
    fn trailing_newline_leaves_no_partial() {
        assert_eq!(break_all("ab\n", 10, false), [line(0, 3)]);
    }

    #[test]
    fn wrap_backtracks_to_word_boundary() {
        assert_eq!(
            break_all("Hello World", 6, true),
            [line(0, 6), line(6, 5)]
        );
    }

    #[test]
    fn long_token_forces_character_break() {
        assert_eq!(break_all("ABCDE", 3, true), [line(0, 3), line(3, 2)]);
        assert_eq!(break_all("ABCDE", 3, false), [line(0, 3), line(3, 2)]);
    }

    #[test]
    fn hyphen_is_a_break_opportunity() {
        assert_eq!(break_all("ab-cdef", 4, true), [line(0, 3), line(3, 4)]);
    }

    #[test]
    fn whitespace_run_rides_out_on_the_ending_line() {
        assert_eq!(break_all("aa   bb", 3, true), [line(0, 5), line(5, 2)]);
    }

    #[test]
    fn whitespace_run_stops_at_newline() {
        // The run ends at the newline, which then opens the next line
        // without forcing its own break.
        assert_eq!(break_all("aa  \nbb", 3, true), [line(0, 4), line(4, 3)]);
    }

    #[test]
    fn relocated_token_can_overflow_again() {
        // "aaa bbbbb" with budget 4: the retracted token is itself wider
        // than the budget and splits at the overflow character.
        assert_eq!(
            break_all("aaa bbbbb", 4, true),
            [line(0, 4), line(4, 4), line(8, 1)]
        );
    }

    #[test]
    fn character_mode_ignores_word_boundaries() {
        assert_eq!(
            break_all("Hello World", 6, false),
            [line(0, 6), line(6, 5)]
        );
    }

    #[test]
    fn budget_below_one_char_degrades_to_single_chars() {
        assert_eq!(
            break_all("AB", 0, false),
            [line(0, 0), line(0, 1), line(1, 1)]
        );
    }

    fn break_indented(text: &str, maxw: i32, indent_width: i32) -> Vec<LineSpan> {
        let tags = no_tags();
        let params = BreakParams {
            maxw,
            char_gap: 0,
            word_wrap: false,
            indent_paragraphs: true,
            indent_width,
            tags: &tags,
        };
        let text = chars(text);
        break_window(
            &text,
            &params,
            &UniformMetrics::new(1, 10),
            0..text.len(),
            ScanEnd::DocumentEnd,
            |_| false,
        )
        .into_vec()
    }

    #[test]
    fn paragraph_start_is_indented() {
        let lines = break_indented("Para one\nSecond", 100, 2);
        assert_eq!(
            lines,
            [
                LineSpan::new(0, 9, false),
                LineSpan::new(9, 6, true),
            ]
        );
    }

    #[test]
    fn indent_reserve_eats_the_budget() {
        // Budget 8 fits "Second" on its own; the reserve of 3 pushes its
        // last character onto the next line.
        let lines = break_indented("Para one\nSecond", 8, 3);
        assert_eq!(
            lines,
            [
                LineSpan::new(0, 9, false),
                LineSpan::new(9, 5, true),
                LineSpan::new(14, 1, false),
            ]
        );
    }

    #[test]
    fn leading_whitespace_suppresses_indent() {
        let lines = break_indented("A\n B", 100, 2);
        assert_eq!(
            lines,
            [LineSpan::new(0, 2, false), LineSpan::new(2, 2, false)]
        );
    }

    #[test]
    fn document_start_is_not_indented() {
        let lines = break_indented("AB", 100, 2);
        assert_eq!(lines, [LineSpan::new(0, 2, false)]);
    }

    #[test]
    fn stop_after_newline_drops_the_partial() {
        let tags = no_tags();
        let params = BreakParams {
            maxw: 100,
            char_gap: 0,
            word_wrap: false,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &tags,
        };
        let text = chars("aaa\nbbb\nccc");
        let lines = break_window(
            &text,
            &params,
            &UniformMetrics::new(1, 10),
            0..text.len(),
            ScanEnd::DocumentEnd,
            |done| done >= 1,
        );
        assert_eq!(&lines[..], [line(0, 4)]);
    }

    #[test]
    fn stop_after_overflow_drops_the_partial() {
        let tags = no_tags();
        let params = BreakParams {
            maxw: 2,
            char_gap: 0,
            word_wrap: false,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &tags,
        };
        let text = chars("abcdef");
        let lines = break_window(
            &text,
            &params,
            &UniformMetrics::new(1, 10),
            0..text.len(),
            ScanEnd::DocumentEnd,
            |done| done >= 1,
        );
        assert_eq!(&lines[..], [line(0, 2)]);
    }

    #[test]
    fn cache_front_keeps_a_fitting_partial() {
        let tags = no_tags();
        let params = BreakParams {
            maxw: 100,
            char_gap: 0,
            word_wrap: false,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &tags,
        };
        let text = chars("abcdeXYZ");
        let lines = break_window(
            &text,
            &params,
            &UniformMetrics::new(1, 10),
            0..5,
            ScanEnd::CacheFront,
            |_| false,
        );
        assert_eq!(&lines[..], [line(0, 5)]);
    }

    #[test]
    fn cache_front_keeps_a_boundary_partial_over_budget() {
        // Advance 5 against budget 4: every character overflows, and the
        // final one is kept only because it runs up to the boundary.
        let tags = no_tags();
        let params = BreakParams {
            maxw: 4,
            char_gap: 0,
            word_wrap: false,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &tags,
        };
        let text = chars("abXYZ");
        let lines = break_window(
            &text,
            &params,
            &UniformMetrics::new(5, 10),
            0..2,
            ScanEnd::CacheFront,
            |_| false,
        );
        assert_eq!(&lines[..], [line(0, 0), line(0, 1), line(1, 1)]);
    }

    #[test]
    fn document_end_keeps_an_over_budget_tail() {
        // A final character wider than the budget still closes the document.
        let tags = no_tags();
        let params = BreakParams {
            maxw: 4,
            char_gap: 0,
            word_wrap: false,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &tags,
        };
        let text = chars("ab");
        let lines = break_window(
            &text,
            &params,
            &UniformMetrics::new(5, 10),
            0..text.len(),
            ScanEnd::DocumentEnd,
            |_| false,
        );
        assert_eq!(&lines[..], [line(0, 0), line(0, 1), line(1, 1)]);
        assert_eq!(lines.last().map(|l| l.end()), Some(text.len()));
    }

    struct WideTagFace;

    impl GlyphMetrics for WideTagFace {
        fn char_width(&self, _ch: char, tag: Option<TagId>) -> i32 {
            if tag.is_some() {
                3
            } else {
                1
            }
        }

        fn line_height(&self, _tag: Option<TagId>) -> i32 {
            10
        }
    }

    #[test]
    fn tagged_spans_measure_with_their_face() {
        let mut table = TagTable::new();
        table
            .push(TagItem::new("bb", TagStyle::default()))
            .expect("tag slot");
        let tags = TagMatcher::new(&table);
        let params = BreakParams {
            maxw: 7,
            char_gap: 0,
            word_wrap: false,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &tags,
        };
        let text = chars("abba");
        let lines = break_window(
            &text,
            &params,
            &WideTagFace,
            0..text.len(),
            ScanEnd::DocumentEnd,
            |_| false,
        );
        assert_eq!(&lines[..], [line(0, 3), line(3, 1)]);

        let untagged = no_tags();
        let plain = BreakParams {
            maxw: 7,
            char_gap: 0,
            word_wrap: false,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &untagged,
        };
        let lines = break_window(
            &text,
            &plain,
            &WideTagFace,
            0..text.len(),
            ScanEnd::DocumentEnd,
            |_| false,
        );
        assert_eq!(&lines[..], [line(0, 4)]);
    }

    #[test]
    fn char_gap_charges_every_character() {
        // Width 2 + gap 1 per character: budget 8 fits two characters.
        let tags = no_tags();
        let params = BreakParams {
            maxw: 8,
            char_gap: 1,
            word_wrap: false,
            indent_paragraphs: false,
            indent_width: 0,
            tags: &tags,
        };
        let text = chars("abcd");
        let lines = break_window(
            &text,
            &params,
            &UniformMetrics::new(2, 10),
            0..text.len(),
            ScanEnd::DocumentEnd,
            |_| false,
        );
        assert_eq!(&lines[..], [line(0, 2), line(2, 2)]);
    }
}
