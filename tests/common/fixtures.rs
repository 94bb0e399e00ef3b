//! Deterministic synthetic documents for integration tests.

const WORDS: [&str; 8] = [
    "pale",
    "harbor",
    "lantern",
    "er",
    "threadbare",
    "of",
    "signal",
    "meridian",
];

/// Paragraphs of space-separated words drawn from a fixed cycle, each
/// terminated by a newline. The cycle persists across paragraph boundaries.
pub fn word_soup(paragraphs: usize, words_per_paragraph: usize) -> String {
    let mut out = String::new();
    let mut pick = 0usize;
    for _ in 0..paragraphs {
        for word_idx in 0..words_per_paragraph {
            if word_idx > 0 {
                out.push(' ');
            }
            out.push_str(WORDS[pick % WORDS.len()]);
            pick += 1;
        }
        out.push('\n');
    }
    out
}

/// Body text behind a cover line: a lone newline at offset zero, the form
/// cover-bearing documents take.
pub fn cover_text(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 1);
    out.push('\n');
    out.push_str(body);
    out
}
