//! Text normalization shared by the skill catalog and the skill extractor.
//!
//! Both sides of a comparison go through the same folding, so a catalog term
//! and the resume text always agree on punctuation and spacing.

/// Punctuation folded to a single space before skill matching.
const FOLDED_PUNCTUATION: &[char] = &['(', ')', '[', ']', ',', ';', '/', ':', '@'];

/// Collapses every whitespace run to one space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercases, folds punctuation and newlines to spaces, collapses whitespace.
pub fn normalize_for_matching(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if FOLDED_PUNCTUATION.contains(&c) || c == '\n' || c == '\r' {
                ' '
            } else {
                c
            }
        })
        .collect();
    collapse_whitespace(&folded)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A neighbour glues onto the match if it is a word character, or a dot that is
/// itself followed by one (`next.js` is one term, `python.` ends a sentence).
fn glued(mut outward: impl Iterator<Item = char>) -> bool {
    match outward.next() {
        None => false,
        Some('.') => outward.next().is_some_and(is_word_char),
        Some(c) => is_word_char(c),
    }
}

/// True when `haystack[start..end]` is not glued to a neighbouring term.
fn on_word_boundaries(haystack: &str, start: usize, end: usize) -> bool {
    !glued(haystack[..start].chars().rev()) && !glued(haystack[end..].chars())
}

/// Finds the first whole-phrase occurrence of `needle`.
///
/// A phrase may begin or end with punctuation (`c#`, `.net`), so boundaries are
/// checked against the neighbouring characters rather than with `\b`.
pub fn find_phrase(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .match_indices(needle)
        .map(|(start, _)| start)
        .find(|&start| on_word_boundaries(haystack, start, start + needle.len()))
}

pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    find_phrase(haystack, needle).is_some()
}

/// Replaces every whole-phrase occurrence of `needle` with `replacement`.
pub fn replace_phrase(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }

    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (start, _) in haystack.match_indices(needle) {
        let end = start + needle.len();
        if start < last || !on_word_boundaries(haystack, start, end) {
            continue;
        }
        out.push_str(&haystack[last..start]);
        out.push_str(replacement);
        last = end;
    }
    out.push_str(&haystack[last..]);
    out
}

/// Is the match at `start..end` a whole phrase? Exposed for index-based scanners.
pub fn is_whole_phrase(haystack: &str, start: usize, end: usize) -> bool {
    on_word_boundaries(haystack, start, end)
}
