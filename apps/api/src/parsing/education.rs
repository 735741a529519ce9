//! Education Snippet Finder: lines that mention a degree.

use std::sync::LazyLock;

use regex::Regex;

/// Most snippets reported per resume.
pub const MAX_EDUCATION_SNIPPETS: usize = 6;

// Abbreviations tolerate optional dots and a space between letters (B.Tech, B Tech, BTech).
static RE_DEGREE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:
            bachelor'?s? | master'?s? | diploma | ph\.?\s?d
          | b\.?\s?tech | b\.\s?e | b\.?\s?sc | b\.?\s?com | b\.?\s?c\.?\s?a
          | m\.?\s?tech | m\.?\s?sc | m\.?\s?c\.?\s?a | m\.?\s?b\.?\s?a
          | 1[02]th | hsc | ssc
        )\b",
    )
    .expect("degree pattern is valid")
});

#[derive(Debug, Clone, Copy)]
pub struct EducationFinder {
    limit: usize,
}

impl Default for EducationFinder {
    fn default() -> Self {
        Self::with_limit(MAX_EDUCATION_SNIPPETS)
    }
}

impl EducationFinder {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    /// Trimmed lines containing a degree keyword, in document order, capped.
    pub fn find(&self, text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| RE_DEGREE.is_match(line))
            .take(self.limit)
            .map(str::to_string)
            .collect()
    }
}
