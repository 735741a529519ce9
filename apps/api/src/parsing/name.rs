//! Name Resolver: cascading heuristic for the candidate's name.
//!
//! Stages run in a fixed order and the first one that produces a name wins:
//! 1. an explicit `Name:` label,
//! 2. PERSON spans from the entity source (skipped when unavailable),
//! 3. a scan of the resume header lines.
//!
//! No stage ever fails the parse; `None` is a valid outcome.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::parsing::contact::{has_email, has_phone};
use crate::parsing::entities::EntitySource;

/// Longest accepted name, in space-separated words.
pub const MAX_NAME_WORDS: usize = 6;
/// Non-empty lines examined by the header scan.
pub const HEADER_SCAN_LINES: usize = 6;

static RE_NAME_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:name|full name|candidate name)[ \t]*[:\-][ \t]*(.+)$")
        .expect("name label pattern is valid")
});

static RE_NOT_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z\s.\-]").expect("name filter pattern is valid"));

/// Which stage produced the name. Logged for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStage {
    Label,
    Entity,
    Header,
}

type Stage = fn(&NameResolver, &str) -> Option<String>;

/// Stages in priority order.
const STAGES: &[(NameStage, Stage)] = &[
    (NameStage::Label, NameResolver::from_label),
    (NameStage::Entity, NameResolver::from_entities),
    (NameStage::Header, NameResolver::from_header),
];

pub struct NameResolver {
    entities: Arc<dyn EntitySource>,
}

impl NameResolver {
    pub fn new(entities: Arc<dyn EntitySource>) -> Self {
        Self { entities }
    }

    pub fn entity_backend(&self) -> &'static str {
        self.entities.backend()
    }

    /// Runs the cascade and returns the first name found.
    pub fn resolve(&self, text: &str) -> Option<String> {
        self.resolve_with_stage(text).map(|(name, _)| name)
    }

    pub fn resolve_with_stage(&self, text: &str) -> Option<(String, NameStage)> {
        if text.trim().is_empty() {
            return None;
        }
        STAGES.iter().find_map(|(stage, run)| {
            let name = run(self, text)?;
            debug!(stage = ?stage, "candidate name resolved");
            Some((name, *stage))
        })
    }

    fn from_label(&self, text: &str) -> Option<String> {
        let caps = RE_NAME_LABEL.captures(text)?;
        let candidate = caps
            .get(1)?
            .as_str()
            .trim_matches(|c: char| c.is_whitespace() || c == ':');
        word_count_ok(candidate).then(|| candidate.to_string())
    }

    fn from_entities(&self, text: &str) -> Option<String> {
        let spans = self.entities.person_spans(text)?;
        most_frequent(
            spans
                .iter()
                .map(|s| s.trim())
                .filter(|s| word_count_ok(s)),
        )
    }

    fn from_header(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(HEADER_SCAN_LINES)
            .filter(|line| !is_title_line(line))
            .filter(|line| !has_email(line) && !has_phone(line))
            .find_map(|line| {
                let cleaned = RE_NOT_NAME_CHARS.replace_all(line, "");
                // Words left with no letters (`..` from a dotted date) are dropped.
                let name = cleaned
                    .split_whitespace()
                    .filter(|word| word.chars().any(|c| c.is_ascii_alphabetic()))
                    .collect::<Vec<_>>()
                    .join(" ");
                word_count_ok(&name).then_some(name)
            })
    }
}

/// `Resume`, `CV` or anything mentioning a curriculum vitae.
fn is_title_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower == "resume" || lower == "cv" || lower.contains("curriculum")
}

fn word_count_ok(candidate: &str) -> bool {
    let words = candidate.split_whitespace().count();
    (1..=MAX_NAME_WORDS).contains(&words)
}

/// Most frequent span; ties go to the span seen first.
fn most_frequent<'a>(spans: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for span in spans {
        match counts.iter_mut().find(|(s, _)| *s == span) {
            Some((_, n)) => *n += 1,
            None => counts.push((span, 1)),
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (span, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((span, n));
        }
    }
    best.map(|(span, _)| span.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::entities::NoEntityModel;

    struct FixedEntities(Vec<&'static str>);

    impl EntitySource for FixedEntities {
        fn person_spans(&self, _text: &str) -> Option<Vec<String>> {
            Some(self.0.iter().map(|s| s.to_string()).collect())
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    fn without_model() -> NameResolver {
        NameResolver::new(Arc::new(NoEntityModel))
    }

    fn with_spans(spans: Vec<&'static str>) -> NameResolver {
        NameResolver::new(Arc::new(FixedEntities(spans)))
    }

    #[test]
    fn test_label_wins_over_header() {
        let resolved = without_model().resolve_with_stage("Name: Jane A. Doe\nEmail: jane@x.com");
        assert_eq!(resolved, Some(("Jane A. Doe".to_string(), NameStage::Label)));
    }

    #[test]
    fn test_label_variants() {
        let r = without_model();
        assert_eq!(
            r.resolve("Summary\nFull Name - Ravi Kumar\n").as_deref(),
            Some("Ravi Kumar")
        );
        assert_eq!(
            r.resolve("CANDIDATE NAME:  Priya Sharma  ").as_deref(),
            Some("Priya Sharma")
        );
    }

    #[test]
    fn test_label_wins_over_entities() {
        let r = with_spans(vec!["Someone Else"]);
        assert_eq!(r.resolve("Name: Jane Doe").as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_overlong_label_falls_through() {
        let text = "Name: this label is far too long to be a name\nAsha Verma";
        let resolved = without_model().resolve_with_stage(text);
        assert_eq!(resolved, Some(("Asha Verma".to_string(), NameStage::Header)));
    }

    #[test]
    fn test_entity_most_frequent_wins() {
        let r = with_spans(vec!["Acme Corp", "John Smith", "John Smith"]);
        let resolved = r.resolve_with_stage("Worked at Acme Corp with John Smith.");
        assert_eq!(resolved, Some(("John Smith".to_string(), NameStage::Entity)));
    }

    #[test]
    fn test_entity_tie_goes_to_first_seen() {
        let r = with_spans(vec!["Maria Lopez", "Ken Ito", "Ken Ito", "Maria Lopez"]);
        assert_eq!(r.resolve("...").as_deref(), Some("Maria Lopez"));
    }

    #[test]
    fn test_entity_spans_over_six_words_ignored() {
        let r = with_spans(vec!["one two three four five six seven"]);
        let resolved = r.resolve_with_stage("Resume\nAsha Verma");
        assert_eq!(resolved, Some(("Asha Verma".to_string(), NameStage::Header)));
    }

    #[test]
    fn test_header_skips_titles_and_contact_lines() {
        let text = "RESUME\nCurriculum Vitae\njane@x.com\n+91 98765 43210\nJane Doe\nEngineer";
        assert_eq!(without_model().resolve(text).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_header_strips_symbols() {
        let text = "  ** Jean-Luc O'Neil, Jr. **  \nSkills";
        assert_eq!(
            without_model().resolve(text).as_deref(),
            Some("Jean-Luc ONeil Jr.")
        );
    }

    #[test]
    fn test_header_line_with_dotted_date_is_a_name() {
        let text = "John Smith | Pune | 12.04.1996\nSkills";
        let resolved = without_model().resolve_with_stage(text);
        assert_eq!(resolved, Some(("John Smith Pune".to_string(), NameStage::Header)));
    }

    #[test]
    fn test_header_scans_only_first_lines() {
        let text = "resume\ncv\nresume\ncv\nresume\ncv\nJane Doe";
        assert_eq!(without_model().resolve(text), None);
    }

    #[test]
    fn test_header_requires_a_letter() {
        let text = "---\n...\n";
        assert_eq!(without_model().resolve(text), None);
    }

    #[test]
    fn test_empty_text_has_no_name() {
        assert_eq!(without_model().resolve(""), None);
        assert_eq!(without_model().resolve("   \n\t"), None);
    }

    #[test]
    fn test_most_frequent_empty() {
        assert_eq!(most_frequent(std::iter::empty()), None);
    }
}
