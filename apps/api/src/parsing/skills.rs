//! Skill Extractor: normalizes resume text and matches it against the catalog.
//!
//! Algorithm:
//! 1. Normalize: lowercase, fold `()[],;/:@` and newlines to spaces, collapse whitespace.
//! 2. Substitute aliases with their canonical term (whole words, longest alias first).
//! 3. Test every catalog entry, multi-word skills first, with a whole-phrase match.
//!
//! An optional phrase-index pass (Aho-Corasick over the same surface forms)
//! re-scans the text as a cross-check. The direct pass is exhaustive and is
//! always the returned result; disagreements are only logged.

use std::collections::BTreeSet;
use std::sync::Arc;

use aho_corasick::{AhoCorasick, MatchKind};
use tracing::{debug, warn};

use crate::parsing::catalog::SkillCatalog;
use crate::parsing::normalize::{
    contains_phrase, is_whole_phrase, normalize_for_matching, replace_phrase,
};

/// Vocabulary index over every surface form of every catalog skill.
struct PhraseIndex {
    automaton: AhoCorasick,
    /// Pattern id → canonical skill.
    canonical: Vec<String>,
}

impl PhraseIndex {
    fn build(catalog: &SkillCatalog) -> Option<Self> {
        let mut patterns = Vec::new();
        let mut canonical = Vec::new();
        for entry in catalog.entries() {
            for form in &entry.surface_forms {
                patterns.push(form.clone());
                canonical.push(entry.canonical.clone());
            }
        }

        match AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
        {
            Ok(automaton) => Some(Self {
                automaton,
                canonical,
            }),
            Err(e) => {
                warn!("Phrase index unavailable, skipping verification pass: {e}");
                None
            }
        }
    }

    fn scan(&self, normalized: &str) -> BTreeSet<String> {
        self.automaton
            .find_iter(normalized)
            .filter(|m| is_whole_phrase(normalized, m.start(), m.end()))
            .map(|m| self.canonical[m.pattern().as_usize()].clone())
            .collect()
    }
}

pub struct SkillExtractor {
    catalog: Arc<SkillCatalog>,
    /// Entry indices, most tokens first, then alphabetical.
    match_order: Vec<usize>,
    phrase_index: Option<PhraseIndex>,
}

impl SkillExtractor {
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        let entries = catalog.entries();
        let mut match_order: Vec<usize> = (0..entries.len()).collect();
        match_order.sort_by(|&a, &b| {
            entries[b]
                .token_count()
                .cmp(&entries[a].token_count())
                .then_with(|| entries[a].canonical.cmp(&entries[b].canonical))
        });

        Self {
            catalog,
            match_order,
            phrase_index: None,
        }
    }

    /// Enables the phrase-index verification pass.
    pub fn with_phrase_verification(mut self) -> Self {
        self.phrase_index = PhraseIndex::build(&self.catalog);
        self
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Canonical skills mentioned in `text`, sorted alphabetically.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let normalized = self.prepare(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let found = self.direct_matches(&normalized);

        if let Some(index) = &self.phrase_index {
            let indexed = index.scan(&normalized);
            if indexed != found {
                let only_indexed: Vec<_> = indexed.difference(&found).collect();
                let only_direct: Vec<_> = found.difference(&indexed).collect();
                debug!(
                    ?only_indexed,
                    ?only_direct,
                    "phrase index disagrees with direct match; keeping direct result"
                );
            }
        }

        found.into_iter().collect()
    }

    /// Normalized text with every alias replaced by its canonical term.
    pub fn prepare(&self, text: &str) -> String {
        let mut normalized = normalize_for_matching(text);
        for (alias, canonical) in self.catalog.aliases() {
            normalized = replace_phrase(&normalized, alias, canonical);
        }
        normalized
    }

    fn direct_matches(&self, normalized: &str) -> BTreeSet<String> {
        let entries = self.catalog.entries();
        self.match_order
            .iter()
            .map(|&i| &entries[i])
            .filter(|entry| {
                entry
                    .surface_forms
                    .iter()
                    .any(|form| contains_phrase(normalized, form))
            })
            .map(|entry| entry.canonical.clone())
            .collect()
    }
}
