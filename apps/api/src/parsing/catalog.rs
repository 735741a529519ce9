//! Skill Catalog: canonical skill names and alias normalization rules.
//!
//! Built once at startup and shared read-only (`Arc<SkillCatalog>`) by the
//! resume parser. There is no update path: a new catalog means a new process.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::parsing::normalize::{collapse_whitespace, normalize_for_matching};

/// Core skills recognized in resumes.
pub const CORE_SKILLS: &[&str] = &[
    // Programming / Backend
    "python",
    "flask",
    "django",
    "fastapi",
    "java",
    "spring",
    "c#",
    ".net",
    "node",
    "express",
    "php",
    "laravel",
    "golang",
    "ruby",
    "rails",
    // Data / Analytics
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "excel",
    "power bi",
    "tableau",
    "pandas",
    "numpy",
    // Frontend
    "javascript",
    "typescript",
    "react",
    "next.js",
    "angular",
    "vue",
    "html",
    "css",
    "tailwind",
    // AI / ML
    "machine learning",
    "deep learning",
    "nlp",
    "opencv",
    "pytorch",
    "tensorflow",
    "scikit-learn",
    // DevOps / Cloud
    "docker",
    "kubernetes",
    "linux",
    "aws",
    "gcp",
    "azure",
    "git",
    "github",
    "ci/cd",
    // General / Support
    "communication",
    "english",
    "customer support",
    "typing",
    "ms office",
];

/// Alias → canonical skill.
pub const SKILL_ALIASES: &[(&str, &str)] = &[
    ("py", "python"),
    ("python3", "python"),
    ("js", "javascript"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("node.js", "node"),
    ("vue.js", "vue"),
    ("express.js", "express"),
    ("ts", "typescript"),
    ("nodejs", "node"),
    ("postgres", "postgresql"),
    ("ms-office", "ms office"),
    ("msoffice", "ms office"),
    ("tf", "tensorflow"),
    ("sklearn", "scikit-learn"),
    ("powerbi", "power bi"),
    ("pb", "power bi"),
];

/// One canonical skill and every alias that folds into it.
#[derive(Debug, Clone, Serialize)]
pub struct SkillCatalogEntry {
    pub canonical: String,
    pub aliases: BTreeSet<String>,
    /// Spellings under which the canonical skill is matched in normalized text.
    /// A bare trailing token left by stripping a leading period (`.net` → `net`)
    /// resolves, but is not searched for in running text.
    #[serde(skip)]
    pub surface_forms: Vec<String>,
}

impl SkillCatalogEntry {
    /// Number of space-separated tokens in the canonical name.
    pub fn token_count(&self) -> usize {
        self.canonical.split_whitespace().count()
    }
}

/// Immutable skill catalog.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    entries: Vec<SkillCatalogEntry>,
    /// Every known spelling (canonical, variant, alias) → canonical.
    lookup: HashMap<String, String>,
    /// Normalized alias → canonical pairs, longest alias first.
    aliases: Vec<(String, String)>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new(CORE_SKILLS, SKILL_ALIASES)
    }
}

impl SkillCatalog {
    /// Builds a catalog from a core skill list and an alias table.
    ///
    /// Names are lowercased and whitespace-collapsed. An alias whose target is
    /// not a core skill adds that target as a skill of its own. The first
    /// mapping wins when an alias is listed twice.
    pub fn new(core_skills: &[&str], aliases: &[(&str, &str)]) -> Self {
        let mut entries: Vec<SkillCatalogEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        let mut ensure_entry = |canonical: String, entries: &mut Vec<SkillCatalogEntry>| -> usize {
            *positions.entry(canonical.clone()).or_insert_with(|| {
                entries.push(SkillCatalogEntry {
                    surface_forms: text_forms(&canonical),
                    canonical,
                    aliases: BTreeSet::new(),
                });
                entries.len() - 1
            })
        };

        for skill in core_skills {
            let canonical = canonical_key(skill);
            if !canonical.is_empty() {
                ensure_entry(canonical, &mut entries);
            }
        }

        let mut alias_pairs: Vec<(String, String)> = Vec::new();
        for (alias, target) in aliases {
            let alias = canonical_key(alias);
            let target = canonical_key(target);
            if alias.is_empty() || target.is_empty() || alias == target {
                continue;
            }
            if alias_pairs.iter().any(|(a, _)| *a == alias) {
                continue;
            }
            let idx = ensure_entry(target.clone(), &mut entries);
            entries[idx].aliases.insert(alias.clone());
            alias_pairs.push((alias, target));
        }
        alias_pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let mut lookup = HashMap::new();
        for entry in &entries {
            lookup.insert(entry.canonical.clone(), entry.canonical.clone());
            for form in variant_spellings(&entry.canonical) {
                lookup
                    .entry(form)
                    .or_insert_with(|| entry.canonical.clone());
            }
        }
        for (alias, target) in &alias_pairs {
            lookup.entry(alias.clone()).or_insert_with(|| target.clone());
        }

        Self {
            entries,
            lookup,
            aliases: alias_pairs,
        }
    }

    /// Resolves any known spelling to its canonical skill.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        let key = canonical_key(token);
        if let Some(canonical) = self.lookup.get(&key) {
            return Some(canonical.as_str());
        }
        self.lookup
            .get(&normalize_for_matching(token))
            .map(String::as_str)
    }

    pub fn all_canonical_names(&self) -> BTreeSet<String> {
        self.entries.iter().map(|e| e.canonical.clone()).collect()
    }

    pub fn entries(&self) -> &[SkillCatalogEntry] {
        &self.entries
    }

    /// Alias → canonical pairs in substitution order (longest alias first).
    pub fn aliases(&self) -> &[(String, String)] {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical_key(raw: &str) -> String {
    collapse_whitespace(&raw.to_lowercase())
}

/// Canonical name plus its period-to-space and punctuation-folded variants.
fn variant_spellings(canonical: &str) -> Vec<String> {
    let mut forms = vec![canonical.to_string()];
    let candidates = [
        collapse_whitespace(&canonical.replace('.', " ")),
        normalize_for_matching(canonical),
    ];
    for form in candidates {
        if !form.is_empty() && !forms.contains(&form) {
            forms.push(form);
        }
    }
    forms
}

fn text_forms(canonical: &str) -> Vec<String> {
    variant_spellings(canonical)
        .into_iter()
        .filter(|form| form == canonical || form.contains(' ') || form.contains('.'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        let catalog = SkillCatalog::default();
        for name in catalog.all_canonical_names() {
            assert_eq!(catalog.resolve(&name), Some(name.as_str()), "{name}");
        }
    }

    #[test]
    fn test_aliases_resolve_to_canonical() {
        let catalog = SkillCatalog::default();
        for (alias, target) in SKILL_ALIASES {
            assert_eq!(catalog.resolve(alias), Some(*target), "{alias}");
        }
    }

    #[test]
    fn test_resolve_is_case_and_space_insensitive() {
        let catalog = SkillCatalog::default();
        assert_eq!(catalog.resolve("  Power   BI "), Some("power bi"));
        assert_eq!(catalog.resolve("ReactJS"), Some("react"));
    }

    #[test]
    fn test_period_variants_resolve() {
        let catalog = SkillCatalog::default();
        assert_eq!(catalog.resolve("next js"), Some("next.js"));
        assert_eq!(catalog.resolve("net"), Some(".net"));
        assert_eq!(catalog.resolve("ci cd"), Some("ci/cd"));
        assert_eq!(catalog.resolve("CI/CD"), Some("ci/cd"));
    }

    #[test]
    fn test_text_forms_skip_bare_period_remainder() {
        let catalog = SkillCatalog::default();
        let net = catalog
            .entries()
            .iter()
            .find(|e| e.canonical == ".net")
            .unwrap();
        assert_eq!(net.surface_forms, vec![".net".to_string()]);

        let next = catalog
            .entries()
            .iter()
            .find(|e| e.canonical == "next.js")
            .unwrap();
        assert!(next.surface_forms.contains(&"next js".to_string()));
    }

    #[test]
    fn test_unknown_token_is_none() {
        let catalog = SkillCatalog::default();
        assert_eq!(catalog.resolve("cobol"), None);
        assert_eq!(catalog.resolve(""), None);
    }

    #[test]
    fn test_every_alias_has_exactly_one_entry() {
        let catalog = SkillCatalog::default();
        for (alias, _) in catalog.aliases() {
            let owners = catalog
                .entries()
                .iter()
                .filter(|e| e.aliases.contains(alias))
                .count();
            assert_eq!(owners, 1, "{alias}");
        }
    }

    #[test]
    fn test_alias_with_unknown_target_adds_entry() {
        let catalog = SkillCatalog::new(&["python"], &[("golang", "Go  Lang")]);
        assert_eq!(catalog.resolve("golang"), Some("go lang"));
        assert!(catalog.all_canonical_names().contains("go lang"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_aliases_sorted_longest_first() {
        let catalog = SkillCatalog::default();
        let lengths: Vec<usize> = catalog.aliases().iter().map(|(a, _)| a.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_duplicate_core_skills_collapse() {
        let catalog = SkillCatalog::new(&["SQL", "sql ", "Sql"], &[]);
        assert_eq!(catalog.len(), 1);
    }
}
