//! Resume Parser: composes the extractors into one structured record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parsing::catalog::SkillCatalog;
use crate::parsing::contact::ContactExtractor;
use crate::parsing::education::EducationFinder;
use crate::parsing::entities::EntitySource;
use crate::parsing::name::NameResolver;
use crate::parsing::skills::SkillExtractor;

/// Structured candidate information extracted from plain resume text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    /// Canonical skills, alphabetically sorted, unique.
    pub skills: Vec<String>,
    pub education_snippets: Vec<String>,
}

pub struct ResumeParser {
    contacts: ContactExtractor,
    names: NameResolver,
    skills: SkillExtractor,
    education: EducationFinder,
}

impl ResumeParser {
    pub fn new(
        catalog: Arc<SkillCatalog>,
        entities: Arc<dyn EntitySource>,
        contacts: ContactExtractor,
    ) -> Self {
        Self {
            contacts,
            names: NameResolver::new(entities),
            skills: SkillExtractor::new(catalog).with_phrase_verification(),
            education: EducationFinder::default(),
        }
    }

    pub fn catalog(&self) -> &SkillCatalog {
        self.skills.catalog()
    }

    /// Backends in use, for the startup log.
    pub fn backends(&self) -> (&'static str, &'static str) {
        (self.names.entity_backend(), self.contacts.phone_backend())
    }

    /// Parses resume text. Empty or whitespace-only input gives an empty record.
    pub fn parse(&self, text: &str) -> ParsedResume {
        let text = prepare_text(text);
        if text.trim().is_empty() {
            return ParsedResume::default();
        }

        let parsed = ParsedResume {
            name: self.names.resolve(&text),
            emails: self.contacts.extract_emails(&text),
            phones: self.contacts.extract_phones(&text),
            skills: self.skills.extract(&text),
            education_snippets: self.education.find(&text),
        };

        debug!(
            has_name = parsed.name.is_some(),
            emails = parsed.emails.len(),
            phones = parsed.phones.len(),
            skills = parsed.skills.len(),
            education = parsed.education_snippets.len(),
            "resume parsed"
        );

        parsed
    }

    /// Canonical skills only, sorted.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        self.skills.extract(&prepare_text(text))
    }
}

/// Line endings unified to `\n`.
fn prepare_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
