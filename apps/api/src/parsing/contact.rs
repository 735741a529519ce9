//! Contact Extractor: email addresses and phone numbers.
//!
//! Patterns are compiled once. Phone candidates pass through a pluggable
//! `PhoneNormalizer`; the numbering-plan backed one is used when the
//! `phonenumber` feature is compiled in.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::normalize::collapse_whitespace;

/// Phone candidates with fewer digits than this are never reported.
pub const MIN_PHONE_DIGITS: usize = 6;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+\-]+@[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.[a-z]{2,}\b")
        .expect("email pattern is valid")
});

// Optional `+CC`, optional `(area)`, then digit groups separated by spaces or dashes.
static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ \t\-]*)?(?:\(\d{1,5}\)[ \t\-]*)?\d(?:[ \t\-]?\d){4,}")
        .expect("phone pattern is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// Phone normalization strategies
// ────────────────────────────────────────────────────────────────────────────

/// Turns a raw phone match into its reported form, or rejects it.
pub trait PhoneNormalizer: Send + Sync {
    fn normalize(&self, candidate: &str) -> Option<String>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Pattern-only normalization: enough digits, collapsed whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct LenientPhoneNormalizer;

impl PhoneNormalizer for LenientPhoneNormalizer {
    fn normalize(&self, candidate: &str) -> Option<String> {
        if digit_count(candidate) < MIN_PHONE_DIGITS {
            return None;
        }
        let collapsed = collapse_whitespace(candidate);
        (!collapsed.is_empty()).then_some(collapsed)
    }

    fn backend(&self) -> &'static str {
        "lenient"
    }
}

/// Validates against a national numbering plan and formats internationally.
#[cfg(feature = "phonenumber")]
#[derive(Debug, Clone, Copy)]
pub struct NationalPlanPhoneNormalizer {
    region: phonenumber::country::Id,
}

#[cfg(feature = "phonenumber")]
impl Default for NationalPlanPhoneNormalizer {
    fn default() -> Self {
        Self {
            region: phonenumber::country::Id::IN,
        }
    }
}

#[cfg(feature = "phonenumber")]
impl PhoneNormalizer for NationalPlanPhoneNormalizer {
    fn normalize(&self, candidate: &str) -> Option<String> {
        if digit_count(candidate) < MIN_PHONE_DIGITS {
            return None;
        }
        let number = phonenumber::parse(Some(self.region), candidate).ok()?;
        if !phonenumber::is_valid(&number) {
            return None;
        }
        Some(
            number
                .format()
                .mode(phonenumber::Mode::International)
                .to_string(),
        )
    }

    fn backend(&self) -> &'static str {
        "national_plan"
    }
}

/// The strictest normalizer compiled into this build.
pub fn preferred_phone_normalizer() -> Box<dyn PhoneNormalizer> {
    #[cfg(feature = "phonenumber")]
    {
        Box::new(NationalPlanPhoneNormalizer::default())
    }
    #[cfg(not(feature = "phonenumber"))]
    {
        Box::new(LenientPhoneNormalizer)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

pub struct ContactExtractor {
    phones: Box<dyn PhoneNormalizer>,
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new(preferred_phone_normalizer())
    }
}

impl ContactExtractor {
    pub fn new(phones: Box<dyn PhoneNormalizer>) -> Self {
        Self { phones }
    }

    pub fn phone_backend(&self) -> &'static str {
        self.phones.backend()
    }

    /// Unique emails in first-seen order.
    pub fn extract_emails(&self, text: &str) -> Vec<String> {
        dedup_in_order(RE_EMAIL.find_iter(text).map(|m| m.as_str().to_string()))
    }

    /// Unique phone numbers in first-seen order, after normalization.
    ///
    /// Email addresses are blanked first so digits inside them are not read as numbers.
    pub fn extract_phones(&self, text: &str) -> Vec<String> {
        let without_emails = RE_EMAIL.replace_all(text, " ");
        dedup_in_order(
            RE_PHONE
                .find_iter(&without_emails)
                .filter_map(|m| self.phones.normalize(m.as_str())),
        )
    }
}

/// True when the line carries something that looks like an email address.
pub fn has_email(text: &str) -> bool {
    RE_EMAIL.is_match(text)
}

/// True when the line carries a digit run long enough to be a phone number.
pub fn has_phone(text: &str) -> bool {
    RE_PHONE
        .find_iter(text)
        .any(|m| digit_count(m.as_str()) >= MIN_PHONE_DIGITS)
}

fn digit_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

fn dedup_in_order(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}
