//! Job Matcher: pluggable scorer of a candidate's skills against the job board.
//!
//! Default: `SkillOverlapMatcher` (pure, deterministic).
//! `AppState` holds an `Arc<dyn JobMatcher>`.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::matching::jobs::{JobBoard, JobPosting};
use crate::parsing::normalize::collapse_whitespace;

/// One posting the candidate overlaps with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub job: JobPosting,
    /// Intersection of candidate and job skills, alphabetically sorted.
    pub matched_skills: Vec<String>,
    /// Percentage of the job's required skills covered, 0 – 100.
    pub score: u32,
}

/// Implement this to swap scoring strategies without touching the handlers.
pub trait JobMatcher: Send + Sync {
    fn match_jobs(&self, skills: &[String]) -> Vec<MatchResult>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Scores each job by the share of its required skills the candidate has.
///
/// Algorithm:
/// 1. Intersect candidate skills with each job's required skills.
/// 2. Drop jobs with an empty intersection.
/// 3. score = round(100 × |∩| / max(1, |required|)), halves rounded to even.
/// 4. Sort by score descending; equal scores keep catalog order.
pub struct SkillOverlapMatcher {
    board: Arc<JobBoard>,
}

impl SkillOverlapMatcher {
    pub fn new(board: Arc<JobBoard>) -> Self {
        Self { board }
    }
}

impl JobMatcher for SkillOverlapMatcher {
    fn match_jobs(&self, skills: &[String]) -> Vec<MatchResult> {
        compute_overlap_matches(self.board.jobs(), skills)
    }

    fn backend(&self) -> &'static str {
        "skill_overlap"
    }
}

fn compute_overlap_matches(jobs: &[JobPosting], skills: &[String]) -> Vec<MatchResult> {
    let candidate: BTreeSet<String> = skills
        .iter()
        .map(|s| collapse_whitespace(&s.to_lowercase()))
        .filter(|s| !s.is_empty())
        .collect();

    if candidate.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<MatchResult> = jobs
        .iter()
        .filter_map(|job| {
            let required: BTreeSet<&str> =
                job.required_skills.iter().map(String::as_str).collect();
            let matched_skills: Vec<String> = required
                .iter()
                .filter(|s| candidate.contains(**s))
                .map(|s| s.to_string())
                .collect();

            if matched_skills.is_empty() {
                return None;
            }

            Some(MatchResult {
                score: coverage_score(matched_skills.len(), required.len()),
                matched_skills,
                job: job.clone(),
            })
        })
        .collect();

    // `sort_by` is stable: ties keep catalog order.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}

/// Integer percentage of `required` covered by `matched`; exact halves round to even.
fn coverage_score(matched: usize, required: usize) -> u32 {
    let required = required.max(1);
    ((100.0 * matched as f64 / required as f64).round_ties_even() as u32).min(100)
}
