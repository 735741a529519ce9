//! Job catalog: the read-only postings candidates are scored against.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::parsing::catalog::SkillCatalog;
use crate::parsing::normalize::collapse_whitespace;

/// A job posting. Serialized with the field names the frontend expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free-form category: `Private`, `Government`, `International`, or anything
    /// a loaded catalog uses.
    #[serde(rename = "type")]
    pub job_type: String,
    /// Required skills, canonical lowercase names.
    #[serde(rename = "skills")]
    pub required_skills: Vec<String>,
}

impl JobPosting {
    fn new(
        title: &str,
        required_skills: &[&str],
        company: &str,
        location: &str,
        job_type: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            company: company.to_string(),
            location: location.to_string(),
            job_type: job_type.to_string(),
            required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Lowercases and whitespace-collapses skills, dropping blanks and repeats.
    fn normalized(mut self) -> Self {
        let mut skills: Vec<String> = Vec::with_capacity(self.required_skills.len());
        for skill in &self.required_skills {
            let skill = collapse_whitespace(&skill.to_lowercase());
            if !skill.is_empty() && !skills.contains(&skill) {
                skills.push(skill);
            }
        }
        self.required_skills = skills;
        self
    }
}

/// Immutable list of postings, in catalog order.
#[derive(Debug, Clone)]
pub struct JobBoard {
    jobs: Vec<JobPosting>,
}

impl Default for JobBoard {
    fn default() -> Self {
        Self::new(reference_jobs())
    }
}

impl JobBoard {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self {
            jobs: jobs.into_iter().map(JobPosting::normalized).collect(),
        }
    }

    /// Loads postings from a JSON array in the wire format.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job catalog '{}'", path.display()))?;
        let jobs: Vec<JobPosting> = serde_json::from_str(&raw)
            .with_context(|| format!("Job catalog '{}' is not valid JSON", path.display()))?;
        Ok(Self::new(jobs))
    }

    /// Maps every required skill the catalog knows (alias or spelling variant)
    /// onto its canonical name. Unknown skills are kept as written.
    pub fn canonicalized(self, catalog: &SkillCatalog) -> Self {
        let jobs = self
            .jobs
            .into_iter()
            .map(|mut job| {
                job.required_skills = job
                    .required_skills
                    .into_iter()
                    .map(|skill| catalog.resolve(&skill).map(str::to_string).unwrap_or(skill))
                    .collect();
                job.normalized()
            })
            .collect();
        Self { jobs }
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// The built-in postings.
pub fn reference_jobs() -> Vec<JobPosting> {
    vec![
        JobPosting::new(
            "Software Engineer (Flask)",
            &["python", "flask", "sql"],
            "TechCorp",
            "Remote",
            "Private",
        ),
        JobPosting::new(
            "Data Analyst",
            &["excel", "sql", "python", "power bi"],
            "DataWorld",
            "Noida",
            "Private",
        ),
        JobPosting::new(
            "AI Research Intern",
            &["machine learning", "python", "nlp"],
            "AI Labs",
            "Bengaluru",
            "Private",
        ),
        JobPosting::new(
            "Frontend Developer",
            &["javascript", "react", "html", "css"],
            "WebWorks",
            "Remote",
            "Private",
        ),
        JobPosting::new(
            "Govt. Junior Data Entry",
            &["excel", "typing", "ms office"],
            "Gov Dept",
            "Lucknow",
            "Government",
        ),
        JobPosting::new(
            "International Support (US Shift)",
            &["english", "communication", "customer support"],
            "GlobalHelp Inc",
            "Remote",
            "International",
        ),
    ]
}
