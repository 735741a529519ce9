//! Axum route handlers for the Resume API.

use std::collections::{BTreeMap, BTreeSet};

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::matcher::MatchResult;
use crate::parsing::resume::ParsedResume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ResumeRequest {
    #[serde(default)]
    pub resume: Option<String>,
}

impl ResumeRequest {
    /// The trimmed resume text, or a validation error when it is missing or blank.
    pub fn require_text(&self) -> Result<&str, AppError> {
        self.resume
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("resume text required".to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    #[serde(flatten)]
    pub resume: ParsedResume,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub skills: BTreeSet<String>,
    /// Alias → canonical skill.
    pub aliases: BTreeMap<String, String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/parse
///
/// Full structured parse plus job matches for the extracted skills.
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    let text = request.require_text()?;

    let resume = state.parser.parse(text);
    let matches = state.matcher.match_jobs(&resume.skills);

    info!(
        skills = resume.skills.len(),
        results = matches.len(),
        has_name = resume.name.is_some(),
        "resume parsed"
    );

    Ok(Json(ParseResponse { resume, matches }))
}

/// POST /api/skills
pub async fn handle_skills(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    let text = request.require_text()?;
    let skills = state.parser.extract_skills(text);
    info!(skills = skills.len(), "skills extracted");
    Ok(Json(SkillsResponse { skills }))
}

/// GET /api/catalog
///
/// The skill vocabulary: every canonical skill and the aliases folded into them.
pub async fn handle_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = state.parser.catalog();
    Json(CatalogResponse {
        skills: catalog.all_canonical_names(),
        aliases: catalog.aliases().iter().cloned().collect(),
    })
}
