//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::jobs::JobPosting;
use crate::matching::matcher::MatchResult;
use crate::parsing::handlers::ResumeRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub skills: Vec<String>,
    pub results: Vec<MatchResult>,
}

/// POST /api/match
///
/// Extracts skills from the resume text and scores them against every posting.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let text = request.require_text()?;

    let skills = state.parser.extract_skills(text);
    let results = state.matcher.match_jobs(&skills);

    info!("skills={:?}, results={}", skills, results.len());

    Ok(Json(MatchResponse { skills, results }))
}

/// GET /api/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<JobPosting>> {
    Json(state.jobs.jobs().to_vec())
}
