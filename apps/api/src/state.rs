use std::sync::Arc;

use crate::config::Config;
use crate::matching::jobs::JobBoard;
use crate::matching::matcher::JobMatcher;
use crate::parsing::resume::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub parser: Arc<ResumeParser>,
    pub jobs: Arc<JobBoard>,
    /// Pluggable matcher. Default: SkillOverlapMatcher over `jobs`.
    pub matcher: Arc<dyn JobMatcher>,
}
