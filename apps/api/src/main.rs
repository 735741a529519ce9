mod config;
mod errors;
mod matching;
mod parsing;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, CorsOrigins};
use crate::matching::jobs::JobBoard;
use crate::matching::matcher::{JobMatcher, SkillOverlapMatcher};
use crate::parsing::catalog::SkillCatalog;
use crate::parsing::contact::ContactExtractor;
use crate::parsing::entities::EntitySource;
use crate::parsing::resume::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting {} v{} ({:?})",
        config.app_name,
        env!("CARGO_PKG_VERSION"),
        config.env
    );

    // Skill vocabulary
    let catalog = Arc::new(SkillCatalog::default());
    info!(
        "Skill catalog loaded: {} skills, {} aliases",
        catalog.len(),
        catalog.aliases().len()
    );

    // Resume parser (entity model is optional; the name cascade works without it)
    let entities = load_entity_source().await;
    let parser = Arc::new(ResumeParser::new(
        catalog,
        entities,
        ContactExtractor::default(),
    ));
    let (entity_backend, phone_backend) = parser.backends();
    info!("Resume parser ready (entities: {entity_backend}, phones: {phone_backend})");

    // Job catalog (JOB_CATALOG_PATH overrides the built-in postings)
    let jobs = match &config.job_catalog_path {
        Some(path) => JobBoard::from_json_file(path)
            .with_context(|| format!("Failed to load JOB_CATALOG_PATH={}", path.display()))?,
        None => JobBoard::default(),
    };
    let jobs = Arc::new(jobs.canonicalized(parser.catalog()));
    info!("Job board loaded: {} postings", jobs.len());

    let matcher: Arc<dyn JobMatcher> = Arc::new(SkillOverlapMatcher::new(jobs.clone()));
    info!("Job matcher: {}", matcher.backend());

    // Build app state
    let state = AppState {
        config: config.clone(),
        parser,
        jobs,
        matcher,
    };

    // Build router
    let app = build_router(state, cors_layer(&config.cors_origins)?)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the NER model off the async runtime, falling back to no model.
#[cfg(feature = "ner")]
async fn load_entity_source() -> Arc<dyn EntitySource> {
    use crate::parsing::entities::{BertEntitySource, NoEntityModel};

    match tokio::task::spawn_blocking(BertEntitySource::load).await {
        Ok(Ok(source)) => Arc::new(source),
        Ok(Err(e)) => {
            warn!("NER model unavailable, name detection uses heuristics only: {e:#}");
            Arc::new(NoEntityModel)
        }
        Err(e) => {
            warn!("NER model loader panicked: {e}");
            Arc::new(NoEntityModel)
        }
    }
}

#[cfg(not(feature = "ner"))]
async fn load_entity_source() -> Arc<dyn EntitySource> {
    use crate::parsing::entities::NoEntityModel;

    Arc::new(NoEntityModel)
}

/// `*` allows any origin; otherwise only the listed origins.
fn cors_layer(origins: &CorsOrigins) -> Result<CorsLayer> {
    match origins {
        CorsOrigins::Any => Ok(CorsLayer::permissive()),
        CorsOrigins::List(list) => {
            if list.is_empty() {
                warn!("CORS_ORIGINS is empty; cross-origin requests will be rejected");
            }
            let values = list
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .with_context(|| format!("Invalid CORS origin '{origin}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(CorsLayer::new()
                .allow_origin(AllowOrigin::list(values))
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any))
        }
    }
}
