pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::errors::AppError;
use crate::matching::handlers as matching;
use crate::parsing::handlers as parsing;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

/// CORS applies to `/api/*` only.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        // Resume API
        .route("/parse", post(parsing::handle_parse))
        .route("/skills", post(parsing::handle_skills))
        .route("/catalog", get(parsing::handle_catalog))
        // Matching API
        .route("/match", post(matching::handle_match))
        .route("/jobs", get(matching::handle_list_jobs))
        .layer(cors);

    Router::new()
        .route("/healthz", get(health::health_handler))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AppEnv, Config, CorsOrigins};
    use crate::matching::jobs::JobBoard;
    use crate::matching::matcher::SkillOverlapMatcher;
    use crate::parsing::catalog::SkillCatalog;
    use crate::parsing::contact::{ContactExtractor, LenientPhoneNormalizer};
    use crate::parsing::entities::NoEntityModel;
    use crate::parsing::resume::ResumeParser;

    fn test_state() -> AppState {
        let jobs = Arc::new(JobBoard::default());
        AppState {
            config: Config {
                app_name: "HireSense AI".to_string(),
                env: AppEnv::Dev,
                port: 0,
                rust_log: "info".to_string(),
                cors_origins: CorsOrigins::Any,
                job_catalog_path: None,
            },
            parser: Arc::new(ResumeParser::new(
                Arc::new(SkillCatalog::default()),
                Arc::new(NoEntityModel),
                ContactExtractor::new(Box::new(LenientPhoneNormalizer)),
            )),
            matcher: Arc::new(SkillOverlapMatcher::new(jobs.clone())),
            jobs,
        }
    }

    fn router() -> Router {
        build_router(test_state(), CorsLayer::permissive())
    }

    async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_healthz() {
        let (status, body) = send(Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "HireSense AI");
    }

    #[tokio::test]
    async fn test_match_returns_skills_and_ranked_results() {
        let (status, body) = send(
            Method::POST,
            "/api/match",
            Some(json!({ "resume": "Backend dev: Python, Flask, SQL" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["flask", "python", "sql"]));
        assert_eq!(body["results"][0]["title"], "Software Engineer (Flask)");
        assert_eq!(body["results"][0]["score"], 100);
    }

    #[tokio::test]
    async fn test_match_rejects_blank_resume() {
        let (status, body) =
            send(Method::POST, "/api/match", Some(json!({ "resume": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "resume text required");

        let (status, _) = send(Method::POST, "/api/match", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_returns_structured_record() {
        let (status, body) = send(
            Method::POST,
            "/api/parse",
            Some(json!({
                "resume": "Name: Jane A. Doe\nEmail: jane@x.com\nPhone: +91 98765 43210\nB.Tech 2020\nSkills: React, JS, HTML, CSS"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jane A. Doe");
        assert_eq!(body["emails"], json!(["jane@x.com"]));
        assert_eq!(body["phones"], json!(["+91 98765 43210"]));
        assert_eq!(body["education_snippets"], json!(["B.Tech 2020"]));
        assert_eq!(body["skills"], json!(["css", "html", "javascript", "react"]));
        assert_eq!(body["matches"][0]["title"], "Frontend Developer");
        assert_eq!(body["matches"][0]["score"], 100);
    }

    #[tokio::test]
    async fn test_skills_endpoint() {
        let (status, body) = send(
            Method::POST,
            "/api/skills",
            Some(json!({ "resume": "sklearn, tf and py" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["python", "scikit-learn", "tensorflow"]));
    }

    #[tokio::test]
    async fn test_catalog_listing() {
        let (status, body) = send(Method::GET, "/api/catalog", None).await;
        assert_eq!(status, StatusCode::OK);
        let skills = body["skills"].as_array().unwrap();
        assert!(skills.contains(&json!("python")));
        assert!(skills.contains(&json!("scikit-learn")));
        assert_eq!(body["aliases"]["reactjs"], "react");
        assert_eq!(body["aliases"]["sklearn"], "scikit-learn");
    }

    #[tokio::test]
    async fn test_jobs_listing() {
        let (status, body) = send(Method::GET, "/api/jobs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(6));
        assert_eq!(body[5]["type"], "International");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (status, body) = send(Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, body) = send(Method::GET, "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_cors_headers_only_on_api_routes() {
        let cross_origin = |uri: &str| {
            Request::builder()
                .uri(uri)
                .header(header::ORIGIN, "https://frontend.example")
                .body(Body::empty())
                .unwrap()
        };

        let api = router().oneshot(cross_origin("/api/jobs")).await.unwrap();
        assert_eq!(api.status(), StatusCode::OK);
        assert!(api
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let health = router().oneshot(cross_origin("/healthz")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
        assert!(!health
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
