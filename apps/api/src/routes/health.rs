use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /healthz
/// Returns a simple status object with service name and version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": state.config.app_name,
    }))
}
