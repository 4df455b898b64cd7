//! Route handlers

use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::domain::model::{PredictionRequest, PredictionResponse, Region};
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

/// Shared body of every `/predict/{region}` route.
pub fn predict(
    state: &AppState,
    region: Region,
    request: PredictionRequest,
) -> Result<Json<PredictionResponse>, ApiError> {
    let response = state.service.predict(region, &request)?;
    tracing::debug!(%region, prediction = ?response.prediction, "Prediction served");
    Ok(Json(response))
}

/// Liveness probe listing the regions being served.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let regions: Vec<&str> = state.service.regions().map(|r| r.key()).collect();
    Json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
        "regions": regions,
        "started_at": state.started_at.to_rfc3339(),
    }))
}
