//! Truth-or-dare endpoint
//!
//! GET /api/truth-or-dare?kind=truth|dare

use axum::{extract::Query, routing::get, Json, Router};
use duet_common::picker::{pick, PromptKind};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TruthOrDareQuery {
    /// `truth` or `dare`; random when omitted
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TruthOrDareResponse {
    pub kind: PromptKind,
    pub prompt: &'static str,
}

/// GET /api/truth-or-dare
pub async fn truth_or_dare(
    Query(query): Query<TruthOrDareQuery>,
) -> ApiResult<Json<TruthOrDareResponse>> {
    let mut rng = rand::thread_rng();
    let kind = match query.kind.as_deref() {
        Some(raw) => PromptKind::from_str(raw).ok_or_else(|| {
            ApiError::BadRequest(format!("Unknown kind '{}', expected truth or dare", raw))
        })?,
        None => PromptKind::random(&mut rng),
    };

    let prompt = pick(kind, &mut rng)?;

    Ok(Json(TruthOrDareResponse { kind, prompt }))
}

pub fn truth_or_dare_routes() -> Router<AppState> {
    Router::new().route("/api/truth-or-dare", get(truth_or_dare))
}
