//! Prompt listing endpoints
//!
//! GET /api/prompts/choice, GET /api/prompts/text

use axum::{routing::get, Json, Router};
use duet_common::prompts::{choice_prompts, text_prompts};
use duet_common::{ChoicePrompt, TextPrompt};

use crate::AppState;

/// GET /api/prompts/choice
pub async fn list_choice_prompts() -> Json<&'static [ChoicePrompt]> {
    Json(choice_prompts())
}

/// GET /api/prompts/text
pub async fn list_text_prompts() -> Json<&'static [TextPrompt]> {
    Json(text_prompts())
}

pub fn prompt_routes() -> Router<AppState> {
    Router::new()
        .route("/api/prompts/choice", get(list_choice_prompts))
        .route("/api/prompts/text", get(list_text_prompts))
}
