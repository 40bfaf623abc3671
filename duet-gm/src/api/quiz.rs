//! Compatibility quiz endpoints
//!
//! POST /api/quiz, GET /api/quiz/:id, POST /api/quiz/:id/answers,
//! POST /api/quiz/:id/reset, DELETE /api/quiz/:id
//!
//! Respondent A answers every prompt first, then respondent B. Answers are
//! checked here before they reach the collector: option indices must be in
//! range for the current prompt and free-text answers must fit the configured
//! length cap.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use duet_common::scoring::{AgreementTier, ChoiceAgreement, Scorer, TextAgreement};
use duet_common::{ChoicePrompt, ChoiceScorer, Phase, QuizRun, TextPrompt, TextScorer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::sessions::Game;
use crate::AppState;

/// Quiz flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizVariant {
    /// Multiple-choice compatibility quiz
    Choice,
    /// Free-text "how well do you know me" quiz
    Text,
}

/// POST /api/quiz request
#[derive(Debug, Deserialize)]
pub struct StartQuizRequest {
    pub variant: QuizVariant,
}

/// POST /api/quiz/:id/answers request: `{"choice": 2}` or `{"text": "Paris"}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerRequest {
    Choice(usize),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Respondent {
    A,
    B,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CurrentPrompt {
    Choice(ChoicePrompt),
    Text(TextPrompt),
}

/// Multiple-choice result with display helpers
#[derive(Debug, Serialize)]
pub struct ChoiceResult {
    #[serde(flatten)]
    pub agreement: ChoiceAgreement,
    pub display_score: u32,
    pub tier: AgreementTier,
    pub tier_label: &'static str,
}

impl From<&ChoiceAgreement> for ChoiceResult {
    fn from(agreement: &ChoiceAgreement) -> Self {
        let tier = agreement.tier();
        Self {
            agreement: agreement.clone(),
            display_score: agreement.display_score(),
            tier,
            tier_label: tier.display_name(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuizResult {
    Choice(ChoiceResult),
    Text(TextAgreement),
}

/// Quiz session state, returned by every quiz endpoint
#[derive(Debug, Serialize)]
pub struct QuizStateResponse {
    pub session_id: Uuid,
    pub variant: QuizVariant,
    /// `collecting_a`, `collecting_b` or `complete`
    pub phase: &'static str,
    /// Respondent expected to answer next
    pub respondent: Option<Respondent>,
    pub prompt_index: Option<usize>,
    pub prompt_count: usize,
    pub answered_a: usize,
    pub answered_b: usize,
    /// Prompt awaiting an answer
    pub prompt: Option<CurrentPrompt>,
    /// Present once both respondents have finished
    pub result: Option<QuizResult>,
}

fn phase_label(phase: Phase) -> (&'static str, Option<Respondent>) {
    match phase {
        Phase::CollectingA(_) => ("collecting_a", Some(Respondent::A)),
        Phase::CollectingB(_) => ("collecting_b", Some(Respondent::B)),
        Phase::Complete => ("complete", None),
    }
}

fn describe<S: Scorer>(
    session_id: Uuid,
    variant: QuizVariant,
    run: &QuizRun<S>,
    prompt: impl FnOnce(usize) -> CurrentPrompt,
    result: impl FnOnce(&S::Output) -> QuizResult,
) -> QuizStateResponse {
    let phase = run.phase();
    let (label, respondent) = phase_label(phase);
    QuizStateResponse {
        session_id,
        variant,
        phase: label,
        respondent,
        prompt_index: phase.prompt_index(),
        prompt_count: run.collector().prompt_count(),
        answered_a: run.collector().responses_a().len(),
        answered_b: run.collector().responses_b().len(),
        prompt: phase.prompt_index().map(prompt),
        result: run.result().map(result),
    }
}

fn quiz_state(session_id: Uuid, game: &Game) -> ApiResult<QuizStateResponse> {
    match game {
        Game::ChoiceQuiz(run) => Ok(describe(
            session_id,
            QuizVariant::Choice,
            run,
            |i| CurrentPrompt::Choice(run.scorer().prompts()[i].clone()),
            |r| QuizResult::Choice(ChoiceResult::from(r)),
        )),
        Game::TextQuiz(run) => Ok(describe(
            session_id,
            QuizVariant::Text,
            run,
            |i| CurrentPrompt::Text(run.scorer().prompts()[i].clone()),
            |r| QuizResult::Text(r.clone()),
        )),
        Game::Memory(_) => Err(not_a_quiz(session_id)),
    }
}

fn not_a_quiz(session_id: Uuid) -> ApiError {
    ApiError::BadRequest(format!("Session {} is not a quiz", session_id))
}

/// POST /api/quiz
///
/// Start a quiz run over the built-in prompts.
pub async fn start_quiz(
    State(state): State<AppState>,
    Json(request): Json<StartQuizRequest>,
) -> ApiResult<(StatusCode, Json<QuizStateResponse>)> {
    let game = match request.variant {
        QuizVariant::Choice => Game::ChoiceQuiz(QuizRun::new(ChoiceScorer::standard())?),
        QuizVariant::Text => Game::TextQuiz(QuizRun::new(TextScorer::standard())?),
    };
    let session_id = state.sessions.insert(game).await?;

    let response = state
        .sessions
        .with_session(session_id, |session| quiz_state(session_id, &session.game))
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/quiz/:id
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<QuizStateResponse>> {
    let response = state
        .sessions
        .with_session(session_id, |session| quiz_state(session_id, &session.game))
        .await?;
    Ok(Json(response))
}

/// POST /api/quiz/:id/answers
///
/// Submit the current respondent's answer. 400 for an out-of-range option,
/// an over-long text answer or the wrong answer kind; 409 once the quiz is
/// complete.
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(answer): Json<AnswerRequest>,
) -> ApiResult<Json<QuizStateResponse>> {
    let max_len = state.games.text_answer_max_len;

    let response = state
        .sessions
        .with_session(session_id, |session| {
            let phase = match (&mut session.game, answer) {
                (Game::ChoiceQuiz(run), AnswerRequest::Choice(option)) => {
                    if let Some(i) = run.phase().prompt_index() {
                        let available = run.scorer().prompts()[i].options.len();
                        if option >= available {
                            return Err(ApiError::BadRequest(format!(
                                "Option {} out of range for prompt {} (0..{})",
                                option, i, available
                            )));
                        }
                    }
                    run.submit(option)?
                }
                (Game::TextQuiz(run), AnswerRequest::Text(text)) => {
                    let text = text.trim().to_string();
                    // A completed run rejects every answer, whatever its length
                    if run.phase().prompt_index().is_some() {
                        let length = text.chars().count();
                        if length > max_len {
                            return Err(ApiError::BadRequest(format!(
                                "Answer is {} characters, limit is {}",
                                length, max_len
                            )));
                        }
                    }
                    run.submit(text)?
                }
                (Game::ChoiceQuiz(_), AnswerRequest::Text(_)) => {
                    return Err(ApiError::BadRequest(
                        "Multiple-choice quiz expects a choice answer".to_string(),
                    ));
                }
                (Game::TextQuiz(_), AnswerRequest::Choice(_)) => {
                    return Err(ApiError::BadRequest(
                        "Free-text quiz expects a text answer".to_string(),
                    ));
                }
                (Game::Memory(_), _) => return Err(not_a_quiz(session_id)),
            };

            tracing::debug!(session_id = %session_id, phase = ?phase, "Answer recorded");
            let response = quiz_state(session_id, &session.game)?;
            if phase == Phase::Complete {
                tracing::info!(session_id = %session_id, variant = ?response.variant, "Quiz complete");
            }
            Ok(response)
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/quiz/:id/reset
///
/// Clear both response sets and start again with respondent A.
pub async fn reset_quiz(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<QuizStateResponse>> {
    let response = state
        .sessions
        .with_session(session_id, |session| {
            match &mut session.game {
                Game::ChoiceQuiz(run) => run.reset(),
                Game::TextQuiz(run) => run.reset(),
                Game::Memory(_) => return Err(not_a_quiz(session_id)),
            }
            tracing::info!(session_id = %session_id, "Quiz reset");
            quiz_state(session_id, &session.game)
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /api/quiz/:id
pub async fn delete_quiz(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .sessions
        .with_session(session_id, |session| match session.game {
            Game::ChoiceQuiz(_) | Game::TextQuiz(_) => Ok(()),
            Game::Memory(_) => Err(not_a_quiz(session_id)),
        })
        .await?;
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/api/quiz", post(start_quiz))
        .route("/api/quiz/:id", get(get_quiz).delete(delete_quiz))
        .route("/api/quiz/:id/answers", post(submit_answer))
        .route("/api/quiz/:id/reset", post(reset_quiz))
}
