//! Memory-match endpoints
//!
//! POST /api/memory, GET /api/memory/:id, POST /api/memory/:id/flip,
//! DELETE /api/memory/:id

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use duet_common::memory::{CardView, FlipOutcome, MemoryGame};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::sessions::Game;
use crate::AppState;

/// POST /api/memory request
#[derive(Debug, Default, Deserialize)]
pub struct NewBoardRequest {
    /// Pairs to deal; config default when omitted
    #[serde(default)]
    pub pairs: Option<usize>,
}

/// POST /api/memory/:id/flip request
#[derive(Debug, Deserialize)]
pub struct FlipRequest {
    pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub session_id: Uuid,
    pub pairs: usize,
    pub matched_pairs: usize,
    pub moves: u32,
    pub won: bool,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Serialize)]
pub struct FlipResponse {
    #[serde(flatten)]
    pub outcome: FlipOutcome,
    pub board: BoardResponse,
}

fn board(session_id: Uuid, game: &MemoryGame) -> BoardResponse {
    BoardResponse {
        session_id,
        pairs: game.pairs(),
        matched_pairs: game.matched_pairs(),
        moves: game.moves(),
        won: game.is_won(),
        cards: game.cards(),
    }
}

fn memory_game(session_id: Uuid, game: &mut Game) -> ApiResult<&mut MemoryGame> {
    match game {
        Game::Memory(memory) => Ok(memory),
        _ => Err(ApiError::BadRequest(format!(
            "Session {} is not a memory game",
            session_id
        ))),
    }
}

/// POST /api/memory
///
/// Deal a new shuffled board.
pub async fn new_board(
    State(state): State<AppState>,
    Json(request): Json<NewBoardRequest>,
) -> ApiResult<(StatusCode, Json<BoardResponse>)> {
    let pairs = request.pairs.unwrap_or(state.games.memory_pairs);
    let game = MemoryGame::new(pairs, &mut rand::thread_rng())?;
    let view = board(Uuid::nil(), &game);

    let session_id = state.sessions.insert(Game::Memory(game)).await?;
    Ok((
        StatusCode::CREATED,
        Json(BoardResponse { session_id, ..view }),
    ))
}

/// GET /api/memory/:id
pub async fn get_board(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<Json<BoardResponse>> {
    let response = state
        .sessions
        .with_session(session_id, |session| {
            let game = memory_game(session_id, &mut session.game)?;
            Ok(board(session_id, game))
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/memory/:id/flip
///
/// 400 for an index off the board, 409 for a card that cannot be flipped
/// or a game that is already won.
pub async fn flip_card(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<FlipRequest>,
) -> ApiResult<Json<FlipResponse>> {
    let response = state
        .sessions
        .with_session(session_id, |session| {
            let game = memory_game(session_id, &mut session.game)?;
            let outcome = game.flip(request.index)?;
            if let FlipOutcome::Won { moves } = outcome {
                tracing::info!(session_id = %session_id, moves, "Memory game won");
            }
            Ok(FlipResponse {
                outcome,
                board: board(session_id, game),
            })
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /api/memory/:id
pub async fn delete_board(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .sessions
        .with_session(session_id, |session| {
            memory_game(session_id, &mut session.game).map(|_| ())
        })
        .await?;
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn memory_routes() -> Router<AppState> {
    Router::new()
        .route("/api/memory", post(new_board))
        .route("/api/memory/:id", get(get_board).delete(delete_board))
        .route("/api/memory/:id/flip", post(flip_card))
}
