//! Background audio playlist

use axum::{extract::State, Json};
use folio_common::ui_state::PlayerState;

use crate::AppState;

/// GET /tracks
///
/// Initial player state: the configured playlist, first track selected, paused.
pub async fn get_tracks(State(state): State<AppState>) -> Json<PlayerState> {
    Json(PlayerState::new(state.tracks.as_ref().clone()))
}
