use axum::extract::State;
use axum::Json;

use crate::dto::StatsResponse;
use crate::state::AppState;

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.stats.snapshot())
}
