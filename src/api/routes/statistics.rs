//! `GET /estatisticas`.

use crate::api::AppState;
use crate::{
    core::statistics::{self, Statistics},
    errors::Result,
};
use axum::{Json, extract::State};

/// Current counters.
#[utoipa::path(
    get,
    path = "/estatisticas",
    tag = "estatisticas",
    responses((status = 200, body = crate::api::docs::Estatisticas))
)]
pub async fn show(State(state): State<AppState>) -> Result<Json<Statistics>> {
    Ok(Json(statistics::get_statistics(&*state.db).await?))
}
