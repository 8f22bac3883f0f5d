//! `/favoritos` routes.

use super::message;
use crate::api::{
    AppState,
    extract::{JsonBody, PathParam},
};
use crate::{core::favorite, entities::FavoriteModel, errors::Result};
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;
use serde_json::{Value, json};

/// Body of both `POST` and `DELETE /favoritos`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FavoriteRequest {
    #[serde(rename = "livroId")]
    book_id: i64,
    #[serde(rename = "usuarioId")]
    user_id: i64,
}

/// Bookmarks a book for a user.
#[utoipa::path(
    post,
    path = "/favoritos",
    tag = "favoritos",
    request_body = FavoriteRequest,
    responses(
        (status = 201, description = "Livro adicionado aos favoritos"),
        (status = 400, description = "Livro já está nos favoritos"),
    )
)]
pub async fn add(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<FavoriteRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let created = favorite::add_favorite(&*state.db, request.book_id, request.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensagem": "Livro adicionado aos favoritos", "favorito": created })),
    ))
}

/// Drops a bookmark.
#[utoipa::path(
    delete,
    path = "/favoritos",
    tag = "favoritos",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Livro removido dos favoritos"),
        (status = 404, description = "Favorito não encontrado"),
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<FavoriteRequest>,
) -> Result<Json<Value>> {
    favorite::remove_favorite(&*state.db, request.book_id, request.user_id).await?;
    Ok(Json(message("Livro removido dos favoritos")))
}

/// A user's bookmarks.
#[utoipa::path(
    get,
    path = "/favoritos/{user_id}",
    tag = "favoritos",
    params(("user_id" = i64, Path, description = "Usuário")),
    responses((status = 200, body = [crate::api::docs::Favorito]))
)]
pub async fn list(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i64>,
) -> Result<Json<Vec<FavoriteModel>>> {
    Ok(Json(favorite::list_favorites(&*state.db, user_id).await?))
}
