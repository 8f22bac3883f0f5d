//! `/livros` routes.

use super::message;
use crate::{
    api::{
        AppState,
        extract::{JsonBody, PathParam},
    },
    core::book::{self, BookChanges, NewBook},
    entities::BookModel,
    errors::Result,
};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;

/// All books.
#[utoipa::path(
    get,
    path = "/livros",
    tag = "livros",
    responses((status = 200, body = [crate::api::docs::Livro]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<BookModel>>> {
    Ok(Json(book::list_books(&*state.db).await?))
}

/// Books with stock.
#[utoipa::path(
    get,
    path = "/livros/disponiveis",
    tag = "livros",
    responses((status = 200, description = "Livros com estoque", body = [crate::api::docs::Livro]))
)]
pub async fn list_available(State(state): State<AppState>) -> Result<Json<Vec<BookModel>>> {
    Ok(Json(book::list_available_books(&*state.db).await?))
}

/// One book by id.
#[utoipa::path(
    get,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i64, Path, description = "Livro")),
    responses(
        (status = 200, body = crate::api::docs::Livro),
        (status = 404, description = "Livro não encontrado"),
    )
)]
pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<BookModel>> {
    Ok(Json(book::get_book(&*state.db, id).await?))
}

/// Adds a book. Responds 201 with the stored book.
#[utoipa::path(
    post,
    path = "/livros",
    tag = "livros",
    request_body = NewBook,
    responses(
        (status = 201, body = crate::api::docs::Livro),
        (status = 400, description = "Campos obrigatórios ausentes ou valores negativos"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(new_book): JsonBody<NewBook>,
) -> Result<(StatusCode, Json<BookModel>)> {
    let created = book::create_book(&*state.db, new_book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Merges fields into a book.
#[utoipa::path(
    put,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i64, Path, description = "Livro")),
    request_body = BookChanges,
    responses(
        (status = 200, body = crate::api::docs::Livro),
        (status = 400, description = "Valores inválidos"),
        (status = 404, description = "Livro não encontrado"),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(changes): JsonBody<BookChanges>,
) -> Result<Json<BookModel>> {
    Ok(Json(book::update_book(&*state.db, id, changes).await?))
}

/// Deletes a book.
#[utoipa::path(
    delete,
    path = "/livros/{id}",
    tag = "livros",
    params(("id" = i64, Path, description = "Livro")),
    responses(
        (status = 200, description = "Livro removido"),
        (status = 404, description = "Livro não encontrado"),
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>> {
    book::delete_book(&*state.db, id).await?;
    Ok(Json(message("Livro removido")))
}
