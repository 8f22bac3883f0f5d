//! `/usuarios` routes.

use super::message;
use crate::{
    api::{
        AppState,
        extract::{JsonBody, PathParam},
    },
    core::user::{self, UserChanges},
    entities::UserModel,
    errors::Result,
};
use axum::{Json, extract::State};
use serde_json::Value;

/// All users, without credentials.
#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "usuarios",
    responses((status = 200, body = [crate::api::docs::Usuario]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserModel>>> {
    Ok(Json(user::list_users(&*state.db).await?))
}

/// Merges fields into an account.
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    tag = "usuarios",
    params(("id" = i64, Path, description = "Usuário")),
    request_body = UserChanges,
    responses(
        (status = 200, body = crate::api::docs::Usuario),
        (status = 400, description = "Campos em branco ou email já cadastrado"),
        (status = 403, description = "Admin principal não pode deixar de ser admin"),
        (status = 404, description = "Usuário não encontrado"),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(changes): JsonBody<UserChanges>,
) -> Result<Json<UserModel>> {
    Ok(Json(user::update_user(&*state.db, id, changes).await?))
}

/// Deletes an account. The primary admin is refused with 403.
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    tag = "usuarios",
    params(("id" = i64, Path, description = "Usuário")),
    responses(
        (status = 200, description = "Usuário deletado com sucesso"),
        (status = 403, description = "Admin principal não pode ser deletado"),
        (status = 404, description = "Usuário não encontrado"),
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>> {
    user::delete_user(&*state.db, id).await?;
    Ok(Json(message("Usuário deletado com sucesso")))
}
