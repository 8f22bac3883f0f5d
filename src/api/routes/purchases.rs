//! `/compras` routes.

use super::{OwnerQuery, StatusFilter, StatusUpdate, parse_filter};
use crate::{
    api::{
        AppState,
        extract::{JsonBody, PathParam, QueryParams},
    },
    core::purchase::{self, NewPurchase},
    entities::{PurchaseModel, PurchaseStatus},
    errors::Result,
};
use axum::{Json, extract::State, http::StatusCode};

/// Places a purchase. Responds 201 with the priced, pending purchase.
#[utoipa::path(
    post,
    path = "/compras",
    tag = "compras",
    request_body = NewPurchase,
    responses(
        (status = 201, body = crate::api::docs::Compra),
        (status = 400, description = "Livro sem estoque ou campos inválidos"),
        (status = 404, description = "Livro não encontrado"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewPurchase>,
) -> Result<(StatusCode, Json<PurchaseModel>)> {
    let created = purchase::create_purchase(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Purchases, optionally filtered by `?status=`.
#[utoipa::path(
    get,
    path = "/compras",
    tag = "compras",
    params(("status" = Option<String>, Query, description = "Filtra por status")),
    responses(
        (status = 200, body = [crate::api::docs::Compra]),
        (status = 400, description = "Status inválido"),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<StatusFilter>,
) -> Result<Json<Vec<PurchaseModel>>> {
    let status = parse_filter::<PurchaseStatus>(filter)?;
    Ok(Json(purchase::list_purchases(&*state.db, status).await?))
}

/// Purchases of the user in `?usuarioId=`.
#[utoipa::path(
    get,
    path = "/compras/me",
    tag = "compras",
    params(("usuarioId" = i64, Query, description = "Usuário")),
    responses(
        (status = 200, body = [crate::api::docs::Compra]),
        (status = 400, description = "usuarioId é obrigatório"),
    )
)]
pub async fn mine(
    State(state): State<AppState>,
    QueryParams(owner): QueryParams<OwnerQuery>,
) -> Result<Json<Vec<PurchaseModel>>> {
    let user_id = owner.required()?;
    Ok(Json(
        purchase::list_purchases_for_user(&*state.db, user_id).await?,
    ))
}

/// Moves a purchase to a new status.
#[utoipa::path(
    put,
    path = "/compras/{id}/status",
    tag = "compras",
    params(("id" = i64, Path,)),
    request_body = StatusUpdate,
    responses(
        (status = 200, body = crate::api::docs::Compra),
        (status = 400, description = "Status inválido"),
        (status = 404, description = "Registro não encontrado"),
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<PurchaseModel>> {
    let updated =
        purchase::update_purchase_status(&*state.db, id, &update.status, state.status_policy())
            .await?;
    Ok(Json(updated))
}
