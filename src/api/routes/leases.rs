//! `/arrendamentos` routes.

use super::{OwnerQuery, StatusFilter, StatusUpdate, parse_filter};
use crate::{
    api::{
        AppState,
        extract::{JsonBody, PathParam, QueryParams},
    },
    core::lease::{self, NewLease},
    entities::{LeaseModel, LeaseStatus},
    errors::Result,
};
use axum::{Json, extract::State, http::StatusCode};

/// Requests a lease. Responds 201 with the pending lease.
#[utoipa::path(
    post,
    path = "/arrendamentos",
    tag = "arrendamentos",
    request_body = NewLease,
    responses(
        (status = 201, body = crate::api::docs::Arrendamento),
        (status = 400, description = "Livro sem estoque ou campos inválidos"),
        (status = 404, description = "Livro não encontrado"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<NewLease>,
) -> Result<(StatusCode, Json<LeaseModel>)> {
    let created = lease::create_lease(&*state.db, request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Leases, optionally filtered by `?status=`.
#[utoipa::path(
    get,
    path = "/arrendamentos",
    tag = "arrendamentos",
    params(("status" = Option<String>, Query, description = "Filtra por status")),
    responses(
        (status = 200, body = [crate::api::docs::Arrendamento]),
        (status = 400, description = "Status inválido"),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<StatusFilter>,
) -> Result<Json<Vec<LeaseModel>>> {
    let status = parse_filter::<LeaseStatus>(filter)?;
    Ok(Json(lease::list_leases(&*state.db, status).await?))
}

/// Leases of the user in `?usuarioId=`.
#[utoipa::path(
    get,
    path = "/arrendamentos/me",
    tag = "arrendamentos",
    params(("usuarioId" = i64, Query, description = "Usuário")),
    responses(
        (status = 200, body = [crate::api::docs::Arrendamento]),
        (status = 400, description = "usuarioId é obrigatório"),
    )
)]
pub async fn mine(
    State(state): State<AppState>,
    QueryParams(owner): QueryParams<OwnerQuery>,
) -> Result<Json<Vec<LeaseModel>>> {
    let user_id = owner.required()?;
    Ok(Json(lease::list_leases_for_user(&*state.db, user_id).await?))
}

/// Moves a lease to a new status.
#[utoipa::path(
    put,
    path = "/arrendamentos/{id}/status",
    tag = "arrendamentos",
    params(("id" = i64, Path,)),
    request_body = StatusUpdate,
    responses(
        (status = 200, body = crate::api::docs::Arrendamento),
        (status = 400, description = "Status inválido"),
        (status = 404, description = "Registro não encontrado"),
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<LeaseModel>> {
    let updated =
        lease::update_lease_status(&*state.db, id, &update.status, state.status_policy()).await?;
    Ok(Json(updated))
}
