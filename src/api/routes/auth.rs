//! `POST /registro` and `POST /login`.

use crate::api::{AppState, extract::JsonBody};
use crate::{
    core::user::{self, NewUser},
    entities::Role,
    errors::Result,
};
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Registration form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    nome: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    senha: String,
    /// Number or numeric string; anything else registers a student
    #[serde(default, deserialize_with = "Role::deserialize_loose")]
    #[schema(value_type = Option<i32>)]
    tipo: Option<Role>,
}

/// Login form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    senha: String,
}

/// Creates an account. Responds 201 with the new user.
#[utoipa::path(
    post,
    path = "/registro",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Usuário criado com sucesso"),
        (status = 400, description = "Campos ausentes ou email já cadastrado"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let created = user::register(
        &*state.db,
        NewUser {
            name: request.nome,
            email: request.email,
            password: request.senha,
            role: request.tipo.unwrap_or_default(),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "mensagem": "Usuário criado com sucesso", "usuario": created })),
    ))
}

/// Authenticates a user.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login realizado com sucesso"),
        (status = 401, description = "Credenciais inválidas"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<Value>> {
    let found = user::login(&*state.db, &request.email, &request.senha).await?;
    Ok(Json(
        json!({ "mensagem": "Login realizado com sucesso", "usuario": found }),
    ))
}
