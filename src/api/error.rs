//! Rendering of [`Error`] as HTTP responses.
//!
//! Every failure becomes `{"mensagem": "..."}` with a Portuguese message that
//! clients match on verbatim. Store and configuration failures are logged and
//! collapsed into a generic 500.

use crate::errors::{Entity, Error};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

impl Error {
    /// HTTP status for this failure.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::ForbiddenOperation { .. } => StatusCode::FORBIDDEN,
            Self::DuplicateEmail { .. }
            | Self::DuplicateFavorite { .. }
            | Self::MissingFields { .. }
            | Self::OutOfStock { .. }
            | Self::InsufficientStock { .. }
            | Self::InvalidQuantity { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidStatus { .. }
            | Self::InvalidTransition { .. }
            | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing message for this failure.
    #[must_use]
    pub fn client_message(&self) -> String {
        let message = match self {
            Self::NotFound { entity, .. } => match entity {
                Entity::User => "Usuário não encontrado",
                Entity::Book => "Livro não encontrado",
                Entity::Favorite => "Favorito não encontrado",
                Entity::Lease => "Arrendamento não encontrado",
                Entity::Purchase => "Compra não encontrada",
            },
            Self::DuplicateEmail { .. } => "Email já cadastrado",
            Self::DuplicateFavorite { .. } => "Já está nos favoritos",
            Self::MissingFields { message } | Self::ForbiddenOperation { message } => {
                return message.clone();
            }
            Self::MalformedRequest(detail) => return detail.clone(),
            Self::OutOfStock { .. } => "Livro sem estoque",
            Self::InsufficientStock { .. } => "Estoque insuficiente",
            Self::InvalidQuantity { .. } => "Quantidade inválida",
            Self::InvalidAmount { field: "pages", .. } => "Número de páginas inválido",
            Self::InvalidAmount { .. } => "Estoque e preço não podem ser negativos",
            Self::InvalidStatus { .. } => "Status inválido",
            Self::InvalidTransition { .. } => "Transição de status inválida",
            Self::InvalidCredentials => "Email ou senha incorretos",
            Self::Config { .. } | Self::Database(_) | Self::Io(_) => "Erro interno do servidor",
        };
        message.to_string()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        (status, Json(json!({ "mensagem": self.client_message() }))).into_response()
    }
}
