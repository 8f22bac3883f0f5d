//! OpenAPI document for the HTTP routes, served at `/api-docs`.

use super::routes::{
    self, StatusUpdate,
    auth::{LoginRequest, RegisterRequest},
    favorites::FavoriteRequest,
};
use crate::{
    core::{
        book::{BookChanges, NewBook},
        lease::NewLease,
        purchase::NewPurchase,
        statistics::UsersByRole,
        user::UserChanges,
    },
    entities::{LeaseStatus, PurchaseStatus},
};
use axum::Json;
use utoipa::OpenApi;

/// Published name of [`crate::entities::UserModel`].
pub type Usuario = crate::entities::UserModel;
/// Published name of [`crate::entities::BookModel`].
pub type Livro = crate::entities::BookModel;
/// Published name of [`crate::entities::FavoriteModel`].
pub type Favorito = crate::entities::FavoriteModel;
/// Published name of [`crate::entities::LeaseModel`].
pub type Arrendamento = crate::entities::LeaseModel;
/// Published name of [`crate::entities::PurchaseModel`].
pub type Compra = crate::entities::PurchaseModel;
/// Published name of [`crate::core::statistics::Statistics`].
pub type Estatisticas = crate::core::statistics::Statistics;

/// Route and schema listing for the whole API.
#[derive(OpenApi)]
#[openapi(
    info(title = "API Biblioteca", version = "3.0.0"),
    paths(
        routes::auth::register,
        routes::auth::login,
        routes::books::list,
        routes::books::list_available,
        routes::books::show,
        routes::books::create,
        routes::books::update,
        routes::books::remove,
        routes::favorites::add,
        routes::favorites::remove,
        routes::favorites::list,
        routes::leases::create,
        routes::leases::list,
        routes::leases::mine,
        routes::leases::update_status,
        routes::purchases::create,
        routes::purchases::list,
        routes::purchases::mine,
        routes::purchases::update_status,
        routes::users::list,
        routes::users::update,
        routes::users::remove,
        routes::statistics::show,
    ),
    components(schemas(
        Usuario,
        Livro,
        Favorito,
        Arrendamento,
        Compra,
        Estatisticas,
        UsersByRole,
        LeaseStatus,
        PurchaseStatus,
        RegisterRequest,
        LoginRequest,
        NewBook,
        BookChanges,
        FavoriteRequest,
        NewLease,
        NewPurchase,
        StatusUpdate,
        UserChanges,
    )),
    tags(
        (name = "auth", description = "Registro e login"),
        (name = "livros", description = "Catálogo"),
        (name = "favoritos", description = "Favoritos por usuário"),
        (name = "arrendamentos", description = "Fluxo de arrendamentos"),
        (name = "compras", description = "Fluxo de compras"),
        (name = "usuarios", description = "Gestão de contas"),
        (name = "estatisticas", description = "Contadores da loja"),
    )
)]
pub struct ApiDoc;

/// `GET /api-docs` - the OpenAPI document as JSON.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/registro",
            "/login",
            "/livros",
            "/livros/{id}",
            "/favoritos/{user_id}",
            "/arrendamentos/{id}/status",
            "/compras/me",
            "/usuarios/{id}",
            "/estatisticas",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }

        let schemas = doc.components.map(|c| c.schemas).unwrap_or_default();
        for name in ["Livro", "Usuario", "Arrendamento", "Compra", "Estatisticas"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
