use std::sync::Arc;

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::AppState;

pub mod api_models;
pub mod extractors;
pub mod middlewares;
pub mod review_handlers;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "reviews", description = "Reviews and review comments on rule failures")
    )
)]
pub struct ApiDoc;

pub fn setup_routes() -> Router<Arc<AppState>> {
    let review_router = OpenApiRouter::new()
        .routes(routes!(review_handlers::index, review_handlers::create))
        .routes(routes!(review_handlers::list))
        .routes(routes!(review_handlers::form))
        .routes(routes!(review_handlers::form_comment))
        .routes(routes!(review_handlers::create_comment));

    let (api_router, api_openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/reviews", review_router)
        .split_for_parts();

    Router::new()
        .merge(Scalar::with_url("/docs", api_openapi))
        .merge(api_router)
}
