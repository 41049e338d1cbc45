use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod partners;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "OK"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, partner resource, docs
pub fn build_router(cors: CorsLayer, state: partners::ServerState) -> Router {
    let api = Router::new()
        .route("/partners", get(partners::list).post(partners::create))
        .route(
            "/partners/:id",
            get(partners::get).put(partners::update).delete(partners::delete),
        )
        .route("/partners/permalink/:permalink", get(partners::get_by_permalink))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
