use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use models::partner_dto::PartnerDTO;
use service::errors::ServiceError;
use service::partner_service::{self, PartnerInput, PartnerUpdate};

use crate::errors::JsonApiError;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DtoQuery {
    /// Partner on whose behalf the projection is requested.
    pub request_partner: Option<i64>,
}

#[utoipa::path(
    get, path = "/partners", tag = "partners",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<models::partner::Model>>, JsonApiError> {
    match partner_service::get_all_partners(&state.db).await {
        Ok(list) => {
            info!(count = list.len(), "list partners");
            Ok(Json(list))
        }
        Err(e) => Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string()))),
    }
}

#[utoipa::path(
    post, path = "/partners", tag = "partners",
    request_body = crate::openapi::PartnerInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<PartnerInput>,
) -> Result<Json<models::partner::Model>, JsonApiError> {
    info!(name = ?input.name, permalink = ?input.permalink, "partner_create_request");
    match partner_service::create_partner(&state.db, input).await {
        Ok(m) => {
            info!(id = m.id, permalink = ?m.permalink, "created partner");
            Ok(Json(m))
        }
        Err(e) => {
            error!(err = %e, "create partner failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/partners/{id}", tag = "partners",
    params(("id" = i64, Path, description = "Partner ID"), DtoQuery),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(q): Query<DtoQuery>,
) -> Result<Json<PartnerDTO>, JsonApiError> {
    match partner_service::get_partner_dto_by_id(&state.db, id, q.request_partner).await {
        Ok(dto) => Ok(Json(dto)),
        Err(e) => match e {
            ServiceError::NotFound { .. } => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))),
            _ => {
                error!(err = %e, "get partner failed");
                Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Get Failed", Some(e.to_string())))
            }
        },
    }
}

#[utoipa::path(
    get, path = "/partners/permalink/{permalink}", tag = "partners",
    params(("permalink" = String, Path, description = "Partner permalink")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_permalink(
    State(state): State<ServerState>,
    Path(permalink): Path<String>,
) -> Result<Json<models::partner::Model>, JsonApiError> {
    match partner_service::get_partner_by_permalink(&state.db, &permalink).await {
        Ok(m) => Ok(Json(m)),
        Err(e) => match e {
            ServiceError::NotFound { .. } => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))),
            _ => {
                error!(err = %e, "get partner by permalink failed");
                Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Get Failed", Some(e.to_string())))
            }
        },
    }
}

#[utoipa::path(
    put, path = "/partners/{id}", tag = "partners",
    params(("id" = i64, Path, description = "Partner ID")),
    request_body = crate::openapi::PartnerUpdateDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<PartnerUpdate>,
) -> Result<Json<models::partner::Model>, JsonApiError> {
    match partner_service::update_partner(&state.db, id, input).await {
        Ok(m) => {
            info!(id = m.id, "updated partner");
            Ok(Json(m))
        }
        Err(e) => match e {
            ServiceError::NotFound { .. } => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))),
            _ => {
                error!(err = %e, "update partner failed");
                Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
            }
        },
    }
}

#[utoipa::path(
    delete, path = "/partners/{id}", tag = "partners",
    params(("id" = i64, Path, description = "Partner ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Partner cannot be deleted"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> (StatusCode, Json<serde_json::Value>) {
    // Historical status-payload contract: 200 with a success body on
    // delete, 400 when the partner is absent.
    match partner_service::delete_partner(&state.db, id).await {
        Ok(()) => {
            info!(id = id, "deleted partner");
            (StatusCode::OK, Json(json!({"Success": "Partner deleted"})))
        }
        Err(ServiceError::NotFound { .. }) => {
            (StatusCode::BAD_REQUEST, Json(json!({"Error": "Partner cannot be deleted"})))
        }
        Err(e) => {
            error!(err = %e, "delete partner failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"Error": e.to_string()})))
        }
    }
}
