//! Inspection (`/api/fiscalizacoes/`) CRUD handlers.

use axum::{Extension, Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use super::IdPath;
use crate::api::doc::INSPECTION_TAG;
use crate::api::dto::{
    ErrorResponse, InspectionPatchRequest, InspectionRequest, InspectionResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// # Routes
/// - `GET|POST /api/fiscalizacoes/`
/// - `GET|PUT|PATCH|DELETE /api/fiscalizacoes/{id}/`
pub fn inspection_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_inspections, create_inspection))
        .routes(routes!(
            get_inspection,
            update_inspection,
            patch_inspection,
            delete_inspection
        ))
}

/// List inspections, newest first
#[utoipa::path(
    get,
    path = "/api/fiscalizacoes/",
    tag = INSPECTION_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "All inspections", body = [InspectionResponse]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
async fn list_inspections(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<InspectionResponse>>> {
    let inspections = state.services.inspections.list_inspections().await?;
    Ok(Json(
        inspections
            .into_iter()
            .map(InspectionResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/fiscalizacoes/",
    tag = INSPECTION_TAG,
    security(("bearerAuth" = [])),
    request_body = InspectionRequest,
    responses(
        (status = 201, description = "Inspection created", body = InspectionResponse),
        (status = 400, description = "Invalid fields or unknown references", body = ErrorResponse)
    )
)]
async fn create_inspection(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<InspectionRequest>,
) -> AppResult<(StatusCode, Json<InspectionResponse>)> {
    let inspection = state
        .services
        .inspections
        .create_inspection(payload.into_new_inspection()?)
        .await?;
    tracing::info!(
        inspection_id = inspection.inspection.id,
        caller = %caller.username,
        "Inspection created"
    );
    Ok((StatusCode::CREATED, Json(inspection.into())))
}

#[utoipa::path(
    get,
    path = "/api/fiscalizacoes/{id}/",
    tag = INSPECTION_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Inspection id")),
    responses(
        (status = 200, description = "Inspection found", body = InspectionResponse),
        (status = 404, description = "Inspection not found", body = ErrorResponse)
    )
)]
async fn get_inspection(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<InspectionResponse>> {
    let inspection = state.services.inspections.get_inspection(id).await?;
    Ok(Json(inspection.into()))
}

/// Replace an inspection; `data_fiscalizacao` never changes
#[utoipa::path(
    put,
    path = "/api/fiscalizacoes/{id}/",
    tag = INSPECTION_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Inspection id")),
    request_body = InspectionRequest,
    responses(
        (status = 200, description = "Inspection updated", body = InspectionResponse),
        (status = 400, description = "Invalid fields or unknown references", body = ErrorResponse),
        (status = 404, description = "Inspection not found", body = ErrorResponse)
    )
)]
async fn update_inspection(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<InspectionRequest>,
) -> AppResult<Json<InspectionResponse>> {
    let inspection = state
        .services
        .inspections
        .update_inspection(id, payload.into_changes()?)
        .await?;
    Ok(Json(inspection.into()))
}

#[utoipa::path(
    patch,
    path = "/api/fiscalizacoes/{id}/",
    tag = INSPECTION_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Inspection id")),
    request_body = InspectionPatchRequest,
    responses(
        (status = 200, description = "Inspection updated", body = InspectionResponse),
        (status = 400, description = "Invalid fields or unknown references", body = ErrorResponse),
        (status = 404, description = "Inspection not found", body = ErrorResponse)
    )
)]
async fn patch_inspection(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<InspectionPatchRequest>,
) -> AppResult<Json<InspectionResponse>> {
    let inspection = state
        .services
        .inspections
        .update_inspection(id, payload.into_changes()?)
        .await?;
    Ok(Json(inspection.into()))
}

#[utoipa::path(
    delete,
    path = "/api/fiscalizacoes/{id}/",
    tag = INSPECTION_TAG,
    security(("bearerAuth" = [])),
    params(("id" = i32, Path, description = "Inspection id")),
    responses(
        (status = 204, description = "Inspection deleted"),
        (status = 404, description = "Inspection not found", body = ErrorResponse)
    )
)]
async fn delete_inspection(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    state.services.inspections.delete_inspection(id).await?;
    tracing::info!(inspection_id = id, caller = %caller.username, "Inspection deleted");
    Ok(StatusCode::NO_CONTENT)
}
